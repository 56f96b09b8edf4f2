//! Variable types for output capture.
//!
//! Every `Output` or `InputOutput` parameter is captured in a local variable
//! declared with the type resolved here.

use exec_script_types::{ParamSize, SqlType};

use crate::error::UnsupportedType;

/// Resolve the T-SQL type used to declare a parameter's capture variable.
///
/// `size` renders as `max` when unbounded. A `precision` or `scale` of `0`
/// means the type default, so no suffix is emitted.
///
/// # Errors
///
/// Returns [`UnsupportedType`] for `Structured` and `Udt`.
///
/// # Example
///
/// ```
/// use exec_script::var_type::resolve_variable_type;
/// use exec_script_types::{ParamSize, SqlType};
///
/// assert_eq!(
///     resolve_variable_type(SqlType::Decimal, ParamSize::default(), 18, 2)?,
///     "decimal(18,2)"
/// );
/// assert_eq!(
///     resolve_variable_type(SqlType::NVarChar, ParamSize::Max, 0, 0)?,
///     "nvarchar(max)"
/// );
/// # Ok::<(), exec_script::UnsupportedType>(())
/// ```
pub fn resolve_variable_type(
    sql_type: SqlType,
    size: ParamSize,
    precision: u8,
    scale: u8,
) -> Result<String, UnsupportedType> {
    let declared = match sql_type {
        SqlType::BigInt => "bigint".to_string(),
        SqlType::Binary => format!("binary({size})"),
        SqlType::Bit => "bit".to_string(),
        SqlType::Char => format!("char({size})"),
        SqlType::Date => "date".to_string(),
        SqlType::DateTime => "datetime".to_string(),
        SqlType::DateTime2 => with_precision("datetime2", precision),
        SqlType::DateTimeOffset => with_precision("datetimeoffset", precision),
        SqlType::Decimal => {
            if precision != 0 {
                format!("decimal({precision},{scale})")
            } else {
                "decimal".to_string()
            }
        }
        SqlType::Float => with_precision("float", precision),
        SqlType::Image => "varbinary(max)".to_string(),
        SqlType::Int => "int".to_string(),
        SqlType::Money => "money".to_string(),
        SqlType::NChar => format!("nchar({size})"),
        SqlType::NText => "nvarchar(max)".to_string(),
        SqlType::NVarChar => format!("nvarchar({size})"),
        SqlType::Real => "real".to_string(),
        SqlType::SmallDateTime => "smalldatetime".to_string(),
        SqlType::SmallInt => "smallint".to_string(),
        SqlType::SmallMoney => "smallmoney".to_string(),
        SqlType::Text => "varchar(max)".to_string(),
        SqlType::Time => with_precision("time", precision),
        SqlType::Timestamp => "timestamp".to_string(),
        SqlType::TinyInt => "tinyint".to_string(),
        SqlType::UniqueIdentifier => "uniqueidentifier".to_string(),
        SqlType::VarBinary => format!("varbinary({size})"),
        SqlType::VarChar => format!("varchar({size})"),
        SqlType::Variant => "sql_variant".to_string(),
        SqlType::Xml => "xml".to_string(),
        SqlType::Structured | SqlType::Udt => return Err(UnsupportedType(sql_type)),
    };

    Ok(declared)
}

fn with_precision(base: &str, precision: u8) -> String {
    if precision != 0 {
        format!("{base}({precision})")
    } else {
        base.to_string()
    }
}
