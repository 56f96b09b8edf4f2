//! Declared parameter types.
//!
//! [`SqlType`] is the closed set of parameter types a driver can bind to a
//! stored-procedure call. It drives both literal encoding and the type used to
//! declare output capture variables.

use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;

/// Declared SQL Server type of a procedure parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SqlType {
    /// CHAR, fixed-length single-byte text.
    Char,
    /// NCHAR, fixed-length Unicode text.
    NChar,
    /// NTEXT, legacy Unicode large text.
    NText,
    /// NVARCHAR, variable-length Unicode text.
    NVarChar,
    /// TEXT, legacy large text.
    Text,
    /// VARCHAR, variable-length single-byte text.
    VarChar,
    /// BIGINT (i64).
    BigInt,
    /// INT (i32).
    Int,
    /// SMALLINT (i16).
    SmallInt,
    /// TINYINT (u8).
    TinyInt,
    /// DECIMAL/NUMERIC with precision and scale.
    Decimal,
    /// FLOAT (f64).
    Float,
    /// MONEY.
    Money,
    /// REAL (f32).
    Real,
    /// SMALLMONEY.
    SmallMoney,
    /// BINARY, fixed-length bytes.
    Binary,
    /// IMAGE, legacy large binary.
    Image,
    /// TIMESTAMP/ROWVERSION.
    Timestamp,
    /// VARBINARY, variable-length bytes.
    VarBinary,
    /// BIT (boolean).
    Bit,
    /// DATE.
    Date,
    /// DATETIME.
    DateTime,
    /// DATETIME2 with fractional-second precision.
    DateTime2,
    /// DATETIMEOFFSET with fractional-second precision.
    DateTimeOffset,
    /// SMALLDATETIME.
    SmallDateTime,
    /// TIME with fractional-second precision.
    Time,
    /// UNIQUEIDENTIFIER (UUID).
    UniqueIdentifier,
    /// SQL_VARIANT.
    Variant,
    /// XML.
    Xml,
    /// Table-valued parameter.
    Structured,
    /// CLR user-defined type.
    Udt,
}

impl SqlType {
    /// Every type tag, in declaration order.
    pub const ALL: [SqlType; 31] = [
        Self::Char,
        Self::NChar,
        Self::NText,
        Self::NVarChar,
        Self::Text,
        Self::VarChar,
        Self::BigInt,
        Self::Int,
        Self::SmallInt,
        Self::TinyInt,
        Self::Decimal,
        Self::Float,
        Self::Money,
        Self::Real,
        Self::SmallMoney,
        Self::Binary,
        Self::Image,
        Self::Timestamp,
        Self::VarBinary,
        Self::Bit,
        Self::Date,
        Self::DateTime,
        Self::DateTime2,
        Self::DateTimeOffset,
        Self::SmallDateTime,
        Self::Time,
        Self::UniqueIdentifier,
        Self::Variant,
        Self::Xml,
        Self::Structured,
        Self::Udt,
    ];

    /// The type's name as drivers spell it (e.g. `NVarChar`).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Char => "Char",
            Self::NChar => "NChar",
            Self::NText => "NText",
            Self::NVarChar => "NVarChar",
            Self::Text => "Text",
            Self::VarChar => "VarChar",
            Self::BigInt => "BigInt",
            Self::Int => "Int",
            Self::SmallInt => "SmallInt",
            Self::TinyInt => "TinyInt",
            Self::Decimal => "Decimal",
            Self::Float => "Float",
            Self::Money => "Money",
            Self::Real => "Real",
            Self::SmallMoney => "SmallMoney",
            Self::Binary => "Binary",
            Self::Image => "Image",
            Self::Timestamp => "Timestamp",
            Self::VarBinary => "VarBinary",
            Self::Bit => "Bit",
            Self::Date => "Date",
            Self::DateTime => "DateTime",
            Self::DateTime2 => "DateTime2",
            Self::DateTimeOffset => "DateTimeOffset",
            Self::SmallDateTime => "SmallDateTime",
            Self::Time => "Time",
            Self::UniqueIdentifier => "UniqueIdentifier",
            Self::Variant => "Variant",
            Self::Xml => "Xml",
            Self::Structured => "Structured",
            Self::Udt => "Udt",
        }
    }

    /// Whether values of this type are rendered as quoted text.
    #[must_use]
    pub const fn is_character(&self) -> bool {
        matches!(
            self,
            Self::Char | Self::NChar | Self::NText | Self::NVarChar | Self::Text | Self::VarChar
        )
    }

    /// Whether this type can be rendered into a script at all.
    ///
    /// Table-valued and user-defined types have no literal form.
    #[must_use]
    pub const fn is_scriptable(&self) -> bool {
        !matches!(self, Self::Structured | Self::Udt)
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SqlType {
    type Err = TypeError;

    /// Parse a type name, ignoring case (`nvarchar`, `NVarChar`, ...).
    ///
    /// `numeric`, `integer`, `rowversion` and `sql_variant` are accepted as
    /// aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if let Some(ty) = Self::ALL
            .iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(name))
        {
            return Ok(*ty);
        }

        match name.to_ascii_lowercase().as_str() {
            "numeric" => Ok(Self::Decimal),
            "integer" => Ok(Self::Int),
            "rowversion" => Ok(Self::Timestamp),
            "sql_variant" => Ok(Self::Variant),
            "uuid" | "guid" => Ok(Self::UniqueIdentifier),
            _ => Err(TypeError::UnknownSqlType(s.to_string())),
        }
    }
}

/// Declared length of a parameter.
///
/// Drivers conventionally report an unbounded length (`MAX`) as `-1`; see
/// [`ParamSize::from_raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamSize {
    /// A fixed number of characters or bytes.
    Bounded(u32),
    /// Unbounded (`MAX`).
    Max,
}

impl ParamSize {
    /// Convert a driver-reported size, where any negative value means `MAX`.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        if raw < 0 {
            Self::Max
        } else {
            Self::Bounded(raw.unsigned_abs())
        }
    }

    /// Whether this is the unbounded sentinel.
    #[must_use]
    pub const fn is_max(&self) -> bool {
        matches!(self, Self::Max)
    }
}

impl Default for ParamSize {
    fn default() -> Self {
        Self::Bounded(0)
    }
}

impl From<u32> for ParamSize {
    fn from(size: u32) -> Self {
        Self::Bounded(size)
    }
}

impl fmt::Display for ParamSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounded(size) => write!(f, "{size}"),
            Self::Max => f.write_str("max"),
        }
    }
}
