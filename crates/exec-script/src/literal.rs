//! SQL literal encoding.
//!
//! Turns one parameter's declared type and bound value into the T-SQL text
//! that reproduces it inside a script. The declared type decides the literal
//! form; the value is adapted to it.
//!
//! All output is locale-independent: dates are always `MM/dd/yyyy`, numbers
//! always use `.` as the decimal separator.
//!
//! | Declared type                                   | Literal                               |
//! |-------------------------------------------------|---------------------------------------|
//! | `Char`, `NChar`, `NText`, `NVarChar`, `Text`, `VarChar` | `'text'`, quotes doubled      |
//! | `BigInt`, `Int`, `SmallInt`, `TinyInt`          | `42` (enumerations as their integer)  |
//! | `Decimal`, `Float`, `Money`, `Real`, `SmallMoney` | `12.5`, `1E+40`, `'NaN'`            |
//! | `Binary`, `Image`, `Timestamp`, `VarBinary`     | `'0x0A0B'`                            |
//! | `Bit`                                           | `1` / `0`                             |
//! | `Date`                                          | `'01/31/2024'`                        |
//! | `DateTime`                                      | `'01/31/2024 13:45:00.250'`           |
//! | `DateTime2`                                     | `'01/31/2024 13:45:00.2500000'`       |
//! | `DateTimeOffset`                                | `'01/31/2024 13:45:00.2500000+02:00'` |
//! | `SmallDateTime`                                 | `'01/31/2024 13:45'`                  |
//! | `Time`                                          | `'13:45:00'`                          |
//! | `UniqueIdentifier`                              | `'3F2504E0-4F89-11D3-9A0C-0305E82C3301'` |
//! | `Variant`, `Xml`                                | `'text'`, quotes doubled              |

use std::borrow::Cow;

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use exec_script_types::{ParameterDirection, SqlType, SqlValue};
use uuid::Uuid;

use crate::error::UnsupportedType;

/// The literal for SQL `NULL`.
pub const NULL: &str = "NULL";

/// Encode a bound value as a T-SQL literal for its declared type.
///
/// Absent values and pure `Output` parameters encode as `NULL`; an
/// `InputOutput` parameter still uses its bound value.
///
/// # Errors
///
/// Returns [`UnsupportedType`] for `Structured` and `Udt`, whatever the
/// value or direction.
///
/// # Example
///
/// ```
/// use exec_script::literal::encode_literal;
/// use exec_script_types::{ParameterDirection, SqlType, SqlValue};
///
/// let value = SqlValue::from("O'Brien");
/// let literal = encode_literal(SqlType::NVarChar, Some(&value), ParameterDirection::Input)?;
/// assert_eq!(literal, "'O''Brien'");
/// # Ok::<(), exec_script::UnsupportedType>(())
/// ```
pub fn encode_literal(
    sql_type: SqlType,
    value: Option<&SqlValue>,
    direction: ParameterDirection,
) -> Result<String, UnsupportedType> {
    if !sql_type.is_scriptable() {
        return Err(UnsupportedType(sql_type));
    }

    let value = match value {
        Some(value) if direction != ParameterDirection::Output => value,
        _ => return Ok(NULL.to_string()),
    };

    let literal = match sql_type {
        SqlType::Char
        | SqlType::NChar
        | SqlType::NText
        | SqlType::NVarChar
        | SqlType::Text
        | SqlType::VarChar => quote(&textual(value)),

        SqlType::BigInt | SqlType::Int | SqlType::SmallInt | SqlType::TinyInt => {
            match value.as_i64() {
                Some(v) => v.to_string(),
                None => numeric(value),
            }
        }

        SqlType::Decimal
        | SqlType::Float
        | SqlType::Money
        | SqlType::Real
        | SqlType::SmallMoney => numeric(value),

        SqlType::Binary | SqlType::Image | SqlType::Timestamp | SqlType::VarBinary => {
            quote(&textual(value))
        }

        SqlType::Bit => match value.as_i64() {
            Some(v) => String::from(if v != 0 { "1" } else { "0" }),
            None => quote(&textual(value)),
        },

        SqlType::Date => quote_temporal(value, value.as_naive_datetime(), |dt| {
            format_date(dt.date())
        }),
        SqlType::DateTime => quote_temporal(value, value.as_naive_datetime(), |dt| {
            format!("{}.{:03}", format_date_time(&dt), fraction(dt.time(), 3))
        }),
        SqlType::DateTime2 => quote_temporal(value, value.as_naive_datetime(), |dt| {
            format!("{}.{:07}", format_date_time(&dt), fraction(dt.time(), 7))
        }),
        SqlType::DateTimeOffset => quote_temporal(value, value.as_datetime_offset(), |dt| {
            let local = dt.naive_local();
            format!(
                "{}.{:07}{}",
                format_date_time(&local),
                fraction(local.time(), 7),
                format_offset(*dt.offset())
            )
        }),
        SqlType::SmallDateTime => quote_temporal(value, value.as_naive_datetime(), |dt| {
            format!(
                "{} {:02}:{:02}",
                format_date(dt.date()),
                dt.hour(),
                dt.minute()
            )
        }),
        SqlType::Time => quote_temporal(value, value.as_time(), format_time),

        SqlType::UniqueIdentifier => match value {
            SqlValue::Uuid(uuid) => quote(&upper_uuid(uuid)),
            SqlValue::String(text) => match Uuid::parse_str(text.trim()) {
                Ok(uuid) => quote(&upper_uuid(&uuid)),
                Err(_) => quote(text),
            },
            other => quote(&textual(other)),
        },

        SqlType::Variant | SqlType::Xml => quote(&textual(value)),

        SqlType::Structured | SqlType::Udt => return Err(UnsupportedType(sql_type)),
    };

    Ok(literal)
}

/// Wrap text in single quotes, doubling any embedded single quote.
///
/// ```
/// assert_eq!(exec_script::literal::quote("it's"), "'it''s'");
/// ```
#[must_use]
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// The value's invariant textual representation, borrowed where possible.
fn textual(value: &SqlValue) -> Cow<'_, str> {
    match value {
        SqlValue::String(s) | SqlValue::Xml(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

/// Unquoted numeric text.
///
/// Non-finite floats are quoted since T-SQL has no literal for them. Any
/// other non-numeric value that reaches a numeric type keeps its text, with
/// quotes doubled so it cannot terminate a surrounding literal.
fn numeric(value: &SqlValue) -> String {
    match value {
        SqlValue::Real(v) if !v.is_finite() => quote(&textual(value)),
        SqlValue::Float(v) if !v.is_finite() => quote(&textual(value)),
        _ if value.is_numeric() => value.to_string(),
        _ => textual(value).replace('\'', "''"),
    }
}

/// Quote a converted temporal value, or the value's own text when it carries
/// no date or time.
fn quote_temporal<T>(
    value: &SqlValue,
    converted: Option<T>,
    render: impl FnOnce(T) -> String,
) -> String {
    match converted {
        Some(v) => quote(&render(v)),
        None => quote(&textual(value)),
    }
}

/// `MM/dd/yyyy`
fn format_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.month(), date.day(), date.year())
}

/// `HH:mm:ss`
fn format_time(time: NaiveTime) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

/// `MM/dd/yyyy HH:mm:ss`
fn format_date_time(dt: &NaiveDateTime) -> String {
    format!("{} {}", format_date(dt.date()), format_time(dt.time()))
}

/// Leading `digits` of the fractional second, truncated.
fn fraction(time: NaiveTime, digits: u32) -> u32 {
    // Leap seconds are reported as nanoseconds past 1_000_000_000.
    let nanos = time.nanosecond() % 1_000_000_000;
    nanos / 10_u32.pow(9 - digits)
}

/// `+hh:mm` / `-hh:mm`
fn format_offset(offset: FixedOffset) -> String {
    let seconds = offset.local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let seconds = seconds.unsigned_abs();
    format!("{sign}{:02}:{:02}", seconds / 3600, (seconds % 3600) / 60)
}

fn upper_uuid(uuid: &Uuid) -> String {
    let mut buf = Uuid::encode_buffer();
    uuid.hyphenated().encode_upper(&mut buf).to_string()
}
