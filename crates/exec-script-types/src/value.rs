//! Runtime parameter values.

use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// A scalar value bound to a procedure parameter.
///
/// Absence (SQL `NULL`) is modelled as `Option<SqlValue>::None` on the
/// parameter, not as a variant here.
///
/// The [`Display`](fmt::Display) implementation is the value's invariant
/// textual representation. It never depends on the host locale.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SqlValue {
    /// Boolean.
    Bool(bool),
    /// Any integer that fits in 64 bits.
    Int(i64),
    /// Symbolic enumeration member with its underlying integer.
    Enum(EnumValue),
    /// Single-precision float.
    Real(f32),
    /// Double-precision float.
    Float(f64),
    /// Exact decimal.
    Decimal(Decimal),
    /// Text.
    String(String),
    /// Byte sequence.
    Binary(Bytes),
    /// Calendar date.
    Date(NaiveDate),
    /// Time of day.
    Time(NaiveTime),
    /// Timestamp without offset.
    DateTime(NaiveDateTime),
    /// Timestamp with a UTC offset.
    DateTimeOffset(DateTime<FixedOffset>),
    /// UUID.
    Uuid(Uuid),
    /// XML document text.
    Xml(String),
}

impl SqlValue {
    /// Create an XML value from its text.
    #[must_use]
    pub fn xml(text: impl Into<String>) -> Self {
        Self::Xml(text.into())
    }

    /// The value as an integer, for integers, enumerations and booleans.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Enum(e) => Some(e.value),
            Self::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Whether this is a numeric value (integer, enumeration, float or decimal).
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Int(_) | Self::Enum(_) | Self::Real(_) | Self::Float(_) | Self::Decimal(_)
        )
    }

    /// The value as a wall-clock timestamp.
    ///
    /// Dates map to midnight; offset timestamps keep their local time.
    #[must_use]
    pub fn as_naive_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Date(d) => d.and_hms_opt(0, 0, 0),
            Self::DateTime(dt) => Some(*dt),
            Self::DateTimeOffset(dt) => Some(dt.naive_local()),
            _ => None,
        }
    }

    /// The value as a time of day.
    #[must_use]
    pub fn as_time(&self) -> Option<NaiveTime> {
        match self {
            Self::Time(t) => Some(*t),
            Self::DateTime(dt) => Some(dt.time()),
            Self::DateTimeOffset(dt) => Some(dt.time()),
            _ => None,
        }
    }

    /// The value as an offset timestamp.
    ///
    /// Values without an offset are taken to be UTC.
    #[must_use]
    pub fn as_datetime_offset(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::DateTimeOffset(dt) => Some(*dt),
            other => other
                .as_naive_datetime()
                .map(|naive| Utc.fix().from_utc_datetime(&naive)),
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => f.write_str(if *b { "1" } else { "0" }),
            Self::Int(v) => write!(f, "{v}"),
            Self::Enum(e) => write!(f, "{}", e.value),
            Self::Real(v) => write_float(f, *v, f64::from(*v)),
            Self::Float(v) => write_float(f, *v, *v),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::String(s) | Self::Xml(s) => f.write_str(s),
            Self::Binary(bytes) => {
                f.write_str("0x")?;
                for byte in bytes.iter() {
                    write!(f, "{byte:02X}")?;
                }
                Ok(())
            }
            Self::Date(d) => write!(f, "{d}"),
            Self::Time(t) => write!(f, "{t}"),
            Self::DateTime(dt) => write!(f, "{dt}"),
            Self::DateTimeOffset(dt) => write!(f, "{dt}"),
            Self::Uuid(u) => {
                let mut buf = Uuid::encode_buffer();
                f.write_str(u.hyphenated().encode_upper(&mut buf))
            }
        }
    }
}

/// Plain digits for everyday magnitudes, `1.5E+40` style outside them.
///
/// Non-finite values have no T-SQL literal and render as `NaN`, `Infinity`
/// or `-Infinity`.
fn write_float<T>(f: &mut fmt::Formatter<'_>, v: T, x: f64) -> fmt::Result
where
    T: fmt::Display + fmt::UpperExp,
{
    if x.is_nan() {
        return f.write_str("NaN");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" });
    }

    let magnitude = x.abs();
    if magnitude == 0.0 || (1e-5..1e15).contains(&magnitude) {
        return write!(f, "{v}");
    }

    let scientific = format!("{v:E}");
    match scientific.split_once('E') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            write!(f, "{mantissa}E+{exponent}")
        }
        _ => f.write_str(&scientific),
    }
}

/// A member of a Rust or driver-side enumeration bound as an integer.
///
/// Scripts always render the underlying integer, never the symbolic name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumValue {
    /// Symbolic member name, kept for diagnostics.
    pub name: String,
    /// Underlying integer.
    pub value: i64,
}

impl EnumValue {
    /// Create a new enumeration value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Types that bind to integer parameters as an enumeration member.
///
/// Usually implemented with `#[derive(SqlEnum)]` from `exec-script-derive`.
pub trait SqlEnum {
    /// The member name and its underlying integer.
    fn to_enum_value(&self) -> EnumValue;
}

impl From<EnumValue> for SqlValue {
    fn from(value: EnumValue) -> Self {
        Self::Enum(value)
    }
}

/// XML document text, kept distinct from plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SqlXml(pub String);

impl SqlXml {
    /// The document text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<SqlXml> for SqlValue {
    fn from(value: SqlXml) -> Self {
        Self::Xml(value.0)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for SqlValue {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for SqlValue {
    fn from(value: f32) -> Self {
        Self::Real(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Decimal> for SqlValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Binary(Bytes::from(value))
    }
}

impl From<&[u8]> for SqlValue {
    fn from(value: &[u8]) -> Self {
        Self::Binary(Bytes::copy_from_slice(value))
    }
}

impl From<Bytes> for SqlValue {
    fn from(value: Bytes) -> Self {
        Self::Binary(value)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveTime> for SqlValue {
    fn from(value: NaiveTime) -> Self {
        Self::Time(value)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<DateTime<FixedOffset>> for SqlValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::DateTimeOffset(value)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTimeOffset(value.with_timezone(&Utc.fix()))
    }
}

impl From<Uuid> for SqlValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}
