//! Script compilation error types.

use exec_script_types::SqlType;
use thiserror::Error;

/// A parameter type that has no script representation.
///
/// Returned by the literal encoder and the variable-type resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported SQL type: {0}")]
pub struct UnsupportedType(pub SqlType);

/// Errors raised while configuring or running the script compiler.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A parameter's declared type cannot be rendered. No script is produced.
    #[error("cannot script parameter {parameter}: {source}")]
    UnsupportedType {
        /// Name of the offending parameter.
        parameter: String,
        /// The rejected type.
        #[source]
        source: UnsupportedType,
    },

    /// Invalid compiler configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// The rejected type, if this is an unsupported-type failure.
    #[must_use]
    pub fn unsupported_type(&self) -> Option<SqlType> {
        match self {
            Self::UnsupportedType { source, .. } => Some(source.0),
            Self::Config(_) => None,
        }
    }
}
