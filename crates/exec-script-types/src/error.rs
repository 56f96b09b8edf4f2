//! Model conversion errors.

use thiserror::Error;

/// Errors raised when converting driver-reported names or sizes into the model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Type name outside the known [`SqlType`](crate::SqlType) set.
    #[error("unknown SQL type: {0}")]
    UnknownSqlType(String),

    /// Direction name outside the known
    /// [`ParameterDirection`](crate::ParameterDirection) set.
    #[error("unknown parameter direction: {0}")]
    UnknownDirection(String),
}
