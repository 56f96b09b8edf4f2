//! # exec-script-types
//!
//! Data model for rendering a SQL Server stored-procedure call as a
//! standalone script.
//!
//! This crate holds the inputs of the script compiler in `exec-script`:
//!
//! - [`Command`] / [`Parameter`]: the procedure name and its ordered bindings
//! - [`SqlType`]: the closed set of declared parameter types
//! - [`SqlValue`]: the scalar values a parameter can carry
//! - [`ParameterDirection`] and [`ParamSize`]
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for every model type

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod command;
pub mod error;
pub mod sql_type;
pub mod value;

pub use command::{Command, Parameter, ParameterDirection};
pub use error::TypeError;
pub use sql_type::{ParamSize, SqlType};
pub use value::{EnumValue, SqlEnum, SqlValue, SqlXml};
