//! # exec-script
//!
//! Render a SQL Server stored-procedure call as a standalone T-SQL script.
//!
//! Given the procedure name and its bound parameters, the compiler produces a
//! script that repeats the same call with literal values, captures output
//! parameters in local variables and prints them together with the return
//! code. Paste it into a query tool to replay or audit a call made through a
//! driver.
//!
//! Compilation is pure: nothing is executed and no connection is needed.
//!
//! ## Example
//!
//! ```rust
//! use exec_script::{Command, Parameter, ParameterDirection, SqlType, compile};
//!
//! let command = Command::new("dbo.SetStatus")
//!     .input("@id", SqlType::Int, 42)
//!     .with_param(
//!         Parameter::new("@status", SqlType::VarChar)
//!             .value("ok")
//!             .size(50)
//!             .direction(ParameterDirection::InputOutput),
//!     );
//!
//! let script = compile(&command)?;
//! assert_eq!(
//!     script.as_str(),
//!     "DECLARE @status_out varchar(50);
//! DECLARE @rc int;
//!
//! SET @status_out = 'ok';
//! EXEC @rc = dbo.SetStatus
//! \t@id = 42,
//! \t@status = @status_out OUTPUT;
//!
//! PRINT '@status OUTPUT: ' + CAST(@status_out AS varchar(max));
//! PRINT 'Return Code: ' + CAST(@rc AS varchar(max));
//! "
//! );
//! # Ok::<(), exec_script::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`literal`]: value to T-SQL literal encoding
//! - [`var_type`]: capture-variable type resolution
//! - [`script`]: script assembly
//! - [`config`]: naming and layout options

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod literal;
pub mod script;
pub mod var_type;

pub use config::ScriptConfig;
pub use error::{Error, UnsupportedType};
pub use exec_script_types::{
    Command, EnumValue, ParamSize, Parameter, ParameterDirection, SqlEnum, SqlType, SqlValue,
    SqlXml,
};
pub use literal::encode_literal;
pub use script::{Script, ScriptCompiler, compile};
pub use var_type::resolve_variable_type;
