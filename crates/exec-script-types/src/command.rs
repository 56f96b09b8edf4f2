//! Procedure invocation model.
//!
//! A [`Command`] mirrors one stored-procedure call as a driver would send it:
//! the procedure name plus its parameters, in order. Builders here are meant
//! for collaborators that copy the bindings out of a driver-level command
//! object.
//!
//! ## Example
//!
//! ```
//! use exec_script_types::{Command, Parameter, ParameterDirection, SqlType};
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
//! assert_eq!(command.parameters.len(), 2);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;
use crate::sql_type::{ParamSize, SqlType};
use crate::value::SqlValue;

/// How a parameter's value flows across the call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterDirection {
    /// The caller supplies a value.
    #[default]
    Input,
    /// The procedure writes a value back.
    Output,
    /// The caller supplies a value and the procedure writes one back.
    InputOutput,
    /// The procedure's own return code.
    ReturnValue,
}

impl ParameterDirection {
    /// Whether the parameter carries a value back to the caller through an
    /// `OUTPUT` argument.
    #[must_use]
    pub const fn is_output(&self) -> bool {
        matches!(self, Self::Output | Self::InputOutput)
    }

    /// The direction's name as drivers spell it.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Input => "Input",
            Self::Output => "Output",
            Self::InputOutput => "InputOutput",
            Self::ReturnValue => "ReturnValue",
        }
    }
}

impl fmt::Display for ParameterDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParameterDirection {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "input" | "in" => Ok(Self::Input),
            "output" | "out" => Ok(Self::Output),
            "inputoutput" | "inout" => Ok(Self::InputOutput),
            "returnvalue" | "return" => Ok(Self::ReturnValue),
            _ => Err(TypeError::UnknownDirection(s.to_string())),
        }
    }
}

/// One bound parameter of a procedure call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    /// Parameter name including its prefix (e.g. `@id`).
    pub name: String,
    /// Declared type.
    pub sql_type: SqlType,
    /// Bound value; `None` is SQL `NULL`.
    pub value: Option<SqlValue>,
    /// Value flow.
    pub direction: ParameterDirection,
    /// Declared length.
    pub size: ParamSize,
    /// Declared precision; `0` means the type default.
    pub precision: u8,
    /// Declared scale; `0` means the type default.
    pub scale: u8,
}

impl Parameter {
    /// Create a `NULL` input parameter with default size, precision and scale.
    #[must_use]
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            value: None,
            direction: ParameterDirection::Input,
            size: ParamSize::default(),
            precision: 0,
            scale: 0,
        }
    }

    /// Bind a value.
    #[must_use]
    pub fn value(mut self, value: impl Into<SqlValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Bind an optional value; `None` binds `NULL`.
    #[must_use]
    pub fn maybe_value<V: Into<SqlValue>>(mut self, value: Option<V>) -> Self {
        self.value = value.map(Into::into);
        self
    }

    /// Bind `NULL`.
    #[must_use]
    pub fn null(mut self) -> Self {
        self.value = None;
        self
    }

    /// Set the direction.
    #[must_use]
    pub fn direction(mut self, direction: ParameterDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set a bounded size.
    #[must_use]
    pub fn size(mut self, size: u32) -> Self {
        self.size = ParamSize::Bounded(size);
        self
    }

    /// Set the size to `MAX`.
    #[must_use]
    pub fn size_max(mut self) -> Self {
        self.size = ParamSize::Max;
        self
    }

    /// Set the size from a driver-reported value (negative means `MAX`).
    #[must_use]
    pub fn raw_size(mut self, raw: i32) -> Self {
        self.size = ParamSize::from_raw(raw);
        self
    }

    /// Set the precision.
    #[must_use]
    pub fn precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    /// Set the scale.
    #[must_use]
    pub fn scale(mut self, scale: u8) -> Self {
        self.scale = scale;
        self
    }
}

/// A stored-procedure invocation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Command {
    /// Procedure name, used verbatim.
    pub name: String,
    /// Parameters in binding order.
    pub parameters: Vec<Parameter>,
}

impl Command {
    /// Create a command with no parameters.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    /// Append a parameter.
    #[must_use]
    pub fn with_param(mut self, param: Parameter) -> Self {
        self.parameters.push(param);
        self
    }

    /// Append an input parameter.
    #[must_use]
    pub fn input(
        self,
        name: impl Into<String>,
        sql_type: SqlType,
        value: impl Into<SqlValue>,
    ) -> Self {
        self.with_param(Parameter::new(name, sql_type).value(value))
    }

    /// Append an output parameter.
    #[must_use]
    pub fn output(self, name: impl Into<String>, sql_type: SqlType) -> Self {
        self.with_param(Parameter::new(name, sql_type).direction(ParameterDirection::Output))
    }

    /// Append an input/output parameter.
    #[must_use]
    pub fn input_output(
        self,
        name: impl Into<String>,
        sql_type: SqlType,
        value: impl Into<SqlValue>,
    ) -> Self {
        self.with_param(
            Parameter::new(name, sql_type)
                .value(value)
                .direction(ParameterDirection::InputOutput),
        )
    }

    /// Append the return-value parameter.
    #[must_use]
    pub fn return_value(self, name: impl Into<String>) -> Self {
        self.with_param(
            Parameter::new(name, SqlType::Int).direction(ParameterDirection::ReturnValue),
        )
    }

    /// Append a parameter in place.
    pub fn push(&mut self, param: Parameter) {
        self.parameters.push(param);
    }

    /// Parameters that appear in a rendered script, in order.
    pub fn script_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .filter(|p| p.direction != ParameterDirection::ReturnValue)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Whether the command has no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}
