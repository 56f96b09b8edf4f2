//! Script assembly.
//!
//! A compiled script has four blocks, emitted in this order:
//!
//! ```text
//! DECLARE @status_out varchar(50);          <- declare
//! DECLARE @rc int;
//!
//! SET @status_out = 'ok';                   <- preset (only with output parameters)
//! EXEC @rc = dbo.SetStatus                  <- exec
//! 	@id = 42,
//! 	@status = @status_out OUTPUT;
//!
//! PRINT '@status OUTPUT: ' + CAST(@status_out AS varchar(max));   <- print
//! PRINT 'Return Code: ' + CAST(@rc AS varchar(max));
//! ```
//!
//! Return-value parameters never appear; the return code is always captured
//! in its own variable instead.

use std::fmt;

use exec_script_types::{Command, Parameter, ParameterDirection};

use crate::config::ScriptConfig;
use crate::error::{Error, UnsupportedType};
use crate::literal::encode_literal;
use crate::var_type::resolve_variable_type;

/// Span name for script compilation.
pub const COMPILE_SPAN: &str = "exec_script.compile";

/// A compiled, runnable script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    declare: String,
    preset: String,
    exec: String,
    print: String,
    text: String,
}

impl Script {
    fn assemble(declare: String, preset: String, exec: String, print: String) -> Self {
        let mut text =
            String::with_capacity(declare.len() + preset.len() + exec.len() + print.len() + 4);
        text.push_str(&declare);
        text.push('\n');
        text.push_str(&preset);
        text.push_str(&exec);
        text.push_str(";\n\n");
        text.push_str(&print);

        Self {
            declare,
            preset,
            exec,
            print,
            text,
        }
    }

    /// Variable declarations, one per line, ending with the return code.
    #[must_use]
    pub fn declare(&self) -> &str {
        &self.declare
    }

    /// Capture-variable assignments, one per line. Empty without output
    /// parameters.
    #[must_use]
    pub fn preset(&self) -> &str {
        &self.preset
    }

    /// The EXEC statement without its terminating `;`.
    #[must_use]
    pub fn exec(&self) -> &str {
        &self.exec
    }

    /// PRINT statements, one per line, ending with the return code.
    #[must_use]
    pub fn print(&self) -> &str {
        &self.print
    }

    /// The full script text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consume the script, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Script {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<Script> for String {
    fn from(script: Script) -> Self {
        script.text
    }
}

/// Compiles [`Command`]s into [`Script`]s.
///
/// The compiler holds only its configuration and can be shared freely
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct ScriptCompiler {
    config: ScriptConfig,
}

impl ScriptCompiler {
    /// Create a compiler with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration would produce invalid
    /// variable names.
    pub fn new(config: ScriptConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The compiler's configuration.
    #[must_use]
    pub fn config(&self) -> &ScriptConfig {
        &self.config
    }

    /// Compile a command into a script.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedType`] if any scripted parameter is
    /// `Structured` or `Udt`. No partial script is produced.
    pub fn compile(&self, command: &Command) -> Result<Script, Error> {
        let span = tracing::debug_span!(COMPILE_SPAN, procedure = %command.name);
        let _enter = span.enter();

        tracing::debug!(
            parameters = command.parameters.len(),
            "compiling procedure call"
        );

        let config = &self.config;
        let mut declarations = Vec::new();
        let mut presets = Vec::new();
        let mut arguments = Vec::with_capacity(command.parameters.len());
        let mut prints = Vec::new();

        for param in &command.parameters {
            if param.direction == ParameterDirection::ReturnValue {
                tracing::trace!(parameter = %param.name, "skipping return value parameter");
                continue;
            }

            let literal = encode_literal(param.sql_type, param.value.as_ref(), param.direction)
                .map_err(|source| unsupported(param, source))?;

            if param.direction.is_output() {
                let var_type = resolve_variable_type(
                    param.sql_type,
                    param.size,
                    param.precision,
                    param.scale,
                )
                .map_err(|source| unsupported(param, source))?;

                let variable = format!("{}{}", param.name, config.output_suffix);
                declarations.push(format!("DECLARE {variable} {var_type};"));
                presets.push(format!("SET {variable} = {literal};"));
                arguments.push(format!("{} = {variable} OUTPUT", param.name));
                prints.push(format!(
                    "PRINT '{} OUTPUT: ' + CAST({variable} AS varchar(max));",
                    param.name
                ));
            } else {
                arguments.push(format!("{} = {literal}", param.name));
            }
        }

        let rc = &config.return_code_variable;
        declarations.push(format!("DECLARE {rc} int;"));
        prints.push(format!("PRINT 'Return Code: ' + CAST({rc} AS varchar(max));"));

        let mut exec = format!("EXEC {rc} = {}", command.name);
        if !arguments.is_empty() {
            let separator = format!(",\n{}", config.indent);
            exec.push('\n');
            exec.push_str(&config.indent);
            exec.push_str(&arguments.join(&separator));
        }

        let script = Script::assemble(
            lines(&declarations),
            lines(&presets),
            exec,
            lines(&prints),
        );

        tracing::debug!(length = script.as_str().len(), "compiled procedure call");
        Ok(script)
    }
}

/// Compile a command with the default configuration.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if any scripted parameter is
/// `Structured` or `Udt`.
///
/// # Example
///
/// ```
/// use exec_script::compile;
/// use exec_script_types::{Command, SqlType};
///
/// let command = Command::new("GetUser").input("@id", SqlType::Int, 42);
/// let script = compile(&command)?;
///
/// assert_eq!(script.exec(), "EXEC @rc = GetUser\n\t@id = 42");
/// assert_eq!(
///     script.print(),
///     "PRINT 'Return Code: ' + CAST(@rc AS varchar(max));\n"
/// );
/// # Ok::<(), exec_script::Error>(())
/// ```
pub fn compile(command: &Command) -> Result<Script, Error> {
    ScriptCompiler::default().compile(command)
}

fn unsupported(param: &Parameter, source: UnsupportedType) -> Error {
    tracing::debug!(
        parameter = %param.name,
        sql_type = %source.0,
        "parameter type cannot be scripted"
    );
    Error::UnsupportedType {
        parameter: param.name.clone(),
        source,
    }
}

/// Join statements into a block, one per line.
fn lines(statements: &[String]) -> String {
    let mut block = String::with_capacity(statements.iter().map(|s| s.len() + 1).sum());
    for statement in statements {
        block.push_str(statement);
        block.push('\n');
    }
    block
}
