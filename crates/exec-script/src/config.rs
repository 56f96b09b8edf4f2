//! Script compiler configuration.

use crate::error::Error;

/// Naming and layout options for generated scripts.
///
/// The defaults produce the canonical script form: `@rc` for the return code,
/// `_out` capture variables and tab-indented EXEC arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptConfig {
    /// Variable receiving the procedure's return code (default: `@rc`).
    pub return_code_variable: String,

    /// Suffix appended to a parameter name to form its capture variable
    /// (default: `_out`).
    pub output_suffix: String,

    /// Indentation before each EXEC argument (default: one tab).
    pub indent: String,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            return_code_variable: "@rc".to_string(),
            output_suffix: "_out".to_string(),
            indent: "\t".to_string(),
        }
    }
}

impl ScriptConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an options string into configuration.
    ///
    /// Options are `;`-separated `key=value` pairs with case-insensitive keys:
    ///
    /// ```text
    /// Return Code=@status;Output Suffix=_result;Indent=4;
    /// ```
    ///
    /// `Indent` takes `tab` or a number of spaces. Unknown keys are ignored.
    pub fn from_options_string(options: &str) -> Result<Self, Error> {
        let mut config = Self::default();

        for part in options.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| Error::Config(format!("invalid key-value: {part}")))?;

            let key = key.trim().to_lowercase();
            let value = value.trim();

            match key.as_str() {
                "return code" | "returncode" | "rc" => {
                    config.return_code_variable = value.to_string();
                }
                "output suffix" | "outputsuffix" | "suffix" => {
                    config.output_suffix = value.to_string();
                }
                "indent" => {
                    config.indent = if value.eq_ignore_ascii_case("tab") {
                        "\t".to_string()
                    } else {
                        let width: usize = value
                            .parse()
                            .map_err(|_| Error::Config(format!("invalid indent: {value}")))?;
                        " ".repeat(width)
                    };
                }
                _ => {
                    // Ignore unknown options for forward compatibility
                    tracing::debug!(
                        key = %key,
                        value = value,
                        "ignoring unknown script option"
                    );
                }
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that generated names will be valid T-SQL variables and that the
    /// indent is whitespace (tabs and spaces only).
    pub fn validate(&self) -> Result<(), Error> {
        let rc = &self.return_code_variable;
        if !rc.starts_with('@') || rc.len() < 2 || !is_identifier(&rc[1..]) {
            return Err(Error::Config(format!(
                "invalid return code variable: {rc}"
            )));
        }
        if self.output_suffix.is_empty() || !is_identifier(&self.output_suffix) {
            return Err(Error::Config(format!(
                "invalid output suffix: {}",
                self.output_suffix
            )));
        }
        if !self.indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(Error::Config(format!(
                "invalid indent: {:?}",
                self.indent
            )));
        }
        Ok(())
    }

    /// Set the return code variable.
    #[must_use]
    pub fn return_code_variable(mut self, name: impl Into<String>) -> Self {
        self.return_code_variable = name.into();
        self
    }

    /// Set the capture variable suffix.
    #[must_use]
    pub fn output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.output_suffix = suffix.into();
        self
    }

    /// Set the EXEC argument indentation.
    #[must_use]
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }
}

fn is_identifier(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '@' | '#' | '$'))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScriptConfig::default();
        assert_eq!(config.return_code_variable, "@rc");
        assert_eq!(config.output_suffix, "_out");
        assert_eq!(config.indent, "\t");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_options_string_parsing() {
        let config = ScriptConfig::from_options_string(
            "Return Code=@status; OUTPUT SUFFIX=_result;Indent=4;",
        )
        .unwrap();

        assert_eq!(config.return_code_variable, "@status");
        assert_eq!(config.output_suffix, "_result");
        assert_eq!(config.indent, "    ");
    }

    #[test]
    fn test_options_string_tab_and_unknown_keys() {
        let config = ScriptConfig::from_options_string("indent=TAB;color=blue").unwrap();
        assert_eq!(config.indent, "\t");
        assert_eq!(config, ScriptConfig::default());
    }

    #[test]
    fn test_options_string_errors() {
        assert!(matches!(
            ScriptConfig::from_options_string("indent"),
            Err(Error::Config(msg)) if msg.contains("invalid key-value")
        ));
        assert!(matches!(
            ScriptConfig::from_options_string("indent=wide"),
            Err(Error::Config(msg)) if msg.contains("invalid indent")
        ));
        assert!(matches!(
            ScriptConfig::from_options_string("rc=status"),
            Err(Error::Config(msg)) if msg.contains("return code")
        ));
        assert!(matches!(
            ScriptConfig::from_options_string("suffix=a b"),
            Err(Error::Config(msg)) if msg.contains("output suffix")
        ));
    }

    #[test]
    fn test_indent_must_be_whitespace() {
        for indent in ["x;", "\n", " -- "] {
            let config = ScriptConfig::new().indent(indent);
            assert!(matches!(
                config.validate(),
                Err(Error::Config(msg)) if msg.contains("invalid indent")
            ));
        }
        assert!(ScriptConfig::new().indent("").validate().is_ok());
        assert!(ScriptConfig::new().indent(" \t ").validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ScriptConfig::new()
            .return_code_variable("@ret")
            .output_suffix("_o")
            .indent("  ");
        assert_eq!(config.return_code_variable, "@ret");
        assert_eq!(config.output_suffix, "_o");
        assert_eq!(config.indent, "  ");
    }
}
