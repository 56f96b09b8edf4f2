//! End-to-end script compilation tests.
//!
//! These cover the observable contract of `compile`: literal forms, output
//! capture, return-value handling, failure and determinism.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::io;
use std::sync::{Arc, Mutex};

use chrono::{FixedOffset, NaiveDate, TimeZone};
use exec_script::{
    Command, EnumValue, Error, Parameter, ParameterDirection, ScriptCompiler, ScriptConfig,
    SqlType, SqlValue, compile, encode_literal,
};
use proptest::prelude::*;
use uuid::Uuid;

fn literal(sql_type: SqlType, value: impl Into<SqlValue>) -> String {
    encode_literal(sql_type, Some(&value.into()), ParameterDirection::Input).unwrap()
}

// =============================================================================
// Documented examples
// =============================================================================

#[test]
fn test_get_user_example() {
    let command = Command::new("GetUser").input("@id", SqlType::Int, 42);
    let script = compile(&command).unwrap();

    assert_eq!(script.exec(), "EXEC @rc = GetUser\n\t@id = 42");
    assert_eq!(script.print().lines().count(), 1);
    assert_eq!(
        script.print(),
        "PRINT 'Return Code: ' + CAST(@rc AS varchar(max));\n"
    );
}

#[test]
fn test_status_example() {
    let command = Command::new("dbo.SetStatus").with_param(
        Parameter::new("@status", SqlType::VarChar)
            .value("ok")
            .size(50)
            .direction(ParameterDirection::InputOutput),
    );
    let script = compile(&command).unwrap();

    assert!(script.declare().contains("@status_out varchar(50);"));
    assert!(script.preset().contains("@status_out = 'ok';"));
    assert!(script.exec().contains("@status = @status_out OUTPUT"));

    let prints: Vec<_> = script.print().lines().collect();
    assert_eq!(
        prints,
        [
            "PRINT '@status OUTPUT: ' + CAST(@status_out AS varchar(max));",
            "PRINT 'Return Code: ' + CAST(@rc AS varchar(max));",
        ]
    );
}

#[test]
fn test_full_script_layout() {
    let command = Command::new("dbo.TransferFunds")
        .return_value("@RETURN_VALUE")
        .input("@from_account", SqlType::BigInt, 1001_i64)
        .input("@to_account", SqlType::BigInt, 2002_i64)
        .with_param(
            Parameter::new("@amount", SqlType::Money)
                .value(rust_decimal::Decimal::new(25_050, 2)),
        )
        .with_param(
            Parameter::new("@memo", SqlType::NVarChar)
                .value("Rent for O'Brien")
                .size_max(),
        )
        .with_param(
            Parameter::new("@balance", SqlType::Decimal)
                .precision(19)
                .scale(4)
                .direction(ParameterDirection::Output),
        )
        .with_param(
            Parameter::new("@attempts", SqlType::Int)
                .value(2)
                .direction(ParameterDirection::InputOutput),
        );

    let script = compile(&command).unwrap();

    assert_eq!(
        script.to_string(),
        "DECLARE @balance_out decimal(19,4);
DECLARE @attempts_out int;
DECLARE @rc int;

SET @balance_out = NULL;
SET @attempts_out = 2;
EXEC @rc = dbo.TransferFunds
\t@from_account = 1001,
\t@to_account = 2002,
\t@amount = 250.50,
\t@memo = 'Rent for O''Brien',
\t@balance = @balance_out OUTPUT,
\t@attempts = @attempts_out OUTPUT;

PRINT '@balance OUTPUT: ' + CAST(@balance_out AS varchar(max));
PRINT '@attempts OUTPUT: ' + CAST(@attempts_out AS varchar(max));
PRINT 'Return Code: ' + CAST(@rc AS varchar(max));
"
    );
}

// =============================================================================
// Literal forms
// =============================================================================

#[test]
fn test_embedded_quote_is_doubled() {
    assert_eq!(literal(SqlType::NVarChar, "O'Brien"), "'O''Brien'");
}

#[test]
fn test_enum_encodes_underlying_integer() {
    assert_eq!(literal(SqlType::Int, EnumValue::new("Closed", 3)), "3");
}

#[test]
fn test_uuid_is_uppercase_hyphenated() {
    let uuid = Uuid::parse_str("3f2504e0-4f89-11d3-9a0c-0305e82c3301").unwrap();
    assert_eq!(
        literal(SqlType::UniqueIdentifier, uuid),
        "'3F2504E0-4F89-11D3-9A0C-0305E82C3301'"
    );
}

#[test]
fn test_temporal_literals_in_script() {
    let offset = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
    let when = offset
        .with_ymd_and_hms(2023, 7, 4, 9, 15, 30)
        .single()
        .unwrap();
    let command = Command::new("dbo.Log")
        .input("@day", SqlType::Date, NaiveDate::from_ymd_opt(2023, 7, 4).unwrap())
        .input("@at", SqlType::DateTimeOffset, when);

    let script = compile(&command).unwrap();
    assert_eq!(
        script.exec(),
        "EXEC @rc = dbo.Log\n\t@day = '07/04/2023',\n\t@at = '07/04/2023 09:15:30.0000000+05:30'"
    );
}

#[test]
fn test_null_input() {
    let command = Command::new("dbo.Find").with_param(Parameter::new("@name", SqlType::NVarChar));
    let script = compile(&command).unwrap();
    assert_eq!(script.exec(), "EXEC @rc = dbo.Find\n\t@name = NULL");
}

// =============================================================================
// Failure
// =============================================================================

#[test]
fn test_udt_fails_without_output() {
    let command = Command::new("dbo.Geo")
        .input("@name", SqlType::NVarChar, "origin")
        .with_param(Parameter::new("@shape", SqlType::Udt).value("POINT(0 0)"));

    let result = compile(&command);
    assert!(matches!(
        result,
        Err(Error::UnsupportedType { ref parameter, .. }) if parameter == "@shape"
    ));
}

#[test]
fn test_structured_output_fails() {
    let command = Command::new("dbo.Bulk").with_param(
        Parameter::new("@rows", SqlType::Structured).direction(ParameterDirection::Output),
    );
    let err = compile(&command).unwrap_err();
    assert_eq!(err.unsupported_type(), Some(SqlType::Structured));
    assert_eq!(
        err.to_string(),
        "cannot script parameter @rows: unsupported SQL type: Structured"
    );
}

// =============================================================================
// Configuration and concurrency
// =============================================================================

#[test]
fn test_compiler_from_options_string() {
    let config = ScriptConfig::from_options_string("Return Code=@ret;Indent=2").unwrap();
    let compiler = ScriptCompiler::new(config).unwrap();
    let script = compiler
        .compile(&Command::new("dbo.Ping").input("@n", SqlType::TinyInt, 1_u8))
        .unwrap();

    assert_eq!(script.exec(), "EXEC @ret = dbo.Ping\n  @n = 1");
    assert_eq!(script.declare(), "DECLARE @ret int;\n");
}

#[test]
fn test_shared_compiler_across_threads() {
    let compiler = ScriptCompiler::default();
    let command = Command::new("dbo.Shared")
        .input("@a", SqlType::Int, 1)
        .output("@b", SqlType::NVarChar);
    let expected = compiler.compile(&command).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| compiler.compile(&command).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

/// Collects formatted log output for inspection.
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn with_captured_log(f: impl FnOnce()) -> String {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    log.contents()
}

#[test]
fn test_compile_emits_tracing_events() {
    let output = with_captured_log(|| {
        let command = Command::new("dbo.Traced")
            .return_value("@RETURN_VALUE")
            .input("@a", SqlType::Int, 1);
        assert!(compile(&command).is_ok());
    });

    assert!(output.contains("exec_script.compile"), "{output}");
    assert!(output.contains("procedure=dbo.Traced"), "{output}");
    assert!(output.contains("compiling procedure call"), "{output}");
    assert!(output.contains("skipping return value parameter"), "{output}");
    assert!(output.contains("compiled procedure call"), "{output}");
}

#[test]
fn test_unsupported_type_is_logged() {
    let output = with_captured_log(|| {
        let command = Command::new("dbo.Geo").with_param(Parameter::new("@shape", SqlType::Udt));
        assert!(compile(&command).is_err());
    });

    assert!(output.contains("parameter type cannot be scripted"), "{output}");
    assert!(output.contains("sql_type=Udt"), "{output}");
}

#[test]
fn test_unknown_option_is_logged() {
    let output = with_captured_log(|| {
        assert!(ScriptConfig::from_options_string("Colour=blue").is_ok());
    });

    assert!(output.contains("ignoring unknown script option"), "{output}");
}

// =============================================================================
// Properties
// =============================================================================

fn any_direction() -> impl Strategy<Value = ParameterDirection> {
    prop_oneof![
        Just(ParameterDirection::Input),
        Just(ParameterDirection::Output),
        Just(ParameterDirection::InputOutput),
        Just(ParameterDirection::ReturnValue),
    ]
}

fn any_scriptable_type() -> impl Strategy<Value = SqlType> {
    prop::sample::select(
        SqlType::ALL
            .into_iter()
            .filter(SqlType::is_scriptable)
            .collect::<Vec<_>>(),
    )
}

fn any_value() -> impl Strategy<Value = Option<SqlValue>> {
    prop::option::of(prop_oneof![
        any::<bool>().prop_map(SqlValue::Bool),
        any::<i64>().prop_map(SqlValue::Int),
        any::<f64>().prop_map(SqlValue::Float),
        ".{0,16}".prop_map(SqlValue::String),
        prop::collection::vec(any::<u8>(), 0..8).prop_map(SqlValue::from),
        any::<u128>().prop_map(|n| SqlValue::Uuid(Uuid::from_u128(n))),
    ])
}

fn any_parameter() -> impl Strategy<Value = Parameter> {
    (
        "@[a-z][a-z0-9_]{0,8}",
        any_scriptable_type(),
        any_value(),
        any_direction(),
        0_u32..9000,
        0_u8..38,
    )
        .prop_map(|(name, sql_type, value, direction, size, precision)| Parameter {
            name,
            sql_type,
            value,
            direction,
            size: size.into(),
            precision,
            scale: 0,
        })
}

fn any_command() -> impl Strategy<Value = Command> {
    prop::collection::vec(any_parameter(), 0..8).prop_map(|parameters| Command {
        name: "dbo.Generated".to_string(),
        parameters,
    })
}

proptest! {
    #[test]
    fn prop_text_quoting_is_reversible(text in ".{0,32}") {
        let encoded = literal(SqlType::NVarChar, text.as_str());
        prop_assert!(encoded.starts_with('\'') && encoded.ends_with('\''));
        let inner = &encoded[1..encoded.len() - 1];
        prop_assert_eq!(inner.replace("''", "'"), text);
    }

    #[test]
    fn prop_output_presets_are_null(
        sql_type in any_scriptable_type(),
        value in any_value(),
    ) {
        let encoded = encode_literal(sql_type, value.as_ref(), ParameterDirection::Output).unwrap();
        prop_assert_eq!(encoded, "NULL");
    }

    #[test]
    fn prop_input_output_matches_input(
        sql_type in any_scriptable_type(),
        value in any_value(),
    ) {
        let as_input = encode_literal(sql_type, value.as_ref(), ParameterDirection::Input).unwrap();
        let as_inout =
            encode_literal(sql_type, value.as_ref(), ParameterDirection::InputOutput).unwrap();
        prop_assert_eq!(as_input, as_inout);
    }

    #[test]
    fn prop_compile_is_idempotent(command in any_command()) {
        let first = compile(&command).unwrap();
        let second = compile(&command).unwrap();
        prop_assert_eq!(first.as_str(), second.as_str());
    }

    #[test]
    fn prop_return_values_are_invisible(command in any_command()) {
        let mut without = command.clone();
        without
            .parameters
            .retain(|p| p.direction != ParameterDirection::ReturnValue);

        let with_rv = compile(&command).unwrap();
        let without_rv = compile(&without).unwrap();
        prop_assert_eq!(with_rv, without_rv);
    }

    #[test]
    fn prop_block_line_counts(command in any_command()) {
        let script = compile(&command).unwrap();
        let outputs = command
            .parameters
            .iter()
            .filter(|p| p.direction.is_output())
            .count();
        let scripted = command.script_parameters().count();

        prop_assert_eq!(script.declare().lines().count(), outputs + 1);
        prop_assert_eq!(script.preset().lines().count(), outputs);
        prop_assert_eq!(script.print().lines().count(), outputs + 1);
        prop_assert_eq!(script.exec().matches(",\n\t@").count(), scripted.saturating_sub(1));
        prop_assert!(script.print().ends_with("PRINT 'Return Code: ' + CAST(@rc AS varchar(max));\n"));
    }
}
