//! Compile arbitrary commands and check the script shape.

#![no_main]

use arbitrary::Arbitrary;
use exec_script::{Command, ParamSize, Parameter, ParameterDirection, SqlType, SqlValue, compile};
use libfuzzer_sys::fuzz_target;
use uuid::Uuid;

#[derive(Debug, Arbitrary)]
enum FuzzValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Binary(Vec<u8>),
    Uuid(u128),
}

#[derive(Debug, Arbitrary)]
struct FuzzParameter {
    name: String,
    type_index: u8,
    direction: u8,
    value: FuzzValue,
    size: i32,
    precision: u8,
    scale: u8,
}

#[derive(Debug, Arbitrary)]
struct FuzzCommand {
    name: String,
    parameters: Vec<FuzzParameter>,
}

fn to_parameter(p: FuzzParameter) -> Parameter {
    let sql_type = SqlType::ALL[usize::from(p.type_index) % SqlType::ALL.len()];
    let direction = match p.direction % 4 {
        0 => ParameterDirection::Input,
        1 => ParameterDirection::Output,
        2 => ParameterDirection::InputOutput,
        _ => ParameterDirection::ReturnValue,
    };
    let value = match p.value {
        FuzzValue::Null => None,
        FuzzValue::Bool(b) => Some(SqlValue::Bool(b)),
        FuzzValue::Int(n) => Some(SqlValue::Int(n)),
        FuzzValue::Float(f) => Some(SqlValue::Float(f)),
        FuzzValue::Text(s) => Some(SqlValue::String(s)),
        FuzzValue::Binary(b) => Some(SqlValue::from(b)),
        FuzzValue::Uuid(n) => Some(SqlValue::Uuid(Uuid::from_u128(n))),
    };

    Parameter {
        name: p.name,
        sql_type,
        value,
        direction,
        size: ParamSize::from_raw(p.size),
        precision: p.precision,
        scale: p.scale,
    }
}

fuzz_target!(|input: FuzzCommand| {
    let command = Command {
        name: input.name,
        parameters: input.parameters.into_iter().map(to_parameter).collect(),
    };

    let blocked = command
        .script_parameters()
        .any(|p| !p.sql_type.is_scriptable());

    match compile(&command) {
        Ok(script) => {
            assert!(!blocked);
            assert!(
                script
                    .print()
                    .ends_with("PRINT 'Return Code: ' + CAST(@rc AS varchar(max));\n")
            );
            assert!(script.as_str().starts_with(script.declare()));
            assert_eq!(compile(&command).ok(), Some(script));
        }
        Err(err) => {
            assert!(blocked);
            assert!(err.unsupported_type().is_some());
        }
    }
});
