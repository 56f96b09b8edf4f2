//! Parse arbitrary option strings; accepted configs must build a compiler.

#![no_main]

use exec_script::{Command, ScriptCompiler, ScriptConfig, SqlType};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(config) = ScriptConfig::from_options_string(s) {
        let compiler = ScriptCompiler::new(config).expect("parsed config is valid");
        let command = Command::new("dbo.Fuzz").output("@x", SqlType::Int);
        assert!(compiler.compile(&command).is_ok());
    }
});
