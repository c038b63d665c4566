//! Fuzz target: `protocol::parser::parse`
//!
//! Drives arbitrary byte sequences through the line decoder and asserts
//! that it never panics and that bare keyword lines only decode when they
//! exactly match the vocabulary.
//!
//! cargo fuzz run fuzz_command_parser

#![no_main]

use libfuzzer_sys::fuzz_target;
use smartcharger::app::commands::Command;
use smartcharger::protocol::parser;

fuzz_target!(|data: &[u8]| {
    // The serial layer only hands the parser valid UTF-8 lines; feed it
    // the lossy conversion like the console would produce.
    let line = String::from_utf8_lossy(data);
    let cmd = parser::parse(&line);

    // JSON records go through serde and may use escapes, so only the
    // bare-keyword path is checked for exact vocabulary membership.
    if !matches!(cmd, Command::Unknown) && !line.trim_start().starts_with('{') {
        let keyword = line.trim().to_ascii_lowercase();
        assert!(
            matches!(keyword.as_str(), "mode:auto" | "mode:manual" | "on" | "off"),
            "unexpected keyword decode for {line:?}"
        );
    }
});
