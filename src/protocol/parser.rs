//! Inbound command decoder.
//!
//! Matching is whitespace-trimmed and ASCII-case-insensitive.  Lines
//! opening with `{` are treated as JSON command records; everything that
//! fails to decode collapses to [`Command::Unknown`].

use crate::app::commands::Command;
use crate::engine::OperatingMode;

use super::wire::CommandRecord;

/// Decode one received line into a [`Command`].
pub fn parse(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Unknown;
    }
    if trimmed.starts_with('{') {
        return parse_record(trimmed);
    }

    if trimmed.eq_ignore_ascii_case("MODE:AUTO") {
        Command::SetMode(OperatingMode::Auto)
    } else if trimmed.eq_ignore_ascii_case("MODE:MANUAL") {
        Command::SetMode(OperatingMode::Manual)
    } else if trimmed.eq_ignore_ascii_case("ON") {
        Command::SetSsr(true)
    } else if trimmed.eq_ignore_ascii_case("OFF") {
        Command::SetSsr(false)
    } else {
        Command::Unknown
    }
}

fn parse_record(line: &str) -> Command {
    let Ok(record) = serde_json::from_str::<CommandRecord>(line) else {
        return Command::Unknown;
    };
    let cmd = record.command.as_str();
    if cmd.eq_ignore_ascii_case("ssr_on") {
        Command::ForceSsr(true)
    } else if cmd.eq_ignore_ascii_case("ssr_off") {
        Command::ForceSsr(false)
    } else if cmd.eq_ignore_ascii_case("toggle_auto") {
        Command::ToggleAuto
    } else {
        Command::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_keywords_decode() {
        assert_eq!(parse("MODE:AUTO"), Command::SetMode(OperatingMode::Auto));
        assert_eq!(parse("MODE:MANUAL"), Command::SetMode(OperatingMode::Manual));
        assert_eq!(parse("ON"), Command::SetSsr(true));
        assert_eq!(parse("OFF"), Command::SetSsr(false));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(parse("mode:auto"), Command::SetMode(OperatingMode::Auto));
        assert_eq!(parse("Mode:Manual"), Command::SetMode(OperatingMode::Manual));
        assert_eq!(parse("on"), Command::SetSsr(true));
        assert_eq!(parse("oFf"), Command::SetSsr(false));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(parse("  ON \r"), Command::SetSsr(true));
        assert_eq!(parse("\tMODE:AUTO\n"), Command::SetMode(OperatingMode::Auto));
    }

    #[test]
    fn json_records_decode() {
        assert_eq!(parse(r#"{"command":"ssr_on"}"#), Command::ForceSsr(true));
        assert_eq!(parse(r#"{"command":"ssr_off"}"#), Command::ForceSsr(false));
        assert_eq!(parse(r#"{"command":"toggle_auto"}"#), Command::ToggleAuto);
    }

    #[test]
    fn json_extra_fields_are_tolerated() {
        assert_eq!(
            parse(r#"{"command":"ssr_on","source":"dashboard","seq":42}"#),
            Command::ForceSsr(true)
        );
    }

    #[test]
    fn truncated_json_is_unknown() {
        assert_eq!(parse(r#"{"command":"ssr_o"#), Command::Unknown);
        assert_eq!(parse("{"), Command::Unknown);
    }

    #[test]
    fn json_with_unknown_command_is_unknown() {
        assert_eq!(parse(r#"{"command":"reboot"}"#), Command::Unknown);
        assert_eq!(parse(r#"{"other":"ssr_on"}"#), Command::Unknown);
    }

    #[test]
    fn garbage_is_unknown() {
        assert_eq!(parse(""), Command::Unknown);
        assert_eq!(parse("   "), Command::Unknown);
        assert_eq!(parse("MODE:ECO"), Command::Unknown);
        assert_eq!(parse("ONN"), Command::Unknown);
        assert_eq!(parse("\u{0}\u{1}\u{2}"), Command::Unknown);
    }
}
