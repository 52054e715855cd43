#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Run,
    Validate,
    Plan,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "run" => CliVerb::Run,
        "validate" => CliVerb::Validate,
        "plan" => CliVerb::Plan,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  run       Execute the pipeline against an input payload".to_string(),
        "            [--config PATH] [--input PATH] [--state-out PATH] [--log-out PATH] [--quiet]"
            .to_string(),
        "  validate  Load and validate the pipeline definition [--config PATH]".to_string(),
        "  plan      Print the linear ability sequence [--config PATH]".to_string(),
        "  help      Show this help".to_string(),
        String::new(),
        "Environment:".to_string(),
        "  MCP_SERVER_URL  Ability server base URL (default http://localhost:8000)".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_verbs_parse_and_unknown_falls_through() {
        assert_eq!(parse_cli_verb("run"), CliVerb::Run);
        assert_eq!(parse_cli_verb("validate"), CliVerb::Validate);
        assert_eq!(parse_cli_verb("plan"), CliVerb::Plan);
        assert_eq!(parse_cli_verb("--help"), CliVerb::Help);
        assert_eq!(parse_cli_verb("bogus"), CliVerb::Unknown);
    }

    #[test]
    fn help_lists_every_verb() {
        let help = cli_help_lines().join("\n");
        for verb in ["run", "validate", "plan"] {
            assert!(help.contains(verb), "help must mention `{verb}`");
        }
    }
}
