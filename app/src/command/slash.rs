/// One line of REPL input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplInput {
    Clear,
    Context,
    Hotels,
    History,
    Reconnect,
    Help,
    Quit,
    Unknown(String),
    Message(String),
    Empty,
}

impl ReplInput {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        if matches!(trimmed, "exit" | "quit") {
            return Self::Quit;
        }
        if !trimmed.starts_with('/') {
            return Self::Message(trimmed.to_string());
        }

        match trimmed.to_lowercase().as_str() {
            "/clear" | "/reset" => Self::Clear,
            "/context" | "/prefs" => Self::Context,
            "/hotels" => Self::Hotels,
            "/history" => Self::History,
            "/reconnect" => Self::Reconnect,
            "/help" | "/?" => Self::Help,
            "/quit" | "/exit" | "/q" => Self::Quit,
            _ => Self::Unknown(trimmed.to_string()),
        }
    }

    #[must_use]
    pub const fn help_text() -> &'static str {
        r"
Commands:
  /clear      start over with a fresh session
  /context    show the preferences extracted so far
  /hotels     show the current hotel suggestions
  /history    show the server's record of this session
  /reconnect  retry obtaining a session
  /help       show this help
  /quit       leave (also: exit, quit, Ctrl+C)

Anything else is sent to the assistant. Ctrl+C while waiting on the server
cancels that request.
"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_case_insensitively() {
        assert_eq!(ReplInput::parse("/CLEAR"), ReplInput::Clear);
        assert_eq!(ReplInput::parse("  /hotels "), ReplInput::Hotels);
        assert_eq!(ReplInput::parse("/q"), ReplInput::Quit);
        assert_eq!(ReplInput::parse("exit"), ReplInput::Quit);
    }

    #[test]
    fn plain_text_is_a_message() {
        assert_eq!(
            ReplInput::parse("  Paris for two  "),
            ReplInput::Message("Paris for two".to_string())
        );
        assert_eq!(ReplInput::parse("   "), ReplInput::Empty);
    }

    #[test]
    fn unknown_slash_commands_are_not_sent() {
        assert_eq!(
            ReplInput::parse("/book now"),
            ReplInput::Unknown("/book now".to_string())
        );
    }
}
