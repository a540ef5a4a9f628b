//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the consultation session without sending
//! messages to the backend.

/// A parsed chat command.
///
/// These commands control the session and are never dispatched as turns.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Enter the chatting phase with the current filters.
    Start,

    /// Reset the session back to the configuring phase.
    Reset,

    /// Select the consultation language.
    Language(String),

    /// Select the legal area.
    Area(String),

    /// Select the user type.
    UserType(String),

    /// Attach a document from a file path.
    Attach(String),

    /// Drop the held attachment.
    Detach,

    /// Dismiss the error banner.
    Dismiss,

    /// Show the current configuration.
    ShowConfig,

    /// List the supported filter codes.
    Filters,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command, or `None` if it
/// should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use nyaya::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/area IPC").is_some());
/// assert!(parse_command("What is Section 302?").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "start" => ChatCommand::Start,
        "reset" => ChatCommand::Reset,
        "language" | "lang" => match argument {
            Some(code) => ChatCommand::Language(code.to_string()),
            None => ChatCommand::Invalid("/language requires a language code".to_string()),
        },
        "area" => match argument {
            Some(code) => ChatCommand::Area(code.to_string()),
            None => ChatCommand::Invalid("/area requires a legal-area code".to_string()),
        },
        "usertype" => match argument {
            Some(code) => ChatCommand::UserType(code.to_string()),
            None => ChatCommand::Invalid("/usertype requires a user-type code".to_string()),
        },
        "attach" => match argument {
            Some(path) => ChatCommand::Attach(path.to_string()),
            None => ChatCommand::Invalid("/attach requires a file path".to_string()),
        },
        "detach" => ChatCommand::Detach,
        "dismiss" => ChatCommand::Dismiss,
        "config" => ChatCommand::ShowConfig,
        "filters" => ChatCommand::Filters,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

/// Help text describing the available commands.
pub fn help_text() -> &'static str {
    "Available commands:\n\
     /start                 Begin the consultation with the current filters\n\
     /reset                 Clear the conversation and return to configuration\n\
     /language <code>       Select the consultation language\n\
     /area <code>           Select the legal area (IPC, RTI, Labor, Other)\n\
     /usertype <code>       Select the user type (common, advocate, judge)\n\
     /attach <path>         Attach a document (.pdf, .txt, .docx; max 5MB)\n\
     /detach                Drop the attached document\n\
     /dismiss               Dismiss the error banner\n\
     /config                Show the current configuration\n\
     /filters               List the supported filter codes\n\
     /help                  Show this help\n\
     /quit                  Exit"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_messages_are_not_commands() {
        assert!(parse_command("What is Section 302?").is_none());
        assert!(parse_command("  plain text  ").is_none());
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse_command("/start"), Some(ChatCommand::Start));
        assert_eq!(parse_command("/reset"), Some(ChatCommand::Reset));
        assert_eq!(parse_command("/detach"), Some(ChatCommand::Detach));
        assert_eq!(parse_command("/dismiss"), Some(ChatCommand::Dismiss));
        assert_eq!(parse_command("/quit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/q"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/?"), Some(ChatCommand::Help));
        assert_eq!(parse_command("/filters"), Some(ChatCommand::Filters));
    }

    #[test]
    fn commands_with_arguments() {
        assert_eq!(
            parse_command("/language Hindi"),
            Some(ChatCommand::Language("Hindi".to_string()))
        );
        assert_eq!(
            parse_command("/area IPC"),
            Some(ChatCommand::Area("IPC".to_string()))
        );
        assert_eq!(
            parse_command("/usertype advocate"),
            Some(ChatCommand::UserType("advocate".to_string()))
        );
        assert_eq!(
            parse_command("/attach  notice.pdf "),
            Some(ChatCommand::Attach("notice.pdf".to_string()))
        );
    }

    #[test]
    fn missing_arguments_are_invalid() {
        assert!(matches!(
            parse_command("/language"),
            Some(ChatCommand::Invalid(_))
        ));
        assert!(matches!(parse_command("/area"), Some(ChatCommand::Invalid(_))));
        assert!(matches!(
            parse_command("/attach"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn unknown_commands_are_invalid() {
        match parse_command("/teleport") {
            Some(ChatCommand::Invalid(message)) => {
                assert!(message.contains("/teleport"));
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn command_case_is_normalized() {
        assert_eq!(parse_command("/START"), Some(ChatCommand::Start));
        assert_eq!(
            parse_command("/Language Tamil"),
            Some(ChatCommand::Language("Tamil".to_string()))
        );
    }
}
