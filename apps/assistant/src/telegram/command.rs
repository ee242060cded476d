//! Slash-command parsing for incoming chat text.

pub const PROFILE_URL_PREFIX: &str = "https://www.linkedin.com/in/";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Start,
    Help,
    /// `/seturl <url>`; the argument is `None` when the user sent the bare command.
    SetUrl(Option<String>),
    Refresh,
    Unknown(String),
}

impl Command {
    /// Returns `None` for plain text that should go through intent classification.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let rest = text.strip_prefix('/')?;

        let (head, args) = rest
            .split_once(char::is_whitespace)
            .map(|(h, a)| (h, a.trim()))
            .unwrap_or((rest, ""));
        // Group chats address commands as `/cmd@BotName`.
        let name = head.split('@').next().unwrap_or(head).to_lowercase();

        let command = match name.as_str() {
            "start" => Command::Start,
            "help" => Command::Help,
            "seturl" => Command::SetUrl(args.split_whitespace().next().map(str::to_string)),
            "refresh" => Command::Refresh,
            _ => Command::Unknown(name),
        };
        Some(command)
    }
}

pub fn is_profile_url(url: &str) -> bool {
    url.starts_with(PROFILE_URL_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(Command::parse("Покажи мой профиль"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_known_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("  /help  "), Some(Command::Help));
        assert_eq!(Command::parse("/refresh"), Some(Command::Refresh));
        assert_eq!(Command::parse("/REFRESH"), Some(Command::Refresh));
    }

    #[test]
    fn test_seturl_with_and_without_argument() {
        assert_eq!(
            Command::parse("/seturl https://www.linkedin.com/in/jane extra"),
            Some(Command::SetUrl(Some("https://www.linkedin.com/in/jane".to_string())))
        );
        assert_eq!(Command::parse("/seturl"), Some(Command::SetUrl(None)));
        assert_eq!(Command::parse("/seturl   "), Some(Command::SetUrl(None)));
    }

    #[test]
    fn test_bot_mention_suffix_stripped() {
        assert_eq!(Command::parse("/help@JobAssistantBot"), Some(Command::Help));
    }

    #[test]
    fn test_unknown_command_kept_by_name() {
        assert_eq!(
            Command::parse("/jobs python"),
            Some(Command::Unknown("jobs".to_string()))
        );
    }

    #[test]
    fn test_profile_url_prefix() {
        assert!(is_profile_url("https://www.linkedin.com/in/johnsmith"));
        assert!(!is_profile_url("http://www.linkedin.com/in/johnsmith"));
        assert!(!is_profile_url("https://linkedin.com/in/johnsmith"));
    }
}
