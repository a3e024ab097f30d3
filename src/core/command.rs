//! Command parser for the : command system

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show a section; carries the section id
    Section(&'static str),
    /// Show a section by raw id, ignored when unknown
    Go(String),

    Logout,
    Export,
    Refresh,
    Api {
        endpoint: String,
        method: Option<String>,
    },
    Help,
    Quit,

    // Unknown command
    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match cmd.to_lowercase().as_str() {
        // Sections
        "dashboard" | "overview" | "home" => Command::Section("dashboard"),
        "devices" | "dev" => Command::Section("devices"),
        "users" | "members" => Command::Section("users"),
        "records" | "rec" | "log" => Command::Section("records"),
        "settings" | "set" => Command::Section("settings"),
        "go" => match args {
            Some(id) => Command::Go(id),
            None => Command::Unknown(input.to_string()),
        },

        "logout" | "signout" => Command::Logout,
        "export" | "exp" => Command::Export,
        "refresh" | "reload" => Command::Refresh,
        "api" => {
            let Some(args) = args else {
                return Command::Unknown(input.to_string());
            };
            let mut words = args.split_whitespace();
            let endpoint = words.next().unwrap_or_default().to_string();
            let method = words.next().map(str::to_string);
            Command::Api { endpoint, method }
        }
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,

        _ => Command::Unknown(input.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_section_commands() {
        assert_eq!(parse_command("devices"), Command::Section("devices"));
        assert_eq!(parse_command("DEV"), Command::Section("devices"));
        assert_eq!(parse_command("home"), Command::Section("dashboard"));
        assert_eq!(parse_command(" rec "), Command::Section("records"));
        assert_eq!(parse_command("go users"), Command::Go("users".to_string()));
        assert_eq!(parse_command("go"), Command::Unknown("go".to_string()));
    }

    #[test]
    fn test_parse_api_command() {
        assert_eq!(
            parse_command("api /api/dashboard/stats"),
            Command::Api {
                endpoint: "/api/dashboard/stats".to_string(),
                method: None,
            }
        );
        assert_eq!(
            parse_command("api /api/auth/login post"),
            Command::Api {
                endpoint: "/api/auth/login".to_string(),
                method: Some("post".to_string()),
            }
        );
        assert_eq!(parse_command("api"), Command::Unknown("api".to_string()));
    }

    #[test]
    fn test_parse_session_commands() {
        assert_eq!(parse_command("logout"), Command::Logout);
        assert_eq!(parse_command("export"), Command::Export);
        assert_eq!(parse_command("reload"), Command::Refresh);
        assert_eq!(parse_command("q"), Command::Quit);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse_command("notacommand"),
            Command::Unknown("notacommand".to_string())
        );
    }
}
