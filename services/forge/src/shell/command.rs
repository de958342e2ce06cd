//! services/forge/src/shell/command.rs
//!
//! Parses one line of shell input into a [`Command`].

use page_forge_core::domain::DocumentKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `None` means the description is read as a block on the following lines.
    Generate(Option<String>),
    Edit(String),
    Show(Option<DocumentKind>),
    Save(Option<DocumentKind>),
    Register { username: String, email: String },
    Login { username: String },
    Logout,
    WhoAmI,
    Submissions,
    TestInsert,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown command `{0}`. Type `help` for the list of commands.")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
Commands:
  generate [description]       generate a page (no description: type lines, end with a lone `.`)
  edit <instructions>          revise the generated page
  show [generated|edited]      print a page's HTML (default: latest)
  save [generated|edited]      write a page to the output directory again
  register <username> <email>  create an account (password is asked for)
  login <username>             log in (password is asked for)
  logout                       log out
  whoami                       show who is logged in
  submissions                  list stored contact-form submissions
  test-insert                  store a test submission
  help                         show this help
  /quit                        leave the shell";

/// Returns `Ok(None)` for a blank line.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "generate" | "gen" => Command::Generate((!rest.is_empty()).then(|| rest.to_string())),
        "edit" => Command::Edit(rest.to_string()),
        "show" => Command::Show(parse_kind(rest, "show [generated|edited]")?),
        "save" | "download" => Command::Save(parse_kind(rest, "save [generated|edited]")?),
        "register" => {
            let mut args = rest.split_whitespace();
            match (args.next(), args.next(), args.next()) {
                (Some(username), Some(email), None) => Command::Register {
                    username: username.to_string(),
                    email: email.to_string(),
                },
                _ => return Err(ParseError::Usage("register <username> <email>")),
            }
        }
        "login" => {
            let mut args = rest.split_whitespace();
            match (args.next(), args.next()) {
                (Some(username), None) => Command::Login {
                    username: username.to_string(),
                },
                _ => return Err(ParseError::Usage("login <username>")),
            }
        }
        "logout" => Command::Logout,
        "whoami" => Command::WhoAmI,
        "submissions" | "subs" => Command::Submissions,
        "test-insert" => Command::TestInsert,
        "help" | "?" => Command::Help,
        "/quit" | "/exit" | "quit" | "exit" => Command::Quit,
        _ => return Err(ParseError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

fn parse_kind(arg: &str, usage: &'static str) -> Result<Option<DocumentKind>, ParseError> {
    match arg.to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "generated" => Ok(Some(DocumentKind::Generated)),
        "edited" => Ok(Some(DocumentKind::Edited)),
        _ => Err(ParseError::Usage(usage)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn generate_keeps_the_whole_description() {
        assert_eq!(
            parse("generate a one-page portfolio site with a contact form"),
            Ok(Some(Command::Generate(Some(
                "a one-page portfolio site with a contact form".to_string()
            ))))
        );
        assert_eq!(parse("generate"), Ok(Some(Command::Generate(None))));
    }

    #[test]
    fn bare_edit_is_passed_on_with_empty_instructions() {
        assert_eq!(parse("edit"), Ok(Some(Command::Edit(String::new()))));
        assert_eq!(
            parse("EDIT  make the nav sticky "),
            Ok(Some(Command::Edit("make the nav sticky".to_string())))
        );
    }

    #[test]
    fn document_kind_arguments() {
        assert_eq!(parse("show"), Ok(Some(Command::Show(None))));
        assert_eq!(
            parse("save edited"),
            Ok(Some(Command::Save(Some(DocumentKind::Edited))))
        );
        assert_eq!(
            parse("show draft"),
            Err(ParseError::Usage("show [generated|edited]"))
        );
    }

    #[test]
    fn account_commands_need_their_arguments() {
        assert_eq!(
            parse("register alice alice@example.com"),
            Ok(Some(Command::Register {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
            }))
        );
        assert!(matches!(parse("register alice"), Err(ParseError::Usage(_))));
        assert!(matches!(parse("login"), Err(ParseError::Usage(_))));
        assert_eq!(
            parse("login alice"),
            Ok(Some(Command::Login {
                username: "alice".to_string()
            }))
        );
    }

    #[test]
    fn unknown_words_are_reported() {
        assert_eq!(
            parse("deploy now"),
            Err(ParseError::Unknown("deploy".to_string()))
        );
        assert_eq!(parse("/exit"), Ok(Some(Command::Quit)));
    }
}
