//! Line commands understood by the interactive viewer.

use api_client::MediaKind;
use thiserror::Error;
use ui::{Action, Key};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { username: String, password: String },
    Logout,
    Refresh,
    /// `select` keeps the current view, `open` enters the album view.
    SelectAlbum { id: String, enter: bool },
    Key(Key),
    Action(Action),
    Url(MediaKind),
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Missing argument for {0}")]
    MissingArgument(&'static str),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub const HELP: &str = "\
login <user> <password>   sign in
logout                    sign out
albums                    reload the album list
select <album>            make an album active (stays on the current view)
open <album>              open an album in the album view
preview <n>               quick preview photo n of the active album
show <n>                  jump to photo n in the album view
prev | next               previous/next photo
play                      start the slideshow
list                      show/hide the album list
key <name>                send a key (Escape, ArrowLeft, ArrowRight, Enter, Space, [ or ])
esc | left | right | enter | space | [ | ]
move                      pointer activity over the slideshow
url <thumbnail|preview|download>
status | help | quit";

/// Parses one input line. Album ids are taken verbatim from the rest of the line.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };
    let command = match word.to_ascii_lowercase().as_str() {
        "login" => {
            let mut args = rest.split_whitespace();
            let username = args.next().ok_or(CommandError::MissingArgument("login"))?;
            let password = args.next().ok_or(CommandError::MissingArgument("login"))?;
            Command::Login {
                username: username.to_string(),
                password: password.to_string(),
            }
        }
        "logout" => Command::Logout,
        "albums" | "refresh" => Command::Refresh,
        "select" | "open" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("select"));
            }
            Command::SelectAlbum {
                id: rest.to_string(),
                enter: word.eq_ignore_ascii_case("open"),
            }
        }
        "preview" => Command::Action(Action::OpenQuickPreview(index_arg(rest, "preview")?)),
        "show" => Command::Action(Action::SetCursor(index_arg(rest, "show")?)),
        "prev" => Command::Action(Action::PrevPhoto),
        "next" => Command::Action(Action::NextPhoto),
        "play" => Command::Action(Action::Play),
        "list" => Command::Action(Action::ToggleAlbumList),
        "move" => Command::Action(Action::SlideshowActivity),
        "key" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("key"));
            }
            let key = Key::from_name(rest)
                .ok_or_else(|| CommandError::InvalidArgument(rest.to_string()))?;
            Command::Key(key)
        }
        "esc" | "escape" => Command::Key(Key::Escape),
        "left" => Command::Key(Key::ArrowLeft),
        "right" => Command::Key(Key::ArrowRight),
        "enter" => Command::Key(Key::Enter),
        "space" => Command::Key(Key::Space),
        "[" => Command::Key(Key::Char('[')),
        "]" => Command::Key(Key::Char(']')),
        "url" => {
            let kind = if rest.is_empty() { "preview" } else { rest };
            Command::Url(kind.parse().map_err(CommandError::InvalidArgument)?)
        }
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn index_arg(rest: &str, command: &'static str) -> Result<usize, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    rest.parse()
        .map_err(|_| CommandError::InvalidArgument(rest.to_string()))
}
