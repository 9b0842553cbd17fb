use crate::session::message_types::SessionEvent;
use thiserror::Error;

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Event(SessionEvent),
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    BadArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("malformed JSON event: {0}")]
    Json(String),
}

/// Parses one line of input. Lines starting with `{` are taken as JSON
/// encoded events, anything else as a short text command.
pub fn parse(line: &str) -> Result<Option<Command>, CommandParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if line.starts_with('{') {
        return serde_json::from_str(line)
            .map(|event| Some(Command::Event(event)))
            .map_err(|e| CommandParseError::Json(e.to_string()));
    }
    let (name, argument) = match line.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (line, ""),
    };
    let event = match name {
        "quit" | "exit" => return Ok(Some(Command::Quit)),
        "search" => SessionEvent::Search {
            text: argument.to_string(),
        },
        "page" => SessionEvent::PageRequested {
            page: argument.parse().map_err(|_| CommandParseError::BadArgument {
                command: "page",
                expected: "a page number",
            })?,
        },
        "more" => SessionEvent::MoreRequested,
        "next" => SessionEvent::StepRequested { forward: true },
        "prev" => SessionEvent::StepRequested { forward: false },
        "click" => SessionEvent::MarkerClicked {
            id: match argument {
                "" | "none" => None,
                id => Some(id.parse().map_err(|_| CommandParseError::BadArgument {
                    command: "click",
                    expected: "a marker id or `none`",
                })?),
            },
        },
        "probe" => SessionEvent::PageProbe {
            forward: direction(argument, "probe")?,
        },
        "zoom" => SessionEvent::ZoomRequested {
            magnify: match argument {
                "in" => true,
                "out" => false,
                _ => {
                    return Err(CommandParseError::BadArgument {
                        command: "zoom",
                        expected: "`in` or `out`",
                    })
                }
            },
        },
        other => return Err(CommandParseError::Unknown(other.to_string())),
    };
    Ok(Some(Command::Event(event)))
}

fn direction(argument: &str, command: &'static str) -> Result<bool, CommandParseError> {
    match argument {
        "next" => Ok(true),
        "prev" => Ok(false),
        _ => Err(CommandParseError::BadArgument {
            command,
            expected: "`next` or `prev`",
        }),
    }
}
