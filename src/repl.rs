use crate::command::Command;
use crate::session::{Error, Session};

const MENU_BRIEF: &str = "\
Options:
f str   Find str
p n     Print next n
a str   Add str
d str   Delete str
?       Help
x       Exit";

const MENU_FULL: &str = "\
Menu options:
f <suffix> : find the suffix in the dictionary
p <n>      : print the next n words ending in the suffix given to f
a <word>   : add the word to the dictionary
d <word>   : delete the word, which must end in the suffix given to f
?          : print this menu
x          : exit";

#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Response {
    Found { suffix: String },
    Words { words: Vec<String>, more: bool },
    Added { word: String, new: bool },
    Deleted { word: String },
    Help,
    Error { kind: ErrorKind, message: String },
}

#[derive(serde::Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum ErrorKind {
    BadCommand,
    InvalidInput,
    SuffixNotFound,
    WordNotFound,
    NoActiveSuffix,
    Exhausted,
    StaleCursor,
}

impl From<&Error> for ErrorKind {
    fn from(err: &Error) -> Self {
        match err {
            Error::Words(crate::words::Error::InvalidInput(_)) => ErrorKind::InvalidInput,
            Error::Words(crate::words::Error::StaleCursor) => ErrorKind::StaleCursor,
            Error::SuffixNotFound(_) => ErrorKind::SuffixNotFound,
            Error::WordNotFound(_) => ErrorKind::WordNotFound,
            Error::NoActiveSuffix => ErrorKind::NoActiveSuffix,
            Error::Exhausted(_) => ErrorKind::Exhausted,
        }
    }
}

impl Response {
    fn error(kind: ErrorKind, err: impl std::fmt::Display) -> Self {
        Response::Error {
            kind,
            message: err.to_string(),
        }
    }
}

fn dispatch(session: &mut Session, command: Command) -> Option<Response> {
    let result = match command {
        Command::Find(suffix) => session
            .find(&suffix)
            .map(|suffix| Response::Found { suffix }),
        Command::Print(count) => session.print(count).map(|page| Response::Words {
            words: page.words,
            more: page.more,
        }),
        Command::Add(word) => session.add(&word).map(|new| Response::Added {
            word: word.to_ascii_lowercase(),
            new,
        }),
        Command::Delete(word) => session.delete(&word).map(|()| Response::Deleted {
            word: word.to_ascii_lowercase(),
        }),
        Command::Help => Ok(Response::Help),
        Command::Exit => return None,
    };

    Some(result.unwrap_or_else(|err| {
        log::debug!("command failed: {err}");
        Response::error((&err).into(), err)
    }))
}

fn write_text(output: &mut impl std::io::Write, response: &Response) -> std::io::Result<()> {
    match response {
        Response::Found { .. } => writeln!(output, "Suffix was found."),
        Response::Words { words, more } => {
            for word in words {
                writeln!(output, "{word}")?;
            }
            if !more {
                writeln!(
                    output,
                    "All of the words have been printed. Please choose another suffix."
                )?;
            }
            Ok(())
        }
        Response::Added { new: true, .. } => writeln!(output, "Word added to dictionary."),
        Response::Added { new: false, .. } => writeln!(output, "Word already in dictionary."),
        Response::Deleted { .. } => writeln!(output, "Word deleted."),
        Response::Help => writeln!(output, "{MENU_FULL}"),
        Response::Error { kind, message } => match kind {
            ErrorKind::SuffixNotFound => writeln!(output, "String not found"),
            ErrorKind::WordNotFound => writeln!(output, "Word not found."),
            ErrorKind::NoActiveSuffix => writeln!(
                output,
                "You must choose a valid suffix first. Please try again"
            ),
            ErrorKind::Exhausted => writeln!(
                output,
                "All of the words have been printed. Please choose another suffix."
            ),
            ErrorKind::BadCommand | ErrorKind::InvalidInput | ErrorKind::StaleCursor => {
                writeln!(output, "{message}")
            }
        },
    }
}

/// Reads one command per line until `x` or end of input. Failed commands,
/// including lines that are not UTF-8, are reported and the loop carries on.
/// In text mode the brief menu is printed once, before the first prompt.
pub fn run(
    session: &mut Session,
    input: impl std::io::BufRead,
    mut output: impl std::io::Write,
    format: crate::Format,
) -> anyhow::Result<()> {
    let mut lines = input.split(b'\n');

    if let crate::Format::Text = format {
        writeln!(output, "{MENU_BRIEF}")?;
    }

    loop {
        if let crate::Format::Text = format {
            write!(output, "Please enter command: ")?;
            output.flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let response = match String::from_utf8(line?) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => match line.parse::<Command>() {
                Ok(command) => match dispatch(session, command) {
                    Some(response) => response,
                    None => break,
                },
                Err(err) => Response::error(ErrorKind::BadCommand, err),
            },
            Err(_) => Response::error(
                ErrorKind::InvalidInput,
                crate::words::Error::InvalidInput("<not UTF-8>".to_string()),
            ),
        };

        match format {
            crate::Format::Text => write_text(&mut output, &response)?,
            crate::Format::Json => {
                serde_json::to_writer(&mut output, &response)?;
                writeln!(output)?;
            }
        }
    }

    if let crate::Format::Text = format {
        writeln!(output)?;
    }
    Ok(())
}
