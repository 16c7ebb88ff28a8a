#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Find(String),
    Print(usize),
    Add(String),
    Delete(String),
    Help,
    Exit,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid menu selection {0:?}, please try again")]
    Unknown(String),

    #[error("command {0} needs an argument")]
    MissingArgument(char),

    #[error("command {0} takes one argument")]
    TooManyArguments(char),

    #[error("{0:?} is not a number of words")]
    BadCount(String),
}

impl std::str::FromStr for Command {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let Some(name) = parts.next() else {
            return Err(ParseError::Unknown(String::new()));
        };
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(match name.chars().next() {
                Some(c) if name.len() == 1 => ParseError::TooManyArguments(c),
                _ => ParseError::Unknown(name.to_string()),
            });
        }

        let required = |c: char| arg.map(str::to_string).ok_or(ParseError::MissingArgument(c));

        Ok(match (name, arg) {
            ("f", _) => Command::Find(required('f')?),
            ("a", _) => Command::Add(required('a')?),
            ("d", _) => Command::Delete(required('d')?),
            ("p", Some(n)) => Command::Print(
                n.parse()
                    .map_err(|_| ParseError::BadCount(n.to_string()))?,
            ),
            ("p", None) => return Err(ParseError::MissingArgument('p')),
            ("?", None) => Command::Help,
            ("x", None) => Command::Exit,
            ("?", Some(_)) => return Err(ParseError::TooManyArguments('?')),
            ("x", Some(_)) => return Err(ParseError::TooManyArguments('x')),
            _ => return Err(ParseError::Unknown(name.to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("f ing".parse::<Command>(), Ok(Command::Find("ing".to_string())));
        assert_eq!("  p   3 ".parse::<Command>(), Ok(Command::Print(3)));
        assert_eq!("a Spring".parse::<Command>(), Ok(Command::Add("Spring".to_string())));
        assert_eq!("d cat".parse::<Command>(), Ok(Command::Delete("cat".to_string())));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
        assert_eq!("x".parse::<Command>(), Ok(Command::Exit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(ParseError::Unknown(String::new())));
        assert_eq!("q ing".parse::<Command>(), Err(ParseError::Unknown("q".to_string())));
        assert_eq!("f".parse::<Command>(), Err(ParseError::MissingArgument('f')));
        assert_eq!("p".parse::<Command>(), Err(ParseError::MissingArgument('p')));
        assert_eq!("p -1".parse::<Command>(), Err(ParseError::BadCount("-1".to_string())));
        assert_eq!("a two words".parse::<Command>(), Err(ParseError::TooManyArguments('a')));
        assert_eq!("x now".parse::<Command>(), Err(ParseError::TooManyArguments('x')));
    }
}
