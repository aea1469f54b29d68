/// The commands an engine understands.
///
/// This is a closed set, anything else is [`CommandKind::Unrecognized`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Quit,
    ProtocolVersion,
    Name,
    Version,
    ClearBoard,
    Play,
    GenMove,
    ShowBoard,
    Unrecognized,
}

const VOCABULARY: [(&str, CommandKind); 8] = [
    ("quit", CommandKind::Quit),
    ("protocol_version", CommandKind::ProtocolVersion),
    ("name", CommandKind::Name),
    ("version", CommandKind::Version),
    ("clear_board", CommandKind::ClearBoard),
    ("play", CommandKind::Play),
    ("genmove", CommandKind::GenMove),
    ("showboard", CommandKind::ShowBoard),
];

impl CommandKind {
    /// Looks up a command name, case-insensitively.
    pub fn from_name(name: &str) -> CommandKind {
        VOCABULARY
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|&(_, kind)| kind)
            .unwrap_or(CommandKind::Unrecognized)
    }

    /// The name of the command on the wire, `None` for [`CommandKind::Unrecognized`].
    pub fn name(self) -> Option<&'static str> {
        VOCABULARY
            .iter()
            .find(|&&(_, kind)| kind == self)
            .map(|&(name, _)| name)
    }
}

/// A single parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    kind: CommandKind,
    /// The first token of the line as it was received.
    name: String,
    args: Vec<String>,
}

impl Command {
    /// Creates a command of a known kind, e.g. for sending it to an engine.
    ///
    /// Panics if `kind` is [`CommandKind::Unrecognized`].
    pub fn new<I, S>(kind: CommandKind, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = kind
            .name()
            .expect("cannot construct an unrecognized command");
        Self {
            kind,
            name: String::from(name),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses one input line. This never fails.
    ///
    /// A line without any tokens is treated as `quit`, so that a controller
    /// closing its end of the stream (or sending an empty line) ends the session.
    pub fn parse(line: &str) -> Command {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Command {
                kind: CommandKind::Quit,
                name: String::new(),
                args: Vec::new(),
            };
        };

        Command {
            kind: CommandKind::from_name(name),
            name: String::from(name),
            args: tokens.map(String::from).collect(),
        }
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether this command came from a line without any tokens.
    pub fn is_empty_line(&self) -> bool {
        self.name.is_empty()
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind.name().unwrap_or(&self.name))?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::CommandLine;

    quickcheck! {
        fn tokens_are_preserved(input: CommandLine) -> bool {
            let cmd = Command::parse(&input.line);
            cmd.name() == input.tokens[0] && cmd.args() == &input.tokens[1..]
        }
    }

    #[test]
    fn empty_line_is_quit() {
        for line in ["", "   ", "\t"] {
            let cmd = Command::parse(line);
            assert_eq!(cmd.kind(), CommandKind::Quit);
            assert!(cmd.args().is_empty());
            assert!(cmd.is_empty_line());
        }
        assert!(!Command::parse("quit").is_empty_line());
    }

    #[test]
    fn vocabulary() {
        assert_eq!(Command::parse("quit").kind(), CommandKind::Quit);
        assert_eq!(Command::parse("protocol_version").kind(), CommandKind::ProtocolVersion);
        assert_eq!(Command::parse("name").kind(), CommandKind::Name);
        assert_eq!(Command::parse("version").kind(), CommandKind::Version);
        assert_eq!(Command::parse("clear_board").kind(), CommandKind::ClearBoard);
        assert_eq!(Command::parse("play b a1").kind(), CommandKind::Play);
        assert_eq!(Command::parse("genmove w").kind(), CommandKind::GenMove);
        assert_eq!(Command::parse("showboard").kind(), CommandKind::ShowBoard);
        assert_eq!(Command::parse("GENMOVE w").kind(), CommandKind::GenMove);
    }

    #[test]
    fn case_insensitive_names() {
        let upper = Command::parse("PLAY black D4");
        let lower = Command::parse("play BLACK d4");
        assert_eq!(upper.kind(), lower.kind());
        assert_eq!(upper.args().len(), lower.args().len());
    }

    #[test]
    fn unrecognized_keeps_args() {
        let cmd = Command::parse("foobar 1  2\t3");
        assert_eq!(cmd.kind(), CommandKind::Unrecognized);
        assert_eq!(cmd.name(), "foobar");
        assert_eq!(cmd.args(), ["1", "2", "3"]);
        assert_eq!(cmd.to_string(), "foobar 1 2 3");
    }

    #[test]
    fn display_uses_canonical_name() {
        assert_eq!(Command::parse("  PLAY  black   D4 ").to_string(), "play black D4");
        assert_eq!(
            Command::new(CommandKind::GenMove, ["white"]).to_string(),
            "genmove white"
        );
        assert_eq!(
            Command::new(CommandKind::ClearBoard, Vec::<String>::new()).to_string(),
            "clear_board"
        );
    }

    #[test]
    fn kind_names_round_trip() {
        for (name, kind) in VOCABULARY {
            assert_eq!(kind.name(), Some(name));
            assert_eq!(CommandKind::from_name(name), kind);
        }
        assert_eq!(CommandKind::Unrecognized.name(), None);
    }
}
