use crate::{Color, Vertex, MAX_BOARD_SIZE};

/// A vertex together with a board size it fits on.
#[derive(Clone, Debug)]
pub struct BoardVertex {
    pub board_size: u8,
    pub vertex: Vertex,
}

impl quickcheck::Arbitrary for BoardVertex {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let board_size = u8::arbitrary(g) % MAX_BOARD_SIZE + 1;
        let vertex = Vertex {
            x: u8::arbitrary(g) % board_size,
            y: u8::arbitrary(g) % board_size,
        };
        BoardVertex { board_size, vertex }
    }
}

impl quickcheck::Arbitrary for Color {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[Color::Black, Color::White]).unwrap()
    }
}

/// A line of whitespace-separated tokens, with arbitrary amounts of whitespace between them.
#[derive(Clone, Debug)]
pub struct CommandLine {
    pub tokens: Vec<String>,
    pub line: String,
}

impl quickcheck::Arbitrary for CommandLine {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let names = [
            "quit",
            "protocol_version",
            "name",
            "VERSION",
            "clear_board",
            "Play",
            "genmove",
            "showboard",
            "foobar",
        ];
        let args = ["black", "W", "D4", "pass", "q16", "x", "19"];
        let separators = [" ", "  ", "\t", " \t "];

        let mut tokens = vec![String::from(*g.choose(&names).unwrap())];
        for _ in 0..usize::arbitrary(g) % 4 {
            tokens.push(String::from(*g.choose(&args).unwrap()));
        }

        let mut line = String::new();
        if bool::arbitrary(g) {
            line += g.choose(&separators).unwrap();
        }
        for (idx, token) in tokens.iter().enumerate() {
            if idx > 0 {
                line += g.choose(&separators).unwrap();
            }
            line += token;
        }
        if bool::arbitrary(g) {
            line += g.choose(&separators).unwrap();
        }

        CommandLine { tokens, line }
    }
}
