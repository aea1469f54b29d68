use crate::Vertex;

/// The error type for [`decode_coordinate()`](crate::decode_coordinate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoordinateError {
    Empty,
    InvalidColumn(char),
    ColumnOutOfBounds { letter: char, board_size: u8 },
    InvalidRow(String),
    RowOutOfBounds { number: u32, board_size: u8 },
}

impl std::error::Error for CoordinateError {}

impl std::fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinateError::Empty => write!(f, "Coordinate is empty"),
            CoordinateError::InvalidColumn(letter) =>
                write!(f, "'{}' is not a column letter", letter),
            CoordinateError::ColumnOutOfBounds { letter, board_size } =>
                write!(f, "Column '{}' is outside of a board of size {}", letter, board_size),
            CoordinateError::InvalidRow(row) =>
                write!(f, "'{}' is not a row number", row),
            CoordinateError::RowOutOfBounds { number, board_size } =>
                write!(f, "Row {} is outside of a board of size {}", number, board_size),
        }
    }
}

/// The error type for the [`FromStr`](std::str::FromStr) instance of [`Color`](crate::Color).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorFromStrErr {
    pub token: String,
}

impl std::error::Error for ColorFromStrErr {}

impl std::fmt::Display for ColorFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' is not a color, expected one of black, b, white, w",
            self.token
        )
    }
}

/// Returned by an engine that rejects a move according to its game rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    Occupied { vertex: Vertex },
    Other(String),
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::Occupied { vertex } => write!(
                f,
                "The point ({}, {}) is already occupied",
                vertex.x, vertex.y
            ),
            IllegalMove::Other(reason) => write!(f, "{}", reason),
        }
    }
}

/// The error type for [`Response::parse()`](crate::Response::parse).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResponseParseError {
    Empty,
    InvalidStatus(char),
    InvalidId(String),
}

impl std::error::Error for ResponseParseError {}

impl std::fmt::Display for ResponseParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseParseError::Empty => write!(f, "Response is empty"),
            ResponseParseError::InvalidStatus(c) =>
                write!(f, "Response starts with '{}' instead of '=' or '?'", c),
            ResponseParseError::InvalidId(id) =>
                write!(f, "Response id '{}' is not a number", id),
        }
    }
}
