/// The board size used when none is configured.
pub const DEFAULT_BOARD_SIZE: u8 = 19;

/// The largest board whose columns can be named by a single letter.
///
/// There are 25 letters available since `I` is not used, see [`decode_coordinate()`](crate::decode_coordinate).
pub const MAX_BOARD_SIZE: u8 = 25;

/// The color of a stone, or of the player who places it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// A point on the board.
///
/// Both coordinates are zero-based. Column `x = 0` is the column labelled `A`,
/// row `y = 0` is the row labelled with the highest number (the top row when
/// the board is printed).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vertex {
    pub x: u8,
    pub y: u8,
}

impl Vertex {
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    pub fn is_on_board(&self, board_size: u8) -> bool {
        self.x < board_size && self.y < board_size
    }
}

/// A decoded coordinate token, as received from the controller.
///
/// Resignation cannot be expressed here: it is only ever produced by move generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coordinate {
    Pass,
    Vertex(Vertex),
}

/// The outcome of move generation.
///
/// `Pass` and `Resign` are distinct variants rather than reserved coordinate
/// pairs, so they cannot be mistaken for a point on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    Place(Vertex),
    Pass,
    Resign,
}

impl From<Vertex> for Move {
    fn from(vertex: Vertex) -> Self {
        Move::Place(vertex)
    }
}
