use std::str::FromStr;

use crate::{Color, ColorFromStrErr, Coordinate, CoordinateError, Move, Vertex};

/// Column labels, left to right.
///
/// The letter `I` is skipped, as is customary for Go boards, so that it
/// cannot be confused with `J`. This limits boards to 25 columns.
const COLUMN_LETTERS: &[u8; 25] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// The letter labelling column `x`.
///
/// Panics if `x` is not smaller than [`MAX_BOARD_SIZE`](crate::MAX_BOARD_SIZE).
pub fn column_letter(x: u8) -> char {
    char::from(COLUMN_LETTERS[x as usize])
}

fn column_index(letter: char) -> Option<u8> {
    let upper = letter.to_ascii_uppercase();
    COLUMN_LETTERS
        .iter()
        .position(|&l| char::from(l) == upper)
        .map(|idx| idx as u8)
}

/// Decodes a coordinate token such as `D4` or `pass`, case-insensitively.
///
/// The first character is the column letter, the rest is the row number,
/// counted from 1 at the bottom of the board. The returned vertex has
/// `y = board_size - row number`.
pub fn decode_coordinate(token: &str, board_size: u8) -> Result<Coordinate, CoordinateError> {
    if token.eq_ignore_ascii_case("pass") {
        return Ok(Coordinate::Pass);
    }

    let mut chars = token.chars();
    let letter = chars.next().ok_or(CoordinateError::Empty)?;
    let x = column_index(letter).ok_or(CoordinateError::InvalidColumn(letter))?;
    if x >= board_size {
        return Err(CoordinateError::ColumnOutOfBounds { letter, board_size });
    }

    let row = chars.as_str();
    if row.is_empty() || !row.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoordinateError::InvalidRow(String::from(row)));
    }
    let number: u32 = row
        .parse()
        .map_err(|_| CoordinateError::InvalidRow(String::from(row)))?;
    if number == 0 || number > u32::from(board_size) {
        return Err(CoordinateError::RowOutOfBounds { number, board_size });
    }

    Ok(Coordinate::Vertex(Vertex {
        x,
        y: board_size - number as u8,
    }))
}

/// Decodes a color token, case-insensitively.
pub fn decode_color(token: &str) -> Result<Color, ColorFromStrErr> {
    match token.to_ascii_lowercase().as_str() {
        "black" | "b" => Ok(Color::Black),
        "white" | "w" => Ok(Color::White),
        _ => Err(ColorFromStrErr {
            token: String::from(token),
        }),
    }
}

impl FromStr for Color {
    type Err = ColorFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_color(s)
    }
}

/// Encodes a vertex as an upper-case token such as `D4`.
///
/// Panics if the vertex is not on a board of the given size.
pub fn encode_vertex(vertex: Vertex, board_size: u8) -> String {
    assert!(
        vertex.is_on_board(board_size),
        "vertex {:?} is not on a board of size {}",
        vertex,
        board_size
    );
    format!("{}{}", column_letter(vertex.x), board_size - vertex.y)
}

/// Encodes a generated move: `pass`, `resign`, or a vertex token.
///
/// Panics if the move places a stone outside of a board of the given size.
pub fn encode_move(mv: Move, board_size: u8) -> String {
    match mv {
        Move::Pass => String::from("pass"),
        Move::Resign => String::from("resign"),
        Move::Place(vertex) => encode_vertex(vertex, board_size),
    }
}

/// Decodes a move token as sent back by an engine, i.e. a coordinate or `resign`.
pub fn decode_move(token: &str, board_size: u8) -> Result<Move, CoordinateError> {
    if token.eq_ignore_ascii_case("resign") {
        return Ok(Move::Resign);
    }
    Ok(match decode_coordinate(token, board_size)? {
        Coordinate::Pass => Move::Pass,
        Coordinate::Vertex(vertex) => Move::Place(vertex),
    })
}
