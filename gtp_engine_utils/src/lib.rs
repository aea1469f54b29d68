mod session;
pub use session::*;

use gtp::{Color, IllegalMove, Move, Vertex};

/// The game logic behind a [`Session`].
///
/// Every method has a default, so an engine only implements what it
/// supports. The defaults do nothing and report success, which allows running
/// the protocol without any game logic attached (see [`NoEngine`]).
pub trait Engine {
    /// Resets the board and any game state.
    fn clear_board(&mut self) {}

    /// Places a stone. The vertex has already been checked to be on the board.
    fn play(&mut self, _color: Color, _vertex: Vertex) -> Result<(), IllegalMove> {
        Ok(())
    }

    /// Generates (and plays) a move for the given color.
    ///
    /// `None` means that this engine cannot generate moves. A generated stone
    /// must be placed on the board, otherwise encoding the reply panics.
    fn genmove(&mut self, _color: Color) -> Option<Move> {
        None
    }

    /// A text rendering of the board, if the engine has one.
    fn show_board(&self) -> Option<String> {
        None
    }

    fn run(self, identity: Identity, board_size: u8) -> anyhow::Result<()>
    where
        Self: Sized,
    {
        // Communication happens through stdin/stdout.
        // Stderr can be used for logging.
        let stdin = std::io::stdin().lock();
        let stdout = std::io::stdout().lock();
        Session::new(self, identity)
            .with_board_size(board_size)
            .run(stdin, stdout)
    }
}

/// An engine without any game logic.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEngine;

impl Engine for NoEngine {}
