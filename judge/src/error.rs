use gtp::CoordinateError;

#[derive(Debug)]
/// Why a player lost a game by breaking the rules.
pub enum IllegalMove {
    /// The engine replied to `genmove` with an error.
    GenMoveFailed { message: String },
    /// The engine's reply to `genmove` is not a move.
    UnreadableMove { reply: String, err: CoordinateError },
    /// The opponent's engine refused the move.
    RejectedByOpponent { mv: String, message: String },
}

impl std::error::Error for IllegalMove {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalMove::UnreadableMove { err, .. } => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::GenMoveFailed { message } => {
                write!(f, "Failed to generate a move: {}", message)
            }
            IllegalMove::UnreadableMove { reply, err: _ } => {
                write!(f, "Generated '{}', which is not a move", reply)
            }
            IllegalMove::RejectedByOpponent { mv, message } => {
                write!(f, "The move {} was rejected by the opponent: {}", mv, message)
            }
        }
    }
}
