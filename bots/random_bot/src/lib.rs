mod board;
pub use board::*;
