pub use command::*;
pub use coords::*;
pub use errors::*;
pub use protocol_types::*;
pub use response::*;

#[cfg(test)]
mod arbitrary;
mod command;
mod coords;
mod errors;
mod protocol_types;
mod response;
