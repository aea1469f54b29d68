use std::io::{BufRead, Write};

use gtp::{
    decode_color, decode_coordinate, encode_move, Command, CommandKind, Coordinate, Response,
    DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE,
};
use tracing::{debug, info, trace};

use crate::Engine;

/// The protocol version reported by default.
pub const PROTOCOL_VERSION: &str = "2";

/// What the engine reports about itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub protocol_version: String,
    pub name: String,
    pub version: String,
}

impl Identity {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            protocol_version: String::from(PROTOCOL_VERSION),
            name: String::from(name),
            version: String::from(version),
        }
    }
}

/// Reads commands, dispatches them to an [`Engine`] and writes the replies.
///
/// A session starts out running and stops for good after a `quit` command,
/// an empty line, or the end of the input.
pub struct Session<E> {
    engine: E,
    identity: Identity,
    board_size: u8,
    running: bool,
    /// The number of commands processed so far, used to tag the next reply.
    sequence: u64,
}

impl<E: Engine> Session<E> {
    pub fn new(engine: E, identity: Identity) -> Self {
        Self {
            engine,
            identity,
            board_size: DEFAULT_BOARD_SIZE,
            running: true,
            sequence: 0,
        }
    }

    /// Panics if the board size is zero or larger than [`MAX_BOARD_SIZE`].
    pub fn with_board_size(mut self, board_size: u8) -> Self {
        assert!(
            (1..=MAX_BOARD_SIZE).contains(&board_size),
            "board size must be between 1 and {}, got {}",
            MAX_BOARD_SIZE,
            board_size
        );
        self.board_size = board_size;
        self
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn board_size(&self) -> u8 {
        self.board_size
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Runs the read-process-write cycle until the session stops.
    ///
    /// Returns an error only on I/O failure.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> anyhow::Result<()> {
        info!(
            name = %self.identity.name,
            version = %self.identity.version,
            board_size = self.board_size,
            "Session started"
        );
        let mut buf = String::new();

        while self.running {
            buf.clear(); // because read_line() appends to the buffer
            let num_bytes_read = input.read_line(&mut buf)?;
            if num_bytes_read == 0 {
                // 0 bytes read means EOF - the controller has exited.
                debug!("End of input");
                self.running = false;
                break;
            }

            let line = buf.trim_end_matches(['\n', '\r']);
            trace!(line, "Received line");
            if let Some(response) = self.handle_line(line) {
                output.write_all(response.to_wire().as_bytes())?;
                output.flush()?;
            }
        }

        info!(commands = self.sequence, "Session stopped");
        Ok(())
    }

    /// Processes a single line and returns the reply to write, if any.
    ///
    /// An empty line stops the session without a reply. Once the session has
    /// stopped, lines are ignored.
    pub fn handle_line(&mut self, line: &str) -> Option<Response> {
        if !self.running {
            return None;
        }

        let cmd = Command::parse(line);
        let response = self.process(&cmd);
        debug!(command = %cmd, response = %response, "Processed command");
        self.sequence += 1;

        if cmd.is_empty_line() {
            None
        } else {
            Some(response)
        }
    }

    fn process(&mut self, cmd: &Command) -> Response {
        let id = self.sequence;
        match cmd.kind() {
            CommandKind::Quit => {
                self.running = false;
                Response::success(id, "")
            }
            CommandKind::ProtocolVersion => {
                Response::success(id, self.identity.protocol_version.as_str())
            }
            CommandKind::Name => Response::success(id, self.identity.name.as_str()),
            CommandKind::Version => Response::success(id, self.identity.version.as_str()),
            CommandKind::ClearBoard => {
                self.engine.clear_board();
                Response::success(id, "")
            }
            CommandKind::Play => self.play(id, cmd.args()),
            CommandKind::GenMove => self.genmove(id, cmd.args()),
            CommandKind::ShowBoard => {
                // The board starts on its own line
                let body = self
                    .engine
                    .show_board()
                    .map(|board| format!("\n{}", board))
                    .unwrap_or_default();
                Response::success(id, body)
            }
            CommandKind::Unrecognized => {
                debug!(name = cmd.name(), "Unknown command");
                Response::failure(id, "unknown command")
            }
        }
    }

    fn play(&mut self, id: u64, args: &[String]) -> Response {
        let [color, coordinate, ..] = args else {
            return Response::failure(id, "syntax error");
        };

        let color = decode_color(color);
        let coordinate = decode_coordinate(coordinate, self.board_size);
        let (color, vertex) = match (color, coordinate) {
            (Ok(color), Ok(Coordinate::Vertex(vertex))) => (color, vertex),
            (color, coordinate) => {
                debug!(?color, ?coordinate, "Invalid arguments to play");
                return Response::failure(id, "invalid color or coordinate");
            }
        };

        match self.engine.play(color, vertex) {
            Ok(()) => Response::success(id, ""),
            Err(err) => {
                debug!(%err, "Engine rejected move");
                Response::failure(id, "illegal move")
            }
        }
    }

    fn genmove(&mut self, id: u64, args: &[String]) -> Response {
        let [color, ..] = args else {
            return Response::failure(id, "syntax error");
        };
        let color = match decode_color(color) {
            Ok(color) => color,
            Err(err) => {
                debug!(%err, "Invalid arguments to genmove");
                return Response::failure(id, "invalid color");
            }
        };

        match self.engine.genmove(color) {
            Some(mv) => Response::success(id, encode_move(mv, self.board_size)),
            None => Response::success(id, ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::io::Cursor;

    use gtp::{decode_move, Color, IllegalMove, Move, Vertex};
    use quickcheck::quickcheck;

    use super::*;
    use crate::NoEngine;

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Call {
        ClearBoard,
        Play(Color, Vertex),
        GenMove(Color),
    }

    /// Records every call and rejects moves onto occupied points.
    #[derive(Default)]
    struct RecordingEngine {
        calls: Vec<Call>,
        occupied: HashSet<Vertex>,
        next_move: Option<Move>,
    }

    impl Engine for RecordingEngine {
        fn clear_board(&mut self) {
            self.calls.push(Call::ClearBoard);
            self.occupied.clear();
        }

        fn play(&mut self, color: Color, vertex: Vertex) -> Result<(), IllegalMove> {
            self.calls.push(Call::Play(color, vertex));
            if self.occupied.insert(vertex) {
                Ok(())
            } else {
                Err(IllegalMove::Occupied { vertex })
            }
        }

        fn genmove(&mut self, color: Color) -> Option<Move> {
            self.calls.push(Call::GenMove(color));
            self.next_move
        }

        fn show_board(&self) -> Option<String> {
            Some(format!("{} stones", self.occupied.len()))
        }
    }

    fn session() -> Session<RecordingEngine> {
        Session::new(RecordingEngine::default(), Identity::new("recorder", "0.1"))
    }

    fn reply(session: &mut Session<RecordingEngine>, line: &str) -> String {
        session.handle_line(line).unwrap().to_string()
    }

    fn run_script(script: &str) -> (Session<RecordingEngine>, String) {
        let mut session = session();
        let mut output = Vec::new();
        session.run(Cursor::new(script), &mut output).unwrap();
        (session, String::from_utf8(output).unwrap())
    }

    const LINES: [&str; 10] = [
        "protocol_version",
        "name",
        "version",
        "clear_board",
        "play black D4",
        "play",
        "play red D4",
        "genmove white",
        "showboard",
        "foobar",
    ];

    quickcheck! {
        fn sequence_counts_commands(picks: Vec<u8>) -> bool {
            let mut session = session();
            for (idx, pick) in picks.iter().enumerate() {
                let line = LINES[*pick as usize % LINES.len()];
                let response = session.handle_line(line).unwrap();
                if response.id != Some(idx as u64) || session.sequence() != idx as u64 + 1 {
                    return false;
                }
            }
            session.is_running()
        }
    }

    #[test]
    fn identity() {
        let mut session = session();
        assert_eq!(reply(&mut session, "protocol_version"), "=0 2");
        assert_eq!(reply(&mut session, "name"), "=1 recorder");
        assert_eq!(reply(&mut session, "VERSION"), "=2 0.1");
    }

    #[test]
    fn run_writes_blank_line_after_each_reply() {
        let (session, output) = run_script("name\nfoobar\r\nquit\nname\n");
        assert_eq!(output, "=0 recorder\n\n?1 unknown command\n\n=2\n\n");
        assert!(!session.is_running());
        assert_eq!(session.sequence(), 3);
    }

    #[test]
    fn empty_line_stops_without_reply() {
        let (session, output) = run_script("name\n\nname\n");
        assert_eq!(output, "=0 recorder\n\n");
        assert!(!session.is_running());
        assert_eq!(session.sequence(), 2);
    }

    #[test]
    fn end_of_input_stops_without_reply() {
        let (session, output) = run_script("clear_board");
        assert_eq!(output, "=0\n\n");
        assert!(!session.is_running());
        assert_eq!(session.into_engine().calls, vec![Call::ClearBoard]);
    }

    #[test]
    fn stopped_session_ignores_lines() {
        let mut session = session();
        assert_eq!(reply(&mut session, "quit"), "=0");
        assert_eq!(session.handle_line("name"), None);
        assert_eq!(session.sequence(), 1);
    }

    #[test]
    fn play_checks_arguments_before_calling_engine() {
        let mut session = session();
        assert_eq!(reply(&mut session, "play"), "?0 syntax error");
        assert_eq!(reply(&mut session, "play black"), "?1 syntax error");
        assert_eq!(reply(&mut session, "play black pass"), "?2 invalid color or coordinate");
        assert_eq!(reply(&mut session, "play red D4"), "?3 invalid color or coordinate");
        assert_eq!(reply(&mut session, "play white I4"), "?4 invalid color or coordinate");
        assert_eq!(reply(&mut session, "play white D20"), "?5 invalid color or coordinate");
        assert!(session.engine().calls.is_empty());
    }

    #[test]
    fn play_reports_illegal_moves() {
        let mut session = session();
        assert_eq!(reply(&mut session, "play black D4"), "=0");
        assert_eq!(reply(&mut session, "play white d4"), "?1 illegal move");
        assert_eq!(
            session.engine().calls,
            vec![
                Call::Play(Color::Black, Vertex::new(3, 15)),
                Call::Play(Color::White, Vertex::new(3, 15)),
            ]
        );
    }

    #[test]
    fn play_is_case_insensitive() {
        let mut upper = session();
        let mut lower = session();
        assert_eq!(reply(&mut upper, "PLAY black D4"), reply(&mut lower, "play BLACK d4"));
        assert_eq!(upper.engine().calls, lower.engine().calls);
    }

    #[test]
    fn genmove_encodes_moves() {
        let mut session = session();
        session.engine.next_move = Some(Move::Pass);
        assert_eq!(reply(&mut session, "genmove b"), "=0 pass");
        session.engine.next_move = Some(Move::Resign);
        assert_eq!(reply(&mut session, "genmove w"), "=1 resign");
        let vertex = Vertex::new(15, 3);
        session.engine.next_move = Some(Move::Place(vertex));
        let response = session.handle_line("genmove black").unwrap();
        assert_eq!(response.to_string(), "=2 Q16");
        assert_eq!(decode_move(&response.body, 19), Ok(Move::Place(vertex)));
        assert_eq!(
            session.engine().calls,
            vec![
                Call::GenMove(Color::Black),
                Call::GenMove(Color::White),
                Call::GenMove(Color::Black),
            ]
        );
    }

    #[test]
    fn genmove_checks_arguments() {
        let mut session = session();
        assert_eq!(reply(&mut session, "genmove"), "?0 syntax error");
        assert_eq!(reply(&mut session, "genmove green"), "?1 invalid color");
        assert!(session.engine().calls.is_empty());
    }

    #[test]
    fn board_size_applies_to_coordinates() {
        let mut session = session().with_board_size(9);
        assert_eq!(reply(&mut session, "play b J9"), "=0");
        assert_eq!(reply(&mut session, "play b K9"), "?1 invalid color or coordinate");
        assert_eq!(session.engine().calls, vec![Call::Play(Color::Black, Vertex::new(8, 0))]);
    }

    #[test]
    fn showboard_starts_on_new_line() {
        let mut session = session();
        reply(&mut session, "play b A1");
        assert_eq!(reply(&mut session, "showboard"), "=1 \n1 stones");
    }

    #[test]
    fn unknown_command_does_not_call_engine() {
        let mut session = session();
        assert_eq!(reply(&mut session, "foobar black D4"), "?0 unknown command");
        assert!(session.engine().calls.is_empty());
    }

    #[test]
    fn missing_engine_succeeds_silently() {
        let mut session = Session::new(NoEngine, Identity::new("nothing", "1.0"));
        let replies: Vec<String> = ["clear_board", "play b D4", "genmove w", "showboard"]
            .into_iter()
            .map(|line| session.handle_line(line).unwrap().to_string())
            .collect();
        assert_eq!(replies, ["=0", "=1", "=2", "=3"]);
    }

    #[test]
    fn missing_engine_still_validates_play() {
        let mut session = Session::new(NoEngine, Identity::new("nothing", "1.0"));
        let replies: Vec<String> = ["play red D4", "play black pass", "play b"]
            .into_iter()
            .map(|line| session.handle_line(line).unwrap().to_string())
            .collect();
        assert_eq!(
            replies,
            [
                "?0 invalid color or coordinate",
                "?1 invalid color or coordinate",
                "?2 syntax error"
            ]
        );
        assert!(session.is_running());
    }

    #[test]
    fn sessions_are_independent() {
        let mut first = session();
        let mut second = session();
        reply(&mut first, "name");
        reply(&mut first, "quit");
        assert_eq!(reply(&mut second, "name"), "=0 recorder");
        assert!(second.is_running());
        assert!(!first.is_running());
    }
}
