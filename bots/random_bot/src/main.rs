use clap::Parser;
use gtp::{Color, IllegalMove, Move, Vertex, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};
use gtp_engine_utils::{Engine, Identity};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use random_bot::Board;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// The name reported to the controller
    #[arg(long, default_value = "random_bot")]
    name: String,

    /// Number of rows and columns of the board
    #[arg(short, long, default_value_t = DEFAULT_BOARD_SIZE,
          value_parser = clap::value_parser!(u8).range(1..=MAX_BOARD_SIZE as i64))]
    board_size: u8,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let rng = StdRng::seed_from_u64(seed);

    let identity = Identity::new(&args.name, env!("CARGO_PKG_VERSION"));
    RandomBot {
        board: Board::new(args.board_size),
        rng,
    }
    .run(identity, args.board_size)
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    // Stdout is reserved for the protocol
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Places stones on random empty points, and passes once the board is full.
struct RandomBot {
    board: Board,
    rng: StdRng,
}

impl Engine for RandomBot {
    fn clear_board(&mut self) {
        self.board.clear();
    }

    fn play(&mut self, color: Color, vertex: Vertex) -> Result<(), IllegalMove> {
        self.board.place(color, vertex)
    }

    fn genmove(&mut self, color: Color) -> Option<Move> {
        let Some(&vertex) = self.board.empty_points().choose(&mut self.rng) else {
            debug!(%color, "Board is full, passing");
            return Some(Move::Pass);
        };
        // The vertex is empty, so placing cannot fail
        self.board.place(color, vertex).ok()?;
        Some(vertex.into())
    }

    fn show_board(&self) -> Option<String> {
        Some(self.board.to_string())
    }
}
