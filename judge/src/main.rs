use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use gtp::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};
use itertools::Itertools;
use judge::{play_game, GameResult, GameSettings, IllegalMove, Player, PlayerConfig, Recorder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Plays GTP engines against each other, every pair of players in turn.
#[derive(Parser)]
struct Args {
    /// JSON files describing how to launch each engine
    #[clap(num_args(2..), value_delimiter = ' ')]
    player_configs: Vec<PathBuf>,

    /// Games per pair of players
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// Number of rows and columns; every engine must be started with the same size
    #[arg(short, long, default_value_t = DEFAULT_BOARD_SIZE,
          value_parser = clap::value_parser!(u8).range(1..=MAX_BOARD_SIZE as i64))]
    board_size: u8,

    /// Moves after which a game is abandoned
    #[arg(long, default_value_t = 1000)]
    max_moves: usize,

    /// Seed for assigning colors; random if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Abort a pairing at its first illegal move instead of scoring it as a loss
    #[arg(short, long, default_value_t = false)]
    stop_on_illegal_move: bool,

    /// Directory to write one JSON transcript per game into
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// Minimum level of log messages; RUST_LOG directives take precedence
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

/// Outcome counts of one pairing, indexed like the pair of players.
#[derive(Default)]
struct MatchScore {
    wins: [usize; 2],
    illegal_moves: [usize; 2],
    unfinished: usize,
}

impl MatchScore {
    fn num_games(&self) -> usize {
        self.wins.iter().sum::<usize>() + self.unfinished
    }

    fn record_win(&mut self, winner: usize) {
        self.wins[winner] += 1;
    }

    fn record_forfeit(&mut self, offender: usize) {
        self.wins[1 - offender] += 1;
        self.illegal_moves[offender] += 1;
    }

    fn summary(&self, names: &[String; 2]) -> String {
        let mut lines = Vec::new();
        for (winner, loser) in [(0, 1), (1, 0)] {
            let mut line = format!("{} won {} games", names[winner], self.wins[winner]);
            if self.illegal_moves[loser] > 0 {
                line += &format!(", {} of them by forfeit", self.illegal_moves[loser]);
            }
            lines.push(line);
        }
        lines.push(format!("{} games had no winner", self.unfinished));
        lines.join("\n")
    }
}

fn log_illegal_move(err: &IllegalMove) {
    info!("{}", err);
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        info!("  caused by: {}", cause);
        source = cause.source();
    }
}

fn play_matchup(
    pair: [&mut Player; 2],
    num_games: usize,
    settings: &GameSettings,
    rng: &mut StdRng,
    stop_on_illegal_move: bool,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<MatchScore> {
    let [first, second] = pair;
    let names = [first.name.clone(), second.name.clone()];
    let mut score = MatchScore::default();

    for game_idx in 0..num_games {
        // Colors are drawn per game; `swapped` means the second player has black
        let swapped = rng.gen::<bool>();
        let seats = if swapped {
            [&mut *second, &mut *first]
        } else {
            [&mut *first, &mut *second]
        };
        let seat_to_pair = |seat: usize| seat ^ usize::from(swapped);

        match play_game(seats, settings, recorder)? {
            GameResult::WonByPlayer { player_idx } => {
                let winner = seat_to_pair(player_idx);
                debug!(game_idx, winner = names[winner], "Opponent resigned");
                score.record_win(winner);
            }
            GameResult::BothPassed | GameResult::MoveLimitReached => {
                debug!(game_idx, "Game ended without a winner");
                score.unfinished += 1;
            }
            GameResult::IllegalMoveByPlayer { player_idx, err } => {
                let offender = seat_to_pair(player_idx);
                info!(game_idx, player = names[offender], "Illegal move");
                log_illegal_move(&err);
                if stop_on_illegal_move {
                    break;
                }
                score.record_forfeit(offender);
            }
        }
    }

    eprintln!("{} vs {}:\n{}", names[0], names[1], score.summary(&names));
    Ok(score)
}

/// Prints one row per matchup with the share of wins of each side and of games without a winner.
fn print_tournament_results(
    player_configs: &[PlayerConfig],
    match_results: &HashMap<(usize, usize), MatchScore>,
) {
    let percentage = |count: usize, total: usize| count as f32 / total.max(1) as f32 * 100.0;

    println!("\nTournament results:\n");
    println!(
        " {:>19} vs {:<19} | {:>7} {:>7} {:>9}",
        "p1", "p2", "p1 win", "p2 win", "no winner"
    );
    println!("{}", "-".repeat(72));
    for (i, j) in match_results.keys().copied().sorted() {
        let score = &match_results[&(i, j)];
        let num_games = score.num_games();
        println!(
            " {:>19} vs {:<19} | {:>6.1}% {:>6.1}% {:>8.1}%",
            player_configs[i].nick,
            player_configs[j].nick,
            percentage(score.wins[0], num_games),
            percentage(score.wins[1], num_games),
            percentage(score.unfinished, num_games),
        );
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_level);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "Assigning colors");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = args
        .record_games_to_directory
        .map(Recorder::new)
        .transpose()?;
    let settings = GameSettings {
        board_size: args.board_size,
        max_moves: args.max_moves,
    };

    let player_configs: Vec<PlayerConfig> = args
        .player_configs
        .iter()
        .map(|path| PlayerConfig::load(path))
        .collect::<anyhow::Result<_>>()?;

    let mut match_results = HashMap::new();
    for (i, j) in (0..player_configs.len()).tuple_combinations() {
        let mut first = Player::from_config(&player_configs[i])?;
        let mut second = Player::from_config(&player_configs[j])?;
        let score = play_matchup(
            [&mut first, &mut second],
            args.num_games,
            &settings,
            &mut rng,
            args.stop_on_illegal_move,
            &mut recorder,
        )?;
        match_results.insert((i, j), score);
    }

    if player_configs.len() > 2 {
        print_tournament_results(&player_configs, &match_results);
    }
    Ok(())
}

fn init_tracing(level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forfeits_count_as_wins_for_the_opponent() {
        let mut score = MatchScore::default();
        score.record_win(0);
        score.record_forfeit(0);
        score.record_forfeit(0);
        score.unfinished += 1;
        assert_eq!(score.wins, [1, 2]);
        assert_eq!(score.illegal_moves, [2, 0]);
        assert_eq!(score.num_games(), 4);

        let names = [String::from("a"), String::from("b")];
        assert_eq!(
            score.summary(&names),
            "a won 1 games\nb won 2 games, 2 of them by forfeit\n1 games had no winner"
        );
    }
}
