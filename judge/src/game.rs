use gtp::{decode_move, encode_move, Color, Command, CommandKind, Move, Response};
use tracing::debug;

use crate::error::IllegalMove;
use crate::player::Connection;
use crate::recording::Recorder;

pub enum GameResult {
    /// The other player resigned.
    WonByPlayer { player_idx: usize },
    /// Both players passed in a row. There is no scoring, so nobody wins.
    BothPassed,
    MoveLimitReached,
    IllegalMoveByPlayer { player_idx: usize, err: IllegalMove },
}

pub struct GameSettings {
    pub board_size: u8,
    pub max_moves: usize,
}

fn request<C: Connection>(
    player: &mut C,
    recorder: &mut Option<Recorder>,
    cmd: Command,
) -> anyhow::Result<Response> {
    let response = player.send(&cmd)?;
    if let Some(recorder) = recorder {
        recorder.store_exchange(player.name(), cmd.to_string(), response.to_string());
    }
    Ok(response)
}

/// Plays one game, `players[0]` has black.
///
/// Returns an error only on communication failure, not when an
/// illegal move is played.
pub fn play_game<C: Connection>(
    mut players: [&mut C; 2],
    settings: &GameSettings,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    // Inform the players about the new game, so that they can reset their state
    for player in players.iter_mut() {
        let response = request(
            &mut **player,
            recorder,
            Command::new(CommandKind::ClearBoard, Vec::<String>::new()),
        )?;
        if !response.is_success() {
            anyhow::bail!("{} failed to clear the board: {}", player.name(), response.body);
        }
    }

    let mut color = Color::Black;
    let mut consecutive_passes = 0;
    let mut game_result = GameResult::MoveLimitReached;
    for move_idx in 0..settings.max_moves {
        let current_player_idx = move_idx % 2;

        let response = request(
            &mut *players[current_player_idx],
            recorder,
            Command::new(CommandKind::GenMove, [color.to_string()]),
        )?;
        if !response.is_success() {
            game_result = GameResult::IllegalMoveByPlayer {
                player_idx: current_player_idx,
                err: IllegalMove::GenMoveFailed {
                    message: response.body,
                },
            };
            break;
        }
        let mv = match decode_move(response.body.trim(), settings.board_size) {
            Ok(mv) => mv,
            Err(err) => {
                game_result = GameResult::IllegalMoveByPlayer {
                    player_idx: current_player_idx,
                    err: IllegalMove::UnreadableMove {
                        reply: response.body,
                        err,
                    },
                };
                break;
            }
        };
        debug!(move_idx, %color, ?mv);

        match mv {
            Move::Resign => {
                game_result = GameResult::WonByPlayer {
                    player_idx: 1 - current_player_idx,
                };
                break;
            }
            Move::Pass => {
                // Passes are not relayed, since play only accepts points on the board
                consecutive_passes += 1;
                if consecutive_passes == 2 {
                    game_result = GameResult::BothPassed;
                    break;
                }
            }
            Move::Place(_) => {
                consecutive_passes = 0;
                let token = encode_move(mv, settings.board_size);
                let response = request(
                    &mut *players[1 - current_player_idx],
                    recorder,
                    Command::new(CommandKind::Play, [color.to_string(), token.clone()]),
                )?;
                if !response.is_success() {
                    game_result = GameResult::IllegalMoveByPlayer {
                        player_idx: current_player_idx,
                        err: IllegalMove::RejectedByOpponent {
                            mv: token,
                            message: response.body,
                        },
                    };
                    break;
                }
            }
        }
        color = color.opponent();
    }

    if let Some(rec) = recorder {
        rec.write_game_recording()?;
    }

    Ok(game_result)
}
