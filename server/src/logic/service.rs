use chrono::Utc;
use minesweeper_common::models::Pos;
use rand::Rng;
use tracing::{debug, info, instrument};

use crate::{
    error::{GameError, Result},
    logic::{
        CellAction, Game, PlayerId,
        cell::{self, Transition},
        flood, generator,
    },
};

/// Creates games and applies player moves to them.
///
/// Callers must hold exclusive access to a game while acting on it; the
/// service itself does no locking and no I/O.
#[derive(Debug, Clone)]
pub struct GameService {
    max_board_cells: usize,
}

impl GameService {
    pub fn new(max_board_cells: usize) -> Self {
        Self { max_board_cells }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn create_game(
        &self,
        columns: i64,
        rows: i64,
        bombs: i64,
        player: PlayerId,
    ) -> Result<Game> {
        self.create_game_with_rng(columns, rows, bombs, player, &mut rand::rng())
    }

    pub fn create_game_with_rng<R: Rng>(
        &self,
        columns: i64,
        rows: i64,
        bombs: i64,
        player: PlayerId,
        rng: &mut R,
    ) -> Result<Game> {
        let too_large = columns
            .checked_mul(rows)
            .and_then(|size| usize::try_from(size).ok())
            .is_some_and(|size| size > self.max_board_cells);
        if too_large {
            return Err(GameError::InvalidDimensions {
                columns,
                rows,
                bombs,
            });
        }

        let board = generator::generate(columns, rows, bombs, rng)?;
        let game = Game::new(board, player, Utc::now());
        info!(
            "Created game {} for {}: {}x{} with {} bombs",
            game.id(),
            game.player(),
            columns,
            rows,
            game.bomb_count()
        );
        Ok(game)
    }

    /// Validates and applies one move, cascading reveals from safe cells.
    ///
    /// Every check runs before the board is touched, so a rejected move leaves
    /// the game unchanged.
    #[instrument(level = "trace", skip(self, game), fields(game_id = %game.id()))]
    pub fn apply_cell_action<'g>(
        &self,
        game: &'g mut Game,
        pos: Pos,
        action: CellAction,
    ) -> Result<&'g Game> {
        if game.finished() {
            debug!("Ignoring {:?} at {} on finished game", action, pos);
            return Err(GameError::GameAlreadyFinished);
        }

        let board = game.board_mut();
        let target = board.get_mut(pos)?;
        let transition = cell::transition(target, pos, action)?;
        let hit_bomb = action == CellAction::Uncover && target.has_bomb();

        if action == CellAction::Uncover && !hit_bomb {
            let cascaded = flood::flood_uncover(board, pos);
            debug!("Uncovered {} and {} cells around it", pos, cascaded);
        } else if transition == Transition::NoChange {
            debug!("{:?} at {} changed nothing", action, pos);
        }

        let status = game.status();
        if status.finished {
            game.mark_finished(Utc::now());
            if status.won {
                info!("Game {} won by {}", game.id(), game.player());
            } else {
                info!("Game {} lost by {} at {}", game.id(), game.player(), pos);
            }
        }

        Ok(game)
    }
}
