use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::data::Board;

pub mod cell;
pub mod flood;
pub mod generator;
pub mod render;
pub mod service;
pub mod status;

pub use cell::CellAction;
pub use service::GameService;
pub use status::GameStatus;

/// Identity of the player owning a game, a normalized e-mail address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    id: Uuid,
    player: PlayerId,
    board: Board,
    created_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl Game {
    pub(crate) fn new(board: Board, player: PlayerId, created_at: DateTime<Utc>) -> Self {
        let mut game = Self {
            id: Uuid::new_v4(),
            player,
            board,
            created_at,
            finished_at: None,
        };
        // Degenerate boards (no safe cell) are over before the first move.
        if game.finished() {
            game.finished_at = Some(created_at);
        }
        game
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn player(&self) -> &PlayerId {
        &self.player
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    pub(crate) fn mark_finished(&mut self, at: DateTime<Utc>) {
        if self.finished_at.is_none() {
            self.finished_at = Some(at);
        }
    }

    pub fn bomb_count(&self) -> usize {
        self.board.bomb_count()
    }

    pub fn status(&self) -> GameStatus {
        status::evaluate(&self.board)
    }

    pub fn finished(&self) -> bool {
        self.status().finished
    }

    pub fn won(&self) -> bool {
        self.status().won
    }
}
