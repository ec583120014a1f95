use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::logic::{Game, PlayerId};

/// A stored game plus the moment it was last touched.
#[derive(Debug)]
pub struct GameEntry {
    game: Game,
    last_activity: Instant,
}

impl GameEntry {
    fn new(game: Game) -> Self {
        Self {
            game,
            last_activity: Instant::now(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        self.last_activity = Instant::now();
        &mut self.game
    }

    pub fn should_cleanup(&self, inactive_timeout: Duration, finished_timeout: Duration) -> bool {
        let idle = self.last_activity.elapsed();
        if self.game.finished() {
            idle >= finished_timeout
        } else {
            idle >= inactive_timeout
        }
    }
}

pub type SharedGame = Arc<Mutex<GameEntry>>;

/// Immutable facts about a game, readable without taking its lock.
#[derive(Debug, Clone)]
pub struct StoredGame {
    pub player: PlayerId,
    pub created_at: DateTime<Utc>,
    pub entry: SharedGame,
}

/// In-memory games keyed by id. Each game sits behind its own async mutex,
/// which serializes moves on that game.
#[derive(Debug, Clone, Default)]
pub struct GameStore {
    games: Arc<DashMap<Uuid, StoredGame>>,
}

impl GameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, game: Game) -> SharedGame {
        let id = game.id();
        let stored = StoredGame {
            player: game.player().clone(),
            created_at: game.created_at(),
            entry: Arc::new(Mutex::new(GameEntry::new(game))),
        };
        let entry = stored.entry.clone();
        self.games.insert(id, stored);
        debug!("Stored game {}, total games: {}", id, self.games.len());
        entry
    }

    pub fn get(&self, id: &Uuid) -> Option<StoredGame> {
        self.games.get(id).map(|stored| stored.value().clone())
    }

    /// The player's newest games first, at most `limit` of them.
    pub fn list_for_player(&self, player: &PlayerId, limit: usize) -> Vec<StoredGame> {
        let mut games: Vec<StoredGame> = self
            .games
            .iter()
            .filter(|stored| stored.player == *player)
            .map(|stored| stored.value().clone())
            .collect();
        games.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        games.truncate(limit);
        games
    }

    pub fn remove(&self, id: &Uuid) -> bool {
        self.games.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Drops games that have been idle for too long. Games whose lock is held
    /// are in use and are skipped.
    pub fn cleanup(&self, inactive_timeout: Duration, finished_timeout: Duration) -> usize {
        let mut games_to_remove = Vec::new();

        for stored in self.games.iter() {
            if let Ok(entry) = stored.entry.try_lock()
                && entry.should_cleanup(inactive_timeout, finished_timeout)
            {
                games_to_remove.push(*stored.key());
            }
        }

        let removed_count = games_to_remove.len();
        for id in games_to_remove {
            if self.remove(&id) {
                debug!("Cleaned up game: {}", id);
            }
        }

        if removed_count > 0 {
            info!("Cleaned up {} inactive games", removed_count);
        }
        removed_count
    }
}
