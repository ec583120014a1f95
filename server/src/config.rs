use std::{env, str::FromStr, time::Duration};

use tracing::warn;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub cors_allowed_origins: Vec<String>,
    pub rate_limit_games_per_minute: u32,
    pub cleanup_interval: Duration,
    pub inactive_game_timeout: Duration,
    pub finished_game_timeout: Duration,
    pub max_board_cells: usize,
    pub games_list_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            cors_allowed_origins: vec!["http://localhost:8080".to_string()],
            rate_limit_games_per_minute: 10,
            cleanup_interval: Duration::from_secs(60),
            inactive_game_timeout: Duration::from_secs(86400),
            finished_game_timeout: Duration::from_secs(3600),
            max_board_cells: 250_000,
            games_list_limit: 15,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|value| parse_origins(&value))
            .unwrap_or(defaults.cors_allowed_origins);

        Self {
            cors_allowed_origins,
            rate_limit_games_per_minute: env_or(
                "RATE_LIMIT_GAMES_PER_MINUTE",
                defaults.rate_limit_games_per_minute,
            ),
            cleanup_interval: Duration::from_secs(env_or(
                "CLEANUP_INTERVAL_SECONDS",
                defaults.cleanup_interval.as_secs(),
            )),
            inactive_game_timeout: Duration::from_secs(env_or(
                "INACTIVE_GAME_TIMEOUT_SECONDS",
                defaults.inactive_game_timeout.as_secs(),
            )),
            finished_game_timeout: Duration::from_secs(env_or(
                "FINISHED_GAME_TIMEOUT_SECONDS",
                defaults.finished_game_timeout.as_secs(),
            )),
            max_board_cells: env_or("MAX_BOARD_CELLS", defaults.max_board_cells),
            games_list_limit: env_or("GAMES_LIST_LIMIT", defaults.games_list_limit),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid value for {}: {:?}", name, value);
            default
        }),
        Err(_) => default,
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_empty_entries_dropped() {
        assert_eq!(
            parse_origins(" http://a.test ,,http://b.test,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn unset_or_invalid_variables_fall_back_to_default() {
        assert_eq!(env_or("MINESWEEPER_TEST_UNSET_VARIABLE", 42u32), 42);
    }
}
