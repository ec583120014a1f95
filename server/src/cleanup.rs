use std::time::Duration;

use rocket::{
    Build, Rocket,
    fairing::{self, Fairing, Info, Kind},
};
use tokio::time;
use tracing::{info, warn};

use crate::{config::ServerConfig, store::GameStore};

pub async fn start_cleanup_task(
    store: GameStore,
    cleanup_interval: Duration,
    inactive_timeout: Duration,
    finished_timeout: Duration,
) {
    let mut interval = time::interval(cleanup_interval.max(Duration::from_secs(1)));

    info!(
        "Started game cleanup task: checking every {}s, inactive timeout: {}s, finished timeout: {}s",
        cleanup_interval.as_secs(),
        inactive_timeout.as_secs(),
        finished_timeout.as_secs()
    );

    loop {
        interval.tick().await;
        store.cleanup(inactive_timeout, finished_timeout);
    }
}

pub struct CleanupFairing;

#[rocket::async_trait]
impl Fairing for CleanupFairing {
    fn info(&self) -> Info {
        Info {
            name: "Cleanup Task",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> fairing::Result {
        match (rocket.state::<GameStore>(), rocket.state::<ServerConfig>()) {
            (Some(store), Some(config)) => {
                info!("Starting cleanup task for game management");
                tokio::spawn(start_cleanup_task(
                    store.clone(),
                    config.cleanup_interval,
                    config.inactive_game_timeout,
                    config.finished_game_timeout,
                ));
            }
            _ => warn!("Failed to get game store or config for cleanup task"),
        }
        Ok(rocket)
    }
}
