use rocket::{Build, Rocket, catchers, routes};

pub mod auth;
pub mod cleanup;
pub mod config;
pub mod cors;
pub mod data;
pub mod error;
pub mod logic;
pub mod rate_limit;
pub mod routes;
pub mod store;

use crate::{
    cleanup::CleanupFairing, config::ServerConfig, cors::create_cors, logic::GameService,
    rate_limit::RateLimiter, store::GameStore,
};

/// Assembles the server: game store, services, fairings and routes.
pub fn build_rocket(config: ServerConfig) -> Result<Rocket<Build>, rocket_cors::Error> {
    let cors = create_cors(&config.cors_allowed_origins)?;
    let service = GameService::new(config.max_board_cells);
    let rate_limiter = RateLimiter::new(config.rate_limit_games_per_minute);

    Ok(rocket::build()
        .attach(cors)
        .attach(CleanupFairing)
        .manage(GameStore::new())
        .manage(service)
        .manage(rate_limiter)
        .manage(config)
        .mount(
            "/",
            routes![
                routes::create_game,
                routes::list_games,
                routes::get_game,
                routes::update_cell
            ],
        )
        .register("/", catchers![routes::default_catcher]))
}
