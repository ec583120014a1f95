use minesweeper_server::{build_rocket, config::ServerConfig};
use tracing::info;

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    info!("🚀 Starting Minesweeper server");

    let config = ServerConfig::from_env();
    info!(
        "📊 Boards up to {} cells, {} games per minute per client",
        config.max_board_cells, config.rate_limit_games_per_minute
    );

    let rocket = build_rocket(config)?;
    info!("📡 Endpoints: POST /games, GET /games, GET /games/<id>, PATCH /games/<id>/cells/<col>/<row>");

    let _rocket = rocket.launch().await?;
    Ok(())
}
