use minesweeper_common::{
    models::{GameParams, GameResponse, Pos},
    protocol::{CellActionRequest, ErrorResponse},
};
use rocket::{
    Request, State, catch, get,
    http::Status,
    patch, post,
    response::status::{Created, Custom},
    serde::json::Json,
};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{Player, authorize_owner},
    config::ServerConfig,
    error::{ApiError, GameError},
    logic::GameService,
    rate_limit::{ClientIp, RateLimiter},
    store::{GameStore, StoredGame},
};

fn find_game(store: &GameStore, id: &str) -> Result<StoredGame, ApiError> {
    Uuid::parse_str(id)
        .ok()
        .and_then(|id| store.get(&id))
        .ok_or_else(|| {
            debug!("Game {} not found", id);
            ApiError::NotFound
        })
}

#[post("/games", data = "<params>")]
#[instrument(level = "trace", skip(service, store, rate_limiter, client_ip), fields(client_ip = %client_ip.0))]
pub fn create_game(
    params: Json<GameParams>,
    player: Player,
    client_ip: ClientIp,
    service: &State<GameService>,
    store: &State<GameStore>,
    rate_limiter: &State<RateLimiter>,
) -> Result<Created<Json<GameResponse>>, ApiError> {
    info!(
        "Game creation request from {} ({}): {}x{} with {} bombs",
        player.0, client_ip.0, params.cols, params.rows, params.bombs
    );

    if !rate_limiter.check(client_ip.0) {
        warn!("Rate limit exceeded for client {}", client_ip.0);
        return Err(ApiError::TooManyRequests);
    }

    let game = service.create_game(params.cols, params.rows, params.bombs, player.0)?;
    let response = GameResponse::from(&game);
    store.insert(game);

    Ok(Created::new(format!("/games/{}", response.id)).body(Json(response)))
}

#[get("/games")]
#[instrument(level = "trace", skip(store, config))]
pub async fn list_games(
    player: Player,
    store: &State<GameStore>,
    config: &State<ServerConfig>,
) -> Json<Vec<GameResponse>> {
    let mut games = Vec::new();
    for stored in store.list_for_player(&player.0, config.games_list_limit) {
        let entry = stored.entry.lock().await;
        games.push(GameResponse::from(entry.game()));
    }
    debug!("Listing {} games for {}", games.len(), player.0);
    Json(games)
}

#[get("/games/<id>")]
#[instrument(level = "trace", skip(store))]
pub async fn get_game(
    id: &str,
    player: Player,
    store: &State<GameStore>,
) -> Result<Json<GameResponse>, ApiError> {
    let stored = find_game(store, id)?;
    authorize_owner(&stored, &player)?;

    let entry = stored.entry.lock().await;
    Ok(Json(GameResponse::from(entry.game())))
}

/// Coordinates that are negative or too large for the board type name no
/// cell at all.
fn parse_pos(col: &str, row: &str) -> Result<Pos, ApiError> {
    match (col.parse(), row.parse()) {
        (Ok(col), Ok(row)) => Ok(Pos::new(col, row)),
        _ => Err(ApiError::CellOutOfRange {
            col: col.to_string(),
            row: row.to_string(),
        }),
    }
}

#[patch("/games/<id>/cells/<col>/<row>", data = "<request>")]
#[instrument(level = "trace", skip(service, store))]
pub async fn update_cell(
    id: &str,
    col: &str,
    row: &str,
    request: Json<CellActionRequest>,
    player: Player,
    service: &State<GameService>,
    store: &State<GameStore>,
) -> Result<Json<GameResponse>, ApiError> {
    let stored = find_game(store, id)?;
    authorize_owner(&stored, &player)?;

    let mut entry = stored.entry.lock().await;
    // A finished game rejects every move, whatever the coordinates.
    let pos = match parse_pos(col, row) {
        Err(_) if entry.game().finished() => return Err(GameError::GameAlreadyFinished.into()),
        parsed => parsed?,
    };
    let game = service.apply_cell_action(entry.game_mut(), pos, request.action.into())?;

    Ok(Json(GameResponse::from(game)))
}

#[catch(default)]
pub fn default_catcher(status: Status, _request: &Request<'_>) -> Custom<Json<ErrorResponse>> {
    let error = if status == Status::Unauthorized {
        ApiError::Unauthorized.to_string()
    } else {
        status.reason_lossy().to_string()
    };
    Custom(status, Json(ErrorResponse { error }))
}
