use minesweeper_common::{models::Pos, protocol::ErrorResponse};
use rocket::{
    Request,
    http::Status,
    response::{self, Responder, status},
    serde::json::Json,
};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board: {columns}x{rows} with {bombs} bombs")]
    InvalidDimensions { columns: i64, rows: i64, bombs: i64 },
    #[error("Cell {0} does not exist")]
    CellNotFound(Pos),
    #[error("Cell {0} is already uncovered")]
    CellLocked(Pos),
    #[error("Game already finished, no new moves are accepted")]
    GameAlreadyFinished,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Errors surfaced by the HTTP routes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Cell ({col}, {row}) does not exist")]
    CellOutOfRange { col: String, row: String },
    #[error("Game not found")]
    NotFound,
    #[error("Game belongs to another player")]
    Forbidden,
    #[error("A valid player e-mail is required in the X-Player header")]
    Unauthorized,
    #[error("Too many games created, try again later")]
    TooManyRequests,
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            Self::Game(GameError::InvalidDimensions { .. }) => Status::BadRequest,
            Self::Game(GameError::CellNotFound(_))
            | Self::CellOutOfRange { .. }
            | Self::NotFound => Status::NotFound,
            Self::Game(GameError::CellLocked(_) | GameError::GameAlreadyFinished) => {
                Status::Conflict
            }
            Self::Forbidden => Status::Forbidden,
            Self::Unauthorized => Status::Unauthorized,
            Self::TooManyRequests => Status::TooManyRequests,
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        debug!("Request failed with {}: {}", status, self);
        status::Custom(
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
        .respond_to(request)
    }
}
