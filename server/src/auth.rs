use rocket::{
    http::Status,
    request::{self, FromRequest, Request},
};
use tracing::debug;

use crate::{error::ApiError, logic::PlayerId, store::StoredGame};

/// Header naming the player making the request.
pub const PLAYER_HEADER: &str = "X-Player";

/// The authenticated player. Any well-formed e-mail address is accepted and
/// normalized to lower case; there are no passwords.
#[derive(Debug, Clone)]
pub struct Player(pub PlayerId);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Player {
    type Error = ApiError;

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        match req.headers().get_one(PLAYER_HEADER).and_then(parse_player) {
            Some(player) => request::Outcome::Success(Player(player)),
            None => {
                debug!("Rejecting request without a valid {} header", PLAYER_HEADER);
                request::Outcome::Error((Status::Unauthorized, ApiError::Unauthorized))
            }
        }
    }
}

fn parse_player(value: &str) -> Option<PlayerId> {
    let email = value.trim();
    let (local, domain) = email.split_once('@')?;
    let valid = !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace);
    valid.then(|| PlayerId::new(email.to_lowercase()))
}

/// Only the player who created a game may see or play it.
pub fn authorize_owner(stored: &StoredGame, player: &Player) -> Result<(), ApiError> {
    if stored.player == player.0 {
        Ok(())
    } else {
        debug!("{} is not the owner of the requested game", player.0);
        Err(ApiError::Forbidden)
    }
}
