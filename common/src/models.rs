use std::fmt;

use chrono::{DateTime, Utc};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};
use uuid::Uuid;

/// A cell as the player is allowed to see it.
///
/// Serialized as `"c"` (covered), `"f"` (flagged), the number of adjacent
/// bombs for an uncovered safe cell, or `"*"` for an uncovered bomb.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderedCell {
    Covered,
    Flagged,
    Uncovered { adjacent: u8 },
    Bomb,
}

impl Serialize for RenderedCell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Covered => serializer.serialize_str("c"),
            Self::Flagged => serializer.serialize_str("f"),
            Self::Uncovered { adjacent } => serializer.serialize_u8(*adjacent),
            Self::Bomb => serializer.serialize_str("*"),
        }
    }
}

struct RenderedCellVisitor;

impl Visitor<'_> for RenderedCellVisitor {
    type Value = RenderedCell;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("\"c\", \"f\", \"*\" or an adjacent bomb count between 0 and 8")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        match value {
            "c" => Ok(RenderedCell::Covered),
            "f" => Ok(RenderedCell::Flagged),
            "*" => Ok(RenderedCell::Bomb),
            other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
        }
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        match u8::try_from(value) {
            Ok(adjacent) if adjacent <= 8 => Ok(RenderedCell::Uncovered { adjacent }),
            _ => Err(E::invalid_value(de::Unexpected::Unsigned(value), &self)),
        }
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        match u64::try_from(value) {
            Ok(value) => self.visit_u64(value),
            Err(_) => Err(E::invalid_value(de::Unexpected::Signed(value), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for RenderedCell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RenderedCellVisitor)
    }
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub col: usize,
    pub row: usize,
}

impl Pos {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Parameters of a new game, all required. Signed so that negative requests
/// reach the server's validation instead of failing deserialization.
#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
pub struct GameParams {
    pub cols: i64,
    pub rows: i64,
    pub bombs: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GameResponse {
    pub id: Uuid,
    pub cols: usize,
    pub rows: usize,
    pub bombs: usize,
    /// Indexed as `board[col][row]`.
    pub board: Vec<Vec<RenderedCell>>,
    pub finished: bool,
    pub won: bool,
    pub created_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl GameResponse {
    pub fn cell(&self, pos: Pos) -> Option<RenderedCell> {
        self.board.get(pos.col)?.get(pos.row).copied()
    }
}
