use std::cmp::min;

use rand::Rng;
use tracing::debug;

use crate::{
    data::Board,
    error::{GameError, Result},
};

/// Generates a covered board with `bombs` placed at random. Requests for more
/// bombs than cells fill the whole board.
pub fn generate<R: Rng>(columns: i64, rows: i64, bombs: i64, rng: &mut R) -> Result<Board> {
    let invalid = GameError::InvalidDimensions {
        columns,
        rows,
        bombs,
    };
    let (Ok(width), Ok(height), Ok(requested)) = (
        usize::try_from(columns),
        usize::try_from(rows),
        usize::try_from(bombs),
    ) else {
        return Err(invalid);
    };
    let size = width
        .checked_mul(height)
        .and_then(|size| u32::try_from(size).ok())
        .ok_or(invalid)?;

    let placed = min(requested, size as usize) as u32;
    debug!("Placing {} bombs on {}x{} board", placed, width, height);

    Ok(Board::from_bomb_mask(width, height, place_bombs(size, placed, rng)))
}

/// Selection sampling: each cell becomes a bomb with probability
/// `bombs_left / cells_left`, which yields exactly `bombs` bombs spread
/// uniformly in a single pass.
fn place_bombs<R: Rng>(size: u32, bombs: u32, rng: &mut R) -> Vec<bool> {
    let mut bombs_left = bombs;
    (1..=size)
        .rev()
        .map(|cells_left| {
            let value = rng.random_ratio(bombs_left, cells_left);
            if value {
                bombs_left -= 1;
            }
            value
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn places_exactly_the_requested_bombs() {
        let mut rng = rng();
        for bombs in [0, 1, 10, 71, 72] {
            let board = generate(8, 9, bombs, &mut rng).unwrap();
            assert_eq!(board.bomb_count(), bombs as usize);
            assert_eq!(board.uncovered_count(), 0);
            assert!(board.cells().all(|(_, cell)| !cell.is_flagged()));
        }
    }

    #[test]
    fn too_many_bombs_fill_the_board() {
        let board = generate(4, 3, 100, &mut rng()).unwrap();

        assert!(board.cells().all(|(_, cell)| cell.has_bomb()));
        assert_eq!(board.bomb_count(), 12);
    }

    #[test]
    fn empty_boards_are_legal() {
        for (columns, rows) in [(0, 0), (0, 5), (5, 0)] {
            let board = generate(columns, rows, 3, &mut rng()).unwrap();
            assert_eq!(board.size(), 0);
            assert_eq!(board.bomb_count(), 0);
        }
    }

    #[test]
    fn negative_requests_are_invalid() {
        for (columns, rows, bombs) in [(-1, 3, 1), (3, -1, 1), (3, 3, -1)] {
            assert_eq!(
                generate(columns, rows, bombs, &mut rng()),
                Err(GameError::InvalidDimensions {
                    columns,
                    rows,
                    bombs
                })
            );
        }
    }

    #[test]
    fn oversized_boards_are_invalid() {
        assert!(matches!(
            generate(i64::MAX, 2, 0, &mut rng()),
            Err(GameError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            generate(1 << 20, 1 << 20, 0, &mut rng()),
            Err(GameError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn placement_is_spread_over_the_board() {
        let mut rng = rng();
        let mut hits = [0u32; 16];
        for _ in 0..2000 {
            let board = generate(4, 4, 4, &mut rng).unwrap();
            for (index, (_, cell)) in board.cells().enumerate() {
                if cell.has_bomb() {
                    hits[index] += 1;
                }
            }
        }

        // Expected 500 per cell.
        assert!(hits.iter().all(|&count| (350..650).contains(&count)), "{hits:?}");
    }
}
