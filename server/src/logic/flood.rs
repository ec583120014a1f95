use minesweeper_common::models::Pos;

use crate::data::{Board, CellStatus};

/// Cascades the reveal out of a freshly uncovered safe cell.
///
/// A cell without adjacent bombs uncovers all of its covered or flagged
/// neighbours, and each of those is expanded in turn. Cells next to a bomb
/// stop the cascade. Returns how many cells were uncovered besides `origin`.
pub fn flood_uncover(board: &mut Board, origin: Pos) -> usize {
    match board.get(origin) {
        Ok(cell) if cell.is_uncovered() && !cell.has_bomb() => {}
        _ => return 0,
    }

    let mut uncovered = 0;
    let mut frontier = vec![origin];

    while let Some(pos) = frontier.pop() {
        if board.adjacent_bombs(pos) > 0 {
            continue;
        }

        for neighbor in board.neighbor_positions(pos) {
            let Ok(cell) = board.get_mut(neighbor) else {
                continue;
            };
            if cell.is_covered() {
                cell.status = CellStatus::Uncovered;
                uncovered += 1;
                frontier.push(neighbor);
            }
        }
    }

    uncovered
}
