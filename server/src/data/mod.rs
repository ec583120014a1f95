use minesweeper_common::models::Pos;

use crate::error::{GameError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellStatus {
    #[default]
    Covered,
    Flagged,
    Uncovered,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    has_bomb: bool,
    pub(crate) status: CellStatus,
}

impl Cell {
    fn new(has_bomb: bool) -> Self {
        Self {
            has_bomb,
            status: CellStatus::Covered,
        }
    }

    pub fn has_bomb(&self) -> bool {
        self.has_bomb
    }

    pub fn status(&self) -> CellStatus {
        self.status
    }

    /// Flagged cells count as covered.
    pub fn is_covered(&self) -> bool {
        self.status != CellStatus::Uncovered
    }

    pub fn is_flagged(&self) -> bool {
        self.status == CellStatus::Flagged
    }

    pub fn is_uncovered(&self) -> bool {
        self.status == CellStatus::Uncovered
    }
}

/// Grid of cells stored row-major in a flat vector.
///
/// Cell handles are plain borrows into that vector, so a change made through
/// [`Board::get_mut`] is what every later lookup sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Builds a board from a row-major bomb mask. Missing entries are safe
    /// cells, extra entries are ignored.
    pub(crate) fn from_bomb_mask(
        columns: usize,
        rows: usize,
        mask: impl IntoIterator<Item = bool>,
    ) -> Self {
        let size = columns * rows;
        let mut cells: Vec<Cell> = mask.into_iter().take(size).map(Cell::new).collect();
        cells.resize_with(size, Cell::default);
        Self {
            columns,
            rows,
            cells,
        }
    }

    /// Builds a covered board with bombs at exactly the given coordinates.
    pub fn from_bombs(columns: usize, rows: usize, bombs: &[Pos]) -> Result<Self> {
        let mut mask = vec![false; columns * rows];
        for &pos in bombs {
            let index = index_of(columns, rows, pos).ok_or(GameError::CellNotFound(pos))?;
            mask[index] = true;
        }
        Ok(Self::from_bomb_mask(columns, rows, mask))
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, pos: Pos) -> Result<&Cell> {
        index_of(self.columns, self.rows, pos)
            .map(|index| &self.cells[index])
            .ok_or(GameError::CellNotFound(pos))
    }

    pub fn get_mut(&mut self, pos: Pos) -> Result<&mut Cell> {
        index_of(self.columns, self.rows, pos)
            .map(|index| &mut self.cells[index])
            .ok_or(GameError::CellNotFound(pos))
    }

    /// Every cell exactly once, row by row: `(0, 0)`, `(1, 0)`, ...
    pub fn cells(&self) -> impl Iterator<Item = (Pos, &Cell)> {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| (Pos::new(index % columns, index / columns), cell))
    }

    /// Coordinates of the on-board cells around `pos`, row by row.
    ///
    /// The iterator does not borrow the board, so callers may mutate cells
    /// while walking it.
    pub fn neighbor_positions(&self, pos: Pos) -> impl Iterator<Item = Pos> + use<> {
        let (columns, rows) = (self.columns, self.rows);
        (-1isize..=1).flat_map(move |dr| {
            (-1isize..=1).filter_map(move |dc| {
                if dc == 0 && dr == 0 {
                    return None;
                }
                let col = pos.col.checked_add_signed(dc)?;
                let row = pos.row.checked_add_signed(dr)?;
                (col < columns && row < rows).then_some(Pos::new(col, row))
            })
        })
    }

    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = (Pos, &Cell)> {
        self.neighbor_positions(pos)
            .filter_map(move |neighbor| Some((neighbor, self.get(neighbor).ok()?)))
    }

    pub fn adjacent_bombs(&self, pos: Pos) -> u8 {
        self.neighbors(pos).filter(|(_, cell)| cell.has_bomb()).count() as u8
    }

    pub fn bomb_count(&self) -> usize {
        self.cells().filter(|(_, cell)| cell.has_bomb()).count()
    }

    pub fn uncovered_count(&self) -> usize {
        self.cells().filter(|(_, cell)| cell.is_uncovered()).count()
    }

    pub fn uncovered_bomb_count(&self) -> usize {
        self.cells()
            .filter(|(_, cell)| cell.is_uncovered() && cell.has_bomb())
            .count()
    }
}

fn index_of(columns: usize, rows: usize, pos: Pos) -> Option<usize> {
    (pos.col < columns && pos.row < rows).then(|| pos.row * columns + pos.col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_iterate_row_major() {
        let board = Board::from_bombs(2, 2, &[]).unwrap();

        let positions: Vec<Pos> = board.cells().map(|(pos, _)| pos).collect();

        assert_eq!(
            positions,
            vec![Pos::new(0, 0), Pos::new(1, 0), Pos::new(0, 1), Pos::new(1, 1)]
        );
    }

    #[test]
    fn lookup_outside_the_board_fails() {
        let empty = Board::from_bombs(0, 0, &[]).unwrap();
        assert_eq!(
            empty.get(Pos::new(0, 0)),
            Err(GameError::CellNotFound(Pos::new(0, 0)))
        );

        let board = Board::from_bombs(2, 2, &[]).unwrap();
        assert_eq!(
            board.get(Pos::new(3, 0)),
            Err(GameError::CellNotFound(Pos::new(3, 0)))
        );
        assert_eq!(
            board.get(Pos::new(0, 2)),
            Err(GameError::CellNotFound(Pos::new(0, 2)))
        );
    }

    #[test]
    fn mutation_through_a_handle_is_visible_on_the_board() {
        let mut board = Board::from_bombs(1, 1, &[]).unwrap();

        board.get_mut(Pos::new(0, 0)).unwrap().status = CellStatus::Flagged;

        assert!(board.get(Pos::new(0, 0)).unwrap().is_flagged());
    }

    #[test]
    fn neighbors_of_corners_edges_and_interior() {
        let board = Board::from_bombs(10, 10, &[]).unwrap();
        let neighbors = |col, row| -> Vec<Pos> {
            board
                .neighbors(Pos::new(col, row))
                .map(|(pos, _)| pos)
                .collect()
        };

        assert_eq!(
            neighbors(0, 0),
            vec![Pos::new(1, 0), Pos::new(0, 1), Pos::new(1, 1)]
        );
        assert_eq!(
            neighbors(9, 9),
            vec![Pos::new(8, 8), Pos::new(9, 8), Pos::new(8, 9)]
        );
        assert_eq!(
            neighbors(4, 4),
            vec![
                Pos::new(3, 3),
                Pos::new(4, 3),
                Pos::new(5, 3),
                Pos::new(3, 4),
                Pos::new(5, 4),
                Pos::new(3, 5),
                Pos::new(4, 5),
                Pos::new(5, 5),
            ]
        );
    }

    #[test]
    fn neighbor_count_depends_on_position() {
        for (columns, rows) in [(2, 2), (2, 5), (7, 3), (10, 10)] {
            let board = Board::from_bombs(columns, rows, &[]).unwrap();
            for (pos, _) in board.cells() {
                let on_col_edge = pos.col == 0 || pos.col == columns - 1;
                let on_row_edge = pos.row == 0 || pos.row == rows - 1;
                let expected = match (on_col_edge, on_row_edge) {
                    (true, true) => 3,
                    (true, false) | (false, true) => 5,
                    (false, false) => 8,
                };
                assert_eq!(board.neighbors(pos).count(), expected, "{pos} on {columns}x{rows}");
            }
        }
    }

    #[test]
    fn counters_scan_cell_state() {
        let mut board =
            Board::from_bombs(8, 9, &[Pos::new(2, 2), Pos::new(3, 3), Pos::new(5, 3)]).unwrap();
        board.get_mut(Pos::new(2, 2)).unwrap().status = CellStatus::Uncovered;
        board.get_mut(Pos::new(0, 0)).unwrap().status = CellStatus::Uncovered;
        board.get_mut(Pos::new(1, 0)).unwrap().status = CellStatus::Flagged;

        assert_eq!(board.size(), 72);
        assert_eq!(board.bomb_count(), 3);
        assert_eq!(board.uncovered_count(), 2);
        assert_eq!(board.uncovered_bomb_count(), 1);
        assert_eq!(board.adjacent_bombs(Pos::new(4, 4)), 2);
    }

    #[test]
    fn bombs_outside_the_board_are_rejected() {
        assert_eq!(
            Board::from_bombs(3, 3, &[Pos::new(3, 1)]),
            Err(GameError::CellNotFound(Pos::new(3, 1)))
        );
    }
}
