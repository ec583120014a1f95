use minesweeper_common::models::{GameResponse, Pos, RenderedCell};

use crate::{
    data::{Board, CellStatus},
    error::Result,
    logic::Game,
};

impl Board {
    /// What the player may see at `pos`. Covered cells never reveal whether
    /// they hold a bomb.
    pub fn render_cell(&self, pos: Pos) -> Result<RenderedCell> {
        let cell = self.get(pos)?;
        Ok(match cell.status() {
            CellStatus::Covered => RenderedCell::Covered,
            CellStatus::Flagged => RenderedCell::Flagged,
            CellStatus::Uncovered if cell.has_bomb() => RenderedCell::Bomb,
            CellStatus::Uncovered => RenderedCell::Uncovered {
                adjacent: self.adjacent_bombs(pos),
            },
        })
    }

    /// The whole board indexed as `board[col][row]`.
    pub fn render(&self) -> Vec<Vec<RenderedCell>> {
        (0..self.columns())
            .map(|col| {
                (0..self.rows())
                    .filter_map(|row| self.render_cell(Pos::new(col, row)).ok())
                    .collect()
            })
            .collect()
    }
}

impl From<&Game> for GameResponse {
    fn from(game: &Game) -> Self {
        let status = game.status();
        let board = game.board();
        Self {
            id: game.id(),
            cols: board.columns(),
            rows: board.rows(),
            bombs: board.bomb_count(),
            board: board.render(),
            finished: status.finished,
            won: status.won,
            created_at: game.created_at(),
            finished_at: game.finished_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::logic::PlayerId;

    fn covered(columns: usize, rows: usize) -> Vec<Vec<RenderedCell>> {
        vec![vec![RenderedCell::Covered; rows]; columns]
    }

    fn set(board: &mut Board, pos: Pos, status: CellStatus) {
        board.get_mut(pos).unwrap().status = status;
    }

    #[test]
    fn fresh_board_is_all_covered() {
        let board = Board::from_bombs(8, 9, &[Pos::new(1, 1), Pos::new(4, 7)]).unwrap();

        assert_eq!(board.render(), covered(8, 9));
    }

    #[test]
    fn uncovered_cell_shows_adjacent_bombs() {
        let mut board = Board::from_bombs(8, 9, &[Pos::new(2, 2), Pos::new(2, 4)]).unwrap();
        set(&mut board, Pos::new(2, 3), CellStatus::Uncovered);

        let mut expected = covered(8, 9);
        expected[2][3] = RenderedCell::Uncovered { adjacent: 2 };
        assert_eq!(board.render(), expected);
    }

    #[test]
    fn flags_hide_bombs() {
        let mut board = Board::from_bombs(8, 9, &[Pos::new(2, 2)]).unwrap();
        set(&mut board, Pos::new(2, 2), CellStatus::Flagged);
        set(&mut board, Pos::new(5, 5), CellStatus::Flagged);

        let mut expected = covered(8, 9);
        expected[2][2] = RenderedCell::Flagged;
        expected[5][5] = RenderedCell::Flagged;
        assert_eq!(board.render(), expected);
    }

    #[test]
    fn uncovered_bombs_render_as_stars() {
        let bombs = [Pos::new(0, 0), Pos::new(3, 1), Pos::new(1, 2)];
        let mut board = Board::from_bombs(4, 3, &bombs).unwrap();
        set(&mut board, Pos::new(0, 0), CellStatus::Uncovered);
        set(&mut board, Pos::new(3, 1), CellStatus::Uncovered);
        set(&mut board, Pos::new(2, 2), CellStatus::Uncovered);

        let rendered = board.render();
        let stars = rendered
            .iter()
            .flatten()
            .filter(|cell| **cell == RenderedCell::Bomb)
            .count();
        let numbers = rendered
            .iter()
            .flatten()
            .filter(|cell| matches!(cell, RenderedCell::Uncovered { .. }))
            .count();

        assert_eq!(stars, board.uncovered_bomb_count());
        assert_eq!(stars + numbers, board.uncovered_count());
        assert_eq!(rendered[2][2], RenderedCell::Uncovered { adjacent: 2 });
    }

    #[test]
    fn response_carries_board_summary() {
        let board = Board::from_bombs(8, 9, &[Pos::new(2, 2), Pos::new(3, 3), Pos::new(5, 3)])
            .unwrap();
        let game = Game::new(board, PlayerId::new("user@example.com"), Utc::now());

        let response = GameResponse::from(&game);

        assert_eq!(response.id, game.id());
        assert_eq!((response.cols, response.rows, response.bombs), (8, 9, 3));
        assert_eq!(response.board, covered(8, 9));
        assert!(!response.finished);
        assert!(!response.won);
        assert_eq!(response.finished_at, None);
    }
}
