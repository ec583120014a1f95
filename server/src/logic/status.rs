use crate::data::Board;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStatus {
    pub finished: bool,
    pub won: bool,
}

/// A game ends when every safe cell is uncovered or when any bomb is.
pub fn evaluate(board: &Board) -> GameStatus {
    let uncovered_bombs = board.uncovered_bomb_count();
    let finished =
        board.size() - board.uncovered_count() == board.bomb_count() || uncovered_bombs > 0;

    GameStatus {
        finished,
        won: finished && uncovered_bombs == 0,
    }
}
