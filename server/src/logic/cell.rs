use minesweeper_common::{models::Pos, protocol::CellActionKind};

use crate::{
    data::{Cell, CellStatus},
    error::{GameError, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellAction {
    Flag,
    Unflag,
    Uncover,
}

/// An absent action on the wire means "remove the flag".
impl From<Option<CellActionKind>> for CellAction {
    fn from(value: Option<CellActionKind>) -> Self {
        match value {
            Some(CellActionKind::Flag) => Self::Flag,
            Some(CellActionKind::Uncover) => Self::Uncover,
            None => Self::Unflag,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed,
    NoChange,
}

/// Applies `action` to the cell at `pos`. Uncovered cells are terminal.
pub fn transition(cell: &mut Cell, pos: Pos, action: CellAction) -> Result<Transition> {
    if cell.is_uncovered() {
        return Err(GameError::CellLocked(pos));
    }

    let next = match action {
        CellAction::Flag => CellStatus::Flagged,
        CellAction::Unflag => CellStatus::Covered,
        CellAction::Uncover => CellStatus::Uncovered,
    };

    if cell.status == next {
        Ok(Transition::NoChange)
    } else {
        cell.status = next;
        Ok(Transition::Changed)
    }
}
