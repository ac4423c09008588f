use serde::{Deserialize, Serialize};

/// One square of the board as seen by the round engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_open: bool,
    /// Mines among the up to 8 surrounding cells; always 0 for a mine cell.
    pub adjacent_mines: u8,
}

impl Cell {
    pub const fn is_safe(self) -> bool {
        !self.is_mine
    }

    /// What a player may see of this cell right now.
    pub const fn view(self) -> CellView {
        match (self.is_open, self.is_mine) {
            (false, _) => CellView::Hidden,
            (true, true) => CellView::Mine,
            (true, false) => CellView::Safe(self.adjacent_mines),
        }
    }
}

/// Player-visible projection of a [`Cell`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Safe(u8),
    Mine,
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
