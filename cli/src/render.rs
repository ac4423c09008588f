use sapper_core::{CellView, Round};

const HIDDEN: char = '■';
const EMPTY: char = '·';
const MINE: char = '*';
const TRIGGERED: char = 'X';

/// Text board with one-based row and column labels.
pub fn board(round: &Round) -> String {
    let grid = round.grid();
    let size = grid.size();
    let mut out = String::from("   ");
    for col in 1..=size {
        out.push_str(&format!("{col:>3}"));
    }
    out.push('\n');

    for row in 0..size {
        out.push_str(&format!("{:>3}", row + 1));
        for col in 0..size {
            let glyph = match grid.cell_at((row, col)).view() {
                CellView::Hidden => HIDDEN,
                CellView::Mine if round.triggered_mine() == Some((row, col)) => TRIGGERED,
                CellView::Mine => MINE,
                CellView::Safe(0) => EMPTY,
                CellView::Safe(count) => char::from(b'0' + count),
            };
            out.push_str(&format!("{glyph:>3}"));
        }
        out.push('\n');
    }
    out
}

pub fn status_line(round: &Round, balance: f64) -> String {
    format!(
        "Mines: {}  Opened: {}/{}  Multiplier: x{:.4}  Balance: {:.2}",
        round.config().mine_count,
        round.opened_safe_count(),
        round.grid().safe_cell_count(),
        round.current_multiplier(),
        balance
    )
}
