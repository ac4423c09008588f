use alloc::collections::BTreeSet;
use ndarray::Array2;

use super::*;

/// Reproducible mine placement driven by a seed string.
///
/// Draws a row then a column from [`Xorshift32`] for every attempt and
/// discards attempts that land on an existing mine, so the layout depends on
/// the exact draw order.
#[derive(Clone, Debug, PartialEq)]
pub struct SeededGridGenerator<'a> {
    seed: &'a str,
}

impl<'a> SeededGridGenerator<'a> {
    pub fn new(seed: &'a str) -> Self {
        Self { seed }
    }
}

impl GridGenerator for SeededGridGenerator<'_> {
    fn generate(self, grid_size: Coord, mine_count: CellCount) -> Result<Grid> {
        validate_layout(grid_size, mine_count)?;

        let side = usize::from(grid_size);
        let mut mines: Array2<bool> = Array2::default((side, side));
        let mut rng = Xorshift32::from_seed_str(self.seed);
        let mut placed: CellCount = 0;
        let mut draws: u32 = 0;

        while placed < mine_count {
            let row = rng.next_index(side);
            let col = rng.next_index(side);
            draws += 1;

            let cell = &mut mines[[row, col]];
            if *cell {
                log::trace!("Duplicate draw at ({row}, {col}), drawing again");
                continue;
            }
            *cell = true;
            placed += 1;
        }

        log::debug!(
            "Placed {} mines on {}x{} in {} draws, seed: {:?}",
            placed,
            grid_size,
            grid_size,
            draws,
            self.seed
        );
        Grid::from_mine_mask(mines)
    }
}

/// Generates the board for `seed`.
pub fn generate_grid(grid_size: Coord, mine_count: CellCount, seed: &str) -> Result<Grid> {
    SeededGridGenerator::new(seed).generate(grid_size, mine_count)
}

/// Regenerates the board from a published seed and checks that `claimed_mines`
/// is exactly its mine layout, in any order.
pub fn verify_layout(
    grid_size: Coord,
    mine_count: CellCount,
    seed: &str,
    claimed_mines: &[Coord2],
) -> Result<bool> {
    let grid = generate_grid(grid_size, mine_count, seed)?;
    let expected: BTreeSet<Coord2> = grid.mine_coords().into_iter().collect();
    let claimed: BTreeSet<Coord2> = claimed_mines.iter().copied().collect();
    Ok(claimed.len() == claimed_mines.len() && claimed == expected)
}
