use crate::*;
pub use seeded::*;

mod seeded;

pub trait GridGenerator {
    fn generate(self, grid_size: Coord, mine_count: CellCount) -> Result<Grid>;
}
