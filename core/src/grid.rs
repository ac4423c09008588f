use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square board of [`Cell`]s indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Grid {
    /// Builds a board from a mine mask, filling in adjacency counts.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        if rows != cols || rows == 0 || rows > usize::from(Coord::MAX) {
            return Err(GameError::InvalidBoardShape);
        }

        let mut cells = mine_mask.mapv(|is_mine| Cell {
            is_mine,
            ..Cell::default()
        });
        let mut mine_count: CellCount = 0;
        for ((row, col), &is_mine) in mine_mask.indexed_iter() {
            // rows <= Coord::MAX was checked above
            let coords = (row as Coord, col as Coord);
            if is_mine {
                mine_count += 1;
                continue;
            }
            cells[coords.to_nd_index()].adjacent_mines = mine_mask
                .iter_neighbors(coords)
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count() as u8;
        }

        Ok(Self { cells, mine_count })
    }

    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let side = usize::from(size);
        let mut mine_mask: Array2<bool> = Array2::default((side, side));

        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Side length of the board.
    pub fn size(&self) -> Coord {
        // constructors only accept sides up to Coord::MAX
        self.cells.nrows() as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        square(self.size())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.cells[coords.to_nd_index()].adjacent_mines
    }

    /// Coordinates of every mine, row-major.
    pub fn mine_coords(&self) -> Vec<Coord2> {
        self.indexed_cells()
            .filter(|(_, cell)| cell.is_mine)
            .map(|(coords, _)| coords)
            .collect()
    }

    /// Every cell with its coordinates, row-major.
    pub fn indexed_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn opened_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_open).count() as CellCount
    }

    /// Marks a cell open and returns it. Opening is one-way.
    pub(crate) fn open(&mut self, coords: Coord2) -> Cell {
        let cell = &mut self.cells[coords.to_nd_index()];
        cell.is_open = true;
        *cell
    }

    pub(crate) fn open_all(&mut self) {
        self.cells.map_inplace(|cell| cell.is_open = true);
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_counts_around_single_mine() {
        let grid = Grid::from_mine_coords(3, &[(1, 1)]).unwrap();

        assert_eq!(grid.mine_count(), 1);
        assert_eq!(grid.safe_cell_count(), 8);
        for (coords, cell) in grid.indexed_cells() {
            if coords == (1, 1) {
                assert!(cell.is_mine);
                assert_eq!(cell.adjacent_mines, 0);
            } else {
                assert_eq!(cell.adjacent_mines, 1, "at {coords:?}");
            }
        }
    }

    #[test]
    fn corner_cell_counts_only_in_bounds_neighbors() {
        let grid = Grid::from_mine_coords(3, &[(0, 1), (1, 0), (1, 1)]).unwrap();

        assert_eq!(grid.adjacent_mine_count((0, 0)), 3);
        assert_eq!(grid.adjacent_mine_count((2, 2)), 1);
        assert_eq!(grid.adjacent_mine_count((0, 2)), 2);
    }

    #[test]
    fn duplicate_mine_coords_count_once() {
        let grid = Grid::from_mine_coords(2, &[(0, 0), (0, 0)]).unwrap();
        assert_eq!(grid.mine_count(), 1);
    }

    #[test]
    fn out_of_bounds_mine_is_rejected() {
        assert_eq!(
            Grid::from_mine_coords(2, &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn non_square_mask_is_rejected() {
        let mask: Array2<bool> = Array2::default((2, 3));
        assert_eq!(Grid::from_mine_mask(mask), Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn open_is_monotonic() {
        let mut grid = Grid::from_mine_coords(2, &[(0, 0)]).unwrap();

        assert!(grid.open((1, 1)).is_open);
        assert!(grid.open((1, 1)).is_open);
        assert_eq!(grid.opened_count(), 1);

        grid.open_all();
        assert_eq!(grid.opened_count(), 4);
    }

    #[test]
    fn mine_coords_are_row_major() {
        let grid = Grid::from_mine_coords(3, &[(2, 0), (0, 2)]).unwrap();
        assert_eq!(grid.mine_coords(), [(0, 2), (2, 0)]);
    }
}
