use crate::error::{GenerationError, Result};
use crate::types::{CellState, Coord};

use serde::Serialize;
use tinyset::SetUsize;

/// The 2-D cell array for one generation run.
///
/// Cells are stored row-major (`y * width + x`). The grid is created empty,
/// mutated only by the placement phases, and frozen into the result; it is
/// never reused across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<CellState>,
}

impl Grid {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Grid {
            width,
            height,
            cells: vec![CellState::Empty; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// True for cells on the outermost ring, the ones 4-adjacent to the
    /// implicit border hub the road network is rooted at.
    pub fn is_border(&self, coord: Coord) -> bool {
        coord.x == 0 || coord.y == 0 || coord.x == self.width - 1 || coord.y == self.height - 1
    }

    pub(crate) fn index_of(&self, coord: Coord) -> usize {
        (coord.y * self.width + coord.x) as usize
    }

    pub(crate) fn coord_at(&self, index: usize) -> Coord {
        Coord::new(index as u32 % self.width, index as u32 / self.width)
    }

    // Panics on out-of-bounds coordinates; every addressed coordinate is
    // within bounds by the placement invariants.
    pub fn get(&self, coord: Coord) -> CellState {
        self.cells[self.index_of(coord)]
    }

    pub(crate) fn set(&mut self, coord: Coord, state: CellState) -> Result<()> {
        if !self.in_bounds(coord) {
            return Err(GenerationError::OutOfBounds {
                coord,
                width: self.width,
                height: self.height,
            });
        }

        let index = self.index_of(coord);
        self.cells[index] = state;

        Ok(())
    }

    /// In-bounds 4-neighbours of `coord`.
    pub fn neighbours(&self, coord: Coord) -> Vec<Coord> {
        let mut neighbours = Vec::with_capacity(4);

        if coord.x + 1 < self.width {
            neighbours.push(Coord::new(coord.x + 1, coord.y));
        }

        if coord.y + 1 < self.height {
            neighbours.push(Coord::new(coord.x, coord.y + 1));
        }

        if coord.x > 0 {
            neighbours.push(Coord::new(coord.x - 1, coord.y));
        }

        if coord.y > 0 {
            neighbours.push(Coord::new(coord.x, coord.y - 1));
        }

        neighbours
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, state)| (self.coord_at(index), *state))
    }

    pub fn count_state(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    /// Flood fill from `from` over cells accepted by `pass`, under
    /// 4-adjacency. Returns the visited set as dense cell indices.
    ///
    /// Read-only; exists for the connectivity and closure checks.
    pub fn flood(&self, from: Coord, pass: impl Fn(CellState) -> bool) -> SetUsize {
        let mut visited = SetUsize::new();

        if !self.in_bounds(from) || !pass(self.get(from)) {
            return visited;
        }

        let mut pending = vec![from];
        visited.insert(self.index_of(from));

        while let Some(cell) = pending.pop() {
            for neighbour in self.neighbours(cell) {
                if pass(self.get(neighbour)) && visited.insert(self.index_of(neighbour)) {
                    pending.push(neighbour);
                }
            }
        }

        visited
    }

    /// Whether `to` is reachable from `from` moving only through cells in
    /// `state`.
    pub fn connected_via(&self, from: Coord, to: Coord, state: CellState) -> bool {
        if !self.in_bounds(from) || !self.in_bounds(to) {
            return false;
        }

        self.flood(from, |cell| cell == state)
            .contains(self.index_of(to))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_set_rejects_out_of_bounds() {
        let mut grid = Grid::new(4, 3);

        let result = grid.set(Coord::new(4, 0), CellState::Road);
        assert!(matches!(
            result,
            Err(GenerationError::OutOfBounds { .. })
        ));

        let result = grid.set(Coord::new(0, 3), CellState::Road);
        assert!(result.is_err());

        assert_eq!(grid.count_state(CellState::Road), 0);
    }

    #[test]
    fn test_index_coord_round_trip() {
        let grid = Grid::new(5, 4);

        for (index, _) in grid.cells.iter().enumerate() {
            assert_eq!(grid.index_of(grid.coord_at(index)), index);
        }
    }

    #[test]
    fn test_neighbours_clip_to_bounds() {
        let grid = Grid::new(3, 3);

        assert_eq!(grid.neighbours(Coord::new(0, 0)).len(), 2);
        assert_eq!(grid.neighbours(Coord::new(1, 0)).len(), 3);
        assert_eq!(grid.neighbours(Coord::new(1, 1)).len(), 4);
    }

    #[test]
    fn test_connected_via_respects_state() {
        let mut grid = Grid::new(5, 1);

        for x in [0, 1, 3, 4] {
            grid.set(Coord::new(x, 0), CellState::Road).unwrap();
        }

        // The gap at x = 2 splits the two runs.
        assert!(grid.connected_via(Coord::new(0, 0), Coord::new(1, 0), CellState::Road));
        assert!(!grid.connected_via(Coord::new(0, 0), Coord::new(4, 0), CellState::Road));

        grid.set(Coord::new(2, 0), CellState::Road).unwrap();
        assert!(grid.connected_via(Coord::new(0, 0), Coord::new(4, 0), CellState::Road));
    }

    #[test]
    fn test_flood_stops_at_rejected_cells() {
        let mut grid = Grid::new(3, 3);

        for cell in crate::types::Region::new(0, 0, 3, 3).border_cells() {
            grid.set(cell, CellState::BuildingWall).unwrap();
        }

        let inside = grid.flood(Coord::new(1, 1), |state| state != CellState::BuildingWall);
        assert_eq!(inside.len(), 1);
        assert!(inside.contains(grid.index_of(Coord::new(1, 1))));
    }
}
