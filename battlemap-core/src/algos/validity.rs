use crate::algos::free_space::FreeSpaceIndex;
use crate::constants::MIN_BUILDING_SIDE;
use crate::grid::Grid;
use crate::types::{CellState, Coord, Region};

/// Pure placement-legality predicates.
///
/// These define the candidate space the placer derives its draws from; the
/// construction never violates them, so outside of tests they only back
/// debug assertions. There is no runtime validate-and-retry path.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ValidityModel {
    pub min_side: u32,
}

impl Default for ValidityModel {
    fn default() -> Self {
        ValidityModel {
            min_side: MIN_BUILDING_SIDE,
        }
    }
}

impl ValidityModel {
    /// A footprint is placeable when it meets the minimum size and lies
    /// entirely inside one free rectangle (which already excludes committed
    /// footprints, their margins, and road cells).
    pub fn building_fits(&self, index: &FreeSpaceIndex, region: Region) -> bool {
        region.width >= self.min_side
            && region.height >= self.min_side
            && index
                .largest_rectangles()
                .iter()
                .any(|rect| rect.contains_region(&region))
    }

    /// One road-growth step. `from` is `None` when the step roots at the
    /// border hub; otherwise it must be 4-adjacent to `to`. The target must
    /// be Empty and on the frontier, which keeps it outside every committed
    /// footprint and margin band.
    pub fn road_step_valid(
        &self,
        grid: &Grid,
        index: &FreeSpaceIndex,
        from: Option<Coord>,
        to: Coord,
    ) -> bool {
        if !grid.in_bounds(to) {
            return false;
        }

        let attached = match from {
            Some(from) => from.is_adjacent_to(&to),
            None => grid.is_border(to),
        };

        attached && grid.get(to) == CellState::Empty && index.frontier_contains(to)
    }

    /// Whether every border cell of the footprint has been raised to a wall.
    pub fn wall_complete(&self, grid: &Grid, region: Region) -> bool {
        region
            .border_cells()
            .all(|cell| grid.get(cell) == CellState::BuildingWall)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_building_fits_requires_a_hosting_rectangle() {
        let grid = Grid::new(10, 10);
        let mut index = FreeSpaceIndex::new(&grid, 1);
        let validity = ValidityModel::default();

        assert!(validity.building_fits(&index, Region::new(2, 2, 4, 4)));
        // Below minimum footprint.
        assert!(!validity.building_fits(&index, Region::new(2, 2, 2, 4)));

        index.reserve(Region::new(0, 0, 8, 8));

        // Only slabs right of x = 8 and below y = 8 remain; nothing hosts
        // a 3x3 any more.
        assert!(!validity.building_fits(&index, Region::new(2, 2, 3, 3)));
    }

    #[test]
    fn test_road_step_valid_roots_at_border_or_network() {
        let mut grid = Grid::new(6, 6);
        let mut index = FreeSpaceIndex::new(&grid, 1);
        let validity = ValidityModel::default();

        let border_cell = Coord::new(3, 0);
        assert!(validity.road_step_valid(&grid, &index, None, border_cell));
        // Interior cells are not reachable from the border hub directly.
        assert!(!validity.road_step_valid(&grid, &index, None, Coord::new(3, 2)));

        grid.set(border_cell, CellState::Road).unwrap();
        index.mark_road(border_cell, &grid);

        let next = Coord::new(3, 1);
        assert!(validity.road_step_valid(&grid, &index, Some(border_cell), next));
        // Already-road cells are no longer valid targets.
        assert!(!validity.road_step_valid(&grid, &index, Some(next), border_cell));
    }

    #[test]
    fn test_wall_complete() {
        let mut grid = Grid::new(8, 8);
        let validity = ValidityModel::default();
        let region = Region::new(1, 1, 4, 3);

        for cell in region.cells() {
            grid.set(cell, CellState::BuildingInterior).unwrap();
        }
        assert!(!validity.wall_complete(&grid, region));

        for cell in region.border_cells() {
            grid.set(cell, CellState::BuildingWall).unwrap();
        }
        assert!(validity.wall_complete(&grid, region));
    }
}
