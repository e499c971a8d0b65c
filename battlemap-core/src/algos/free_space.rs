use crate::grid::Grid;
use crate::types::{CellState, Coord, Region};

use std::cmp::Reverse;

use priority_queue::PriorityQueue;

/// Pool ranking: larger area first, then origin ascending, width as the
/// final tiebreak. The order is total over distinct rectangles, so
/// candidate order is fully determined by the pool's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct RectRank {
    area: u32,
    origin: Reverse<Coord>,
    width: u32,
}

impl RectRank {
    fn of(region: &Region) -> Self {
        RectRank {
            area: region.area(),
            origin: Reverse(region.origin),
            width: region.width,
        }
    }
}

/// Derived view of the grid's placeable space.
///
/// Two structures, maintained incrementally and never rebuilt from scratch:
///
/// - a pool of maximal empty rectangles, the candidate space for building
///   placement;
/// - the road-growth frontier: Empty cells 4-adjacent to a road cell or to
///   the grid border, stored as a swap-remove vector plus a dense slot map
///   so uniform sampling and removal are O(1).
///
/// The index holds no randomness; the placer draws among the candidates it
/// returns.
pub(crate) struct FreeSpaceIndex {
    width: u32,
    height: u32,
    margin: u32,
    rects: PriorityQueue<Region, RectRank>,
    frontier: Vec<u32>,
    frontier_slot: Vec<Option<u32>>,
}

impl FreeSpaceIndex {
    /// Builds the index for a freshly created (all-Empty) grid.
    pub fn new(grid: &Grid, margin: u32) -> Self {
        let width = grid.width();
        let height = grid.height();

        let mut index = FreeSpaceIndex {
            width,
            height,
            margin,
            rects: PriorityQueue::new(),
            frontier: Vec::new(),
            frontier_slot: vec![None; (width * height) as usize],
        };

        let full = Region::new(0, 0, width, height);
        index.rects.push(full, RectRank::of(&full));

        for cell in full.border_cells() {
            index.add_frontier(cell);
        }

        index
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    /// All free rectangles, area descending, origin ascending on ties.
    pub fn largest_rectangles(&self) -> Vec<Region> {
        self.rects
            .clone()
            .into_sorted_iter()
            .map(|(region, _)| region)
            .collect()
    }

    /// Free rectangles at least `side` wide and tall, in pool order.
    pub fn fitting_rectangles(&self, side: u32) -> Vec<Region> {
        self.rects
            .clone()
            .into_sorted_iter()
            .map(|(region, _)| region)
            .filter(|region| region.width >= side && region.height >= side)
            .collect()
    }

    /// Removes a committed building footprint, plus its margin band, from
    /// the pool and the frontier. Overlapping rectangles are guillotine-split
    /// into their remainder slabs.
    pub fn reserve(&mut self, region: Region) {
        let inflated = region.inflated(self.margin, self.width, self.height);

        self.carve(inflated);

        for cell in inflated.cells() {
            self.remove_frontier(cell);
        }
    }

    /// Commits `cell` as road: drops it from the frontier and the pool, then
    /// grows the frontier into its still-Empty neighbours. The grid must
    /// already hold the Road state for `cell`.
    pub fn mark_road(&mut self, cell: Coord, grid: &Grid) {
        self.remove_frontier(cell);
        self.carve(Region::unit(cell));

        for neighbour in grid.neighbours(cell) {
            if grid.get(neighbour) == CellState::Empty {
                self.add_frontier(neighbour);
            }
        }
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// The frontier cell stored at `slot`; slots are only meaningful until
    /// the next mutation.
    pub fn frontier_cell(&self, slot: usize) -> Coord {
        self.coord_at(self.frontier[slot])
    }

    pub fn frontier_contains(&self, cell: Coord) -> bool {
        self.frontier_slot[self.cell_index(cell) as usize].is_some()
    }

    #[cfg(test)]
    pub fn frontier_cells(&self) -> Vec<Coord> {
        self.frontier.iter().map(|&index| self.coord_at(index)).collect()
    }

    fn cell_index(&self, cell: Coord) -> u32 {
        cell.y * self.width + cell.x
    }

    fn coord_at(&self, index: u32) -> Coord {
        Coord::new(index % self.width, index / self.width)
    }

    fn carve(&mut self, hole: Region) {
        let overlapping = self
            .rects
            .iter()
            .map(|(region, _)| *region)
            .filter(|region| region.intersects(&hole))
            .collect::<Vec<_>>();

        for rect in overlapping {
            self.rects.remove(&rect);

            for part in rect.split_around(&hole) {
                self.insert_rect(part);
            }
        }
    }

    // Containment pruning keeps the pool maximal: a rectangle inside another
    // adds no placement span.
    fn insert_rect(&mut self, rect: Region) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }

        if self
            .rects
            .iter()
            .any(|(existing, _)| existing.contains_region(&rect))
        {
            return;
        }

        let swallowed = self
            .rects
            .iter()
            .map(|(existing, _)| *existing)
            .filter(|existing| rect.contains_region(existing))
            .collect::<Vec<_>>();

        for existing in swallowed {
            self.rects.remove(&existing);
        }

        self.rects.push(rect, RectRank::of(&rect));
    }

    fn add_frontier(&mut self, cell: Coord) {
        let index = self.cell_index(cell);

        if self.frontier_slot[index as usize].is_none() {
            self.frontier_slot[index as usize] = Some(self.frontier.len() as u32);
            self.frontier.push(index);
        }
    }

    fn remove_frontier(&mut self, cell: Coord) {
        let index = self.cell_index(cell);

        if let Some(slot) = self.frontier_slot[index as usize].take() {
            let slot = slot as usize;

            if let Some(last) = self.frontier.pop() {
                if slot < self.frontier.len() {
                    self.frontier[slot] = last;
                    self.frontier_slot[last as usize] = Some(slot as u32);
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn empty_grid(width: u32, height: u32) -> Grid {
        Grid::new(width, height)
    }

    #[test]
    fn test_new_index_holds_one_full_rectangle() {
        let grid = empty_grid(8, 6);
        let index = FreeSpaceIndex::new(&grid, 1);

        assert_eq!(index.largest_rectangles(), vec![Region::new(0, 0, 8, 6)]);
    }

    #[test]
    fn test_initial_frontier_is_the_border_ring() {
        let grid = empty_grid(5, 4);
        let index = FreeSpaceIndex::new(&grid, 1);

        // 2 * 5 + 2 * (4 - 2) border cells.
        assert_eq!(index.frontier_len(), 14);

        for cell in index.frontier_cells() {
            assert!(grid.is_border(cell));
        }
    }

    #[test]
    fn test_reserve_splits_pool_and_clears_frontier() {
        let grid = empty_grid(10, 10);
        let mut index = FreeSpaceIndex::new(&grid, 1);

        index.reserve(Region::new(4, 4, 3, 3));

        let rects = index.largest_rectangles();

        // Guillotine slabs of the inflated 5x5 hole at (3, 3).
        assert_eq!(rects.len(), 4);
        assert!(rects.contains(&Region::new(0, 0, 10, 3)));
        assert!(rects.contains(&Region::new(0, 8, 10, 2)));
        assert!(rects.contains(&Region::new(0, 0, 3, 10)));
        assert!(rects.contains(&Region::new(8, 0, 2, 10)));

        // No free rectangle may touch the reserved footprint or its margin.
        let inflated = Region::new(3, 3, 5, 5);
        for rect in rects {
            assert!(!rect.intersects(&inflated));
        }
    }

    #[test]
    fn test_largest_rectangles_order_is_deterministic() {
        let grid = empty_grid(10, 4);
        let mut index = FreeSpaceIndex::new(&grid, 0);

        index.reserve(Region::new(4, 0, 2, 4));

        let rects = index.largest_rectangles();
        assert_eq!(
            rects,
            vec![Region::new(0, 0, 4, 4), Region::new(6, 0, 4, 4)]
        );
    }

    #[test]
    fn test_mark_road_moves_the_frontier_inward() {
        let grid = empty_grid(5, 5);
        let mut road_grid = grid.clone();
        let mut index = FreeSpaceIndex::new(&grid, 1);

        let cell = Coord::new(2, 0);
        assert!(index.frontier_contains(cell));

        road_grid.set(cell, CellState::Road).unwrap();
        index.mark_road(cell, &road_grid);

        assert!(!index.frontier_contains(cell));
        // The interior neighbour becomes growable.
        assert!(index.frontier_contains(Coord::new(2, 1)));
    }

    #[test]
    fn test_remove_frontier_keeps_slots_consistent() {
        let grid = empty_grid(4, 4);
        let mut index = FreeSpaceIndex::new(&grid, 1);

        let cells = index.frontier_cells();
        for cell in cells {
            index.remove_frontier(cell);
        }

        assert_eq!(index.frontier_len(), 0);
    }
}
