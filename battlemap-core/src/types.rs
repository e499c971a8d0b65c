use crate::grid::Grid;
use crate::themes::Theme;

use std::fmt::{Display, Formatter};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    pub const fn new(x: u32, y: u32) -> Self {
        Coord { x, y }
    }

    /// Manhattan distance, the metric of the 4-adjacency graph.
    pub fn distance(&self, other: &Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn is_adjacent_to(&self, other: &Coord) -> bool {
        self.distance(other) == 1
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// State of a single grid cell.
///
/// `ReservedWall` is the separation margin band around a committed building
/// footprint: not buildable, not road-growable, rendered as open ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    #[default]
    Empty,
    Road,
    BuildingInterior,
    BuildingWall,
    ReservedWall,
}

/// An axis-aligned rectangle of cells, used both for building footprints and
/// for the free-space rectangle pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Region {
    pub origin: Coord,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Region {
            origin: Coord::new(x, y),
            width,
            height,
        }
    }

    pub fn unit(cell: Coord) -> Self {
        Region {
            origin: cell,
            width: 1,
            height: 1,
        }
    }

    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    // Exclusive right/bottom edges.
    pub fn right(&self) -> u32 {
        self.origin.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.origin.y + self.height
    }

    pub fn contains(&self, cell: Coord) -> bool {
        cell.x >= self.origin.x && cell.x < self.right() && cell.y >= self.origin.y && cell.y < self.bottom()
    }

    pub fn contains_region(&self, other: &Region) -> bool {
        other.origin.x >= self.origin.x
            && other.origin.y >= self.origin.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn intersects(&self, other: &Region) -> bool {
        self.origin.x < other.right()
            && other.origin.x < self.right()
            && self.origin.y < other.bottom()
            && other.origin.y < self.bottom()
    }

    /// The region grown by `margin` on every side, clamped to the grid.
    pub fn inflated(&self, margin: u32, grid_width: u32, grid_height: u32) -> Region {
        let x0 = self.origin.x.saturating_sub(margin);
        let y0 = self.origin.y.saturating_sub(margin);
        let x1 = (self.right() + margin).min(grid_width);
        let y1 = (self.bottom() + margin).min(grid_height);

        Region::new(x0, y0, x1 - x0, y1 - y0)
    }

    pub fn cells(self) -> impl Iterator<Item = Coord> {
        (self.origin.y..self.bottom())
            .flat_map(move |y| (self.origin.x..self.right()).map(move |x| Coord::new(x, y)))
    }

    /// The outermost ring of the region, the cells the wall phase raises.
    pub fn border_cells(self) -> impl Iterator<Item = Coord> {
        self.cells().filter(move |cell| {
            cell.x == self.origin.x
                || cell.x == self.right() - 1
                || cell.y == self.origin.y
                || cell.y == self.bottom() - 1
        })
    }

    pub fn interior_cells(self) -> impl Iterator<Item = Coord> {
        self.cells().filter(move |cell| {
            cell.x > self.origin.x
                && cell.x < self.right() - 1
                && cell.y > self.origin.y
                && cell.y < self.bottom() - 1
        })
    }

    /// Guillotine remainders of `self` after carving out `hole`.
    ///
    /// The four slabs keep the full width/height of `self` and therefore
    /// overlap in the corners; the free-space pool prunes containment, so an
    /// overlapping cover only makes the remaining rectangles more maximal.
    pub(crate) fn split_around(&self, hole: &Region) -> Vec<Region> {
        let mut parts = Vec::with_capacity(4);

        if hole.origin.x > self.origin.x {
            parts.push(Region::new(
                self.origin.x,
                self.origin.y,
                hole.origin.x - self.origin.x,
                self.height,
            ));
        }

        if hole.right() < self.right() {
            parts.push(Region::new(
                hole.right(),
                self.origin.y,
                self.right() - hole.right(),
                self.height,
            ));
        }

        if hole.origin.y > self.origin.y {
            parts.push(Region::new(
                self.origin.x,
                self.origin.y,
                self.width,
                hole.origin.y - self.origin.y,
            ));
        }

        if hole.bottom() < self.bottom() {
            parts.push(Region::new(
                self.origin.x,
                hole.bottom(),
                self.width,
                self.bottom() - hole.bottom(),
            ));
        }

        parts
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({},{}):[{}x{}]",
            self.origin.x, self.origin.y, self.width, self.height
        )
    }
}

/// One orthogonal run of road cells, derived from the committed network at
/// finalization. The union of all segments, together with the grid border,
/// forms a single 4-connected graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoadSegment {
    pub cells: Vec<Coord>,
}

impl RoadSegment {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Everything a generation run needs, resolved once per invocation.
///
/// `road_count` counts road cells. An absent seed means the session draws
/// one from process entropy and the result is labeled non-reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub width: u32,
    pub height: u32,
    pub road_count: u32,
    pub building_count: u32,
    pub theme: Theme,
    pub seed: Option<u64>,
    /// Upper bound on committed placements; defaults from the theme.
    pub step_budget: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Complete,
    Partial {
        buildings_placed: u32,
        roads_placed: u32,
    },
}

impl Outcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, Outcome::Complete)
    }
}

/// The frozen product of one generation session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    grid: Grid,
    regions: Vec<Region>,
    road_segments: Vec<RoadSegment>,
    outcome: Outcome,
    seed: Option<u64>,
}

impl GenerationResult {
    pub(crate) fn new(
        grid: Grid,
        regions: Vec<Region>,
        road_segments: Vec<RoadSegment>,
        outcome: Outcome,
        seed: Option<u64>,
    ) -> Self {
        GenerationResult {
            grid,
            regions,
            road_segments,
            outcome,
            seed,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn road_segments(&self) -> &[RoadSegment] {
        &self.road_segments
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn buildings_placed(&self) -> u32 {
        self.regions.len() as u32
    }

    pub fn roads_placed(&self) -> u32 {
        self.road_segments.iter().map(|s| s.len() as u32).sum()
    }

    /// False when the request carried no seed; such a result cannot be
    /// regenerated and is labeled accordingly by the delivery layers.
    pub fn is_reproducible(&self) -> bool {
        self.seed.is_some()
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_region_contains_and_intersects() {
        let region = Region::new(2, 3, 4, 2);

        assert!(region.contains(Coord::new(2, 3)));
        assert!(region.contains(Coord::new(5, 4)));
        assert!(!region.contains(Coord::new(6, 3)));
        assert!(!region.contains(Coord::new(2, 5)));

        assert!(region.intersects(&Region::new(5, 4, 3, 3)));
        assert!(!region.intersects(&Region::new(6, 3, 2, 2)));
        assert!(!region.intersects(&Region::new(0, 0, 2, 3)));
    }

    #[test]
    fn test_region_inflated_clamps_to_grid() {
        let region = Region::new(0, 1, 3, 3);
        let inflated = region.inflated(2, 10, 5);

        assert_eq!(inflated, Region::new(0, 0, 5, 5));
    }

    #[test]
    fn test_region_border_and_interior_partition_cells() {
        let region = Region::new(1, 1, 4, 3);

        let border = region.border_cells().count();
        let interior = region.interior_cells().count();

        assert_eq!(border, 10);
        assert_eq!(interior, 2);
        assert_eq!(border + interior, region.area() as usize);
    }

    #[test]
    fn test_region_split_around_covers_remainder() {
        let rect = Region::new(0, 0, 10, 10);
        let hole = Region::new(3, 4, 2, 3);

        let parts = rect.split_around(&hole);
        assert_eq!(parts.len(), 4);

        for cell in rect.cells() {
            let in_part = parts.iter().any(|p| p.contains(cell));
            assert_eq!(in_part, !hole.contains(cell), "cell {}", cell);
        }
    }

    #[test]
    fn test_region_split_around_edge_hole_drops_empty_slabs() {
        let rect = Region::new(0, 0, 6, 4);
        let hole = Region::new(0, 0, 6, 2);

        let parts = rect.split_around(&hole);
        assert_eq!(parts, vec![Region::new(0, 2, 6, 2)]);
    }

    #[test]
    fn test_coord_adjacency() {
        let coord = Coord::new(4, 4);

        assert!(coord.is_adjacent_to(&Coord::new(3, 4)));
        assert!(coord.is_adjacent_to(&Coord::new(4, 5)));
        assert!(!coord.is_adjacent_to(&Coord::new(3, 3)));
        assert!(!coord.is_adjacent_to(&coord));
    }
}
