use crate::algos::free_space::FreeSpaceIndex;
use crate::algos::validity::ValidityModel;
use crate::grid::Grid;
use crate::themes::ThemeConfig;
use crate::types::{CellState, Coord, GenerationRequest, GenerationResult, Outcome, Region, RoadSegment};

use tinyset::SetUsize;
use tracing::event;

mod grow_roads;
mod place_buildings;
mod raise_walls;

/// Placement phases, entered strictly in order with no backward
/// transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Idle,
    PlacingBuildings,
    PlacingRoads,
    PlacingWalls,
    Finalized,
}

/// The placement engine for one session.
///
/// Owns the grid and the free-space index and mutates them together, so
/// every candidate drawn is valid before it is committed — there is no
/// sample-validate-retry loop anywhere in the phases. A step budget bounds
/// total committed placements independently of any retry notion;
/// exhausting it ends the run with a Partial outcome.
pub(crate) struct ElementPlacer {
    grid: Grid,
    index: FreeSpaceIndex,
    validity: ValidityModel,
    phase: Phase,
    regions: Vec<Region>,
    road_cells: Vec<Coord>,
    steps_left: u32,
}

impl ElementPlacer {
    pub fn new(width: u32, height: u32, config: &ThemeConfig, step_budget: u32) -> Self {
        let grid = Grid::new(width, height);
        let index = FreeSpaceIndex::new(&grid, config.margin);

        ElementPlacer {
            grid,
            index,
            validity: ValidityModel::default(),
            phase: Phase::Idle,
            regions: Vec::new(),
            road_cells: Vec::new(),
            steps_left: step_budget,
        }
    }

    fn enter(&mut self, from: Phase, to: Phase) {
        debug_assert_eq!(self.phase, from, "phase entered out of order");
        self.phase = to;
    }

    // One unit of the step budget; false once the budget is spent.
    fn take_step(&mut self) -> bool {
        if self.steps_left == 0 {
            return false;
        }

        self.steps_left -= 1;
        true
    }

    pub fn finalize(mut self, request: &GenerationRequest) -> GenerationResult {
        self.enter(Phase::PlacingWalls, Phase::Finalized);

        let road_segments = self.road_segments();

        let buildings_placed = self.regions.len() as u32;
        let roads_placed = self.road_cells.len() as u32;

        let outcome = if buildings_placed == request.building_count
            && roads_placed == request.road_count
        {
            Outcome::Complete
        } else {
            Outcome::Partial {
                buildings_placed,
                roads_placed,
            }
        };

        event!(
            tracing::Level::DEBUG,
            "Finalized with {} building/s, {} road cell/s in {} segment/s",
            buildings_placed,
            roads_placed,
            road_segments.len()
        );

        GenerationResult::new(self.grid, self.regions, road_segments, outcome, request.seed)
    }

    /// Decomposes the committed road network into orthogonal runs: maximal
    /// horizontal runs of two or more cells first, vertical runs over the
    /// leftovers, single cells last. Each road cell lands in exactly one
    /// segment.
    fn road_segments(&self) -> Vec<RoadSegment> {
        let mut segments = Vec::new();
        let mut claimed = SetUsize::new();

        for y in 0..self.grid.height() {
            let mut run: Vec<Coord> = Vec::new();

            for x in 0..=self.grid.width() {
                let cell = Coord::new(x, y);
                let is_road = x < self.grid.width() && self.grid.get(cell) == CellState::Road;

                if is_road {
                    run.push(cell);
                    continue;
                }

                if run.len() > 1 {
                    for cell in &run {
                        claimed.insert(self.grid.index_of(*cell));
                    }
                    segments.push(RoadSegment {
                        cells: std::mem::take(&mut run),
                    });
                } else {
                    run.clear();
                }
            }
        }

        for x in 0..self.grid.width() {
            let mut run: Vec<Coord> = Vec::new();

            for y in 0..=self.grid.height() {
                let cell = Coord::new(x, y);
                let unclaimed_road = y < self.grid.height()
                    && self.grid.get(cell) == CellState::Road
                    && !claimed.contains(self.grid.index_of(cell));

                if unclaimed_road {
                    run.push(cell);
                    continue;
                }

                if !run.is_empty() {
                    for cell in &run {
                        claimed.insert(self.grid.index_of(*cell));
                    }
                    segments.push(RoadSegment {
                        cells: std::mem::take(&mut run),
                    });
                }
            }
        }

        segments
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::themes::Theme;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn request(width: u32, height: u32, road_count: u32, building_count: u32) -> GenerationRequest {
        GenerationRequest {
            width,
            height,
            road_count,
            building_count,
            theme: Theme::Outpost,
            seed: Some(99),
            step_budget: None,
        }
    }

    fn run_phases(request: &GenerationRequest) -> GenerationResult {
        let config = request.theme.config();
        let mut rng = SmallRng::seed_from_u64(request.seed.unwrap());
        let budget = config.default_step_budget(request.width * request.height);

        let mut placer = ElementPlacer::new(request.width, request.height, &config, budget);
        placer
            .place_buildings(request.building_count, &config, &mut rng)
            .unwrap();
        placer.grow_roads(request.road_count, &mut rng).unwrap();
        placer.raise_walls().unwrap();
        placer.finalize(request)
    }

    #[test]
    fn test_zero_counts_finalize_complete_on_empty_grid() {
        let result = run_phases(&request(12, 9, 0, 0));

        assert_eq!(result.outcome(), Outcome::Complete);
        assert_eq!(result.grid().count_state(CellState::Empty), 12 * 9);
        assert!(result.regions().is_empty());
        assert!(result.road_segments().is_empty());
    }

    #[test]
    fn test_road_segments_partition_the_network() {
        let result = run_phases(&request(16, 16, 24, 2));

        let segment_cells: usize = result.road_segments().iter().map(RoadSegment::len).sum();
        assert_eq!(segment_cells, result.grid().count_state(CellState::Road));

        for segment in result.road_segments() {
            for pair in segment.cells.windows(2) {
                assert!(pair[0].is_adjacent_to(&pair[1]));
            }
        }
    }

    #[test]
    fn test_step_budget_exhaustion_yields_partial() {
        let mut request = request(20, 20, 30, 2);
        request.step_budget = Some(5);

        let config = request.theme.config();
        let mut rng = SmallRng::seed_from_u64(7);

        let mut placer = ElementPlacer::new(request.width, request.height, &config, 5);
        placer
            .place_buildings(request.building_count, &config, &mut rng)
            .unwrap();
        placer.grow_roads(request.road_count, &mut rng).unwrap();
        placer.raise_walls().unwrap();
        let result = placer.finalize(&request);

        match result.outcome() {
            Outcome::Partial {
                buildings_placed,
                roads_placed,
            } => {
                assert_eq!(buildings_placed, 2);
                assert_eq!(roads_placed, 3);
            }
            Outcome::Complete => panic!("budget of 5 cannot satisfy 32 placements"),
        }
    }
}
