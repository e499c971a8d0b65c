use super::{ElementPlacer, Phase};
use crate::error::Result;
use crate::types::CellState;

use rand::Rng;
use tracing::event;

impl ElementPlacer {
    /// Grows the road network cell by cell, rooted at the grid border.
    ///
    /// Each step samples uniformly over the frontier — the documented
    /// growth policy; there is no dead-end weighting. Frontier cells are
    /// Empty and attached to the border or the existing network by
    /// construction, so every sample commits. The phase ends when `count`
    /// cells are placed, the frontier runs dry, or the step budget is
    /// spent.
    pub(crate) fn grow_roads(&mut self, count: u32, rng: &mut impl Rng) -> Result<()> {
        self.enter(Phase::PlacingBuildings, Phase::PlacingRoads);

        for placed in 0..count {
            if !self.take_step() {
                event!(
                    tracing::Level::WARN,
                    "Step budget spent after {} of {} road cell/s",
                    placed,
                    count
                );
                return Ok(());
            }

            if self.index.frontier_len() == 0 {
                event!(
                    tracing::Level::DEBUG,
                    "Frontier exhausted after {} of {} road cell/s",
                    placed,
                    count
                );
                return Ok(());
            }

            let cell = self
                .index
                .frontier_cell(rng.random_range(0..self.index.frontier_len()));

            debug_assert!({
                let attachment = self
                    .grid
                    .neighbours(cell)
                    .into_iter()
                    .find(|&n| self.grid.get(n) == CellState::Road);
                self.validity
                    .road_step_valid(&self.grid, &self.index, attachment, cell)
                    || self.validity.road_step_valid(&self.grid, &self.index, None, cell)
            });

            self.grid.set(cell, CellState::Road)?;
            self.index.mark_road(cell, &self.grid);
            self.road_cells.push(cell);
        }

        Ok(())
    }
}
