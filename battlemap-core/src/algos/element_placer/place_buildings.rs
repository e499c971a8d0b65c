use super::{ElementPlacer, Phase};
use crate::constants::MIN_BUILDING_SIDE;
use crate::error::Result;
use crate::themes::ThemeConfig;
use crate::types::{CellState, Region};

use rand::Rng;
use tracing::event;

impl ElementPlacer {
    /// Places up to `count` building footprints.
    ///
    /// Every draw comes straight out of the free-rectangle pool: the hosting
    /// rectangle is picked among those that fit the minimum footprint, the
    /// target size is clamped to it, and the origin is drawn uniformly over
    /// the valid span, so each candidate is non-overlapping before it is
    /// committed. When no rectangle fits the minimum footprint the phase
    /// stops early and the shortfall surfaces as a Partial outcome.
    pub(crate) fn place_buildings(
        &mut self,
        count: u32,
        config: &ThemeConfig,
        rng: &mut impl Rng,
    ) -> Result<()> {
        self.enter(Phase::Idle, Phase::PlacingBuildings);

        let side_limit = config.target_side_limit(self.grid.width(), self.grid.height());

        for placed in 0..count {
            if !self.take_step() {
                event!(
                    tracing::Level::WARN,
                    "Step budget spent after {} of {} building/s",
                    placed,
                    count
                );
                return Ok(());
            }

            let candidates = self.index.fitting_rectangles(MIN_BUILDING_SIDE);

            if candidates.is_empty() {
                event!(
                    tracing::Level::DEBUG,
                    "Free space exhausted after {} of {} building/s",
                    placed,
                    count
                );
                return Ok(());
            }

            let rect = candidates[rng.random_range(0..candidates.len())];

            let width = rng.random_range(MIN_BUILDING_SIDE..=side_limit.min(rect.width));
            let height = rng.random_range(MIN_BUILDING_SIDE..=side_limit.min(rect.height));

            let x = rect.origin.x + rng.random_range(0..=rect.width - width);
            let y = rect.origin.y + rng.random_range(0..=rect.height - height);

            let region = Region::new(x, y, width, height);
            debug_assert!(self.validity.building_fits(&self.index, region));

            self.commit_building(region)?;
        }

        Ok(())
    }

    fn commit_building(&mut self, region: Region) -> Result<()> {
        for cell in region.cells() {
            self.grid.set(cell, CellState::BuildingInterior)?;
        }

        // The margin band keeps later footprints and road growth at the
        // configured separation; shared bands between neighbours are fine.
        let inflated = region.inflated(self.index.margin(), self.grid.width(), self.grid.height());

        for cell in inflated.cells() {
            if self.grid.get(cell) == CellState::Empty {
                self.grid.set(cell, CellState::ReservedWall)?;
            }
        }

        self.index.reserve(region);
        self.regions.push(region);

        Ok(())
    }
}
