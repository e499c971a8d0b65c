use super::{ElementPlacer, Phase};
use crate::error::Result;
use crate::types::CellState;

impl ElementPlacer {
    /// Raises the wall ring of every committed footprint.
    ///
    /// Deterministic and infallible once the building phase invariants
    /// hold: the ring cells are interior building cells, in bounds, and the
    /// minimum footprint guarantees at least one interior cell survives
    /// inside the ring.
    pub(crate) fn raise_walls(&mut self) -> Result<()> {
        self.enter(Phase::PlacingRoads, Phase::PlacingWalls);

        for i in 0..self.regions.len() {
            let region = self.regions[i];

            for cell in region.border_cells() {
                self.grid.set(cell, CellState::BuildingWall)?;
            }

            debug_assert!(self.validity.wall_complete(&self.grid, region));
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::themes::Theme;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_walls_close_every_footprint() {
        let config = Theme::Township.config();
        let mut rng = SmallRng::seed_from_u64(17);

        let mut placer = ElementPlacer::new(28, 28, &config, 28 * 28);
        placer.place_buildings(6, &config, &mut rng).unwrap();
        placer.grow_roads(20, &mut rng).unwrap();
        placer.raise_walls().unwrap();

        assert!(!placer.regions.is_empty());

        for region in &placer.regions {
            assert!(placer.validity.wall_complete(&placer.grid, *region));

            // Interior flood fill stays inside the ring.
            let mut interior = region.interior_cells();
            let start = interior.next().expect("minimum footprint has an interior");
            let reached = placer
                .grid
                .flood(start, |state| state != CellState::BuildingWall);

            for index in reached {
                let cell = placer.grid.coord_at(index);
                assert!(region.contains(cell), "leaked to {}", cell);
            }
        }
    }

    #[test]
    fn test_walls_leave_roads_untouched() {
        let config = Theme::Outpost.config();
        let mut rng = SmallRng::seed_from_u64(29);

        let mut placer = ElementPlacer::new(20, 20, &config, 20 * 20);
        placer.place_buildings(3, &config, &mut rng).unwrap();
        placer.grow_roads(25, &mut rng).unwrap();

        let roads_before = placer.grid.count_state(CellState::Road);
        placer.raise_walls().unwrap();

        assert_eq!(placer.grid.count_state(CellState::Road), roads_before);
    }
}
