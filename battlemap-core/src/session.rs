use crate::algos::ElementPlacer;
use crate::constants::{MAX_DIMENSION, MIN_BUILDING_AREA};
use crate::error::{GenerationError, Result};
use crate::themes::ThemeConfig;
use crate::types::{GenerationRequest, GenerationResult};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{Level, event, span};

/// One generation run, end to end.
///
/// Construction validates the request and proves up front that the counts
/// can fit under perfect packing; nothing is mutated before both checks
/// pass. Each session owns its grid, index, and RNG, so concurrent callers
/// only need to build one session per request.
pub struct GenerationSession {
    request: GenerationRequest,
    config: ThemeConfig,
    rng: SmallRng,
}

impl GenerationSession {
    pub fn new(request: GenerationRequest) -> Result<Self> {
        if request.width == 0
            || request.height == 0
            || request.width > MAX_DIMENSION
            || request.height > MAX_DIMENSION
        {
            return Err(GenerationError::InvalidDimensions {
                width: request.width,
                height: request.height,
                max: MAX_DIMENSION,
            });
        }

        let required = u64::from(request.building_count) * u64::from(MIN_BUILDING_AREA)
            + u64::from(request.road_count);
        let available = u64::from(request.width) * u64::from(request.height);

        if required > available {
            return Err(GenerationError::Overcommitted {
                required,
                available,
            });
        }

        // Without a request seed the stream comes from process entropy and
        // the result is labeled non-reproducible.
        let seed = match request.seed {
            Some(seed) => seed,
            None => rand::rng().random(),
        };

        Ok(GenerationSession {
            request,
            config: request.theme.config(),
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn run(mut self) -> Result<GenerationResult> {
        let span = span!(Level::DEBUG, "generate");
        let _guard = span.enter();

        let generation_start = std::time::Instant::now();

        let area = self.request.width * self.request.height;
        let step_budget = self
            .request
            .step_budget
            .unwrap_or_else(|| self.config.default_step_budget(area));

        let mut placer = ElementPlacer::new(
            self.request.width,
            self.request.height,
            &self.config,
            step_budget,
        );

        placer.place_buildings(self.request.building_count, &self.config, &mut self.rng)?;
        placer.grow_roads(self.request.road_count, &mut self.rng)?;
        placer.raise_walls()?;

        let result = placer.finalize(&self.request);

        event!(
            Level::DEBUG,
            "Generated [{}x{}] {} map in {:.2}ms",
            self.request.width,
            self.request.height,
            self.request.theme.name(),
            generation_start.elapsed().as_millis()
        );

        Ok(result)
    }
}

/// Validates `request` and runs a full session over it.
pub fn generate(request: GenerationRequest) -> Result<GenerationResult> {
    GenerationSession::new(request)?.run()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::themes::Theme;

    fn request(width: u32, height: u32) -> GenerationRequest {
        GenerationRequest {
            width,
            height,
            road_count: 12,
            building_count: 2,
            theme: Theme::Outpost,
            seed: Some(1),
            step_budget: None,
        }
    }

    #[test]
    fn test_rejects_zero_and_oversized_dimensions() {
        for (width, height) in [(0, 10), (10, 0), (MAX_DIMENSION + 1, 10)] {
            let result = GenerationSession::new(request(width, height));

            assert!(matches!(
                result,
                Err(GenerationError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn test_rejects_provably_unpackable_requests() {
        let mut req = request(6, 6);
        req.building_count = 5;

        let result = GenerationSession::new(req);
        assert_eq!(
            result.err(),
            Some(GenerationError::Overcommitted {
                required: 45 + 12,
                available: 36,
            })
        );
    }

    #[test]
    fn test_road_count_participates_in_the_capacity_check() {
        let mut req = request(6, 6);
        req.building_count = 0;
        req.road_count = 37;

        assert!(GenerationSession::new(req).is_err());

        req.road_count = 36;
        assert!(GenerationSession::new(req).is_ok());
    }

    #[test]
    fn test_unseeded_results_are_labeled_non_reproducible() {
        let mut req = request(12, 12);
        req.seed = None;

        let result = generate(req).unwrap();
        assert!(!result.is_reproducible());
        assert_eq!(result.seed(), None);
    }
}
