/*!
   Module `service` provides the canonical implementation of the [MapService] port.
*/

use battlemap_core::{generate, render_map};

use super::{
    models::{BattleMap, CreateMapError, CreateMapRequest},
    ports::{CreatorNotifier, MapMetrics, MapRepository, MapService},
};

/// Canonical implementation of the [MapService] port, through which the map domain API is
/// consumed.
#[derive(Debug, Clone)]
pub struct Service<R, M, N>
where
    R: MapRepository,
    M: MapMetrics,
    N: CreatorNotifier,
{
    repository: R,
    metrics: M,
    notifier: N,
}

impl<R, M, N> Service<R, M, N>
where
    R: MapRepository,
    M: MapMetrics,
    N: CreatorNotifier,
{
    pub fn new(repo: R, metrics: M, notifier: N) -> Self {
        Self {
            repository: repo,
            metrics,
            notifier,
        }
    }
}

impl<R, M, N> MapService for Service<R, M, N>
where
    R: MapRepository,
    M: MapMetrics,
    N: CreatorNotifier,
{
    /// Create the [BattleMap] specified in `req` and trigger notifications.
    ///
    /// # Errors
    ///
    /// - Propagates any [CreateMapError] returned by the generation core or
    ///   the [MapRepository].
    async fn create_map(&self, req: &CreateMapRequest) -> Result<BattleMap, CreateMapError> {
        let generated = generate(req.generation())?;
        let document = render_map(&generated);

        let result = self.repository.persist_map(req, &generated, document).await;

        match result {
            Ok(ref created_map) => {
                self.metrics.record_map_creation_success().await;
                self.notifier.map_created(created_map).await;
            }
            Err(_) => self.metrics.record_map_creation_failure().await,
        }

        result
    }

    async fn render_map(&self, req: &CreateMapRequest) -> Result<String, CreateMapError> {
        let generated = generate(req.generation())?;

        Ok(render_map(&generated).to_string())
    }
}
