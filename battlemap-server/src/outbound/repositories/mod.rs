use crate::domain::{
    models::{BattleMap, CreateMapError, CreateMapRequest},
    ports::MapRepository,
};

use battlemap_core::GenerationResult;

/// Maps live only for the duration of one request, so the canonical
/// repository keeps nothing: it just mints an id and carries the rendered
/// bytes back to the caller.
#[derive(Debug, Clone)]
pub struct NullRepository;

impl MapRepository for NullRepository {
    async fn persist_map(
        &self,
        _req: &CreateMapRequest,
        result: &GenerationResult,
        data: svg::Document,
    ) -> Result<BattleMap, CreateMapError> {
        let id = uuid::Uuid::new_v4();
        let svg_bytes = data.to_string().into_bytes();

        let map = BattleMap::new(
            id,
            result.outcome(),
            result.buildings_placed(),
            result.roads_placed(),
            result.is_reproducible(),
            svg_bytes,
        );

        Ok(map)
    }
}
