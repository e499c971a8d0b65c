use battlemap_core::{GenerationError, GenerationRequest, Outcome};

use derive_more::From;
use thiserror::Error;
use uuid::Uuid;

/// A uniquely identifiable generated battle map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleMap {
    id: Uuid,
    outcome: Outcome,
    buildings_placed: u32,
    roads_placed: u32,
    reproducible: bool,
    data: Vec<u8>,
}

impl BattleMap {
    pub fn new(
        id: Uuid,
        outcome: Outcome,
        buildings_placed: u32,
        roads_placed: u32,
        reproducible: bool,
        data: Vec<u8>,
    ) -> Self {
        Self {
            id,
            outcome,
            buildings_placed,
            roads_placed,
            reproducible,
            data,
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn buildings_placed(&self) -> u32 {
        self.buildings_placed
    }

    pub fn roads_placed(&self) -> u32 {
        self.roads_placed
    }

    pub fn is_reproducible(&self) -> bool {
        self.reproducible
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// The fields required by the domain to create a [BattleMap].
///
/// Validation of the inner request (dimensions, capacity) belongs to the
/// generation core; the domain only carries it.
#[derive(Clone, Debug, PartialEq, Eq, From)]
pub struct CreateMapRequest(GenerationRequest);

impl CreateMapRequest {
    pub fn new(request: GenerationRequest) -> Self {
        Self(request)
    }

    pub fn generation(&self) -> GenerationRequest {
        self.0
    }
}

#[derive(Debug, Error)]
pub enum CreateMapError {
    /// The request failed the core's fail-fast validation
    /// (unknown preset, invalid dimensions, overcommitted counts).
    #[error(transparent)]
    InvalidRequest(#[from] GenerationError),
    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}
