/*
   Module `ports` specifies the API by which external modules interact with the map domain.

   All traits are bounded by `Send + Sync + 'static`, since their implementations must be shareable
   between request-handling threads.

   Trait methods are explicitly asynchronous, including `Send` bounds on response types,
   since the application is expected to always run in a multithreaded environment.
*/

use std::future::Future;

use crate::domain::models::*;

use battlemap_core::GenerationResult;

/// `MapService` is the public API for the map domain.
///
/// External modules must conform to this contract – the domain is not concerned with the
/// implementation details or underlying technology of any external code.
pub trait MapService: Clone + Send + Sync + 'static {
    /// Asynchronously create a new [BattleMap].
    ///
    /// # Errors
    ///
    /// - [CreateMapError::InvalidRequest] if the generation core rejects the
    ///   request before doing any work.
    fn create_map(
        &self,
        req: &CreateMapRequest,
    ) -> impl Future<Output = Result<BattleMap, CreateMapError>> + Send;

    /// Asynchronously generate a map and render it straight to SVG markup.
    fn render_map(
        &self,
        req: &CreateMapRequest,
    ) -> impl Future<Output = Result<String, CreateMapError>> + Send;
}

/// `MapRepository` represents a store of the created maps.
///
/// External modules must conform to this contract – the domain is not concerned with the
/// implementation details or underlying technology of any external code.
pub trait MapRepository: Send + Sync + Clone + 'static {
    /// Asynchronously persist a new [BattleMap].
    fn persist_map(
        &self,
        req: &CreateMapRequest,
        result: &GenerationResult,
        data: svg::Document,
    ) -> impl Future<Output = Result<BattleMap, CreateMapError>> + Send;
}

/// `MapMetrics` describes an aggregator of map creation related metrics, such as a time-series
/// database.
pub trait MapMetrics: Send + Sync + Clone + 'static {
    /// Record a successful map creation.
    fn record_map_creation_success(&self) -> impl Future<Output = ()> + Send;

    /// Record a map creation failure.
    fn record_map_creation_failure(&self) -> impl Future<Output = ()> + Send;
}

/// `CreatorNotifier` triggers notifications to map creators.
pub trait CreatorNotifier: Send + Sync + Clone + 'static {
    fn map_created(&self, map: &BattleMap) -> impl Future<Output = ()> + Send;
}
