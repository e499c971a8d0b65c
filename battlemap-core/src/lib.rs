//! Procedural tabletop battle-map generation.
//!
//! The placement engine is constructive: free space and the road-growth
//! frontier are tracked incrementally, candidates are derived from those
//! structures, and every draw is valid before it is committed. Requests
//! that provably cannot fit are rejected before any work begins; requests
//! that run out of space mid-run finish with an explicit Partial outcome.
//!
//! ```no_run
//! use battlemap_core::{Theme, generate};
//!
//! let mut request = Theme::Outpost.request_defaults();
//! request.seed = Some(42);
//!
//! let result = generate(request)?;
//! let document = battlemap_core::render_map(&result);
//! # Ok::<(), battlemap_core::GenerationError>(())
//! ```

mod algos;
mod constants;
mod error;
mod grid;
mod session;
mod themes;
mod types;

pub use algos::render_map;
pub use constants::MAX_DIMENSION;
pub use error::{GenerationError, Result};
pub use grid::Grid;
pub use session::{GenerationSession, generate};
pub use themes::{Theme, ThemeRegistry};
pub use types::{
    CellState, Coord, GenerationRequest, GenerationResult, Outcome, Region, RoadSegment,
};
