use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenerationError>;

/// Failures surfaced before or during a generation session.
///
/// Everything here is fail-fast: validation errors are reported before any
/// grid mutation, and `OutOfBounds` only exists as a defensive guard on
/// `Grid::set` that a correct placer never triggers. Running out of free
/// space mid-session is not an error, it is the `Partial` outcome.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error(r#"unknown preset: "{0}""#)]
    UnknownPreset(String),

    #[error("invalid dimensions [{width}x{height}], both sides must be in 1..={max}")]
    InvalidDimensions { width: u32, height: u32, max: u32 },

    #[error(
        "request needs at least {required} cells under perfect packing, grid only has {available}"
    )]
    Overcommitted { required: u64, available: u64 },

    #[error("coordinate {coord} is outside the [{width}x{height}] grid")]
    OutOfBounds {
        coord: crate::types::Coord,
        width: u32,
        height: u32,
    },
}
