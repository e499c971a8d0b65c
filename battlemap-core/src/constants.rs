/// Hard ceiling on either grid dimension, shared by the CLI and the server.
pub const MAX_DIMENSION: u32 = 256;

// A building needs a one-cell wall ring around at least one interior cell.
pub(crate) const MIN_BUILDING_SIDE: u32 = 3;
pub(crate) const MIN_BUILDING_AREA: u32 = MIN_BUILDING_SIDE * MIN_BUILDING_SIDE;
