//! Cell and pack models: linear charge bookkeeping over a composite of cells.

/// Single battery cell.
pub mod cell;
/// Series/parallel composite of cells and nested packs.
pub mod pack;
pub mod types;

// Re-export the main types for convenience
pub use cell::Cell;
pub use pack::Pack;
pub use types::Battery;
pub use types::Clamp;
pub use types::ConnectionType;
pub use types::PackError;
