pub mod position;
pub mod region;

// Re-export commonly used types
pub use position::Position;
pub use region::{GLOBAL_SCOPE, Item, Region, RegionKind};
