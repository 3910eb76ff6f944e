//! Configuration management for dbwire

mod model;
mod scenario;

// Re-export main types
pub use model::{
    ChangeOption, ChangeSpec, Condition, EditConfig, FileEdit, InsertPosition, MemberSpec,
    MethodChanges,
};
pub use scenario::{ConfigCatalog, Scenario};
