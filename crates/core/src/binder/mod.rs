//! Positional template binding

mod context;
mod template;

pub use context::{Param, ParameterContext};
pub use template::{bind, placeholder_count};
