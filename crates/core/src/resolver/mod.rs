//! Locating the scope and anchor statement an edit applies to

mod strategy;
mod target;

pub use strategy::{
    EntryMethodStrategy, ScopeStrategy, TopLevelStrategy, measured_indent, strategy_for,
};
pub use target::{Anchor, ResolveMiss, ResolvedTarget, resolve};
