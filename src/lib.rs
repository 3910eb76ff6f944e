//! dbwire - Wire database dependencies into existing C# projects
//!
//! The engine lives in `dbwire-core`; this package re-exports it and hosts the
//! end-to-end tests.
pub use dbwire_core::*;
