//! Applying rendered text to a source file at a resolved position

mod document;

pub use document::DocumentWriter;
