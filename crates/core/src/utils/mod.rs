pub mod file;
pub mod serde_helpers;
pub mod text;

pub use file::{ensure_cs_extension, unique_file_path, write_atomic};
