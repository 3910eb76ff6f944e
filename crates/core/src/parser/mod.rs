//! C# source code parsing and region detection using tree-sitter

pub mod csharp_parser;
pub mod region_detector;
pub mod utils;

// Re-export commonly used items
pub use csharp_parser::CSharpParser;
pub use region_detector::RegionDetector;
pub use utils::{node_text, node_to_position, point_at};
