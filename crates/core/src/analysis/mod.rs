//! Structural facts about source files and projects

pub mod facts;
pub mod project;
pub mod references;
pub mod source_file;

pub use facts::StyleFacts;
pub use project::{ENTRY_FILE, Project, ProjectStyle};
pub use references::{ProjectReferences, conventional_reference};
pub use source_file::SourceFile;
