use super::facts::StyleFacts;
use crate::{
    error::{Error, Result},
    parser::{CSharpParser, RegionDetector, point_at},
    types::Region,
    utils::{text::detect_newline, write_atomic},
};
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::debug;
use tree_sitter::{InputEdit, Tree};

/// A parsed C# file owned exclusively by one modification run.
///
/// Edits are applied to the text and mirrored into the tree with an
/// incremental reparse; nothing reaches the disk until [`SourceFile::commit`].
pub struct SourceFile {
    path: PathBuf,
    source: String,
    tree: Tree,
    parser: CSharpParser,
    facts: StyleFacts,
    newline: &'static str,
    modified: bool,
}

impl SourceFile {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let source = std::fs::read_to_string(path)?;
        Self::from_source(path, source)
    }

    pub fn from_source(path: &Path, source: String) -> Result<Self> {
        let mut parser = CSharpParser::new()?;
        let tree = parser.parse(&source)?;
        let facts = StyleFacts::analyze(&tree, &source);
        let newline = detect_newline(&source);
        debug!("Loaded {:?}: {:?}", path, facts);

        Ok(Self {
            path: path.to_path_buf(),
            source,
            tree,
            parser,
            facts,
            newline,
            modified: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        self.path.file_name().and_then(|n| n.to_str()).unwrap_or("")
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Facts as of load time; later edits do not reclassify the file
    pub fn facts(&self) -> StyleFacts {
        self.facts
    }

    /// Line terminator inserted text is joined with, detected at load
    pub fn newline(&self) -> &'static str {
        self.newline
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn regions(&self) -> Result<Vec<Region>> {
        RegionDetector::new().detect_regions(&self.tree, &self.source)
    }

    /// Replace `range` with `text` and bring the tree up to date
    pub fn splice(&mut self, range: Range<usize>, text: &str) -> Result<()> {
        if range.start > range.end
            || range.end > self.source.len()
            || !self.source.is_char_boundary(range.start)
            || !self.source.is_char_boundary(range.end)
        {
            return Err(Error::Other(format!(
                "Edit range {range:?} is outside {}",
                self.path.display()
            )));
        }

        let start_position = point_at(&self.source, range.start);
        let old_end_position = point_at(&self.source, range.end);

        self.source.replace_range(range.clone(), text);

        let new_end_byte = range.start + text.len();
        let edit = InputEdit {
            start_byte: range.start,
            old_end_byte: range.end,
            new_end_byte,
            start_position,
            old_end_position,
            new_end_position: point_at(&self.source, new_end_byte),
        };
        self.tree.edit(&edit);
        self.tree = self.parser.reparse(&self.source, &self.tree)?;
        self.modified = true;

        Ok(())
    }

    /// Write the current text back to disk in one step
    pub fn commit(&self) -> Result<()> {
        write_atomic(&self.path, &self.source)?;
        debug!("Wrote {:?}", self.path);
        Ok(())
    }
}
