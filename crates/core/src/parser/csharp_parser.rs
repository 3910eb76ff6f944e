use crate::{
    error::{Error, Result},
    parser::region_detector::RegionDetector,
    types::Region,
};
use tree_sitter::{Parser, Tree};

pub struct CSharpParser {
    parser: Parser,
}

impl CSharpParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
            .map_err(|e| Error::TreeSitterError(format!("Failed to set language: {e}")))?;
        Ok(Self { parser })
    }

    pub fn parse(&mut self, source: &str) -> Result<Tree> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| Error::ParseError("Failed to parse source code".to_string()))
    }

    /// Incremental reparse; `old_tree` must already carry the matching `Tree::edit`
    pub fn reparse(&mut self, source: &str, old_tree: &Tree) -> Result<Tree> {
        self.parser
            .parse(source, Some(old_tree))
            .ok_or_else(|| Error::ParseError("Failed to reparse source code".to_string()))
    }

    pub fn get_regions(&mut self, source: &str) -> Result<Vec<Region>> {
        let tree = self.parse(source)?;
        RegionDetector::new().detect_regions(&tree, source)
    }
}
