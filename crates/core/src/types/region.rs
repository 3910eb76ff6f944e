use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::position::Position;

/// Name under which the program's entry code is addressed, whatever its style
pub const GLOBAL_SCOPE: &str = "Global";

/// Kinds of structural regions the engine can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionKind {
    /// Bare top-level statement sequence of a compilation unit
    TopLevel,
    /// Body of an explicit `Main` method
    EntryMethod,
    /// Body of any other method or local function
    Method,
    /// Member list of a class, struct or record
    ClassBody,
}

/// A statement inside an executable region, or a member inside a class body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Byte range of the whole node
    pub span: Range<usize>,
    /// Byte offset of the trailing `;`, when the node ends with one
    pub terminator: Option<usize>,
}

/// A named region of a source file with start/end positions and its direct items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub kind: RegionKind,
    pub start: Position,
    pub end: Position,
    /// Byte offset of the opening brace; absent for the top-level sequence
    pub open_brace: Option<usize>,
    /// Byte offset of the closing brace; absent for the top-level sequence
    pub close_brace: Option<usize>,
    pub items: Vec<Item>,
}

impl Region {
    /// Regions holding statements, as opposed to class members
    pub fn is_executable(&self) -> bool {
        !matches!(self.kind, RegionKind::ClassBody)
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}
