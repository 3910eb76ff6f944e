use crate::types::Position;
use tree_sitter::{Node, Point};

pub fn node_to_position(node: &Node, start: bool) -> Position {
    let point = if start {
        node.start_position()
    } else {
        node.end_position()
    };
    Position {
        line: point.row as u32,
        character: point.column as u32,
    }
}

/// Text of a node, or an empty string when the range is not valid UTF-8
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// Row/column of a byte offset, as tree-sitter counts them (columns in bytes)
pub fn point_at(source: &str, byte: usize) -> Point {
    let byte = byte.min(source.len());
    let before = &source.as_bytes()[..byte];
    let row = before.iter().filter(|b| **b == b'\n').count();
    let column = match before.iter().rposition(|b| *b == b'\n') {
        Some(newline) => byte - newline - 1,
        None => byte,
    };
    Point::new(row, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_at_counts_rows_and_byte_columns() {
        let source = "ab\ncde\n";
        assert_eq!(point_at(source, 0), Point::new(0, 0));
        assert_eq!(point_at(source, 2), Point::new(0, 2));
        assert_eq!(point_at(source, 3), Point::new(1, 0));
        assert_eq!(point_at(source, 5), Point::new(1, 2));
        assert_eq!(point_at(source, 100), Point::new(2, 0));
    }
}
