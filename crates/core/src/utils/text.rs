//! Line arithmetic over source text, in byte offsets

/// Offset of the first byte of the line containing `offset`
pub fn line_start(source: &str, offset: usize) -> usize {
    let offset = offset.min(source.len());
    source[..offset].rfind('\n').map_or(0, |i| i + 1)
}

/// Offset just past the newline ending the line containing `offset`, or the end of the text
pub fn next_line_start(source: &str, offset: usize) -> usize {
    let offset = offset.min(source.len());
    source[offset..]
        .find('\n')
        .map_or(source.len(), |i| offset + i + 1)
}

/// Leading whitespace of the line containing `offset`
pub fn line_indent(source: &str, offset: usize) -> &str {
    let start = line_start(source, offset);
    let line = &source[start..];
    let width = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..width]
}

/// Whether only whitespace precedes `offset` on its line
pub fn starts_line(source: &str, offset: usize) -> bool {
    let offset = offset.min(source.len());
    source[line_start(source, offset)..offset]
        .chars()
        .all(|c| c == ' ' || c == '\t')
}

/// Remove the common leading whitespace of all non-blank lines
pub fn dedent(text: &str) -> String {
    let common = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    text.lines()
        .map(|line| line.get(common..).unwrap_or("").trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Line terminator used by `source`: `\r\n` when any line ends with it, else `\n`
pub fn detect_newline(source: &str) -> &'static str {
    if source.contains("\r\n") { "\r\n" } else { "\n" }
}

/// Dedent `text`, then prefix every non-blank line with `indent`.
///
/// Lines are joined with `newline` whatever terminator the template used.
pub fn reindent(text: &str, indent: Option<&str>, newline: &str) -> String {
    let text = text.trim_matches(|c| c == '\n' || c == '\r');
    let lines: Vec<String> = match indent {
        None => text.lines().map(str::to_string).collect(),
        Some(indent) => dedent(text)
            .lines()
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("{indent}{line}")
                }
            })
            .collect(),
    };
    lines.join(newline)
}

/// Text with all whitespace removed, for layout-insensitive matching
pub fn squash(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// A plain C# identifier: a letter or `_`, then letters, digits or `_`
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}
