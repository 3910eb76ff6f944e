use crate::error::{Error, Result};
use regex::{Captures, Regex};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// `{{`, `}}` or `{N}`
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{|\}\}|\{(\d+)\}").expect("placeholder pattern is valid"));

/// Number of distinct `{N}` slots in `template`
pub fn placeholder_count(template: &str) -> usize {
    indices(template).len()
}

/// Fill `{0}`, `{1}`, ... from `values`; `{{` and `}}` stand for literal braces.
///
/// The template must use exactly the slots `0..values.len()`, each at least
/// once, and contain no other brace.
pub fn bind(template: &str, values: &[&str]) -> Result<String> {
    let used = indices(template);
    let expected: BTreeSet<usize> = (0..values.len()).collect();
    if used != expected {
        return Err(Error::BindingError(format!(
            "template `{template}` uses slots {used:?} but {} value(s) were supplied",
            values.len()
        )));
    }

    let stray = PLACEHOLDER
        .replace_all(template, "")
        .contains(['{', '}']);
    if stray {
        return Err(Error::BindingError(format!(
            "template `{template}` contains an unescaped brace"
        )));
    }

    let bound = PLACEHOLDER.replace_all(template, |caps: &Captures| match caps.get(1) {
        Some(index) => index
            .as_str()
            .parse::<usize>()
            .ok()
            .and_then(|i| values.get(i))
            .copied()
            .unwrap_or_default()
            .to_string(),
        None if &caps[0] == "{{" => "{".to_string(),
        None => "}".to_string(),
    });
    Ok(bound.into_owned())
}

fn indices(template: &str) -> BTreeSet<usize> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}
