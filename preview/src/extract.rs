//! Component name extraction.
//!
//! Generated sources declare their root component in a handful of shapes.
//! The patterns are tried in priority order and the first capture that is a
//! usable JavaScript identifier wins; anything else falls back to `App`.

use std::sync::LazyLock;

use regex::Regex;

/// Name used when no declaration can be recognised.
pub const FALLBACK_COMPONENT: &str = "App";

const NAME_PATTERNS: [&str; 4] = [
    r"export\s+default\s+function\s+([^\s(]+)",
    r"function\s+([^\s(]+)\s*\(",
    r"const\s+([^\s(]+)\s*=\s*\(",
    r"export\s+default\s+([^\s;]+)\s*;?\s*$",
];

static PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| NAME_PATTERNS.iter().flat_map(|p| Regex::new(p)).collect());

static IDENTIFIER: LazyLock<Option<Regex>> = LazyLock::new(|| match Regex::new(r"^[\p{L}_$][\p{L}\p{N}_$]*$") {
    Ok(re) => Some(re),
    Err(_) => None,
});

/// Returns the root component name declared by `source`.
#[must_use]
pub fn component_name(source: &str) -> String {
    PATTERNS
        .iter()
        .filter_map(|re| re.captures(source))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .find(|name| is_identifier(name))
        .unwrap_or(FALLBACK_COMPONENT)
        .to_owned()
}

/// True when `name` can be spliced into script text as a bare identifier.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.as_ref().is_some_and(|re| re.is_match(name))
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod extract_test;
