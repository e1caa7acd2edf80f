//! Source cleanup before in-frame transpilation.
//!
//! The in-frame transpiler only understands JSX, so module syntax and
//! TypeScript annotations are stripped with an ordered list of rewrite rules.
//!
//! Module rules run on the raw text because they have to see the quoted
//! module specifiers. Type rules run on a masked view in which string
//! literals, template literals and comments are swapped for sentinels, so a
//! `:` or `<` inside user-visible text is never mistaken for an annotation.
//! Single and double quotes that reach a newline are treated as JSX text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

struct Rule {
    pattern: &'static str,
    replacement: &'static str,
}

const MODULE_RULES: [Rule; 5] = [
    Rule { pattern: r#"import\s+.*\s+from\s+['"]react['"];?"#, replacement: "" },
    Rule { pattern: r#"import\s+\{[^}]+\}\s+from\s+['"]lucide-react['"];?"#, replacement: "" },
    Rule { pattern: r"export\s+default\s+function\s+", replacement: "function " },
    Rule { pattern: r"(?m)export\s+default\s+\w+\s*;?\s*$", replacement: "" },
    Rule { pattern: r"const\s+\{[^}]+\}\s*=\s*React\s*;?", replacement: "" },
];

const TYPE_RULES: [Rule; 8] = [
    Rule { pattern: r"\binterface\s+\w+\s*\{[^}]*\}", replacement: "" },
    Rule { pattern: r"\btype\s+\w+\s*=\s*[^;]+;", replacement: "" },
    Rule { pattern: r"(\w+)\s*:\s*React\.\w+<[^>]*>", replacement: "$1" },
    Rule { pattern: r"(\w+)\s*:\s*\w+<[^>]*>", replacement: "$1" },
    Rule { pattern: r":\s*\w+\[\]", replacement: "" },
    Rule { pattern: r":\s*(string|number|boolean|any|void)\b", replacement: "" },
    Rule { pattern: r"useState<[^>]+>", replacement: "useState" },
    Rule { pattern: r"useRef<[^>]+>", replacement: "useRef" },
];

const SENTINEL_OPEN: char = '\u{E000}';
const SENTINEL_CLOSE: char = '\u{E001}';

static MODULE: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| compile(&MODULE_RULES));
static TYPES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| compile(&TYPE_RULES));
static SENTINEL: LazyLock<Option<Regex>> = LazyLock::new(|| match Regex::new(r"\x{E000}(\d+)\x{E001}") {
    Ok(re) => Some(re),
    Err(_) => None,
});

fn compile(rules: &[Rule]) -> Vec<(Regex, &'static str)> {
    rules
        .iter()
        .flat_map(|rule| Regex::new(rule.pattern).map(|re| (re, rule.replacement)))
        .collect()
}

fn apply(rules: &[(Regex, &'static str)], text: String) -> String {
    rules
        .iter()
        .fold(text, |acc, (re, replacement)| re.replace_all(&acc, *replacement).into_owned())
}

/// Strips module syntax and type annotations from generated component source.
///
/// Applying it to its own output is a no-op.
#[must_use]
pub fn sanitize(source: &str) -> String {
    let stripped = apply(&MODULE, source.to_owned());

    // A source that already carries sentinel characters cannot be masked
    // safely, so the type rules see it unprotected.
    if stripped.contains(SENTINEL_OPEN) || stripped.contains(SENTINEL_CLOSE) {
        return apply(&TYPES, stripped);
    }

    let masked = Masked::new(&stripped);
    let rewritten = apply(&TYPES, masked.text.clone());
    masked.restore(&rewritten)
}

// =============================================================
// Literal masking
// =============================================================

struct Masked {
    text: String,
    literals: Vec<String>,
}

impl Masked {
    fn new(src: &str) -> Self {
        let bytes = src.as_bytes();
        let mut text = String::with_capacity(src.len());
        let mut literals = Vec::new();
        let mut plain_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            let end = match bytes[i] {
                b'"' | b'\'' => quoted_end(bytes, i),
                b'`' => template_end(bytes, i),
                b'/' if bytes.get(i + 1) == Some(&b'/') => Some(line_end(bytes, i)),
                b'/' if bytes.get(i + 1) == Some(&b'*') => block_comment_end(bytes, i),
                _ => None,
            };
            match end {
                Some(end) => {
                    text.push_str(&src[plain_start..i]);
                    text.push(SENTINEL_OPEN);
                    text.push_str(&literals.len().to_string());
                    text.push(SENTINEL_CLOSE);
                    literals.push(src[i..end].to_owned());
                    i = end;
                    plain_start = end;
                }
                None => i += 1,
            }
        }
        text.push_str(&src[plain_start..]);
        Self { text, literals }
    }

    /// Puts literals back. Sentinels removed by a rule stay removed.
    fn restore(&self, rewritten: &str) -> String {
        let Some(re) = SENTINEL.as_ref() else {
            return rewritten.to_owned();
        };
        re.replace_all(rewritten, |caps: &Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .map_or_else(|_| caps[0].to_owned(), |idx| self.literal(idx, &caps[0]))
        })
        .into_owned()
    }

    fn literal(&self, idx: usize, fallback: &str) -> String {
        self.literals.get(idx).map_or_else(|| fallback.to_owned(), Clone::clone)
    }
}

// All delimiters are ASCII, so every returned index is a char boundary.

fn quoted_end(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let mut j = start + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'\n' => return None,
            b if b == quote => return Some(j + 1),
            _ => j += 1,
        }
    }
    None
}

fn template_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut j = start + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'`' => return Some(j + 1),
            _ => j += 1,
        }
    }
    None
}

fn line_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|b| *b == b'\n')
        .map_or(bytes.len(), |offset| start + offset)
}

fn block_comment_end(bytes: &[u8], start: usize) -> Option<usize> {
    bytes[start + 2..]
        .windows(2)
        .position(|w| w == b"*/")
        .map(|offset| start + 2 + offset + 2)
}

#[cfg(test)]
#[path = "sanitize_test.rs"]
mod sanitize_test;
