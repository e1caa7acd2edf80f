//! Hygiene checks for the preview crate.
//!
//! Scans production sources under `src/` (sibling `_test.rs` files excluded)
//! and holds each antipattern to a budget. Budgets only ever go down.

use std::fs;
use std::path::{Path, PathBuf};

struct Budget {
    pattern: &'static str,
    max: usize,
}

const BUDGETS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0 },
    Budget { pattern: ".expect(", max: 0 },
    Budget { pattern: "panic!(", max: 0 },
    Budget { pattern: "unreachable!(", max: 0 },
    Budget { pattern: "todo!(", max: 0 },
    Budget { pattern: "unimplemented!(", max: 0 },
    Budget { pattern: "let _ =", max: 0 },
    // modal_index: a non-numeric suffix simply is not a modal.
    Budget { pattern: ".ok()", max: 1 },
    Budget { pattern: "#[allow(dead_code)]", max: 0 },
];

fn production_files(dir: &Path, out: &mut Vec<(PathBuf, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            production_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") && !path.to_string_lossy().ends_with("_test.rs") {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push((path, content));
            }
        }
    }
}

fn sources() -> Vec<(PathBuf, String)> {
    let mut files = Vec::new();
    production_files(Path::new("src"), &mut files);
    files
}

#[test]
fn production_sources_are_found() {
    assert!(sources().iter().any(|(p, _)| p.ends_with("lib.rs")));
}

#[test]
fn antipattern_budgets_hold() {
    let files = sources();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let hits: Vec<String> = files
            .iter()
            .filter_map(|(path, content)| {
                let n = content.lines().filter(|l| l.contains(budget.pattern)).count();
                (n > 0).then(|| format!("  {}: {n}", path.display()))
            })
            .collect();
        let total: usize = files
            .iter()
            .map(|(_, content)| content.lines().filter(|l| l.contains(budget.pattern)).count())
            .sum();
        if total > budget.max {
            failures.push(format!("`{}` budget exceeded: {total} > {}\n{}", budget.pattern, budget.max, hits.join("\n")));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}
