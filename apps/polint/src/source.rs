//! Best-effort source line lookup for findings.
//!
//! Rules describe a location as a chain of literal fragments (for example an
//! element's `"name": "x"` pair, then `"shadow"`); each fragment is searched
//! after the line where the previous one matched. Whitespace inside a
//! fragment is not significant, so descriptor formatting does not matter.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Line used when nothing better is known.
pub const FIRST_LINE: usize = 1;

/// Resolves 1-based line numbers inside a descriptor source.
pub trait SourceLines {
    fn find_line(&self, source_path: &str, fragments: &[&str]) -> usize;
}

/// Lookup that always answers the first line.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSourceLines;

impl SourceLines for NoSourceLines {
    fn find_line(&self, _source_path: &str, _fragments: &[&str]) -> usize {
        FIRST_LINE
    }
}

/// Scans descriptor files on disk, resolving relative paths against `root`.
#[derive(Debug, Clone)]
pub struct FileSourceLines {
    root: PathBuf,
}

impl FileSourceLines {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, source_path: &str) -> PathBuf {
        let p = Path::new(source_path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root.join(p)
        }
    }
}

impl SourceLines for FileSourceLines {
    fn find_line(&self, source_path: &str, fragments: &[&str]) -> usize {
        let path = self.resolve(source_path);
        match fs::read_to_string(&path) {
            Ok(text) => find_in_text(&text, fragments),
            Err(_) => FIRST_LINE,
        }
    }
}

/// Whitespace-insensitive pattern for a literal fragment.
fn fragment_pattern(fragment: &str) -> Option<Regex> {
    let parts: Vec<String> = fragment
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| regex::escape(&c.to_string()))
        .collect();
    if parts.is_empty() {
        return None;
    }
    Regex::new(&parts.join(r"\s*")).ok()
}

/// Find the line of the last fragment of the chain; `FIRST_LINE` when any is missing.
pub fn find_in_text(text: &str, fragments: &[&str]) -> usize {
    let lines: Vec<&str> = text.lines().collect();
    let mut start = 0usize;
    let mut found = None;
    for fragment in fragments {
        let Some(re) = fragment_pattern(fragment) else {
            continue;
        };
        match lines
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, line)| re.is_match(line))
        {
            Some((idx, _)) => {
                found = Some(idx);
                start = idx + 1;
            }
            None => return FIRST_LINE,
        }
    }
    found.map(|idx| idx + 1).unwrap_or(FIRST_LINE)
}

/// Fragment locating a named element or method declaration.
pub fn name_fragment(name: &str) -> String {
    format!("\"name\": \"{}\"", name)
}

/// Fragment locating a quoted literal, such as a selector.
pub fn quoted(value: &str) -> String {
    format!("\"{}\"", value)
}
