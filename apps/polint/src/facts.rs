//! Fact file discovery and loading.
//!
//! A fact file is the JSON form of one `PageObjectLintingModel`, produced by
//! the descriptor compiler. Inputs are paths or glob patterns relative to the
//! repository root; matches of one pattern are sorted, and the overall order
//! follows the order of the patterns.

use crate::error::FactError;
use crate::models::page_object::PageObjectLintingModel;
use glob::glob;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Expand `inputs` against `root` into a de-duplicated, ordered file list.
pub fn expand_inputs(root: &Path, inputs: &[String]) -> Result<Vec<PathBuf>, FactError> {
    let mut seen = HashSet::new();
    let mut targets = Vec::new();
    for input in inputs {
        let pattern = root.join(input).to_string_lossy().to_string();
        let entries = glob(&pattern).map_err(|source| FactError::Pattern {
            pattern: input.clone(),
            source,
        })?;
        let mut matched: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .collect();
        if matched.is_empty() {
            tracing::warn!(pattern = %input, "input pattern matched no files");
        }
        matched.sort();
        for path in matched {
            if seen.insert(path.clone()) {
                targets.push(path);
            }
        }
    }
    Ok(targets)
}

/// Parse one fact file.
pub fn load_fact(path: &Path) -> Result<PageObjectLintingModel, FactError> {
    let data = fs::read_to_string(path).map_err(|source| FactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| FactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load all fact files in parallel; results keep the order of `paths`.
pub fn load_facts(paths: &[PathBuf]) -> Result<Vec<PageObjectLintingModel>, FactError> {
    let models = paths
        .par_iter()
        .map(|p| load_fact(p))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(count = models.len(), "loaded page object facts");
    Ok(models)
}
