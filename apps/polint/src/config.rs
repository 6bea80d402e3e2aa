//! Linting configuration and its discovery.
//!
//! The engine takes a `LintingConfig` (a JSON object inside the compiler
//! configuration). The CLI additionally discovers `polint.json|toml|yaml|yml`
//! from the repository root (or closest ancestor) and merges it with flags.
//! Defaults:
//! - `disable`: false
//! - `writeReport`: true
//! - `throwOnError`: false
//! - `printToConsole`: true
//! - `reportOutputPath`: `polint.sarif`
//! - every rule enabled as a warning
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::ConfigError;
use crate::rules::RuleId;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default name of the SARIF report, relative to the compiler root.
pub const DEFAULT_REPORT_FILE: &str = "polint.sarif";

/// File names probed during discovery, in priority order.
const CONFIG_FILES: [&str; 4] = ["polint.json", "polint.toml", "polint.yaml", "polint.yml"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Per-rule severity override.
pub enum Violation {
    Error,
    Warning,
    Disabled,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Override entry for one rule.
pub struct RuleOverride {
    pub violation: Option<Violation>,
    /// Page object names or source paths the rule skips.
    #[serde(default)]
    pub exclude: Vec<String>,
    pub message: Option<String>,
    pub fix_suggestion: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Root linting configuration.
pub struct LintingConfig {
    pub disable: bool,
    #[serde(alias = "writeSarifReport")]
    pub write_report: bool,
    #[serde(alias = "throwError")]
    pub throw_on_error: bool,
    pub print_to_console: bool,
    #[serde(alias = "lintingOutputFile")]
    pub report_output_path: String,
    #[serde(alias = "duplicate-selector-in-descriptor")]
    pub duplicate_selectors: Option<RuleOverride>,
    #[serde(alias = "required-root-description")]
    pub required_root_description: Option<RuleOverride>,
    #[serde(alias = "required-author")]
    pub required_author: Option<RuleOverride>,
    #[serde(alias = "required-method-description")]
    pub required_method_description: Option<RuleOverride>,
    #[serde(alias = "single-shadow-boundary")]
    pub required_single_shadow_root: Option<RuleOverride>,
    #[serde(alias = "unique-root-selector")]
    pub duplicate_root_selectors: Option<RuleOverride>,
    #[serde(alias = "root-selector-implies-type")]
    pub element_cant_have_root_selector: Option<RuleOverride>,
    #[serde(alias = "elements-with-different-types")]
    pub duplicate_custom_selectors: Option<RuleOverride>,
}

impl Default for LintingConfig {
    fn default() -> Self {
        Self {
            disable: false,
            write_report: true,
            throw_on_error: false,
            print_to_console: true,
            report_output_path: DEFAULT_REPORT_FILE.to_string(),
            duplicate_selectors: None,
            required_root_description: None,
            required_author: None,
            required_method_description: None,
            required_single_shadow_root: None,
            duplicate_root_selectors: None,
            element_cant_have_root_selector: None,
            duplicate_custom_selectors: None,
        }
    }
}

impl LintingConfig {
    /// Parse the JSON config object; `None` means built-in defaults.
    pub fn from_json(value: Option<&serde_json::Value>) -> Result<Self, serde_json::Error> {
        match value {
            Some(v) => LintingConfig::deserialize(v),
            None => Ok(LintingConfig::default()),
        }
    }

    pub fn rule_override(&self, rule: RuleId) -> Option<&RuleOverride> {
        match rule {
            RuleId::DuplicateSelector => self.duplicate_selectors.as_ref(),
            RuleId::RequiredRootDescription => self.required_root_description.as_ref(),
            RuleId::RequiredAuthor => self.required_author.as_ref(),
            RuleId::RequiredMethodDescription => self.required_method_description.as_ref(),
            RuleId::SingleShadowBoundary => self.required_single_shadow_root.as_ref(),
            RuleId::UniqueRootSelector => self.duplicate_root_selectors.as_ref(),
            RuleId::RootSelectorImpliesType => self.element_cant_have_root_selector.as_ref(),
            RuleId::ElementsWithDifferentTypes => self.duplicate_custom_selectors.as_ref(),
        }
    }
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `polint.*` config or a `.git` directory is found. Relative
/// starts are made absolute first, otherwise `.` has no parent to walk to.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let start = start
        .canonicalize()
        .unwrap_or_else(|_| start.to_path_buf());
    let mut cur = start.as_path();
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.clone(),
        }
    }
}

/// Parse a config file, picking the format from its extension (JSON otherwise).
pub fn read_config(path: &Path) -> Result<LintingConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "toml" => toml::from_str(&s).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        }),
        "yaml" | "yml" => serde_yaml::from_str(&s).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
        _ => serde_json::from_str(&s).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load the first `polint.*` config present in `root`.
pub fn load_config(root: &Path) -> Result<Option<LintingConfig>, ConfigError> {
    for name in CONFIG_FILES {
        let p = root.join(name);
        if p.exists() {
            return read_config(&p).map(Some);
        }
    }
    Ok(None)
}

/// Flag values from the command line; `None` leaves the config value.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub repo_root: Option<String>,
    pub config: Option<String>,
    pub disable: Option<bool>,
    pub write_report: Option<bool>,
    pub throw_on_error: Option<bool>,
    pub report_output_path: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    /// Whether a config file was found or passed.
    pub config_found: bool,
    pub linting: LintingConfig,
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &CliOverrides) -> Result<Effective, ConfigError> {
    let start = PathBuf::from(cli.repo_root.as_deref().unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = match cli.config.as_deref() {
        Some(explicit) => Some(read_config(&repo_root.join(explicit))?),
        None => load_config(&repo_root)?,
    };
    let config_found = loaded.is_some();
    let mut linting = loaded.unwrap_or_default();

    if let Some(v) = cli.disable {
        linting.disable = v;
    }
    if let Some(v) = cli.write_report {
        linting.write_report = v;
    }
    if let Some(v) = cli.throw_on_error {
        linting.throw_on_error = v;
    }
    if let Some(p) = cli.report_output_path.as_ref() {
        linting.report_output_path = p.clone();
    }

    Ok(Effective {
        repo_root,
        config_found,
        linting,
    })
}
