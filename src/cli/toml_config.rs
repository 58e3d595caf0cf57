use crate::config::{
    FixConfig, DEFAULT_REQUIRE_IMPORTS_RULE, DEFAULT_SOURCE_DIR, DEFAULT_UNUSED_VARS_RULE,
};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[source] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Top-level TOML config file structure.
#[derive(Debug, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub lintpatch: LintpatchSection,
}

/// The `[lintpatch]` section.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LintpatchSection {
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
    #[serde(default = "default_lint_command")]
    pub lint_command: Vec<String>,
    #[serde(default = "default_unused_vars_rule")]
    pub unused_vars_rule: String,
    #[serde(default = "default_require_imports_rule")]
    pub require_imports_rule: String,
}

fn default_source_dir() -> String {
    DEFAULT_SOURCE_DIR.into()
}

fn default_lint_command() -> Vec<String> {
    vec!["npx".into(), "eslint".into()]
}

fn default_unused_vars_rule() -> String {
    DEFAULT_UNUSED_VARS_RULE.into()
}

fn default_require_imports_rule() -> String {
    DEFAULT_REQUIRE_IMPORTS_RULE.into()
}

impl Default for LintpatchSection {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            lint_command: default_lint_command(),
            unused_vars_rule: default_unused_vars_rule(),
            require_imports_rule: default_require_imports_rule(),
        }
    }
}

impl TomlConfig {
    /// Convert to the core `FixConfig` type.
    pub fn to_fix_config(&self) -> FixConfig {
        let section = &self.lintpatch;
        // An empty command list would leave nothing to spawn.
        let lint_command = if section.lint_command.is_empty() {
            default_lint_command()
        } else {
            section.lint_command.clone()
        };

        FixConfig {
            source_dir: section.source_dir.clone(),
            lint_command,
            unused_vars_rule: section.unused_vars_rule.clone(),
            require_imports_rule: section.require_imports_rule.clone(),
        }
    }
}

/// Load the config file at `path`. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<FixConfig, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(FixConfig::default());
        }
        Err(e) => return Err(ConfigError::Read(e)),
    };

    let parsed: TomlConfig = toml::from_str(&text).map_err(ConfigError::Parse)?;
    debug!(path = %path.display(), "loaded config");
    Ok(parsed.to_fix_config())
}
