/// Severity level of a linter message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// Map ESLint's numeric severity (`1` = warning, `2` = error).
    /// Anything else (including `0`, "off") is treated as a warning.
    pub fn from_eslint(level: u8) -> Self {
        match level {
            2 => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

pub const DEFAULT_SOURCE_DIR: &str = "src";
pub const DEFAULT_UNUSED_VARS_RULE: &str = "@typescript-eslint/no-unused-vars";
pub const DEFAULT_REQUIRE_IMPORTS_RULE: &str = "@typescript-eslint/no-require-imports";

/// Rule identifier attached to every diagnostic read from type-checker text output.
pub const UNUSED_PARAMETER_RULE: &str = "unused parameter";

/// Resolved settings for a fix run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixConfig {
    /// Directory handed to the lint command, relative to the working directory.
    pub source_dir: String,
    /// Program and leading arguments of the lint command. The source directory and
    /// `--format=json` are appended when it runs.
    pub lint_command: Vec<String>,
    pub unused_vars_rule: String,
    pub require_imports_rule: String,
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            source_dir: DEFAULT_SOURCE_DIR.to_string(),
            lint_command: vec!["npx".to_string(), "eslint".to_string()],
            unused_vars_rule: DEFAULT_UNUSED_VARS_RULE.to_string(),
            require_imports_rule: DEFAULT_REQUIRE_IMPORTS_RULE.to_string(),
        }
    }
}
