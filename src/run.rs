use crate::cli::format;
use crate::cli::toml_config::ConfigError;
use crate::config::{FixConfig, UNUSED_PARAMETER_RULE};
use crate::diagnostics::tsc::TscParser;
use crate::diagnostics::{filter_by_rule, group_by_file, Diagnostic, DiagnosticSource, SourceError};
use crate::fixes::require_imports::RequireImportsFixer;
use crate::fixes::unused_params::UnusedParamsFixer;
use crate::fixes::unused_vars::UnusedVarsFixer;
use crate::fixes::{FixError, Fixer};
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Fix(#[from] FixError),
    #[error("invalid built-in pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Counts from one run of the lint pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LintSummary {
    /// Error diagnostics reported before any patch.
    pub found: usize,
    /// Diagnostics the fixers reported as resolved.
    pub fixed: usize,
    /// Error diagnostics reported by the re-check.
    pub remaining: usize,
}

impl LintSummary {
    /// How many fewer errors the re-check reported, if any.
    pub fn reduced_by(&self) -> Option<usize> {
        if self.remaining < self.found {
            Some(self.found - self.remaining)
        } else {
            None
        }
    }
}

/// Run the lint pipeline: collect, remove unused declarations, convert `require()`
/// imports, then collect again and report.
///
/// Any source or file error aborts the run. Files already written stay written.
pub fn run_lint_fix(
    config: &FixConfig,
    source: &dyn DiagnosticSource,
    out: &mut dyn Write,
) -> Result<LintSummary, RunError> {
    format::write_banner(out);
    let errors = source.collect()?;
    format::write_found(out, errors.len());

    let unused_vars = UnusedVarsFixer::new()?;
    let require_imports = RequireImportsFixer::new()?;

    let mut fixed = 0;
    fixed += apply_fixer(
        &unused_vars,
        filter_by_rule(&errors, &config.unused_vars_rule),
        out,
    )?
    .len();
    fixed += apply_fixer(
        &require_imports,
        filter_by_rule(&errors, &config.require_imports_rule),
        out,
    )?
    .len();

    format::write_rechecking(out);
    let remaining = source.collect()?.len();

    let summary = LintSummary {
        found: errors.len(),
        fixed,
        remaining,
    };
    format::write_lint_summary(out, &summary);
    Ok(summary)
}

/// Run the parameter pipeline over `tsc` output read from `input`.
/// Returns the number of parameters renamed.
pub fn run_param_fix<R: BufRead>(input: R, out: &mut dyn Write) -> Result<usize, RunError> {
    let parser = TscParser::new()?;
    let diagnostics = parser.parse_stream(input)?;

    let existing: Vec<&Diagnostic> = filter_by_rule(&diagnostics, UNUSED_PARAMETER_RULE)
        .into_iter()
        .filter(|d| {
            let exists = d.file.exists();
            if !exists {
                debug!(file = %d.file.display(), "skipping diagnostic for missing file");
            }
            exists
        })
        .collect();

    let fixer = UnusedParamsFixer::new();
    let mut total = 0;
    for (path, file_diagnostics) in group_by_file(existing) {
        let mut fixed = fixer.fix_file(&path, &file_diagnostics)?;
        fixed.sort_by_key(|d| d.line);
        for d in &fixed {
            format::write_param_fixed(out, d);
        }
        total += fixed.len();
    }

    format::write_param_total(out, total);
    Ok(total)
}

fn apply_fixer<'a>(
    fixer: &dyn Fixer,
    diagnostics: Vec<&'a Diagnostic>,
    out: &mut dyn Write,
) -> Result<Vec<&'a Diagnostic>, RunError> {
    let mut resolved = Vec::new();
    for (path, file_diagnostics) in group_by_file(diagnostics) {
        format::write_fixing(out, fixer.name(), &path);
        let mut fixed = fixer.fix_file(&path, &file_diagnostics)?;
        resolved.append(&mut fixed);
    }
    Ok(resolved)
}
