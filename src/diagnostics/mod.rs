pub mod eslint;
pub mod tsc;

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A single issue reported by an analysis tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: PathBuf,
    /// 1-based. `0` when the tool reported no position.
    pub line: usize,
    pub column: Option<usize>,
    pub rule_id: String,
    pub message: String,
    /// Identifier the diagnostic is about, when the source can extract it.
    pub symbol: Option<String>,
}

/// Something that can produce a fresh list of diagnostics.
///
/// The structured-log pipeline calls this twice: once before patching and once
/// afterwards to count what remains.
pub trait DiagnosticSource {
    fn collect(&self) -> Result<Vec<Diagnostic>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse lint report: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to read diagnostics: {0}")]
    Read(#[source] io::Error),
}

/// Keep only diagnostics reported under `rule_id`, in their original order.
pub fn filter_by_rule<'a>(diagnostics: &'a [Diagnostic], rule_id: &str) -> Vec<&'a Diagnostic> {
    diagnostics.iter().filter(|d| d.rule_id == rule_id).collect()
}

/// Partition diagnostics by file. Each file keeps its diagnostics in input order.
pub fn group_by_file<'a, I>(diagnostics: I) -> BTreeMap<PathBuf, Vec<&'a Diagnostic>>
where
    I: IntoIterator<Item = &'a Diagnostic>,
{
    let mut by_file: BTreeMap<PathBuf, Vec<&Diagnostic>> = BTreeMap::new();
    for d in diagnostics {
        by_file.entry(d.file.clone()).or_default().push(d);
    }
    by_file
}

#[cfg(test)]
pub(crate) fn diag(file: &str, line: usize, rule_id: &str) -> Diagnostic {
    Diagnostic {
        file: PathBuf::from(file),
        line,
        column: None,
        rule_id: rule_id.to_string(),
        message: String::new(),
        symbol: None,
    }
}
