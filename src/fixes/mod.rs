pub mod require_imports;
pub mod unused_params;
pub mod unused_vars;

use crate::diagnostics::Diagnostic;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Rewrites one file in response to the diagnostics reported against it.
pub trait Fixer {
    /// Human-readable category used in progress output (e.g. `"unused vars"`).
    fn name(&self) -> &str;

    /// Patch `path` and return the diagnostics that were actually resolved.
    ///
    /// `diagnostics` all refer to `path`. A diagnostic whose line doesn't look like
    /// something this fixer understands is left alone and not returned.
    fn fix_file<'a>(
        &self,
        path: &Path,
        diagnostics: &[&'a Diagnostic],
    ) -> Result<Vec<&'a Diagnostic>, FixError>;
}

#[derive(Debug, Error)]
pub enum FixError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid pattern: {0}")]
    InvalidRegex(#[from] regex::Error),
}

pub(crate) fn read_source(path: &Path) -> Result<String, FixError> {
    fs::read_to_string(path).map_err(|source| FixError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn write_source(path: &Path, content: &str) -> Result<(), FixError> {
    fs::write(path, content).map_err(|source| FixError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Line {
    text: String,
    ending: &'static str,
}

/// The lines of one source file, each remembering its own terminator so that
/// lines nobody touched are written back byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBuffer {
    lines: Vec<Line>,
}

impl FileBuffer {
    pub fn parse(content: &str) -> Self {
        let lines = content
            .split_inclusive('\n')
            .map(|raw| {
                if let Some(text) = raw.strip_suffix("\r\n") {
                    Line {
                        text: text.to_string(),
                        ending: "\r\n",
                    }
                } else if let Some(text) = raw.strip_suffix('\n') {
                    Line {
                        text: text.to_string(),
                        ending: "\n",
                    }
                } else {
                    Line {
                        text: raw.to_string(),
                        ending: "",
                    }
                }
            })
            .collect();
        Self { lines }
    }

    pub fn load(path: &Path) -> Result<Self, FixError> {
        read_source(path).map(|c| Self::parse(&c))
    }

    pub fn save(&self, path: &Path) -> Result<(), FixError> {
        write_source(path, &self.contents())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Text of the 1-based line `line_num`, without its terminator.
    pub fn line(&self, line_num: usize) -> Option<&str> {
        let idx = line_num.checked_sub(1)?;
        self.lines.get(idx).map(|l| l.text.as_str())
    }

    /// Replace the text of the 1-based line `line_num`, keeping its terminator.
    /// Returns `false` when the line is out of range.
    pub fn set_line(&mut self, line_num: usize, text: String) -> bool {
        let Some(idx) = line_num.checked_sub(1) else {
            return false;
        };
        match self.lines.get_mut(idx) {
            Some(line) => {
                line.text = text;
                true
            }
            None => false,
        }
    }

    pub fn contents(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text);
            out.push_str(line.ending);
        }
        out
    }
}
