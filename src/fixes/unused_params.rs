use crate::diagnostics::Diagnostic;
use crate::fixes::{FileBuffer, FixError, Fixer};
use regex::{Captures, Regex};
use std::path::Path;
use tracing::debug;

/// Prefixes unused parameters with `_` on the reported line.
///
/// The name is only rewritten where it stands as a whole word followed by `:`, `,`
/// or `)` (optionally after whitespace), which is how a parameter appears in a
/// signature. Names that already start with `_` never match again.
#[derive(Debug, Default)]
pub struct UnusedParamsFixer;

impl UnusedParamsFixer {
    pub fn new() -> Self {
        Self
    }

    /// Rename `name` to `_name` in `line`. Returns `None` when nothing changed.
    pub fn rename_in_line(&self, line: &str, name: &str) -> Result<Option<String>, FixError> {
        let re = Regex::new(&format!(r"\b{}\b(\s*[:,)])", regex::escape(name)))?;
        let renamed = re.replace_all(line, |caps: &Captures| format!("_{}{}", name, &caps[1]));
        if renamed == line {
            Ok(None)
        } else {
            Ok(Some(renamed.into_owned()))
        }
    }

    pub fn apply<'a>(
        &self,
        buffer: &mut FileBuffer,
        diagnostics: &[&'a Diagnostic],
    ) -> Result<Vec<&'a Diagnostic>, FixError> {
        let mut ordered = diagnostics.to_vec();
        ordered.sort_by(|a, b| b.line.cmp(&a.line));

        let mut fixed = Vec::new();
        for d in ordered {
            let Some(name) = d.symbol.as_deref() else {
                continue;
            };
            let Some(line) = buffer.line(d.line) else {
                debug!(line = d.line, "diagnostic line out of range");
                continue;
            };
            match self.rename_in_line(line, name)? {
                Some(renamed) => {
                    buffer.set_line(d.line, renamed);
                    fixed.push(d);
                }
                None => debug!(line = d.line, name, "parameter not found on line"),
            }
        }
        Ok(fixed)
    }
}

impl Fixer for UnusedParamsFixer {
    fn name(&self) -> &str {
        "unused params"
    }

    fn fix_file<'a>(
        &self,
        path: &Path,
        diagnostics: &[&'a Diagnostic],
    ) -> Result<Vec<&'a Diagnostic>, FixError> {
        let mut buffer = FileBuffer::load(path)?;
        let fixed = self.apply(&mut buffer, diagnostics)?;
        if !fixed.is_empty() {
            buffer.save(path)?;
        }
        Ok(fixed)
    }
}
