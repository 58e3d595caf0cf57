use crate::diagnostics::Diagnostic;
use crate::fixes::{FileBuffer, FixError, Fixer};
use regex::Regex;
use std::path::Path;
use tracing::debug;

/// Blanks lines holding a single unused declaration.
///
/// A line is only touched when one of these patterns matches it in full:
/// - `const x = ...;` / `let x = ...;` / `var x = ...;`
/// - `import { ... } from ...;`
/// - `import x from ...;`
///
/// Multi-line statements and lines with more than one statement never match, so the
/// diagnostic stays unresolved instead of risking broken code. The blanked line keeps
/// its terminator, so no other line moves.
#[derive(Debug)]
pub struct UnusedVarsFixer {
    patterns: Vec<Regex>,
}

const DECLARATION_PATTERNS: &[&str] = &[
    r"^\s*const\s+\w+\s*=.*?;\s*$",
    r"^\s*let\s+\w+\s*=.*?;\s*$",
    r"^\s*var\s+\w+\s*=.*?;\s*$",
    r"^\s*import\s*\{[^}]*\}\s*from.*?;\s*$",
    r"^\s*import\s+\w+\s+from.*?;\s*$",
];

impl UnusedVarsFixer {
    pub fn new() -> Result<Self, regex::Error> {
        let patterns = DECLARATION_PATTERNS
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Whether `line` is a complete single-line declaration this fixer may delete.
    pub fn is_removable(&self, line: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(line))
    }

    /// Apply the diagnostics to an in-memory buffer, highest line first.
    pub fn apply<'a>(
        &self,
        buffer: &mut FileBuffer,
        diagnostics: &[&'a Diagnostic],
    ) -> Vec<&'a Diagnostic> {
        let mut ordered = diagnostics.to_vec();
        // Stable, so equal lines keep report order.
        ordered.sort_by(|a, b| b.line.cmp(&a.line));

        let mut fixed = Vec::new();
        for d in ordered {
            let Some(line) = buffer.line(d.line) else {
                debug!(line = d.line, "diagnostic line out of range");
                continue;
            };
            if !self.is_removable(line) {
                debug!(line = d.line, "no declaration pattern matched");
                continue;
            }
            buffer.set_line(d.line, String::new());
            fixed.push(d);
        }
        fixed
    }
}

impl Fixer for UnusedVarsFixer {
    fn name(&self) -> &str {
        "unused vars"
    }

    fn fix_file<'a>(
        &self,
        path: &Path,
        diagnostics: &[&'a Diagnostic],
    ) -> Result<Vec<&'a Diagnostic>, FixError> {
        let mut buffer = FileBuffer::load(path)?;
        let fixed = self.apply(&mut buffer, diagnostics);

        if !fixed.is_empty() {
            buffer.save(path)?;
        }
        debug!(file = %path.display(), removed = fixed.len(), "unused declarations patched");
        Ok(fixed)
    }
}
