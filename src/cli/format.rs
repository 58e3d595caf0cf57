use crate::diagnostics::Diagnostic;
use crate::run::LintSummary;
use std::io::Write;
use std::path::Path;

/// Opening line of the lint pipeline, printed before the linter runs.
pub fn write_banner(out: &mut dyn Write) {
    let _ = writeln!(out, "Fixing ESLint errors systematically...");
}

pub fn write_found(out: &mut dyn Write, found: usize) {
    let _ = writeln!(out, "Found {} error violations", found);
}

/// Progress line printed before a fixer rewrites a file. Only the file name is shown.
pub fn write_fixing(out: &mut dyn Write, fixer_name: &str, path: &Path) {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy());
    let _ = writeln!(out, "Fixing {} in {}...", fixer_name, file_name);
}

pub fn write_rechecking(out: &mut dyn Write) {
    let _ = writeln!(
        out,
        "\x1b[32m✓\x1b[0m Fixes applied. Checking remaining errors..."
    );
}

/// Print the re-check count, and the reduction when there is one.
pub fn write_lint_summary(out: &mut dyn Write, summary: &LintSummary) {
    let _ = writeln!(out, "Remaining errors: {}", summary.remaining);
    if let Some(reduced) = summary.reduced_by() {
        let _ = writeln!(out, "\x1b[32m✓\x1b[0m Reduced errors by {}", reduced);
    }
}

pub fn write_param_fixed(out: &mut dyn Write, d: &Diagnostic) {
    let _ = writeln!(
        out,
        "Fixed: {}:{} - prefixed '{}' with underscore",
        d.file.display(),
        d.line,
        d.symbol.as_deref().unwrap_or_default()
    );
}

pub fn write_param_total(out: &mut dyn Write, total: usize) {
    let _ = writeln!(out, "\nTotal fixes applied: {}", total);
}
