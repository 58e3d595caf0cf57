use crate::config::{FixConfig, Severity};
use crate::diagnostics::{Diagnostic, DiagnosticSource, SourceError};
use serde::Deserialize;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// One entry of ESLint's `--format=json` report.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileReport {
    file_path: PathBuf,
    #[serde(default)]
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Message {
    severity: u8,
    line: Option<usize>,
    column: Option<usize>,
    /// Null for fatal parse errors.
    rule_id: Option<String>,
    message: String,
}

/// Parse a JSON report into diagnostics, keeping error-severity messages only.
pub fn parse_report(json: &str) -> Result<Vec<Diagnostic>, SourceError> {
    let reports: Vec<FileReport> = serde_json::from_str(json).map_err(SourceError::Parse)?;

    let mut diagnostics = Vec::new();
    for report in reports {
        for m in report.messages {
            if Severity::from_eslint(m.severity) != Severity::Error {
                continue;
            }
            diagnostics.push(Diagnostic {
                file: report.file_path.clone(),
                line: m.line.unwrap_or(0),
                column: m.column,
                rule_id: m.rule_id.unwrap_or_default(),
                message: m.message,
                symbol: None,
            });
        }
    }

    Ok(diagnostics)
}

/// Runs the configured lint command and reads its JSON report from stdout.
#[derive(Debug, Clone)]
pub struct EslintSource {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl EslintSource {
    pub fn new(config: &FixConfig) -> Self {
        let mut parts = config.lint_command.iter();
        let program = parts.next().cloned().unwrap_or_else(|| "npx".to_string());
        let mut args: Vec<String> = parts.cloned().collect();
        args.push(config.source_dir.clone());
        args.push("--format=json".to_string());

        Self {
            program,
            args,
            working_dir: None,
        }
    }

    /// Run the command from `dir` instead of the process working directory.
    #[cfg(test)]
    pub(crate) fn in_dir(mut self, dir: &std::path::Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl DiagnosticSource for EslintSource {
    fn collect(&self) -> Result<Vec<Diagnostic>, SourceError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        debug!(command = %self.command_line(), "running lint command");
        let output = cmd.output().map_err(|e| SourceError::Spawn {
            command: self.command_line(),
            source: e,
        })?;
        // ESLint exits 1 whenever it reports errors, so only stdout decides.
        debug!(status = ?output.status, bytes = output.stdout.len(), "lint command finished");

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_report(&stdout)
    }
}
