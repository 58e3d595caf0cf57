use crate::config::UNUSED_PARAMETER_RULE;
use crate::diagnostics::{Diagnostic, SourceError};
use regex::Regex;
use std::io::BufRead;
use std::path::PathBuf;

/// Parses `tsc` text output of the form
/// `src/file.ts(12,5): error TS6133: 'name' is declared but its value is never read.`
///
/// Only the "declared but never read" message is recognised; every other line is
/// ignored.
#[derive(Debug)]
pub struct TscParser {
    line_re: Regex,
}

impl TscParser {
    pub fn new() -> Result<Self, regex::Error> {
        let line_re = Regex::new(
            r"^(.+?)\((\d+),(\d+)\): error ([A-Za-z]+\d+): '(\w+)' is declared but its value is never read\.",
        )?;
        Ok(Self { line_re })
    }

    /// Parse one line of output. Returns `None` for anything that does not match.
    pub fn parse_line(&self, line: &str) -> Option<Diagnostic> {
        let cap = self.line_re.captures(line)?;
        let line_num = cap[2].parse().ok()?;
        let column = cap[3].parse().ok();
        let code = &cap[4];
        let name = &cap[5];

        Some(Diagnostic {
            file: PathBuf::from(&cap[1]),
            line: line_num,
            column,
            rule_id: UNUSED_PARAMETER_RULE.to_string(),
            message: format!("{}: '{}' is declared but its value is never read.", code, name),
            symbol: Some(name.to_string()),
        })
    }

    /// Read every line of `reader`, keeping the ones that parse.
    ///
    /// Lines are decoded lossily, so stray non-UTF-8 bytes only spoil their own
    /// line. Only an I/O failure of the reader is an error.
    pub fn parse_stream<R: BufRead>(
        &self,
        mut reader: R,
    ) -> Result<Vec<Diagnostic>, SourceError> {
        let mut diagnostics = Vec::new();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = reader.read_until(b'\n', &mut buf).map_err(SourceError::Read)?;
            if read == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);
            if let Some(d) = self.parse_line(line) {
                diagnostics.push(d);
            }
        }
        Ok(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parser() -> TscParser {
        TscParser::new().unwrap()
    }

    #[test]
    fn parses_unused_declaration() {
        let d = parser()
            .parse_line(
                "src/api/client.ts(14,23): error TS6133: 'options' is declared but its value is never read.",
            )
            .unwrap();
        assert_eq!(d.file, PathBuf::from("src/api/client.ts"));
        assert_eq!(d.line, 14);
        assert_eq!(d.column, Some(23));
        assert_eq!(d.rule_id, UNUSED_PARAMETER_RULE);
        assert_eq!(d.symbol.as_deref(), Some("options"));
    }

    #[test]
    fn path_with_parentheses_uses_last_position() {
        let d = parser()
            .parse_line(
                "src/(group)/page.ts(3,10): error TS6133: 'req' is declared but its value is never read.",
            )
            .unwrap();
        assert_eq!(d.file, PathBuf::from("src/(group)/page.ts"));
        assert_eq!(d.line, 3);
    }

    #[test]
    fn other_errors_are_skipped() {
        let p = parser();
        assert!(p
            .parse_line("src/a.ts(1,1): error TS2304: Cannot find name 'foo'.")
            .is_none());
        assert!(p.parse_line("Found 3 errors in 2 files.").is_none());
        assert!(p.parse_line("").is_none());
    }

    #[test]
    fn stream_skips_noise() {
        let input = "\
src/a.ts(2,14): error TS6133: 'unused' is declared but its value is never read.
src/a.ts(9,1): error TS2304: Cannot find name 'x'.

src/b.ts(5,20): error TS6133: 'ctx' is declared but its value is never read.
Found 3 errors.
";
        let diagnostics = parser().parse_stream(Cursor::new(input)).unwrap();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[1].file, PathBuf::from("src/b.ts"));
        assert_eq!(diagnostics[1].symbol.as_deref(), Some("ctx"));
    }

    #[test]
    fn stream_skips_undecodable_lines() {
        let mut input = b"warning: caf\xe9 noise\n".to_vec();
        input.extend_from_slice(
            b"src/svc.ts(1,25): error TS6133: 'unused' is declared but its value is never read.\n",
        );
        let diagnostics = parser().parse_stream(Cursor::new(input)).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].file, PathBuf::from("src/svc.ts"));
        assert_eq!(diagnostics[0].symbol.as_deref(), Some("unused"));
    }

    #[test]
    fn stream_without_trailing_newline() {
        let input = "src/a.ts(2,14): error TS6133: 'x' is declared but its value is never read.";
        let diagnostics = parser().parse_stream(Cursor::new(input)).unwrap();
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn stream_handles_crlf() {
        let input = "src/a.ts(2,14): error TS6133: 'x' is declared but its value is never read.\r\n";
        let diagnostics = parser().parse_stream(Cursor::new(input)).unwrap();
        assert_eq!(diagnostics.len(), 1);
    }
}
