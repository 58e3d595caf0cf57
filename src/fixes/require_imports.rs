use crate::diagnostics::Diagnostic;
use crate::fixes::{read_source, write_source, FixError, Fixer};
use regex::Regex;
use std::path::Path;
use tracing::{debug, warn};

/// Converts CommonJS `require()` calls into ES `import` declarations.
///
/// Substitutions run over the whole file, in order:
/// 1. `const x = require("m")` becomes `import x from "m"`
/// 2. `const { a, b } = require("m")` becomes `import { a, b } from "m"`
/// 3. `import("m")` becomes `await import("m")`
///
/// The diagnostics only choose which files are rewritten. Rule 3 does not check for
/// an existing `await`, so an already-awaited dynamic import ends up as
/// `await await import(...)`; this is logged as a warning rather than corrected.
#[derive(Debug)]
pub struct RequireImportsFixer {
    default_require: Regex,
    destructured_require: Regex,
    dynamic_import: Regex,
    awaited_import: Regex,
}

/// Outcome of rewriting one file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    pub replacements: usize,
    /// Dynamic imports that were already awaited and got a second `await`.
    pub double_awaited: usize,
}

impl RequireImportsFixer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            default_require: Regex::new(r#"const\s+(\w+)\s*=\s*require\(['"]([^'"]+)['"]\)"#)?,
            destructured_require: Regex::new(
                r#"const\s+\{[ \t]*([^}]+?)[ \t]*\}\s*=\s*require\(['"]([^'"]+)['"]\)"#,
            )?,
            dynamic_import: Regex::new(r#"import\(['"]([^'"]+)['"]\)"#)?,
            awaited_import: Regex::new(r#"\bawait\s+import\(['"][^'"]+['"]\)"#)?,
        })
    }

    /// Apply all three substitutions to `content`.
    pub fn rewrite(&self, content: &str) -> Rewrite {
        let mut replacements = 0;

        replacements += self.default_require.find_iter(content).count();
        let step = self
            .default_require
            .replace_all(content, r#"import ${1} from "${2}""#);

        replacements += self.destructured_require.find_iter(&step).count();
        let step = self
            .destructured_require
            .replace_all(&step, r#"import { ${1} } from "${2}""#);

        let double_awaited = self.awaited_import.find_iter(&step).count();
        replacements += self.dynamic_import.find_iter(&step).count();
        let step = self
            .dynamic_import
            .replace_all(&step, r#"await import("${1}")"#);

        Rewrite {
            content: step.into_owned(),
            replacements,
            double_awaited,
        }
    }
}

impl Fixer for RequireImportsFixer {
    fn name(&self) -> &str {
        "require imports"
    }

    fn fix_file<'a>(
        &self,
        path: &Path,
        diagnostics: &[&'a Diagnostic],
    ) -> Result<Vec<&'a Diagnostic>, FixError> {
        let content = read_source(path)?;
        let rewrite = self.rewrite(&content);

        if rewrite.double_awaited > 0 {
            warn!(
                file = %path.display(),
                count = rewrite.double_awaited,
                "already-awaited dynamic import wrapped in a second await"
            );
        }
        debug!(
            file = %path.display(),
            replacements = rewrite.replacements,
            "require imports patched"
        );

        if rewrite.content == content {
            return Ok(Vec::new());
        }
        write_source(path, &rewrite.content)?;
        Ok(diagnostics.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::diag;
    use std::fs;

    const RULE: &str = "@typescript-eslint/no-require-imports";

    fn fixer() -> RequireImportsFixer {
        RequireImportsFixer::new().unwrap()
    }

    #[test]
    fn default_require_becomes_import() {
        let out = fixer().rewrite(r#"const fs = require("fs");"#);
        assert_eq!(out.content, r#"import fs from "fs";"#);
        assert_eq!(out.replacements, 1);
    }

    #[test]
    fn single_quotes_are_normalized() {
        let out = fixer().rewrite("const path = require('node:path');");
        assert_eq!(out.content, r#"import path from "node:path";"#);
    }

    #[test]
    fn destructured_require_becomes_named_import() {
        let out = fixer().rewrite(r#"const { a, b } = require("mod");"#);
        assert_eq!(out.content, r#"import { a, b } from "mod";"#);
    }

    #[test]
    fn tight_braces_are_padded() {
        let out = fixer().rewrite("const {readFile} = require('fs/promises');");
        assert_eq!(out.content, r#"import { readFile } from "fs/promises";"#);
    }

    #[test]
    fn dynamic_import_is_awaited() {
        let out = fixer().rewrite("const mod = import('./lazy');");
        assert_eq!(out.content, r#"const mod = await import("./lazy");"#);
        assert_eq!(out.double_awaited, 0);
    }

    #[test]
    fn already_awaited_import_is_wrapped_again() {
        let out = fixer().rewrite(r#"const mod = await import("./lazy");"#);
        assert_eq!(out.content, r#"const mod = await await import("./lazy");"#);
        assert_eq!(out.double_awaited, 1);
    }

    #[test]
    fn rewrites_every_occurrence_in_file() {
        let input = "\
const fs = require('fs');
const { join } = require('path');
function load() {
  return import('./plugin');
}
const os = require('os');
";
        let out = fixer().rewrite(input);
        assert_eq!(
            out.content,
            "\
import fs from \"fs\";
import { join } from \"path\";
function load() {
  return await import(\"./plugin\");
}
import os from \"os\";
"
        );
        assert_eq!(out.replacements, 4);
    }

    #[test]
    fn unrelated_code_is_untouched() {
        let input = "let x = require('y');\nconst z = requireAll();\n";
        let out = fixer().rewrite(input);
        assert_eq!(out.content, input);
        assert_eq!(out.replacements, 0);
    }

    #[test]
    fn fix_file_writes_and_reports_all_file_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.js");
        fs::write(&file, "const fs = require(\"fs\");\nfs.readFileSync('x');\n").unwrap();

        let d = diag(file.to_str().unwrap(), 1, RULE);
        let fixed = fixer().fix_file(&file, &[&d]).unwrap();
        assert_eq!(fixed.len(), 1);
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "import fs from \"fs\";\nfs.readFileSync('x');\n"
        );
    }

    #[test]
    fn fix_file_without_matches_resolves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.js");
        fs::write(&file, "const fs = loadFs();\n").unwrap();

        let d = diag(file.to_str().unwrap(), 1, RULE);
        assert!(fixer().fix_file(&file, &[&d]).unwrap().is_empty());
    }
}
