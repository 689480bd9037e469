pub mod auditor;
pub mod classifier;
pub mod collector;
pub mod comparator;
pub mod config;
pub mod diagnostic;
pub mod file_handler;
pub mod fixer;
pub mod linter;
pub mod module_path;
pub mod parser;
pub mod property_sorter;
pub mod reconstructor;
pub mod source;

use anyhow::{Context, Result};
use tracing::debug;

pub use config::{Configuration, Settings};
pub use diagnostic::{Diagnostic, Fix, MessageId};

/// Fixes are applied in passes until the file stops changing or this limit is hit.
pub const MAX_FIX_PASSES: usize = 10;

/// Outcome of fixing one file.
#[derive(Debug, Clone, PartialEq)]
pub struct FixReport {
    pub output: String,
    /// Number of passes that changed the text.
    pub passes: usize,
    /// Diagnostics still reported for `output`.
    pub remaining: Vec<Diagnostic>,
}

impl FixReport {
    pub fn changed(&self, original: &str) -> bool {
        self.output != original
    }
}

/// Lint the `require` statements of one file.
///
/// `filename` selects the dialect (TypeScript, JSX) and is used in error messages.
pub fn lint_source(source: &str, filename: &str, settings: &Settings) -> Result<Vec<Diagnostic>> {
    let parsed = parser::ScriptParser::new()
        .parse(source, filename)
        .with_context(|| format!("Failed to lint {filename}"))?;

    Ok(linter::RequireSortLinter::new(settings).lint(&parsed.program, &parsed.source))
}

/// Lint and repeatedly apply fixes until the file is stable.
pub fn fix_source(source: &str, filename: &str, settings: &Settings) -> Result<FixReport> {
    let mut output = source.to_string();
    let mut passes = 0;

    let remaining = loop {
        let diagnostics = lint_source(&output, filename, settings)?;
        if passes == MAX_FIX_PASSES {
            break diagnostics;
        }

        let (fixed, applied) = fixer::apply_fixes(&output, &diagnostics);
        if applied == 0 || fixed == output {
            break diagnostics;
        }

        passes += 1;
        debug!(filename, pass = passes, applied, "applied fixes");
        output = fixed;
    };

    Ok(FixReport {
        output,
        passes,
        remaining,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lint_source_reports_parse_errors() {
        let result = lint_source("const = require(", "broken.js", &Settings::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_fix_source_sorts_and_reports_passes() {
        let source = "const b = require(\"b\");\nconst a = require(\"a\");\n";
        let report = fix_source(source, "test.js", &Settings::default()).unwrap();

        assert_eq!(
            report.output,
            "const a = require(\"a\");\nconst b = require(\"b\");\n"
        );
        assert_eq!(report.passes, 1);
        assert!(report.remaining.is_empty());
        assert!(report.changed(source));
    }

    #[test]
    fn test_fix_source_leaves_sorted_file_alone() {
        let source = "const a = require(\"a\");\n";
        let report = fix_source(source, "test.js", &Settings::default()).unwrap();

        assert_eq!(report.output, source);
        assert_eq!(report.passes, 0);
        assert!(!report.changed(source));
    }
}
