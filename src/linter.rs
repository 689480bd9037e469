use swc_ecma_ast::Program;
use tracing::{debug, warn};

use crate::auditor::OrderAuditor;
use crate::collector::collect_sequence;
use crate::config::Settings;
use crate::diagnostic::Diagnostic;
use crate::property_sorter::PropertySorter;
use crate::source::SourceFile;

/// Runs every require-ordering check over one parsed file.
pub struct RequireSortLinter<'s> {
    settings: &'s Settings,
}

impl<'s> RequireSortLinter<'s> {
    pub fn new(settings: &'s Settings) -> Self {
        Self { settings }
    }

    pub fn lint(&self, program: &Program, source: &SourceFile) -> Vec<Diagnostic> {
        let config = &self.settings.config;
        let sequence = collect_sequence(program, source, self.settings);
        let mut diagnostics = Vec::new();

        if !config.ignore_declaration_sort && sequence.nodes.len() > 1 {
            diagnostics.extend(OrderAuditor::new(self.settings, source).audit(&sequence.nodes));
        }

        if !config.ignore_property_sort {
            let sorter = PropertySorter::new(self.settings, source);
            for destructured in &sequence.destructured {
                match sorter.check(destructured) {
                    Ok(Some(diagnostic)) => diagnostics.push(diagnostic),
                    Ok(None) => {}
                    Err(err) => warn!(
                        start = destructured.range.start,
                        "Skipping property order check: {}", err
                    ),
                }
            }
        }

        diagnostics.sort_by_key(|diagnostic| diagnostic.range.start);
        debug!(diagnostics = diagnostics.len(), "lint finished");
        diagnostics
    }
}
