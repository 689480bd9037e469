use std::cmp::Ordering;
use tracing::debug;

use crate::classifier::SortingNode;
use crate::comparator::Comparator;
use crate::config::{NewlinesBetween, Settings};
use crate::diagnostic::{Diagnostic, Fix, MessageId};
use crate::reconstructor::reconstruct;
use crate::source::SourceFile;

/// Checks a collected sequence pair by pair against the canonical order and the
/// blank-line policy.
pub struct OrderAuditor<'s> {
    settings: &'s Settings,
    comparator: Comparator<'s>,
    source: &'s SourceFile,
}

impl<'s> OrderAuditor<'s> {
    pub fn new(settings: &'s Settings, source: &'s SourceFile) -> Self {
        Self {
            settings,
            comparator: Comparator::new(settings),
            source,
        }
    }

    /// Every reported violation carries the same whole-sequence fix, so applying
    /// any one of them puts the file in canonical order.
    pub fn audit(&self, nodes: &[SortingNode<'_>]) -> Vec<Diagnostic> {
        let newlines_between = self.settings.config.newlines_between;
        let fix = reconstruct(nodes, &self.comparator, self.source, newlines_between);

        let diagnostics: Vec<_> = nodes
            .windows(2)
            .flat_map(|pair| {
                let (prev, curr) = (&pair[0], &pair[1]);
                self.order_violation(prev, curr, &fix)
                    .into_iter()
                    .chain(self.spacing_violation(prev, curr, &fix))
            })
            .collect();

        debug!(
            statements = nodes.len(),
            diagnostics = diagnostics.len(),
            fixable = fix.is_some(),
            "audited require order"
        );

        diagnostics
    }

    fn order_violation(
        &self,
        prev: &SortingNode<'_>,
        curr: &SortingNode<'_>,
        fix: &Option<Fix>,
    ) -> Option<Diagnostic> {
        if self.comparator.compare(prev, curr) != Ordering::Greater {
            return None;
        }

        let (message_id, data) = match self.comparator.deciding_dimension(prev, curr) {
            Some(dimension) => (
                MessageId::GroupOrder,
                vec![
                    ("rightGroup", Comparator::label(dimension, curr).to_string()),
                    ("leftGroup", Comparator::label(dimension, prev).to_string()),
                ],
            ),
            None => (
                MessageId::NameOrder,
                vec![("right", curr.name.clone()), ("left", prev.name.clone())],
            ),
        };

        Some(Diagnostic::new(
            message_id,
            curr.range,
            self.source,
            data,
            fix.clone(),
        ))
    }

    fn spacing_violation(
        &self,
        prev: &SortingNode<'_>,
        curr: &SortingNode<'_>,
        fix: &Option<Fix>,
    ) -> Option<Diagnostic> {
        let line_gap = self
            .source
            .line_of(curr.range.start)
            .saturating_sub(self.source.line_of(prev.range.end));

        let message_id = match self.settings.config.newlines_between {
            NewlinesBetween::Always if prev.differs_in_group(curr) && line_gap <= 1 => {
                MessageId::MissingSpacing
            }
            NewlinesBetween::Never if line_gap > 1 => MessageId::ExtraSpacing,
            _ => return None,
        };

        Some(Diagnostic::new(
            message_id,
            curr.range,
            self.source,
            vec![("left", prev.name.clone()), ("right", curr.name.clone())],
            fix.clone(),
        ))
    }
}
