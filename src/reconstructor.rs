use tracing::debug;

use crate::classifier::SortingNode;
use crate::comparator::Comparator;
use crate::config::NewlinesBetween;
use crate::diagnostic::Fix;
use crate::source::{SourceFile, TextRange};

/// Rewrite the whole run of statements, from the first collected one to the last,
/// in canonical order.
///
/// Each statement keeps its original text. Statements are joined by a blank line
/// when their groups differ and the policy is `always`, by a single newline
/// otherwise, using the file's own line ending. No fix is produced when anything
/// other than whitespace sits between two statements, or when a comment is
/// attached to the first or last statement from outside the run.
pub fn reconstruct(
    nodes: &[SortingNode<'_>],
    comparator: &Comparator<'_>,
    source: &SourceFile,
    newlines_between: NewlinesBetween,
) -> Option<Fix> {
    let (first, last) = match nodes {
        [first, .., last] => (first, last),
        _ => return None,
    };

    for pair in nodes.windows(2) {
        let gap = source.slice(TextRange::new(pair[0].range.end, pair[1].range.start)).ok()?;
        if !gap.trim().is_empty() {
            debug!(
                start = pair[0].range.end,
                end = pair[1].range.start,
                "content between require statements, not offering a fix"
            );
            return None;
        }
    }

    if let Some(comment) = attached_comment(source, first.range, last.range) {
        debug!(
            start = comment.start,
            end = comment.end,
            "comment attached to the require statements, not offering a fix"
        );
        return None;
    }

    let mut sorted: Vec<&SortingNode<'_>> = nodes.iter().collect();
    sorted.sort_by(|a, b| comparator.compare(a, b));

    let newline = source.line_ending();
    let mut text = String::new();
    let mut previous: Option<&SortingNode<'_>> = None;
    for node in sorted {
        if let Some(previous) = previous {
            text.push_str(newline);
            if newlines_between == NewlinesBetween::Always && previous.differs_in_group(node) {
                text.push_str(newline);
            }
        }
        text.push_str(source.slice(node.range).ok()?);
        previous = Some(node);
    }

    Some(Fix {
        range: TextRange::new(first.range.start, last.range.end),
        text,
    })
}

/// A comment outside the run that still belongs to its first or last statement:
/// one on the same line after `last`, or one ending on the line of `first` or
/// the line directly above it.
fn attached_comment(source: &SourceFile, first: TextRange, last: TextRange) -> Option<TextRange> {
    let first_line = source.line_of(first.start);
    let last_line = source.line_of(last.end);

    source.comments().iter().copied().find(|comment| {
        let trailing = comment.start >= last.end && source.line_of(comment.start) == last_line;
        let leading =
            comment.end <= first.start && source.line_of(comment.end) + 1 >= first_line;
        trailing || leading
    })
}
