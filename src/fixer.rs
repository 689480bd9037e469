use std::collections::HashSet;
use tracing::debug;

use crate::diagnostic::{Diagnostic, Fix};

/// Apply every fix carried by `diagnostics` that does not overlap one applied
/// before it. Returns the rewritten text and the number of fixes applied.
///
/// Overlapping fixes are left for the next pass, after the file is linted again.
pub fn apply_fixes(source: &str, diagnostics: &[Diagnostic]) -> (String, usize) {
    let mut seen = HashSet::new();
    let mut fixes: Vec<&Fix> = diagnostics
        .iter()
        .filter_map(|diagnostic| diagnostic.fix.as_ref())
        .filter(|fix| seen.insert(*fix))
        .collect();
    fixes.sort_by_key(|fix| (fix.range.start, fix.range.end));

    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;
    let mut applied = 0;

    for fix in fixes {
        let in_bounds = fix.range.start >= cursor
            && fix.range.end <= source.len()
            && source.is_char_boundary(fix.range.start)
            && source.is_char_boundary(fix.range.end);
        if !in_bounds {
            debug!(
                start = fix.range.start,
                end = fix.range.end,
                "fix overlaps an earlier one, deferring"
            );
            continue;
        }

        output.push_str(&source[cursor..fix.range.start]);
        output.push_str(&fix.text);
        cursor = fix.range.end;
        applied += 1;
    }

    output.push_str(&source[cursor..]);
    (output, applied)
}
