//! Source splicing
//!
//! Replacements are applied back to front so earlier byte offsets stay valid.

use std::ops::Range;

use super::dead_imports::dead_import_edits;
use crate::features::parsing::ParsedModule;
use crate::features::rewrite_engine::domain::RewriteOutcome;
use crate::shared::utils::render_expr;

/// Source text with every recorded call replaced, missing imports added and
/// deprecated-type imports nothing uses any more removed
pub fn apply_rewrites(module: &ParsedModule, outcome: &RewriteOutcome) -> String {
    let mut edits: Vec<(Range<usize>, String)> = outcome
        .calls()
        .iter()
        .map(|call| {
            let span = call.span();
            (span.start_byte..span.end_byte, render_expr(call.replacement()))
        })
        .collect();

    let missing = outcome.missing_imports();
    if !missing.is_empty() {
        let offset = module.import_insertion_offset();
        let lines: String = missing
            .iter()
            .map(|required| format!("{}\n", required))
            .collect();
        edits.push((offset..offset, lines));
    }

    edits.extend(dead_import_edits(module, outcome));
    splice(module.source(), edits)
}

/// Apply non-overlapping edits
pub fn splice(source: &str, mut edits: Vec<(Range<usize>, String)>) -> String {
    edits.sort_by(|(a, _), (b, _)| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));

    let mut result = source.to_string();
    for (range, text) in edits {
        result.replace_range(range, &text);
    }
    result
}
