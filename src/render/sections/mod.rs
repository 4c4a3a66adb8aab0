//! Section renderers.
//!
//! Every renderer has the signature of [`RenderFn`]: it takes the section's
//! raw data and the shared context and returns a [`MarkupFragment`]. Absent
//! or empty data yields an empty fragment; a required structure that cannot
//! be recognized is a [`MalformedSection`](crate::Error::MalformedSection).

pub mod coursework;
pub mod education;
pub mod generic;
pub mod identity;
pub mod lists;
pub mod prose;
pub mod skills;
pub mod teaching;

use super::escape::{escape, link_item};
use super::RenderContext;
use crate::error::Result;
use crate::model::{LinkableItem, MarkupFragment};
use serde_json::Value;

/// A section renderer.
pub type RenderFn = fn(&Value, &RenderContext<'_>) -> Result<MarkupFragment>;

/// `label --- value`, for one-entry-per-line lists.
pub(crate) fn enumerated_item(item: &LinkableItem) -> String {
    match &item.value {
        Some(value) => format!("{} --- {}", link_item(item), escape(value)),
        None => link_item(item),
    }
}

/// `label (value)`, for inline lists.
pub(crate) fn compact_item(item: &LinkableItem) -> String {
    match &item.value {
        Some(value) => format!("{} ({})", link_item(item), escape(value)),
        None => link_item(item),
    }
}

/// Comma-joined inline list ending in a period; `None` when empty.
pub(crate) fn compact_line(items: &[LinkableItem]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    let joined = items.iter().map(compact_item).collect::<Vec<_>>().join(", ");
    Some(format!("{}.", joined))
}

/// Wrap rendered entries in an `itemize` environment.
pub(crate) fn itemize(entries: Vec<String>) -> MarkupFragment {
    if entries.is_empty() {
        return MarkupFragment::new();
    }
    let mut lines = Vec::with_capacity(entries.len() + 2);
    lines.push("\\begin{itemize}".to_string());
    lines.extend(entries.into_iter().map(|e| format!("  \\item {}", e)));
    lines.push("\\end{itemize}".to_string());
    MarkupFragment::from_lines(lines)
}

/// Join rows with forced line breaks; the last row gets none.
pub(crate) fn break_rows(rows: Vec<String>) -> Vec<String> {
    let last = rows.len().saturating_sub(1);
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| if i < last { format!("{}\\\\", row) } else { row })
        .collect()
}
