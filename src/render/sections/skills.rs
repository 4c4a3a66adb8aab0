//! Technical skills: technologies, techniques and categorized skills.

use super::{break_rows, compact_line};
use crate::error::{Error, Result};
use crate::model::{is_blank, is_locale_map, value_kind, MarkupFragment};
use crate::render::escape::escape;
use crate::render::RenderContext;
use serde_json::{Map, Value};

const SECTION: &str = "technical-skills";

/// Document keys gathered into this section, in output order.
pub const KEYS: &[&str] = &["dev-technologies", "techniques", "skills"];

/// Render the technical skills section.
///
/// `data` is an object holding whichever of [`KEYS`] the document has. Each
/// list becomes a labeled inline row; `skills` may also map category names
/// to lists, giving one row per category.
pub fn render(data: &Value, ctx: &RenderContext<'_>) -> Result<MarkupFragment> {
    let parts = data.as_object().ok_or_else(|| {
        Error::malformed(
            SECTION,
            format!("expected an object, found {}", value_kind(data)),
        )
    })?;

    let mut rows = Vec::new();
    for key in KEYS {
        let Some(value) = parts.get(*key).filter(|v| !is_blank(v)) else {
            continue;
        };
        match value {
            Value::Object(categories) if !is_locale_map(value) && !is_item(categories) => {
                for (category, list) in categories {
                    if let Some(line) = compact_line(&ctx.items(list, key)?) {
                        rows.push(labeled(category, &line));
                    }
                }
            }
            _ => {
                if let Some(line) = compact_line(&ctx.items(value, key)?) {
                    rows.push(labeled(&ctx.label(key)?, &line));
                }
            }
        }
    }
    Ok(MarkupFragment::from_lines(break_rows(rows)))
}

fn is_item(map: &Map<String, Value>) -> bool {
    map.contains_key("name") || map.contains_key("label")
}

fn labeled(label: &str, line: &str) -> String {
    format!("\\textbf{{{}:}} {}", escape(label), line)
}
