//! Teaching positions.

use super::itemize;
use crate::error::Result;
use crate::model::{first_of, is_blank, is_locale_map, MarkupFragment};
use crate::render::escape::{escape, href};
use crate::render::RenderContext;
use serde_json::{Map, Value};

const SECTION: &str = "teaching";

/// Render the `teaching` section: one `\item` per course taught.
///
/// `course --- role, institution (term)`, each part optional except the
/// course. Bare strings are course names.
pub fn render(data: &Value, ctx: &RenderContext<'_>) -> Result<MarkupFragment> {
    let data = ctx.localize(data, SECTION)?;
    let entries: Vec<&Value> = match data {
        Value::Array(items) => items.iter().filter(|v| !is_blank(v)).collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    };

    let mut rendered = Vec::with_capacity(entries.len());
    for entry in entries {
        let line = match entry {
            Value::Object(map) if !is_locale_map(entry) => entry_line(map, ctx)?,
            other => ctx.text_opt(Some(other), SECTION)?.map(|course| escape(&course)),
        };
        match line {
            Some(line) => rendered.push(line),
            None => log::debug!("skipping teaching entry without a course name"),
        }
    }
    Ok(itemize(rendered))
}

fn entry_line(entry: &Map<String, Value>, ctx: &RenderContext<'_>) -> Result<Option<String>> {
    let text = |keys: &[&str], name: &str| ctx.text_opt(first_of(entry, keys), name);

    let Some(course) = text(&["course", "name", "label"], "teaching.course")? else {
        return Ok(None);
    };
    let url = text(&["url"], "teaching.url")?;
    let mut line = href(url.as_deref(), &escape(&course));

    let details: Vec<String> = [
        text(&["role", "value"], "teaching.role")?,
        text(&["institution"], "teaching.institution")?,
    ]
    .into_iter()
    .flatten()
    .map(|d| escape(&d))
    .collect();
    if !details.is_empty() {
        line.push_str(" --- ");
        line.push_str(&details.join(", "));
    }

    if let Some(term) = text(&["term", "semester"], "teaching.term")? {
        line.push_str(&format!(" ({})", escape(&term)));
    }
    Ok(Some(line))
}
