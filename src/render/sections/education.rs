//! Education entries.
//!
//! Three shapes are accepted: a single flat entry, an object keyed by
//! institution, or an array of entries.

use super::break_rows;
use crate::error::{Error, Result};
use crate::model::{first_of, is_blank, value_kind, MarkupFragment};
use crate::render::escape::{escape, href};
use crate::render::RenderContext;
use serde_json::{Map, Value};

const SECTION: &str = "education";

/// Keys whose presence marks an object as a single flat entry.
const ENTRY_KEYS: &[&str] = &["institution", "school", "degree", "start", "end", "gpa"];

/// Render the `education` section.
pub fn render(data: &Value, ctx: &RenderContext<'_>) -> Result<MarkupFragment> {
    let data = ctx.localize(data, SECTION)?;
    let mut lines = Vec::new();
    for (key, entry) in entries(data)? {
        let rows = entry_rows(key, entry, ctx)?;
        if rows.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push("\\smallskip".to_string());
        }
        lines.push("\\noindent".to_string());
        lines.extend(break_rows(rows));
    }
    Ok(MarkupFragment::from_lines(lines))
}

/// Normalize the accepted shapes into `(institution key, entry)` pairs.
fn entries(data: &Value) -> Result<Vec<(Option<&str>, &Map<String, Value>)>> {
    match data {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .filter(|v| !is_blank(v))
            .map(|v| as_entry(v).map(|entry| (None, entry)))
            .collect(),
        Value::Object(map) if ENTRY_KEYS.iter().any(|k| map.contains_key(*k)) => {
            Ok(vec![(None, map)])
        }
        Value::Object(map) => map
            .iter()
            .filter(|(_, v)| !is_blank(v))
            .map(|(key, v)| as_entry(v).map(|entry| (Some(key.as_str()), entry)))
            .collect(),
        other => Err(Error::malformed(
            SECTION,
            format!("expected an object or an array, found {}", value_kind(other)),
        )),
    }
}

fn as_entry(value: &Value) -> Result<&Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        Error::malformed(
            SECTION,
            format!("entry must be an object, found {}", value_kind(value)),
        )
    })
}

fn entry_rows(
    key: Option<&str>,
    entry: &Map<String, Value>,
    ctx: &RenderContext<'_>,
) -> Result<Vec<String>> {
    let text = |keys: &[&str], name: &str| ctx.text_opt(first_of(entry, keys), name);

    let institution = match text(&["institution", "school", "name"], "education.institution")? {
        Some(name) => Some(name),
        None => key.map(str::to_string),
    };
    let url = text(&["url"], "education.url")?;
    let dates = match (
        text(&["start"], "education.start")?,
        text(&["end"], "education.end")?,
    ) {
        (Some(start), Some(end)) => Some(format!("{} -- {}", escape(&start), escape(&end))),
        (Some(only), None) | (None, Some(only)) => Some(escape(&only)),
        (None, None) => None,
    };

    let mut rows = Vec::new();
    let heading = institution.map(|name| format!("\\textbf{{{}}}", href(url.as_deref(), &escape(&name))));
    match (heading, dates) {
        (Some(heading), Some(dates)) => rows.push(format!("{} \\hfill {}", heading, dates)),
        (Some(heading), None) => rows.push(heading),
        (None, Some(dates)) => rows.push(format!("\\hfill {}", dates)),
        (None, None) => {}
    }

    let degree = text(&["degree"], "education.degree")?;
    let location = text(&["location"], "education.location")?;
    match (degree, location) {
        (Some(degree), Some(location)) => {
            rows.push(format!("\\textit{{{}}}, {}", escape(&degree), escape(&location)))
        }
        (Some(degree), None) => rows.push(format!("\\textit{{{}}}", escape(&degree))),
        (None, Some(location)) => rows.push(escape(&location)),
        (None, None) => {}
    }

    if let Some(gpa) = text(&["gpa"], "education.gpa")? {
        rows.push(format!("{}: {}", escape(&ctx.label("gpa")?), escape(&gpa)));
    }
    if let Some(notes) = text(&["notes", "description"], "education.notes")? {
        rows.push(ctx.rich(&notes));
    }
    Ok(rows)
}
