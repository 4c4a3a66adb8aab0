//! Free-text sections: publications, philosophy, preferred role, design
//! portfolio and the metadata footer.
//!
//! Free text goes through [`RenderContext::rich`]: `{{token}}` substitution,
//! escaping, and hyperlinks for embedded URLs.

use super::{compact_line, enumerated_item, itemize};
use crate::error::{Error, Result};
use crate::model::{first_of, is_blank, is_locale_map, value_kind, ItemShape, LinkableItem, MarkupFragment};
use crate::render::context::section_header;
use crate::render::escape::escape;
use crate::render::RenderContext;
use serde_json::Value;

/// Render one list entry of free text or a linkable item.
fn entry(value: &Value, ctx: &RenderContext<'_>, section: &str) -> Result<Option<String>> {
    match ItemShape::classify(value) {
        ItemShape::Empty => Ok(None),
        ItemShape::Bare(v) => Ok(ctx.text_opt(Some(v), section)?.map(|t| ctx.rich(&t))),
        ItemShape::Structured(_) => Ok(LinkableItem::from_value(value, ctx.resolver(), section)?
            .map(|item| enumerated_item(&item))),
        ItemShape::Unrecognized(kind) => {
            log::debug!("skipping {} entry in '{}'", kind, section);
            Ok(None)
        }
    }
}

fn entries(values: &[Value], ctx: &RenderContext<'_>, section: &str) -> Result<Vec<String>> {
    let mut out = Vec::with_capacity(values.len());
    for value in values {
        if let Some(line) = entry(value, ctx, section)? {
            out.push(line);
        }
    }
    Ok(out)
}

/// Paragraphs of free text, each closed with `\par`.
fn paragraphs(data: &Value, ctx: &RenderContext<'_>, section: &str) -> Result<Vec<String>> {
    let texts: Vec<String> = match data {
        Value::Array(parts) => {
            let mut texts = Vec::with_capacity(parts.len());
            for part in parts {
                texts.extend(ctx.text_opt(Some(part), section)?);
            }
            texts
        }
        other => ctx
            .text_opt(Some(other), section)?
            .map(|text| {
                text.split("\n\n")
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
    };
    Ok(texts
        .iter()
        .map(|text| format!("{}\\par", ctx.rich(text.trim())))
        .collect())
}

/// Render the `publications` section.
///
/// Accepts free text, a list of entries, or an object mapping a category
/// (journal, conference, ...) to a list.
pub fn publications(data: &Value, ctx: &RenderContext<'_>) -> Result<MarkupFragment> {
    const SECTION: &str = "publications";
    let data = ctx.localize(data, SECTION)?;
    match data {
        Value::Array(values) => Ok(itemize(entries(values, ctx, SECTION)?)),
        Value::Object(categories) if matches!(ItemShape::classify(data), ItemShape::Unrecognized(_)) => {
            let mut fragment = MarkupFragment::new();
            for (category, list) in categories {
                let list = ctx.localize(list, SECTION)?;
                let rendered = match list {
                    Value::Array(values) => entries(values, ctx, SECTION)?,
                    other => entry(other, ctx, SECTION)?.into_iter().collect(),
                };
                let block = itemize(rendered).with_header(subsection_header(category));
                fragment = fragment.concat(block);
            }
            Ok(fragment)
        }
        Value::Object(_) => Ok(itemize(entry(data, ctx, SECTION)?.into_iter().collect())),
        other => Ok(paragraphs(other, ctx, SECTION)?.into_iter().collect()),
    }
}

fn subsection_header(title: &str) -> String {
    section_header(title).replacen("\\section*", "\\subsection*", 1)
}

/// Render the `philosophy` section: one paragraph per entry, or per blank
/// line-separated block of a single text.
pub fn philosophy(data: &Value, ctx: &RenderContext<'_>) -> Result<MarkupFragment> {
    content(data, ctx, "philosophy")
}

/// Paragraphs of localized free text for any section.
pub(crate) fn content(data: &Value, ctx: &RenderContext<'_>, section: &str) -> Result<MarkupFragment> {
    let data = ctx.localize(data, section)?;
    Ok(paragraphs(data, ctx, section)?.into_iter().collect())
}

/// Render the `preferred-role` section: free text, or a list of roles on one
/// line.
pub fn preferred_role(data: &Value, ctx: &RenderContext<'_>) -> Result<MarkupFragment> {
    const SECTION: &str = "preferred-role";
    let data = ctx.localize(data, SECTION)?;
    match data {
        Value::Array(_) => Ok(compact_line(&ctx.items(data, SECTION)?).into_iter().collect()),
        other => Ok(paragraphs(other, ctx, SECTION)?.into_iter().collect()),
    }
}

/// Render the `design` portfolio.
///
/// Free text, a list of entries, or `{description, url, items}`.
pub fn design(data: &Value, ctx: &RenderContext<'_>) -> Result<MarkupFragment> {
    const SECTION: &str = "design";
    let data = ctx.localize(data, SECTION)?;
    match data {
        Value::Array(values) => Ok(itemize(entries(values, ctx, SECTION)?)),
        Value::Object(map) if matches!(ItemShape::classify(data), ItemShape::Unrecognized(_)) => {
            let mut lines = Vec::new();
            if let Some(description) = first_of(map, &["description", "summary"]) {
                lines.extend(paragraphs(ctx.localize(description, SECTION)?, ctx, SECTION)?);
            }
            if let Some(url) = ctx.text_opt(map.get("url"), "design.url")? {
                lines.push(format!("{}\\par", ctx.url(&url)));
            }
            let items = match first_of(map, &["items", "projects"]).map(|v| ctx.localize(v, SECTION)) {
                Some(Ok(Value::Array(values))) => entries(values, ctx, SECTION)?,
                Some(Ok(other)) => entry(other, ctx, SECTION)?.into_iter().collect(),
                Some(Err(e)) => return Err(e),
                None => Vec::new(),
            };
            Ok(MarkupFragment::from_lines(lines).concat(itemize(items)))
        }
        Value::Object(_) => Ok(itemize(entry(data, ctx, SECTION)?.into_iter().collect())),
        other => Ok(paragraphs(other, ctx, SECTION)?.into_iter().collect()),
    }
}

/// Render the `metadata` footer: source link, last update and a note.
///
/// A plain string is taken as the source URL.
pub fn metadata(data: &Value, ctx: &RenderContext<'_>) -> Result<MarkupFragment> {
    const SECTION: &str = "metadata";
    let mut parts = Vec::new();
    match data {
        Value::Object(map) if !is_locale_map(data) => {
            if let Some(source) = ctx.text_opt(first_of(map, &["source", "url"]), "metadata.source")? {
                parts.push(format!("{}: {}", escape(&ctx.label("source")?), ctx.url(&source)));
            }
            if let Some(updated) = ctx.text_opt(first_of(map, &["updated", "last-updated"]), "metadata.updated")? {
                parts.push(format!("{}: {}", escape(&ctx.label("updated")?), escape(&updated)));
            }
            if let Some(note) = ctx.text_opt(map.get("note"), "metadata.note")? {
                parts.push(ctx.rich(&note));
            }
        }
        Value::String(_) => {
            if let Some(source) = ctx.text_opt(Some(data), "metadata.source")? {
                parts.push(format!("{}: {}", escape(&ctx.label("source")?), ctx.url(&source)));
            }
        }
        other if is_blank(other) => {}
        other => {
            return Err(Error::malformed(
                SECTION,
                format!("expected an object or a URL, found {}", value_kind(other)),
            ))
        }
    }

    if parts.is_empty() {
        return Ok(MarkupFragment::new());
    }
    Ok(MarkupFragment::from_lines(vec![
        "\\vfill".to_string(),
        "\\begin{center}".to_string(),
        format!("\\footnotesize {}", parts.join(" \\textbar{} ")),
        "\\end{center}".to_string(),
    ]))
}
