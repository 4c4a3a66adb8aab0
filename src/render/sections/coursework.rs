//! Coursework grouped by term.

use super::{compact_item, itemize};
use crate::error::{Error, Result};
use crate::model::{first_of, is_blank, LinkableItem, MarkupFragment};
use crate::render::escape::escape;
use crate::render::RenderContext;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const SECTION: &str = "coursework";

/// Courses collected per term; terms iterate in ascending order.
#[derive(Debug, Default)]
struct Terms {
    by_term: BTreeMap<String, Vec<LinkableItem>>,
    unscheduled: Vec<LinkableItem>,
}

impl Terms {
    fn add(&mut self, term: Option<String>, item: LinkableItem) {
        match term {
            Some(term) => self.by_term.entry(term).or_default().push(item),
            None => self.unscheduled.push(item),
        }
    }

    fn into_entries(self) -> Vec<String> {
        let mut entries: Vec<String> = self
            .by_term
            .into_iter()
            .map(|(term, items)| format!("\\textbf{{{}}}: {}", escape(&term), join(&items)))
            .collect();
        if !self.unscheduled.is_empty() {
            entries.push(join(&self.unscheduled));
        }
        entries
    }
}

fn join(items: &[LinkableItem]) -> String {
    let joined = items.iter().map(compact_item).collect::<Vec<_>>().join(", ");
    format!("{}.", joined)
}

/// Keys that name a course.
const COURSE_KEYS: &[&str] = &["name", "label", "course"];

/// Keys that carry a course's term.
const TERM_KEYS: &[&str] = &["semester", "term"];

/// Render the `coursework` section.
///
/// Entries are `{name, semester}` objects (`course` is accepted for `name`,
/// `term` for `semester`) or bare course names; a single entry stands for a
/// one-element list, and an object mapping term to course list is also
/// accepted. One `\item` per term, terms sorted ascending, courses without a
/// term last. Entries without a course name are skipped.
pub fn render(data: &Value, ctx: &RenderContext<'_>) -> Result<MarkupFragment> {
    let data = ctx.localize(data, SECTION)?;
    let mut terms = Terms::default();

    match data {
        Value::Object(map) if is_term_map(map) => {
            for (term, courses) in map {
                for item in ctx.items(courses, SECTION)? {
                    terms.add(Some(term.clone()), item);
                }
            }
        }
        Value::Array(entries) => {
            for entry in entries.iter().filter(|v| !is_blank(v)) {
                add_entry(&mut terms, entry, ctx)?;
            }
        }
        Value::Object(_) => add_entry(&mut terms, data, ctx)?,
        other => {
            for item in ctx.items(other, SECTION)? {
                terms.add(None, item);
            }
        }
    }

    Ok(itemize(terms.into_entries()))
}

fn is_term_map(map: &Map<String, Value>) -> bool {
    !COURSE_KEYS
        .iter()
        .chain(TERM_KEYS)
        .any(|key| map.contains_key(*key))
}

fn add_entry(terms: &mut Terms, entry: &Value, ctx: &RenderContext<'_>) -> Result<()> {
    let term = match entry {
        Value::Object(map) => ctx.text_opt(first_of(map, TERM_KEYS), "coursework.semester")?,
        _ => None,
    };
    match course_items(entry, ctx) {
        Ok(items) => {
            for item in items {
                terms.add(term.clone(), item);
            }
        }
        Err(Error::MalformedSection { reason, .. }) => {
            log::debug!("skipping entry in '{}': {}", SECTION, reason);
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

fn course_items(entry: &Value, ctx: &RenderContext<'_>) -> Result<Vec<LinkableItem>> {
    match entry {
        Value::Object(map) if !map.contains_key("name") && !map.contains_key("label") => {
            let Some(course) = map.get("course") else {
                return ctx.items(entry, SECTION);
            };
            let Some(label) = ctx.text_opt(Some(course), "coursework.course")? else {
                return Ok(Vec::new());
            };
            let mut item = LinkableItem::new(label);
            if let Some(url) = ctx.text_opt(first_of(map, &["url", "link"]), "coursework.url")? {
                item = item.with_url(url.trim());
            }
            Ok(vec![item])
        }
        _ => ctx.items(entry, SECTION),
    }
}
