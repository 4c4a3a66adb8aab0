//! Linkable list items.
//!
//! List entries arrive in two shapes: bare strings (older documents) and
//! objects with a `label`/`name` plus optional `value` and `url`. Both are
//! classified once and normalized into a [`LinkableItem`] before any markup
//! is produced.

use super::document::value_kind;
use super::localized::{is_locale_map, LocaleResolver};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys that carry an item's display label, in priority order.
const LABEL_KEYS: &[&str] = &["label", "name"];

/// Keys that carry an item's annotation, in priority order.
const VALUE_KEYS: &[&str] = &["value", "level"];

/// Keys that carry an item's link target, in priority order.
const URL_KEYS: &[&str] = &["url", "link"];

/// The raw shape of a list entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemShape<'a> {
    /// A bare scalar or a per-locale copy of one.
    Bare(&'a Value),
    /// An object with a label or name key.
    Structured(&'a Map<String, Value>),
    /// Null or blank; treated as absent.
    Empty,
    /// Anything else.
    Unrecognized(&'static str),
}

impl<'a> ItemShape<'a> {
    /// Classify a raw list entry.
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Null => ItemShape::Empty,
            Value::String(s) if s.trim().is_empty() => ItemShape::Empty,
            Value::String(_) | Value::Number(_) => ItemShape::Bare(value),
            Value::Object(map) if LABEL_KEYS.iter().any(|k| map.contains_key(*k)) => {
                ItemShape::Structured(map)
            }
            Value::Object(_) if is_locale_map(value) => ItemShape::Bare(value),
            other => ItemShape::Unrecognized(value_kind(other)),
        }
    }
}

/// A normalized (label, value, URL) triple.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkableItem {
    /// Display label (unescaped).
    pub label: String,

    /// Optional annotation such as a proficiency level.
    pub value: Option<String>,

    /// Optional link target.
    pub url: Option<String>,
}

impl LinkableItem {
    /// Create an item with only a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
            url: None,
        }
    }

    /// Set the annotation.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the link target.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Build an item from a raw entry.
    ///
    /// Returns `Ok(None)` for blank entries and for structured entries whose
    /// label resolves to nothing.
    pub fn from_value(
        value: &Value,
        resolver: &LocaleResolver,
        section: &str,
    ) -> Result<Option<Self>> {
        match ItemShape::classify(value) {
            ItemShape::Empty => Ok(None),
            ItemShape::Bare(v) => {
                let label = resolver.pick(v, section)?;
                Ok((!label.trim().is_empty()).then(|| LinkableItem::new(label)))
            }
            ItemShape::Structured(map) => {
                let Some(label) = resolver.pick_opt(first_of(map, LABEL_KEYS), section)? else {
                    return Ok(None);
                };
                Ok(Some(LinkableItem {
                    label,
                    value: resolver.pick_opt(first_of(map, VALUE_KEYS), section)?,
                    url: resolver
                        .pick_opt(first_of(map, URL_KEYS), section)?
                        .map(|u| u.trim().to_string()),
                }))
            }
            ItemShape::Unrecognized(kind) => Err(Error::malformed(
                section,
                format!("list entry is {kind}, expected a string or an object with a label"),
            )),
        }
    }
}

/// Collect the items of a list-valued field.
///
/// Accepts an array of entries, a single entry, or a per-locale copy of
/// either. Unrecognized entries inside an array are skipped; a whole field of
/// an unrecognized shape is a [`Error::MalformedSection`].
pub fn collect_items(
    value: &Value,
    resolver: &LocaleResolver,
    section: &str,
) -> Result<Vec<LinkableItem>> {
    match value {
        Value::Array(entries) => {
            let mut items = Vec::with_capacity(entries.len());
            for entry in entries {
                match LinkableItem::from_value(entry, resolver, section) {
                    Ok(Some(item)) => items.push(item),
                    Ok(None) => {}
                    Err(Error::MalformedSection { reason, .. }) => {
                        log::debug!("skipping entry in '{}': {}", section, reason);
                    }
                    Err(e) => return Err(e),
                }
            }
            Ok(items)
        }
        Value::Object(_) if is_locale_map(value) => {
            let selected = resolver.select(value, section)?;
            match selected {
                Value::Array(_) => collect_items(selected, resolver, section),
                _ => Ok(LinkableItem::from_value(selected, resolver, section)?
                    .into_iter()
                    .collect()),
            }
        }
        other => Ok(LinkableItem::from_value(other, resolver, section)?
            .into_iter()
            .collect()),
    }
}

/// First present, non-null value among `keys`.
pub(crate) fn first_of<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| map.get(*k))
        .find(|v| !v.is_null())
}
