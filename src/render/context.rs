//! Per-call rendering context shared by the section renderers.

use super::escape::{escape, rich_text, substitute, url_link};
use super::labels::builtin_label;
use super::RenderOptions;
use crate::error::Result;
use crate::model::{collect_items, LinkableItem, LocaleResolver, ResumeDocument, DEFAULT_LOCALE};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Everything a section renderer needs besides its own data.
///
/// Built once per [`assemble`](super::assemble) call and shared read-only by
/// all renderers.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    options: &'a RenderOptions,
    resolver: LocaleResolver,
    substitutions: BTreeMap<String, String>,
    labels: Option<&'a Map<String, Value>>,
}

impl<'a> RenderContext<'a> {
    /// Build the context for `doc`.
    ///
    /// Substitution values come from the document's `identifiers` object,
    /// overridden by [`RenderOptions::substitutions`].
    pub fn new(doc: &'a ResumeDocument, options: &'a RenderOptions) -> Result<Self> {
        let resolver = options.resolver();

        let mut substitutions = BTreeMap::new();
        if let Some(Value::Object(ids)) = doc.get("identifiers") {
            for (key, value) in ids {
                let name = format!("identifiers.{key}");
                if let Some(text) = resolver.pick_opt(Some(value), &name)? {
                    substitutions.insert(key.clone(), text);
                }
            }
        }
        substitutions.extend(
            options
                .substitutions
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        let labels = match doc.get("labels") {
            Some(Value::Object(map)) => Some(map),
            _ => None,
        };

        Ok(Self {
            options,
            resolver,
            substitutions,
            labels,
        })
    }

    /// The options this context was built from.
    pub fn options(&self) -> &RenderOptions {
        self.options
    }

    /// The locale resolver.
    pub fn resolver(&self) -> &LocaleResolver {
        &self.resolver
    }

    /// Resolved substitution values.
    pub fn substitutions(&self) -> &BTreeMap<String, String> {
        &self.substitutions
    }

    /// Resolve a localized field to text.
    pub fn text(&self, field: &Value, name: &str) -> Result<String> {
        self.resolver.pick(field, name)
    }

    /// Resolve an optional localized field.
    pub fn text_opt(&self, field: Option<&Value>, name: &str) -> Result<Option<String>> {
        self.resolver.pick_opt(field, name)
    }

    /// Select the locale copy of a whole section, if it is one.
    pub fn localize<'v>(&self, value: &'v Value, name: &str) -> Result<&'v Value> {
        self.resolver.localize(value, name)
    }

    /// Collect list items.
    pub fn items(&self, value: &Value, section: &str) -> Result<Vec<LinkableItem>> {
        collect_items(value, &self.resolver, section)
    }

    /// Escape free text with substitution and URL linking.
    pub fn rich(&self, raw: &str) -> String {
        let text = substitute(raw, &self.substitutions);
        rich_text(&text, self.options.url_display_limit)
    }

    /// Link a bare URL with a shortened label.
    pub fn url(&self, url: &str) -> String {
        url_link(url, self.options.url_display_limit)
    }

    /// Unescaped label for a section or field id.
    ///
    /// The document's `labels` object wins over the built-in table; the id
    /// itself is the last resort.
    pub fn label(&self, id: &str) -> Result<String> {
        let custom = self.labels.and_then(|labels| labels.get(id));
        if let Some(text) = self.text_opt(custom, &format!("labels.{id}"))? {
            return Ok(text);
        }
        let builtin = builtin_label(id, self.resolver.locale())
            .or_else(|| builtin_label(id, self.resolver.default_locale()))
            .or_else(|| builtin_label(id, DEFAULT_LOCALE))
            .unwrap_or(id);
        Ok(builtin.to_string())
    }

    /// `\section*{...}` line for a section id.
    pub fn header(&self, id: &str) -> Result<String> {
        Ok(section_header(&self.label(id)?))
    }
}

/// `\section*{...}` line for an unescaped title.
pub fn section_header(title: &str) -> String {
    format!("\\section*{{{}}}", escape(title))
}
