//! Typed sections declared in the document's `sections` array.
//!
//! ```json
//! {"id": "stack", "label": {"en": "Stack"}, "type": "items-compact",
//!  "items": [{"label": "Python", "url": "https://python.org"}]}
//! ```

use super::lists::{compact, enumerated};
use super::prose::content;
use crate::error::{Error, Result};
use crate::model::{value_kind, MarkupFragment};
use crate::render::RenderContext;
use serde_json::{Map, Value};
use std::fmt;

/// How a typed section lays out its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionKind {
    /// Free text paragraphs from `content`
    #[default]
    Content,
    /// One `\item` per entry of `items`
    Items,
    /// Entries of `items` joined on one line
    ItemsCompact,
}

impl SectionKind {
    /// Parse a type tag.
    pub fn parse(section: &str, tag: &str) -> Result<Self> {
        match tag {
            "content" => Ok(SectionKind::Content),
            "items" => Ok(SectionKind::Items),
            "items-compact" => Ok(SectionKind::ItemsCompact),
            other => Err(Error::UnknownSectionType {
                section: section.to_string(),
                kind: other.to_string(),
            }),
        }
    }

    /// The type tag as written in documents.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Content => "content",
            SectionKind::Items => "items",
            SectionKind::ItemsCompact => "items-compact",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validated entry of the `sections` array.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedSection<'a> {
    /// Section id
    pub id: &'a str,
    /// Optional localized label
    pub label: Option<&'a Value>,
    /// Layout
    pub kind: SectionKind,
    /// The raw entry
    pub raw: &'a Map<String, Value>,
}

impl<'a> TypedSection<'a> {
    /// Validate a raw `sections` entry.
    pub fn parse(index: usize, value: &'a Value) -> Result<Self> {
        let raw = value.as_object().ok_or_else(|| {
            Error::malformed(
                "sections",
                format!("entry {} must be an object, found {}", index, value_kind(value)),
            )
        })?;
        let id = raw
            .get("id")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::malformed("sections", format!("entry {} has no id", index)))?;
        let kind = match raw.get("type") {
            None | Some(Value::Null) => SectionKind::default(),
            Some(Value::String(tag)) => SectionKind::parse(id, tag)?,
            Some(other) => {
                return Err(Error::UnknownSectionType {
                    section: id.to_string(),
                    kind: other.to_string(),
                })
            }
        };
        Ok(Self {
            id,
            label: raw.get("label").filter(|v| !v.is_null()),
            kind,
            raw,
        })
    }

    /// Render the section body (without header).
    pub fn render(&self, ctx: &RenderContext<'_>) -> Result<MarkupFragment> {
        match self.kind {
            SectionKind::Content => match self.raw.get("content") {
                Some(body) => content(body, ctx, self.id),
                None => Ok(MarkupFragment::new()),
            },
            SectionKind::Items => match self.raw.get("items") {
                Some(items) => enumerated(items, ctx, self.id),
                None => Ok(MarkupFragment::new()),
            },
            SectionKind::ItemsCompact => match self.raw.get("items") {
                Some(items) => compact(items, ctx, self.id),
                None => Ok(MarkupFragment::new()),
            },
        }
    }

    /// Unescaped title: own label, then the label table, then the id.
    pub fn title(&self, ctx: &RenderContext<'_>) -> Result<String> {
        let name = format!("sections.{}.label", self.id);
        match ctx.text_opt(self.label, &name)? {
            Some(label) => Ok(label),
            None => ctx.label(self.id),
        }
    }
}
