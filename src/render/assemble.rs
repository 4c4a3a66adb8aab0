//! Document assembly: the ordered section table, preamble and epilogue.

use super::context::section_header;
use super::labels::babel_language;
use super::sections::generic::TypedSection;
use super::sections::{
    coursework, education, identity, lists, prose, skills, teaching, RenderFn,
};
use super::{RenderContext, RenderOptions, RenderResult, RenderStats};
use crate::error::{Error, Result};
use crate::model::{is_blank, value_kind, MarkupFragment, ResumeDocument};
use rayon::prelude::*;
use serde_json::{Map, Value};
use std::borrow::Cow;

/// One entry of the section table.
#[derive(Clone, Copy)]
pub struct SectionSpec {
    /// Section id, also used for the header label
    pub id: &'static str,
    /// Document keys feeding this section
    pub keys: &'static [&'static str],
    /// Whether non-empty output gets a `\section*` header
    pub headed: bool,
    /// Renderer
    pub render: RenderFn,
}

impl SectionSpec {
    /// Whether a typed section with `id` takes this slot.
    fn claims(&self, id: &str) -> bool {
        self.id == id || self.keys.iter().any(|key| *key == id)
    }

    /// The data for this section, if the document has any.
    ///
    /// Sections fed by several keys get an object of the present keys.
    fn data<'d>(&self, doc: &'d ResumeDocument) -> Option<Cow<'d, Value>> {
        if let [key] = self.keys {
            return doc.get(key).map(Cow::Borrowed);
        }
        let parts: Map<String, Value> = self
            .keys
            .iter()
            .filter_map(|key| doc.get(key).map(|v| (key.to_string(), v.clone())))
            .collect();
        (!parts.is_empty()).then(|| Cow::Owned(Value::Object(parts)))
    }
}

/// Sections in output order.
pub static SECTIONS: &[SectionSpec] = &[
    SectionSpec { id: "contact", keys: &["contact"], headed: false, render: identity::render },
    SectionSpec { id: "education", keys: &["education"], headed: true, render: education::render },
    SectionSpec { id: "awards", keys: &["awards"], headed: true, render: lists::awards },
    SectionSpec { id: "languages", keys: &["languages"], headed: true, render: lists::languages },
    SectionSpec { id: "technical-skills", keys: skills::KEYS, headed: true, render: skills::render },
    SectionSpec { id: "coursework", keys: &["coursework"], headed: true, render: coursework::render },
    SectionSpec { id: "teaching", keys: &["teaching"], headed: true, render: teaching::render },
    SectionSpec { id: "design", keys: &["design"], headed: true, render: prose::design },
    SectionSpec { id: "admin-skills", keys: &["admin-skills"], headed: true, render: lists::admin_skills },
    SectionSpec { id: "publications", keys: &["publications"], headed: true, render: prose::publications },
    SectionSpec { id: "philosophy", keys: &["philosophy"], headed: true, render: prose::philosophy },
    SectionSpec { id: "preferred-role", keys: &["preferred-role"], headed: true, render: prose::preferred_role },
    SectionSpec { id: "metadata", keys: &["metadata"], headed: false, render: prose::metadata },
];

/// Ids of the section table, in output order.
pub fn section_order() -> Vec<&'static str> {
    SECTIONS.iter().map(|spec| spec.id).collect()
}

/// A unit of rendering work.
enum Slot<'d> {
    Table {
        spec: &'static SectionSpec,
        data: Cow<'d, Value>,
    },
    Typed {
        section: TypedSection<'d>,
        headed: bool,
    },
}

impl Slot<'_> {
    fn id(&self) -> &str {
        match self {
            Slot::Table { spec, .. } => spec.id,
            Slot::Typed { section, .. } => section.id,
        }
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<MarkupFragment> {
        let fragment = match self {
            Slot::Table { spec, data } => {
                if is_blank(data) {
                    return Ok(MarkupFragment::new());
                }
                let fragment = (spec.render)(data, ctx)?;
                if spec.headed && !fragment.is_empty() {
                    fragment.with_header(ctx.header(spec.id)?)
                } else {
                    fragment
                }
            }
            Slot::Typed { section, headed } => {
                let fragment = section.render(ctx)?;
                if *headed && !fragment.is_empty() {
                    fragment.with_header(section_header(&section.title(ctx)?))
                } else {
                    fragment
                }
            }
        };
        log::trace!("section '{}': {} lines", self.id(), fragment.len());
        Ok(fragment)
    }
}

/// Parse the document's `sections` array.
fn typed_sections(doc: &ResumeDocument) -> Result<Vec<TypedSection<'_>>> {
    match doc.get("sections") {
        None => Ok(Vec::new()),
        Some(Value::Array(entries)) => entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.is_null())
            .map(|(index, entry)| TypedSection::parse(index, entry))
            .collect(),
        Some(other) => Err(Error::malformed(
            "sections",
            format!("expected an array, found {}", value_kind(other)),
        )),
    }
}

/// Lay out the work in output order.
///
/// Typed sections claiming a table slot replace its data; the rest follow
/// the table in document order.
fn plan(doc: &ResumeDocument) -> Result<Vec<Slot<'_>>> {
    let mut typed: Vec<Option<TypedSection<'_>>> = typed_sections(doc)?.into_iter().map(Some).collect();
    let mut slots = Vec::with_capacity(SECTIONS.len() + typed.len());

    for spec in SECTIONS {
        let mut claimed = false;
        for entry in typed.iter_mut() {
            if entry.as_ref().is_some_and(|section| spec.claims(section.id)) {
                if let Some(section) = entry.take() {
                    slots.push(Slot::Typed { section, headed: spec.headed });
                    claimed = true;
                }
            }
        }
        if claimed {
            continue;
        }
        if let Some(data) = spec.data(doc) {
            slots.push(Slot::Table { spec, data });
        }
    }

    slots.extend(
        typed
            .into_iter()
            .flatten()
            .map(|section| Slot::Typed { section, headed: true }),
    );
    Ok(slots)
}

fn preamble(locale: &str) -> String {
    let mut lines = vec![
        "\\documentclass[11pt]{article}".to_string(),
        "\\usepackage[utf8]{inputenc}".to_string(),
        "\\usepackage[T1]{fontenc}".to_string(),
        "\\usepackage[margin=1in]{geometry}".to_string(),
        "\\usepackage{graphicx}".to_string(),
    ];
    if let Some(language) = babel_language(locale) {
        lines.push(format!("\\usepackage[{}]{{babel}}", language));
    }
    lines.push("\\usepackage[colorlinks=true,urlcolor=blue]{hyperref}".to_string());
    lines.push("\\pagestyle{empty}".to_string());
    lines.push("\\begin{document}".to_string());
    lines.join("\n")
}

const EPILOGUE: &str = "\\end{document}";

/// Render every present section, in order, paired with its id.
fn render_sections(doc: &ResumeDocument, options: &RenderOptions) -> Result<Vec<(String, MarkupFragment)>> {
    let ctx = RenderContext::new(doc, options)?;
    let slots = plan(doc)?;
    log::debug!(
        "rendering {} sections for locale '{}'",
        slots.len(),
        options.locale
    );

    let render = |slot: &Slot<'_>| -> Result<(String, MarkupFragment)> {
        Ok((slot.id().to_string(), slot.render(&ctx)?))
    };
    let rendered: Vec<(String, MarkupFragment)> = if options.parallel {
        slots.par_iter().map(render).collect::<Result<_>>()?
    } else {
        slots.iter().map(render).collect::<Result<_>>()?
    };

    Ok(rendered
        .into_iter()
        .filter(|(_, fragment)| !fragment.is_empty())
        .collect())
}

fn document(options: &RenderOptions, fragments: &[(String, MarkupFragment)]) -> String {
    let mut parts = Vec::with_capacity(fragments.len() + 2);
    parts.push(preamble(&options.locale));
    parts.extend(fragments.iter().map(|(_, fragment)| fragment.render()));
    parts.push(EPILOGUE.to_string());
    let mut out = parts.join("\n\n");
    out.push('\n');
    out
}

/// Assemble a complete LaTeX document for `locale` with default options.
///
/// # Example
///
/// ```
/// use cvtex::{assemble, ResumeDocument};
///
/// let doc: ResumeDocument = r#"{"contact": {"name": "Ada Lovelace"}}"#.parse().unwrap();
/// let tex = assemble(&doc, "en").unwrap();
/// assert!(tex.contains("{\\Large\\bfseries Ada Lovelace}"));
/// assert!(tex.ends_with("\\end{document}\n"));
/// ```
pub fn assemble(doc: &ResumeDocument, locale: &str) -> Result<String> {
    assemble_with_options(doc, &RenderOptions::new().with_locale(locale))
}

/// Assemble a complete LaTeX document.
pub fn assemble_with_options(doc: &ResumeDocument, options: &RenderOptions) -> Result<String> {
    let fragments = render_sections(doc, options)?;
    Ok(document(options, &fragments))
}

/// Assemble a complete LaTeX document with rendering statistics.
pub fn render_with_stats(doc: &ResumeDocument, options: &RenderOptions) -> Result<RenderResult> {
    let fragments = render_sections(doc, options)?;
    let mut stats = RenderStats::new();
    for (id, fragment) in &fragments {
        stats.add_section(id, fragment);
    }
    Ok(RenderResult::new(document(options, &fragments), stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> ResumeDocument {
        ResumeDocument::from_value(value).unwrap()
    }

    #[test]
    fn test_section_order() {
        let order = section_order();
        assert_eq!(order.first(), Some(&"contact"));
        assert_eq!(order.last(), Some(&"metadata"));
        assert_eq!(order.len(), 13);
    }

    #[test]
    fn test_multi_key_data() {
        let d = doc(json!({"techniques": ["TDD"], "skills": null}));
        let spec = SECTIONS.iter().find(|s| s.id == "technical-skills").unwrap();
        assert_eq!(spec.data(&d).unwrap().into_owned(), json!({"techniques": ["TDD"]}));
        assert!(spec.data(&doc(json!({}))).is_none());
    }

    #[test]
    fn test_empty_document() {
        let tex = assemble(&ResumeDocument::new(), "en").unwrap();
        assert!(tex.starts_with("\\documentclass[11pt]{article}"));
        assert!(tex.contains("\\usepackage[english]{babel}"));
        assert!(tex.ends_with("\\begin{document}\n\n\\end{document}\n"));
        assert!(!tex.contains("\\section*"));
    }

    #[test]
    fn test_unknown_locale_skips_babel() {
        let tex = assemble(&ResumeDocument::new(), "ja").unwrap();
        assert!(!tex.contains("{babel}"));
    }

    #[test]
    fn test_empty_sections_have_no_header() {
        let d = doc(json!({"awards": [], "philosophy": "", "languages": {}, "teaching": null}));
        let tex = assemble(&d, "en").unwrap();
        assert!(!tex.contains("\\section*"));
    }

    #[test]
    fn test_typed_section_replaces_slot() {
        let d = doc(json!({
            "awards": ["Ignored"],
            "philosophy": "Ship it.",
            "sections": [
                {"id": "hobbies", "label": "Hobbies", "type": "items-compact", "items": ["Chess"]},
                {"id": "awards", "type": "items", "items": ["Kept"]}
            ]
        }));
        let tex = assemble(&d, "en").unwrap();
        assert!(!tex.contains("Ignored"));
        let awards = tex.find("\\item Kept").unwrap();
        let philosophy = tex.find("Ship it.").unwrap();
        let hobbies = tex.find("\\section*{Hobbies}\nChess.").unwrap();
        assert!(awards < philosophy && philosophy < hobbies);
    }

    #[test]
    fn test_unknown_type_propagates() {
        let d = doc(json!({"sections": [{"id": "x", "type": "gallery"}]}));
        let err = assemble(&d, "en").unwrap_err();
        assert!(matches!(err, Error::UnknownSectionType { ref kind, .. } if kind == "gallery"));
    }

    #[test]
    fn test_sections_must_be_an_array() {
        let d = doc(json!({"sections": {"id": "x"}}));
        assert!(matches!(
            assemble(&d, "en").unwrap_err(),
            Error::MalformedSection { .. }
        ));
    }

    #[test]
    fn test_stats() {
        let d = doc(json!({
            "contact": {"name": "Ada", "website": "https://ada.dev"},
            "awards": ["A", "B"]
        }));
        let result = render_with_stats(&d, &RenderOptions::new()).unwrap();
        assert_eq!(result.stats.section_ids, vec!["contact", "awards"]);
        assert_eq!(result.stats.item_count, 2);
        assert_eq!(result.stats.link_count, 1);
    }
}
