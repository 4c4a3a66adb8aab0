//! Plain list sections: awards, languages and administrative skills.

use super::{compact_line, enumerated_item, itemize};
use crate::error::Result;
use crate::model::{is_locale_map, LinkableItem, MarkupFragment};
use crate::render::RenderContext;
use serde_json::Value;

/// One `\item` per entry.
pub fn enumerated(data: &Value, ctx: &RenderContext<'_>, section: &str) -> Result<MarkupFragment> {
    let items = ctx.items(data, section)?;
    Ok(itemize(items.iter().map(enumerated_item).collect()))
}

/// All entries on one comma-joined line.
pub fn compact(data: &Value, ctx: &RenderContext<'_>, section: &str) -> Result<MarkupFragment> {
    let items = ctx.items(data, section)?;
    Ok(compact_line(&items).into_iter().collect())
}

/// Render the `awards` section.
pub fn awards(data: &Value, ctx: &RenderContext<'_>) -> Result<MarkupFragment> {
    enumerated(data, ctx, "awards")
}

/// Render the `admin-skills` section.
pub fn admin_skills(data: &Value, ctx: &RenderContext<'_>) -> Result<MarkupFragment> {
    compact(data, ctx, "admin-skills")
}

/// Render the `languages` section.
///
/// Accepts a list of items (`level` is read as the value) or an object
/// mapping language to level.
pub fn languages(data: &Value, ctx: &RenderContext<'_>) -> Result<MarkupFragment> {
    const SECTION: &str = "languages";
    match data {
        Value::Object(map) if !is_locale_map(data) && !map.contains_key("name") && !map.contains_key("label") => {
            let mut items = Vec::with_capacity(map.len());
            for (language, level) in map {
                let mut item = LinkableItem::new(language.clone());
                item.value = ctx.text_opt(Some(level), SECTION)?;
                items.push(item);
            }
            Ok(compact_line(&items).into_iter().collect())
        }
        _ => compact(data, ctx, SECTION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResumeDocument;
    use crate::render::RenderOptions;
    use serde_json::json;

    fn with_ctx<T>(locale: &str, f: impl FnOnce(&RenderContext<'_>) -> T) -> T {
        let doc = ResumeDocument::new();
        let options = RenderOptions::new().with_locale(locale);
        let ctx = RenderContext::new(&doc, &options).unwrap();
        f(&ctx)
    }

    #[test]
    fn test_awards_one_item_per_line() {
        let out = with_ctx("en", |ctx| {
            awards(
                &json!([
                    "Dean's List",
                    {"label": "ICPC Finalist", "value": "2019", "url": "https://icpc.global"}
                ]),
                ctx,
            )
        })
        .unwrap();
        assert_eq!(
            out.lines(),
            &[
                "\\begin{itemize}".to_string(),
                "  \\item Dean's List".to_string(),
                "  \\item \\href{https://icpc.global}{ICPC Finalist} --- 2019".to_string(),
                "\\end{itemize}".to_string(),
            ]
        );
    }

    #[test]
    fn test_languages_from_object() {
        let out = with_ctx("en", |ctx| {
            languages(&json!({"Spanish": {"en": "Native", "es": "Nativo"}, "English": "C1"}), ctx)
        })
        .unwrap();
        assert_eq!(out.render(), "Spanish (Native), English (C1).");
    }

    #[test]
    fn test_languages_from_items() {
        let out = with_ctx("es", |ctx| {
            languages(
                &json!([{"name": {"en": "German", "es": "Alemán"}, "level": "B2"}, "Latin"]),
                ctx,
            )
        })
        .unwrap();
        assert_eq!(out.render(), "Alemán (B2), Latin.");
    }

    #[test]
    fn test_admin_skills_localized_list() {
        let out = with_ctx("es", |ctx| {
            admin_skills(&json!({"en": ["Budgeting"], "es": ["Presupuestos", "Gestión de equipos"]}), ctx)
        })
        .unwrap();
        assert_eq!(out.render(), "Presupuestos, Gestión de equipos.");
    }

    #[test]
    fn test_empty_lists_render_nothing() {
        with_ctx("en", |ctx| {
            assert!(awards(&json!([]), ctx).unwrap().is_empty());
            assert!(awards(&json!([null, ""]), ctx).unwrap().is_empty());
            assert!(languages(&json!({}), ctx).unwrap().is_empty());
            assert!(admin_skills(&json!(null), ctx).unwrap().is_empty());
        });
    }
}
