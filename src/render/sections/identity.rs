//! Identity block: photo, name, headline and contact line.

use super::break_rows;
use crate::error::{Error, Result};
use crate::model::{first_of, is_locale_map, value_kind, MarkupFragment};
use crate::render::escape::{escape, href, link_item};
use crate::render::RenderContext;
use serde_json::{Map, Value};

const SECTION: &str = "contact";

const NAME_PARTS: &[&str] = &["first", "middle", "last"];

/// Separator between contact details.
const CONTACT_SEPARATOR: &str = " \\textbar{} ";

/// Render the `contact` block.
///
/// The name is required: a missing name, or one whose components are all
/// empty, is a malformed section.
pub fn render(data: &Value, ctx: &RenderContext<'_>) -> Result<MarkupFragment> {
    let contact = data.as_object().ok_or_else(|| {
        Error::malformed(
            SECTION,
            format!("expected an object, found {}", value_kind(data)),
        )
    })?;

    let mut rows = Vec::new();
    if let Some(photo) = &ctx.options().photo {
        rows.push(format!(
            "\\includegraphics[width=3cm]{{{}}}",
            photo.display().to_string().replace('\\', "/")
        ));
    }
    rows.push(format!("{{\\Large\\bfseries {}}}", escape(&full_name(contact, ctx)?)));

    if let Some(headline) = ctx.text_opt(first_of(contact, &["title", "headline"]), "contact.title")? {
        rows.push(format!("{{\\large {}}}", escape(&headline)));
    }

    let details = contact_details(contact, ctx)?;
    if !details.is_empty() {
        rows.push(details.join(CONTACT_SEPARATOR));
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push("\\begin{center}".to_string());
    lines.extend(break_rows(rows));
    lines.push("\\end{center}".to_string());
    Ok(MarkupFragment::from_lines(lines))
}

/// Join the name components that are present.
fn full_name(contact: &Map<String, Value>, ctx: &RenderContext<'_>) -> Result<String> {
    let name = contact
        .get("name")
        .filter(|v| !v.is_null())
        .ok_or_else(|| Error::malformed(SECTION, "name block is missing"))?;

    let full = match name {
        Value::String(s) => s.trim().to_string(),
        Value::Object(_) if is_locale_map(name) => {
            ctx.text(name, "contact.name")?.trim().to_string()
        }
        Value::Object(parts) => {
            let mut present = Vec::new();
            for key in NAME_PARTS {
                if let Some(part) = ctx.text_opt(parts.get(*key), &format!("contact.name.{key}"))? {
                    present.push(part.trim().to_string());
                }
            }
            present.join(" ")
        }
        other => {
            return Err(Error::malformed(
                SECTION,
                format!("name must be a string or an object, found {}", value_kind(other)),
            ))
        }
    };

    if full.is_empty() {
        return Err(Error::malformed(
            SECTION,
            "name block has no first, middle or last component",
        ));
    }
    Ok(full)
}

fn contact_details(contact: &Map<String, Value>, ctx: &RenderContext<'_>) -> Result<Vec<String>> {
    let mut details = Vec::new();

    if let Some(location) = ctx.text_opt(contact.get("location"), "contact.location")? {
        details.push(escape(&location));
    }
    if let Some(email) = email(contact.get("email"), ctx)? {
        details.push(href(Some(&format!("mailto:{email}")), &escape(&email)));
    }
    if let Some(phone) = ctx.text_opt(contact.get("phone"), "contact.phone")? {
        details.push(escape(&phone));
    }
    if let Some(website) = ctx.text_opt(first_of(contact, &["website", "url"]), "contact.website")? {
        details.push(ctx.url(&website));
    }
    if let Some(github) = ctx.text_opt(contact.get("github"), "contact.github")? {
        details.push(profile_link(&github, "https://github.com/", "github.com/"));
    }
    if let Some(linkedin) = ctx.text_opt(contact.get("linkedin"), "contact.linkedin")? {
        details.push(profile_link(
            &linkedin,
            "https://www.linkedin.com/in/",
            "linkedin.com/in/",
        ));
    }
    if let Some(links) = contact.get("links") {
        details.extend(ctx.items(links, "contact.links")?.iter().map(link_item));
    }

    Ok(details)
}

/// Pick the email address to show.
///
/// A mapping of provider to address is resolved with the configured
/// provider priority, then document order.
fn email(field: Option<&Value>, ctx: &RenderContext<'_>) -> Result<Option<String>> {
    let Some(field) = field else {
        return Ok(None);
    };
    let address = match field {
        Value::Object(providers) => {
            let by_priority = ctx
                .options()
                .contact_priority
                .iter()
                .filter_map(|provider| providers.get(provider));
            let chosen = by_priority
                .chain(providers.values())
                .find_map(|v| v.as_str().map(str::trim).filter(|s| !s.is_empty()));
            chosen.map(str::to_string)
        }
        Value::Array(addresses) => addresses
            .iter()
            .find_map(|v| v.as_str().map(str::trim).filter(|s| !s.is_empty()))
            .map(str::to_string),
        other => ctx.text_opt(Some(other), "contact.email")?,
    };
    Ok(address)
}

/// Link a profile given as a full URL or a bare handle.
fn profile_link(value: &str, base: &str, display_base: &str) -> String {
    let value = value.trim();
    if value.contains("://") {
        let display = value
            .split_once("://")
            .map(|(_, rest)| rest.trim_start_matches("www."))
            .unwrap_or(value)
            .trim_end_matches('/');
        return href(Some(value), &escape(display));
    }
    let handle = value.trim_start_matches('@');
    href(
        Some(&format!("{base}{handle}")),
        &escape(&format!("{display_base}{handle}")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResumeDocument;
    use crate::render::RenderOptions;
    use serde_json::json;

    fn render_with(data: Value, options: &RenderOptions) -> Result<MarkupFragment> {
        let doc = ResumeDocument::new();
        let ctx = RenderContext::new(&doc, options)?;
        render(&data, &ctx)
    }

    #[test]
    fn test_full_identity_block() {
        let data = json!({
            "name": {"first": "Ada", "middle": "", "last": "Lovelace"},
            "title": {"en": "Analyst", "es": "Analista"},
            "location": "London",
            "email": "ada@example.org",
            "github": "ada",
        });
        let out = render_with(data, &RenderOptions::new().with_locale("es"))
            .unwrap()
            .render();

        assert!(out.starts_with("\\begin{center}"));
        assert!(out.contains("{\\Large\\bfseries Ada Lovelace}\\\\"));
        assert!(out.contains("{\\large Analista}\\\\"));
        assert!(out.contains(
            "London \\textbar{} \\href{mailto:ada@example.org}{ada@example.org} \\textbar{} \\href{https://github.com/ada}{github.com/ada}"
        ));
        assert!(out.ends_with("\\end{center}"));
    }

    #[test]
    fn test_localized_name() {
        let data = json!({"name": {"en": "Ada Lovelace", "es": " Ada Lovelace Byron "}});
        let out = render_with(data, &RenderOptions::new().with_locale("es"))
            .unwrap()
            .render();
        assert!(out.contains("{\\Large\\bfseries Ada Lovelace Byron}"));

        let blank = json!({"name": {"en": " "}});
        let err = render_with(blank, &RenderOptions::new()).unwrap_err();
        assert_eq!(err.section(), Some("contact"));
    }

    #[test]
    fn test_photo_comes_first() {
        let options = RenderOptions::new().with_photo("build/photo.jpg");
        let out = render_with(json!({"name": "Ada"}), &options).unwrap();
        assert_eq!(
            out.lines()[1],
            "\\includegraphics[width=3cm]{build/photo.jpg}\\\\"
        );
        assert_eq!(out.lines()[2], "{\\Large\\bfseries Ada}");
    }

    #[test]
    fn test_missing_name_is_malformed() {
        let err = render_with(json!({"email": "a@b.c"}), &RenderOptions::new()).unwrap_err();
        assert!(matches!(err, Error::MalformedSection { ref section, .. } if section == "contact"));

        let err = render_with(json!({"name": {"first": "", "last": null}}), &RenderOptions::new())
            .unwrap_err();
        assert!(err.to_string().contains("no first, middle or last"));

        let err = render_with(json!("Ada"), &RenderOptions::new()).unwrap_err();
        assert!(matches!(err, Error::MalformedSection { .. }));
    }

    #[test]
    fn test_email_provider_priority() {
        let contact = json!({
            "name": "Ada",
            "email": {"proton": "ada@proton.me", "google": "ada@gmail.com", "uc": "ada@uc.cl"}
        });
        let out = render_with(contact.clone(), &RenderOptions::new()).unwrap().render();
        assert!(out.contains("mailto:ada@uc.cl"));

        let options = RenderOptions::new().with_contact_priority(["google", "uc"]);
        let out = render_with(contact, &options).unwrap().render();
        assert!(out.contains("mailto:ada@gmail.com"));

        let contact = json!({"name": "Ada", "email": {"work": "", "home": "ada@home.net"}});
        let out = render_with(contact, &RenderOptions::new()).unwrap().render();
        assert!(out.contains("mailto:ada@home.net"));
    }

    #[test]
    fn test_profile_link() {
        assert_eq!(
            profile_link("https://www.linkedin.com/in/ada/", "https://www.linkedin.com/in/", "linkedin.com/in/"),
            "\\href{https://www.linkedin.com/in/ada/}{linkedin.com/in/ada}"
        );
        assert_eq!(
            profile_link("@ada_l", "https://github.com/", "github.com/"),
            "\\href{https://github.com/ada_l}{github.com/ada\\_l}"
        );
    }

    #[test]
    fn test_name_components_are_escaped() {
        let out = render_with(json!({"name": {"first": "R&D", "last": "Team_1"}}), &RenderOptions::new())
            .unwrap()
            .render();
        assert!(out.contains("{\\Large\\bfseries R\\&D Team\\_1}"));
    }
}
