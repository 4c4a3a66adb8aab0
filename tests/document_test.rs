//! Integration tests for reading documents and the text building blocks.

use std::io::Write;

use cvtex::model::{collect_items, ItemShape};
use cvtex::render::escape::{display_url, segments, Segment};
use cvtex::{
    escape, href, render_file, render_str, CvTex, Error, LinkableItem, LocaleResolver,
    RenderOptions, ResumeDocument,
};
use serde_json::json;
use tempfile::NamedTempFile;

#[test]
fn test_render_file_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"contact": {{"name": "Grace Hopper"}}, "awards": ["Medal of Freedom"]}}"#
    )
    .unwrap();

    let tex = render_file(file.path(), &RenderOptions::new()).unwrap();
    assert!(tex.contains("{\\Large\\bfseries Grace Hopper}"));
    assert!(tex.contains("\\section*{Awards}"));
}

#[test]
fn test_builder_reads_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{"philosophy": {"en": "Ship.", "es": "Entregar."}}"#)
        .unwrap();

    let result = CvTex::new().locale("es").parse_file(file.path()).unwrap();
    assert_eq!(result.document().len(), 1);
    assert!(result.to_latex().unwrap().contains("\\section*{Filosofía}\nEntregar.\\par"));
}

#[test]
fn test_reader_rejects_bad_input() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"\"just a string\"").unwrap();
    let err = render_file(file.path(), &RenderOptions::new()).unwrap_err();
    assert!(matches!(err, Error::NotAnObject("a string")));

    assert!(matches!(render_str("{\"a\": ", "en"), Err(Error::Json(_))));
}

#[test]
fn test_document_key_order_is_preserved() {
    let doc: ResumeDocument = r#"{"zeta": 1, "alpha": 2, "mid": 3}"#.parse().unwrap();
    assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_first_entry_fallback_uses_document_order() {
    let resolver = LocaleResolver::new("de").with_default_locale("fr");
    let field = json!({"pt": "", "it": "Ingegnere", "es": "Ingeniera"});
    assert_eq!(resolver.pick(&field, "title").unwrap(), "Ingegnere");
}

#[test]
fn test_nfc_normalization() {
    let decomposed = json!("Educacio\u{301}n");
    let resolver = LocaleResolver::new("es").with_normalization(true);
    assert_eq!(resolver.pick(&decomposed, "x").unwrap(), "Educación");

    let raw = LocaleResolver::new("es");
    assert_eq!(raw.pick(&decomposed, "x").unwrap(), "Educacio\u{301}n");
}

#[test]
fn test_escape_every_special_character() {
    assert_eq!(
        escape(r#"& % $ # _ { } ~ ^ \ ""#),
        r"\& \% \$ \# \_ \{ \} \textasciitilde{} \textasciicircum{} \textbackslash{} ''"
    );
    assert_eq!(escape("plain text"), "plain text");
}

#[test]
fn test_href_keeps_url_verbatim() {
    assert_eq!(
        href(Some("https://x.org/a_b?q=1&r=%20"), &escape("A_B")),
        "\\href{https://x.org/a_b?q=1&r=%20}{A\\_B}"
    );
    assert_eq!(href(None, "text"), "text");
    assert_eq!(href(Some(""), "text"), "text");
}

#[test]
fn test_url_segments_and_display() {
    let parts = segments("Read https://a.org/x, then (https://b.org).");
    assert_eq!(
        parts,
        vec![
            Segment::Text("Read "),
            Segment::Url("https://a.org/x"),
            Segment::Text(", then ("),
            Segment::Url("https://b.org"),
            Segment::Text(")."),
        ]
    );

    let long = "https://example.com/publications/2024/deep-learning-xyz";
    assert_eq!(long.len(), 55);
    assert_eq!(display_url(long, 40), format!("{}\\ldots{{}}", &long[..37]));
}

#[test]
fn test_item_classification() {
    assert!(matches!(ItemShape::classify(&json!("Rust")), ItemShape::Bare(_)));
    assert!(matches!(ItemShape::classify(&json!(3)), ItemShape::Bare(_)));
    assert!(matches!(
        ItemShape::classify(&json!({"name": "Docker"})),
        ItemShape::Structured(_)
    ));
    assert!(matches!(
        ItemShape::classify(&json!({"url": "https://x.org"})),
        ItemShape::Unrecognized(_)
    ));
    assert!(matches!(ItemShape::classify(&json!(null)), ItemShape::Empty));
}

#[test]
fn test_collect_items_mixed_list() {
    let resolver = LocaleResolver::new("es");
    let items = collect_items(
        &json!([
            "Python",
            {"name": {"en": "Containers", "es": "Contenedores"}, "url": "https://docker.com", "level": "avanzado"},
            {"url": "https://no-label.org"},
            true
        ]),
        &resolver,
        "skills",
    )
    .unwrap();

    assert_eq!(
        items,
        vec![
            LinkableItem::new("Python"),
            LinkableItem::new("Contenedores")
                .with_value("avanzado")
                .with_url("https://docker.com"),
        ]
    );
}
