//! LaTeX escaping, hyperlinks and free-text handling.
//!
//! Raw text is escaped exactly once, at the point where it becomes markup.
//! Hyperlink targets are emitted verbatim and never pass through [`escape`].

use crate::model::LinkableItem;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Display length above which link labels are shortened.
pub const URL_DISPLAY_LIMIT: usize = 40;

/// Ellipsis appended to shortened link labels.
pub const ELLIPSIS: &str = "\\ldots{}";

/// `scheme://` followed by anything up to whitespace, a quote, `)`, a brace
/// or a backslash.
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[A-Za-z][A-Za-z0-9+.\-]*://[^\s"'){}\\]+"#).unwrap());

/// `{{ name }}` substitution tokens.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_.\-]+)\s*\}\}").unwrap());

/// Sentence punctuation that ends a URL found in running text.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Escape LaTeX special characters.
///
/// A single pass over the input; every character is looked up once and the
/// substituted output is never rescanned, so backslashes inserted here are
/// never escaped again. Straight double quotes become a closing-quote pair.
pub fn escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                result.push('\\');
                result.push(c);
            }
            '~' => result.push_str("\\textasciitilde{}"),
            '^' => result.push_str("\\textasciicircum{}"),
            '\\' => result.push_str("\\textbackslash{}"),
            '"' => result.push_str("''"),
            _ => result.push(c),
        }
    }
    result
}

/// Wrap already-escaped text in a hyperlink.
///
/// The URL is used verbatim. Without a (non-blank) URL the text is returned
/// unchanged.
pub fn href(url: Option<&str>, escaped_text: &str) -> String {
    match url.map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) => format!("\\href{{{}}}{{{}}}", url, escaped_text),
        None => escaped_text.to_string(),
    }
}

/// Render an item's label, linked when it has a URL.
pub fn link_item(item: &LinkableItem) -> String {
    href(item.url.as_deref(), &escape(&item.label))
}

/// Escaped display label for a URL, shortened past `limit` characters.
///
/// A URL longer than `limit` shows its first `limit - 3` characters
/// followed by an ellipsis.
pub fn display_url(url: &str, limit: usize) -> String {
    if url.chars().count() <= limit {
        return escape(url);
    }
    let keep = limit.saturating_sub(3);
    let head: String = url.chars().take(keep).collect();
    format!("{}{}", escape(&head), ELLIPSIS)
}

/// Link a bare URL, showing a shortened label.
pub fn url_link(url: &str, limit: usize) -> String {
    href(Some(url), &display_url(url, limit))
}

/// Replace `{{name}}` tokens with values from `vars`.
///
/// Runs before escaping; unknown tokens are kept as written.
pub fn substitute<'a>(text: &'a str, vars: &BTreeMap<String, String>) -> Cow<'a, str> {
    if vars.is_empty() || !text.contains("{{") {
        return Cow::Borrowed(text);
    }
    TOKEN_RE.replace_all(text, |caps: &Captures<'_>| match vars.get(&caps[1]) {
        Some(value) => value.clone(),
        None => caps[0].to_string(),
    })
}

/// A piece of free text: literal prose or an embedded URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text, still unescaped.
    Text(&'a str),
    /// A URL found in the text.
    Url(&'a str),
}

/// Split free text into literal and URL segments, in original order.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut last = 0;
    for m in URL_RE.find_iter(text) {
        let url = m.as_str().trim_end_matches(TRAILING_PUNCTUATION);
        if url.ends_with("://") {
            continue;
        }
        if m.start() > last {
            out.push(Segment::Text(&text[last..m.start()]));
        }
        out.push(Segment::Url(url));
        last = m.start() + url.len();
    }
    if last < text.len() {
        out.push(Segment::Text(&text[last..]));
    }
    out
}

/// Escape free text, turning embedded URLs into hyperlinks.
pub fn rich_text(text: &str, limit: usize) -> String {
    segments(text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Text(literal) => escape(literal),
            Segment::Url(url) => url_link(url, limit),
        })
        .collect()
}
