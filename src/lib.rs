//! # cvtex
//!
//! Render structured resume data (JSON) to LaTeX source.
//!
//! The library takes an already parsed resume document and returns a
//! complete LaTeX document as a string. It does no file or network I/O
//! beyond the reader helpers and never compiles the output.
//!
//! ## Quick Start
//!
//! ```
//! use cvtex::{assemble, ResumeDocument};
//!
//! fn main() -> cvtex::Result<()> {
//!     let doc: ResumeDocument = r#"{
//!         "contact": {"name": {"first": "Ada", "last": "Lovelace"}},
//!         "awards": [{"label": {"en": "Prize", "es": "Premio"}, "url": "https://example.com"}]
//!     }"#
//!     .parse()?;
//!
//!     let tex = assemble(&doc, "es")?;
//!     assert!(tex.contains("\\href{https://example.com}{Premio}"));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Localized fields**: any field may map locale tags to text
//! - **Tolerant items**: bare strings or `{label, value, url}` objects
//! - **Safe escaping**: every LaTeX special character escaped exactly once
//! - **Linked free text**: URLs in running text become hyperlinks
//! - **Typed sections**: extra `content`, `items` and `items-compact` sections
//! - **Parallel rendering**: optional Rayon-based section rendering

pub mod error;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    pick, LinkableItem, LocaleResolver, MarkupFragment, ResumeDocument,
    DEFAULT_LOCALE,
};
pub use render::{
    assemble, assemble_with_options, escape, href, render_with_stats, section_order,
    RenderOptions, RenderResult, RenderStats,
};

use std::io::Read;
use std::path::{Path, PathBuf};

/// Render a JSON resume string to LaTeX.
///
/// # Example
///
/// ```
/// let tex = cvtex::render_str(r#"{"philosophy": "Less is more."}"#, "en").unwrap();
/// assert!(tex.contains("\\section*{Philosophy}\nLess is more.\\par"));
/// ```
pub fn render_str(json: &str, locale: &str) -> Result<String> {
    let doc = ResumeDocument::parse_str(json)?;
    assemble(&doc, locale)
}

/// Render a JSON resume read from `reader` to LaTeX.
pub fn render_reader<R: Read>(reader: R, options: &RenderOptions) -> Result<String> {
    let doc = ResumeDocument::from_reader(reader)?;
    assemble_with_options(&doc, options)
}

/// Render a JSON resume file to LaTeX.
///
/// # Example
///
/// ```no_run
/// use cvtex::{render_file, RenderOptions};
///
/// let tex = render_file("resume.json", &RenderOptions::new().with_locale("es")).unwrap();
/// std::fs::write("resume.tex", tex).unwrap();
/// ```
pub fn render_file<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let file = std::fs::File::open(path)?;
    render_reader(std::io::BufReader::new(file), options)
}

/// Builder for rendering resumes.
///
/// # Example
///
/// ```
/// use cvtex::CvTex;
///
/// let tex = CvTex::new()
///     .locale("es")
///     .default_locale("en")
///     .var("orcid", "0000-0001")
///     .parse_str(r#"{"philosophy": {"en": "ORCID {{orcid}}"}}"#)?
///     .to_latex()?;
/// assert!(tex.contains("ORCID 0000-0001"));
/// # Ok::<(), cvtex::Error>(())
/// ```
pub struct CvTex {
    options: RenderOptions,
}

impl CvTex {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: RenderOptions::default(),
        }
    }

    /// Set the output locale.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.options = self.options.with_locale(locale);
        self
    }

    /// Set the fallback locale.
    pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
        self.options = self.options.with_default_locale(locale);
        self
    }

    /// Set the email provider priority.
    pub fn contact_priority<I, S>(mut self, providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.with_contact_priority(providers);
        self
    }

    /// Set the profile image path.
    pub fn photo(mut self, path: impl Into<PathBuf>) -> Self {
        self.options = self.options.with_photo(path);
        self
    }

    /// Add a `{{token}}` substitution value.
    pub fn var(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.options = self.options.with_substitution(token, value);
        self
    }

    /// Render sections in parallel.
    pub fn parallel(mut self) -> Self {
        self.options = self.options.with_parallel(true);
        self
    }

    /// Parse a JSON resume string.
    pub fn parse_str(self, json: &str) -> Result<CvTexResult> {
        Ok(CvTexResult {
            document: ResumeDocument::parse_str(json)?,
            options: self.options,
        })
    }

    /// Parse a JSON resume file.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<CvTexResult> {
        let file = std::fs::File::open(path)?;
        Ok(CvTexResult {
            document: ResumeDocument::from_reader(std::io::BufReader::new(file))?,
            options: self.options,
        })
    }

    /// Wrap an already parsed document.
    pub fn document(self, document: ResumeDocument) -> CvTexResult {
        CvTexResult {
            document,
            options: self.options,
        }
    }

    /// The options collected so far.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}

impl Default for CvTex {
    fn default() -> Self {
        Self::new()
    }
}

/// A parsed resume paired with its render options.
pub struct CvTexResult {
    /// The parsed document
    pub document: ResumeDocument,
    options: RenderOptions,
}

impl CvTexResult {
    /// Render to LaTeX.
    pub fn to_latex(&self) -> Result<String> {
        assemble_with_options(&self.document, &self.options)
    }

    /// Render to LaTeX with statistics.
    pub fn to_latex_with_stats(&self) -> Result<RenderResult> {
        render_with_stats(&self.document, &self.options)
    }

    /// Get the document.
    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_options() {
        let builder = CvTex::new()
            .locale("es")
            .default_locale("pt")
            .contact_priority(["proton"])
            .photo("photo.jpg")
            .var("orcid", "x")
            .parallel();

        let options = builder.options();
        assert_eq!(options.locale, "es");
        assert_eq!(options.default_locale, "pt");
        assert_eq!(options.contact_priority, vec!["proton"]);
        assert_eq!(options.photo.as_deref(), Some(Path::new("photo.jpg")));
        assert_eq!(options.substitutions.get("orcid").unwrap(), "x");
        assert!(options.parallel);
    }

    #[test]
    fn test_builder_default() {
        let builder = CvTex::default();
        assert_eq!(builder.options().locale, DEFAULT_LOCALE);
        assert!(!builder.options().parallel);
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_render_str_invalid_json() {
        assert!(matches!(render_str("{", "en"), Err(Error::Json(_))));
    }

    #[test]
    fn test_render_str_non_object_root() {
        assert!(matches!(render_str("[1, 2]", "en"), Err(Error::NotAnObject(_))));
    }

    #[test]
    fn test_render_reader() {
        let json = br#"{"admin-skills": ["Budgeting"]}"#;
        let tex = render_reader(&json[..], &RenderOptions::new()).unwrap();
        assert!(tex.contains("\\section*{Administrative Skills}\nBudgeting."));
    }

    #[test]
    fn test_render_file_missing() {
        let result = render_file("/nonexistent/resume.json", &RenderOptions::new());
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_result_with_stats() {
        let result = CvTex::new()
            .parse_str(r#"{"awards": ["A"], "teaching": ["B"]}"#)
            .unwrap()
            .to_latex_with_stats()
            .unwrap();
        assert_eq!(result.stats.section_ids, vec!["awards", "teaching"]);
        assert_eq!(result.stats.item_count, 2);
    }
}
