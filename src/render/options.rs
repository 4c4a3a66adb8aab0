//! Rendering options and configuration.

use super::escape::URL_DISPLAY_LIMIT;
use crate::model::{LocaleResolver, DEFAULT_LOCALE};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Email providers tried, in order, when `contact.email` is a mapping.
pub const DEFAULT_CONTACT_PRIORITY: &[&str] = &["uc", "google", "proton"];

/// Options for rendering a resume.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Locale to render
    pub locale: String,

    /// Locale used when a field has no value for `locale`
    pub default_locale: String,

    /// Email provider keys in priority order
    pub contact_priority: Vec<String>,

    /// Already materialized profile image, emitted verbatim in `\includegraphics`
    pub photo: Option<PathBuf>,

    /// Values for `{{token}}` substitution; override the document's `identifiers`
    pub substitutions: BTreeMap<String, String>,

    /// Normalize text to Unicode NFC before escaping
    pub normalize_unicode: bool,

    /// URLs longer than this show a shortened label
    pub url_display_limit: usize,

    /// Render sections on the rayon thread pool
    pub parallel: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Set the fallback locale.
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    /// Set the email provider priority.
    pub fn with_contact_priority<I, S>(mut self, providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contact_priority = providers.into_iter().map(Into::into).collect();
        self
    }

    /// Set the profile image path.
    pub fn with_photo(mut self, path: impl Into<PathBuf>) -> Self {
        self.photo = Some(path.into());
        self
    }

    /// Add a substitution value.
    pub fn with_substitution(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.substitutions.insert(token.into(), value.into());
        self
    }

    /// Enable or disable NFC normalization.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Set the display limit for URLs.
    pub fn with_url_display_limit(mut self, limit: usize) -> Self {
        self.url_display_limit = limit;
        self
    }

    /// Enable or disable parallel section rendering.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build the locale resolver these options describe.
    pub fn resolver(&self) -> LocaleResolver {
        LocaleResolver::new(self.locale.clone())
            .with_default_locale(self.default_locale.clone())
            .with_normalization(self.normalize_unicode)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            default_locale: DEFAULT_LOCALE.to_string(),
            contact_priority: DEFAULT_CONTACT_PRIORITY
                .iter()
                .map(|s| s.to_string())
                .collect(),
            photo: None,
            substitutions: BTreeMap::new(),
            normalize_unicode: true,
            url_display_limit: URL_DISPLAY_LIMIT,
            parallel: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.locale, "en");
        assert_eq!(options.default_locale, "en");
        assert_eq!(options.contact_priority, vec!["uc", "google", "proton"]);
        assert_eq!(options.url_display_limit, 40);
        assert!(options.normalize_unicode);
        assert!(!options.parallel);
    }

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_locale("es")
            .with_default_locale("pt")
            .with_contact_priority(["proton", "uc"])
            .with_photo("out/photo.jpg")
            .with_substitution("orcid", "0000-0001")
            .with_parallel(true);

        assert_eq!(options.locale, "es");
        assert_eq!(options.contact_priority, vec!["proton", "uc"]);
        assert_eq!(options.photo, Some(PathBuf::from("out/photo.jpg")));
        assert_eq!(options.substitutions.get("orcid").unwrap(), "0000-0001");
        assert!(options.parallel);

        let resolver = options.resolver();
        assert_eq!(resolver.locale(), "es");
        assert_eq!(resolver.default_locale(), "pt");
    }
}
