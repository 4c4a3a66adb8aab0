//! Localized values and locale resolution.
//!
//! A localized field is either a plain value, which reads the same in every
//! locale, or an object keyed by locale tag:
//!
//! ```
//! use cvtex::model::pick;
//! use serde_json::json;
//!
//! let title = json!({"en": "Engineer", "es": "Ingeniero"});
//! assert_eq!(pick("es", &title).unwrap(), "Ingeniero");
//! assert_eq!(pick("fr", &title).unwrap(), "Engineer");
//! assert_eq!(pick("fr", &json!("Engineer")).unwrap(), "Engineer");
//! ```

use super::document::is_blank;
use crate::error::{Error, Result};
use serde_json::Value;
use unicode_normalization::UnicodeNormalization;

/// Locale used when neither the requested locale nor a configured default
/// has a value.
pub const DEFAULT_LOCALE: &str = "en";

/// Resolve a localized field with the default fallback locale.
///
/// Fails with [`Error::MissingLocalizedValue`] if `field` is an empty mapping.
pub fn pick(locale: &str, field: &Value) -> Result<String> {
    LocaleResolver::new(locale).pick(field, "value")
}

/// The requested/default locale pair plus text normalization settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleResolver {
    locale: String,
    default_locale: String,
    normalize: bool,
}

impl LocaleResolver {
    /// Create a resolver for `locale` with [`DEFAULT_LOCALE`] as fallback.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            default_locale: DEFAULT_LOCALE.to_string(),
            normalize: false,
        }
    }

    /// Set the fallback locale.
    pub fn with_default_locale(mut self, default_locale: impl Into<String>) -> Self {
        self.default_locale = default_locale.into();
        self
    }

    /// Normalize resolved text to Unicode NFC.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// The requested locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// The fallback locale.
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Select the locale variant of an arbitrary value.
    ///
    /// Objects are treated as locale mappings, anything else is returned
    /// unchanged. `name` identifies the field in errors.
    pub fn select<'a>(&self, field: &'a Value, name: &str) -> Result<&'a Value> {
        match field {
            Value::Object(map) => fallback(
                map.iter().map(|(tag, v)| (tag.as_str(), v)),
                &self.locale,
                &self.default_locale,
                is_blank,
            )
            .ok_or_else(|| Error::MissingLocalizedValue(name.to_string())),
            other => Ok(other),
        }
    }

    /// Select a locale variant only if `value` looks like a locale mapping.
    ///
    /// Used on whole sections, where an object may be either structured data
    /// or a per-locale copy of it.
    pub fn localize<'a>(&self, value: &'a Value, name: &str) -> Result<&'a Value> {
        if is_locale_map(value) {
            self.select(value, name)
        } else {
            Ok(value)
        }
    }

    /// Resolve a localized field to text.
    ///
    /// Arrays of scalars are joined with `", "`. Null resolves to an empty
    /// string.
    pub fn pick(&self, field: &Value, name: &str) -> Result<String> {
        let selected = self.select(field, name)?;
        let text = match selected {
            Value::Array(items) => items
                .iter()
                .filter_map(scalar_text)
                .filter(|s| !s.trim().is_empty())
                .collect::<Vec<_>>()
                .join(", "),
            other => scalar_text(other).unwrap_or_default(),
        };
        Ok(self.normalized(text))
    }

    /// Resolve an optional field; absent, null and blank results are `None`.
    pub fn pick_opt(&self, field: Option<&Value>, name: &str) -> Result<Option<String>> {
        match field {
            None => Ok(None),
            Some(v) if is_blank(v) => Ok(None),
            Some(v) => {
                let text = self.pick(v, name)?;
                Ok(if text.trim().is_empty() {
                    None
                } else {
                    Some(text)
                })
            }
        }
    }

    fn normalized(&self, text: String) -> String {
        if self.normalize {
            text.nfc().collect()
        } else {
            text
        }
    }
}

/// Check whether an object is keyed by locale tags.
///
/// All keys must be two-letter language tags with an optional region, such
/// as `en`, `es`, `pt-BR` or `zh_Hant`, and no value may itself be an object.
pub fn is_locale_map(value: &Value) -> bool {
    match value {
        Value::Object(map) => {
            !map.is_empty()
                && map
                    .iter()
                    .all(|(tag, v)| is_locale_tag(tag) && !v.is_object())
        }
        _ => false,
    }
}

fn is_locale_tag(tag: &str) -> bool {
    let (lang, region) = match tag.split_once(['-', '_']) {
        Some((lang, region)) => (lang, Some(region)),
        None => (tag, None),
    };
    let lang_ok = lang.len() == 2 && lang.chars().all(|c| c.is_ascii_lowercase());
    let region_ok = region.map_or(true, |r| {
        (2..=8).contains(&r.len()) && r.chars().all(|c| c.is_ascii_alphanumeric())
    });
    lang_ok && region_ok
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn fallback<'a, T: ?Sized>(
    entries: impl Iterator<Item = (&'a str, &'a T)> + Clone,
    locale: &str,
    default_locale: &str,
    blank: impl Fn(&T) -> bool,
) -> Option<&'a T> {
    let find = |tag: &str| {
        entries
            .clone()
            .find(|(t, v)| *t == tag && !blank(v))
            .map(|(_, v)| v)
    };
    find(locale)
        .or_else(|| find(default_locale))
        .or_else(|| entries.clone().find(|(_, v)| !blank(v)).map(|(_, v)| v))
        .or_else(|| entries.clone().next().map(|(_, v)| v))
}
