//! Resume data model.
//!
//! These types sit between the raw JSON document and the LaTeX renderers:
//! the document wrapper, locale resolution, normalized list items and the
//! markup fragments renderers return.

mod document;
mod fragment;
mod item;
mod localized;

pub use document::{is_blank, value_kind, ResumeDocument};
pub use fragment::MarkupFragment;
pub use item::{collect_items, ItemShape, LinkableItem};
pub(crate) use item::first_of;
pub use localized::{is_locale_map, pick, LocaleResolver, DEFAULT_LOCALE};
