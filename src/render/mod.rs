//! Rendering module for turning resume documents into LaTeX.

mod assemble;
pub(crate) mod context;
pub mod escape;
mod labels;
mod options;
mod result;
pub mod sections;

pub use assemble::{
    assemble, assemble_with_options, render_with_stats, section_order, SectionSpec, SECTIONS,
};
pub use context::{section_header, RenderContext};
pub use escape::{escape, href, link_item, rich_text};
pub use labels::{babel_language, builtin_label};
pub use options::{RenderOptions, DEFAULT_CONTACT_PRIORITY};
pub use result::{RenderResult, RenderStats};
pub use sections::generic::{SectionKind, TypedSection};
