//! Rendering result with statistics.

use crate::model::MarkupFragment;
use serde::{Deserialize, Serialize};

/// Result of rendering a resume, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The complete LaTeX document
    pub content: String,

    /// Rendering statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: RenderStats) -> Self {
        Self { content, stats }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected while assembling a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of sections that produced output
    pub section_count: u32,

    /// Number of `\href` links emitted
    pub link_count: u32,

    /// Number of `\item` lines emitted
    pub item_count: u32,

    /// Ids of the rendered sections, in output order
    pub section_ids: Vec<String>,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one rendered section.
    pub fn add_section(&mut self, id: &str, fragment: &MarkupFragment) {
        self.section_count += 1;
        self.section_ids.push(id.to_string());
        for line in fragment.lines() {
            self.link_count += line.matches("\\href{").count() as u32;
            if line.trim_start().starts_with("\\item ") {
                self.item_count += 1;
            }
        }
    }
}
