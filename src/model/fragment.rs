//! Markup fragments.

use std::fmt;

/// An ordered, self-contained run of LaTeX lines for one section.
///
/// Fragments are built in one go from a line vector and only grow by
/// consuming themselves, so a rendered fragment is never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupFragment {
    lines: Vec<String>,
}

impl MarkupFragment {
    /// An empty fragment (the section is omitted).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fragment from lines.
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// The fragment's lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Check if the fragment produces no output.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Prefix a header line. Empty fragments stay empty.
    pub fn with_header(self, header: String) -> Self {
        if self.is_empty() {
            return self;
        }
        let mut lines = Vec::with_capacity(self.lines.len() + 1);
        lines.push(header);
        lines.extend(self.lines);
        Self { lines }
    }

    /// Append another fragment's lines.
    pub fn concat(mut self, other: MarkupFragment) -> Self {
        self.lines.extend(other.lines);
        self
    }

    /// Join the lines with newlines.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    /// Consume the fragment, returning its lines.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl FromIterator<String> for MarkupFragment {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for MarkupFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_on_empty_fragment_is_dropped() {
        let fragment = MarkupFragment::new().with_header("\\section*{Awards}".to_string());
        assert!(fragment.is_empty());
    }

    #[test]
    fn test_header_prefix_and_render() {
        let fragment = MarkupFragment::from_lines(vec!["a".into(), "b".into()])
            .with_header("h".to_string());
        assert_eq!(fragment.len(), 3);
        assert_eq!(fragment.render(), "h\na\nb");
        assert_eq!(fragment.to_string(), "h\na\nb");
    }

    #[test]
    fn test_concat_preserves_order() {
        let a: MarkupFragment = vec!["1".to_string()].into_iter().collect();
        let b = MarkupFragment::from_lines(vec!["2".into()]);
        assert_eq!(a.concat(b).into_lines(), vec!["1", "2"]);
    }
}
