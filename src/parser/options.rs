//! Parsing options and configuration.

use super::{CleanupOptions, CleanupPreset};

/// Default label for sections synthesized without an explicit label.
pub const DEFAULT_SECTION_TITLE: &str = "content";

/// Default indent (in columns) at which a list item becomes nested detail.
pub const DEFAULT_NESTED_INDENT: usize = 4;

/// Standalone header labels skipped by default.
pub const DEFAULT_BOILERPLATE_LABELS: &[&str] =
    &["内容总结", "内容摘要", "content summary", "summary"];

/// Options for parsing digest text.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Date used when the text contains none (`YYYY-MM-DD`)
    pub reference_date: Option<String>,

    /// Indent at or above which list items nest into the previous section
    pub nested_indent: Option<usize>,

    /// Label for synthesized sections
    pub default_section_title: String,

    /// Standalone header labels to skip (compared case-insensitively)
    pub boilerplate_labels: Vec<String>,

    /// What to do when no topic is recognized
    pub fallback: FallbackMode,

    /// Input normalization applied before parsing
    pub cleanup: Option<CleanupOptions>,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reference date used when the text has no date.
    pub fn with_reference_date(mut self, date: impl Into<String>) -> Self {
        self.reference_date = Some(date.into());
        self
    }

    /// Set the nesting threshold, or `None` to disable nesting.
    pub fn with_nested_indent(mut self, indent: Option<usize>) -> Self {
        self.nested_indent = indent;
        self
    }

    /// Set the label used for synthesized sections.
    pub fn with_default_section_title(mut self, title: impl Into<String>) -> Self {
        self.default_section_title = title.into();
        self
    }

    /// Add a boilerplate header label to skip.
    pub fn with_boilerplate_label(mut self, label: impl Into<String>) -> Self {
        self.boilerplate_labels.push(label.into());
        self
    }

    /// Set fallback mode.
    pub fn with_fallback(mut self, fallback: FallbackMode) -> Self {
        self.fallback = fallback;
        self
    }

    /// Wrap all lines in one topic when no topic is recognized.
    pub fn with_fallback_topic(mut self) -> Self {
        self.fallback = FallbackMode::SingleTopic;
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = Some(CleanupOptions::from_preset(preset));
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            reference_date: None,
            nested_indent: Some(DEFAULT_NESTED_INDENT),
            default_section_title: DEFAULT_SECTION_TITLE.to_string(),
            boilerplate_labels: DEFAULT_BOILERPLATE_LABELS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fallback: FallbackMode::None,
            cleanup: None,
        }
    }
}

/// Behavior when a parse recognizes no topic at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackMode {
    /// Return the document with zero topics
    #[default]
    None,
    /// Wrap every non-blank line in a single synthesized topic
    SingleTopic,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .with_reference_date("2024-12-31")
            .with_nested_indent(Some(2))
            .with_default_section_title("内容")
            .with_boilerplate_label("Highlights")
            .with_fallback_topic();

        assert_eq!(options.reference_date.as_deref(), Some("2024-12-31"));
        assert_eq!(options.nested_indent, Some(2));
        assert_eq!(options.default_section_title, "内容");
        assert!(options.boilerplate_labels.iter().any(|l| l == "Highlights"));
        assert_eq!(options.fallback, FallbackMode::SingleTopic);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.nested_indent, Some(DEFAULT_NESTED_INDENT));
        assert_eq!(options.default_section_title, "content");
        assert_eq!(options.fallback, FallbackMode::None);
        assert!(options.cleanup.is_none());
    }
}
