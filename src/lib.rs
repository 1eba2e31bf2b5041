//! # chatdigest
//!
//! Turns semi-structured daily chat summaries into a topic tree and renders
//! it as a styled, self-contained HTML page.
//!
//! ## Quick Start
//!
//! ```
//! use chatdigest::{parse, render};
//!
//! let doc = parse("2025-01-01\n1. Alpha\n- Kind: stuff\n2. Beta\n- Other: thing");
//! assert_eq!(doc.date, "2025-01-01");
//! assert_eq!(doc.topic_count(), 2);
//!
//! let html = render::to_html(&doc, &render::RenderOptions::default()).unwrap();
//! assert!(html.contains("topic-card"));
//! ```
//!
//! ## Features
//!
//! - **Tolerant parsing**: Arabic, Chinese and Roman topic numbering, mixed
//!   bullet styles, full-width colons and `&nbsp;` indentation
//! - **Deterministic rendering**: cyclic topic icons and colors, font and
//!   QR-image slots, optional page zoom
//! - **Multiple output formats**: HTML, plain text outline, JSON
//! - **Cleanup pipeline**: emphasis stripping and CJK/Latin spacing before parse
//! - **Parallel processing**: Uses Rayon for batches of inputs

pub mod convert;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{ConvertOptions, ConvertResult, OutputFormat};
pub use error::{Error, Result};
pub use model::{Document, Section, Topic};
pub use parser::{CleanupOptions, CleanupPreset, FallbackMode, ParseOptions, TextParser};
pub use render::{Font, JsonFormat, RenderOptions, RenderStats};

use std::path::Path;
use std::sync::OnceLock;

use rayon::prelude::*;

/// Parse digest text with default options.
///
/// Parsing never fails: unrecognized lines end up in the document preamble
/// or as content of the current section.
///
/// # Example
///
/// ```
/// let doc = chatdigest::parse("一、 出海经验\n- 观点：先做小市场");
/// assert_eq!(doc.topics[0].title, "出海经验");
/// assert_eq!(doc.topics[0].sections[0].title, "观点");
/// ```
pub fn parse(text: &str) -> Document {
    default_parser().parse(text)
}

/// Parser with default options, compiled on first use.
fn default_parser() -> &'static TextParser {
    static PARSER: OnceLock<TextParser> = OnceLock::new();
    PARSER.get_or_init(TextParser::new)
}

/// Parse digest text with custom options.
///
/// # Example
///
/// ```
/// use chatdigest::{parse_with_options, ParseOptions};
///
/// let options = ParseOptions::new().with_reference_date("2024-12-31");
/// let doc = parse_with_options("1. Alpha", options);
/// assert_eq!(doc.date, "2024-12-31");
/// ```
pub fn parse_with_options(text: &str, options: ParseOptions) -> Document {
    TextParser::with_options(options).parse(text)
}

/// Parse a UTF-8 digest file.
///
/// # Example
///
/// ```no_run
/// use chatdigest::parse_file;
///
/// let doc = parse_file("daily.md").unwrap();
/// println!("Topics: {}", doc.topic_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    parse_file_with_options(path, ParseOptions::default())
}

/// Parse a UTF-8 digest file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let text = convert::read_text(path)?;
    Ok(parse_with_options(&text, options))
}

/// Parse many texts in parallel with one shared parser.
///
/// Documents are returned in input order.
pub fn parse_many<S: AsRef<str> + Sync>(texts: &[S], options: ParseOptions) -> Vec<Document> {
    let parser = TextParser::with_options(options);
    texts
        .par_iter()
        .map(|text| parser.parse(text.as_ref()))
        .collect()
}

/// Parse digest text and render it as HTML with default options.
///
/// # Example
///
/// ```
/// let html = chatdigest::to_html("1. Alpha\n- Kind: stuff").unwrap();
/// assert!(html.contains("<h3 class=\"topic-title\">Alpha</h3>"));
/// ```
pub fn to_html(text: &str) -> Result<String> {
    render::to_html(&parse(text), &RenderOptions::default())
}

/// Parse digest text and render it as HTML with custom options.
pub fn to_html_with_options(
    text: &str,
    parse_options: ParseOptions,
    render_options: &RenderOptions,
) -> Result<String> {
    render::to_html(&parse_with_options(text, parse_options), render_options)
}

/// Builder for parsing and rendering digests.
///
/// # Example
///
/// ```
/// use chatdigest::{Digest, Font};
///
/// let html = Digest::new()
///     .with_reference_date("2025-01-01")
///     .with_font(Font::Inter)
///     .with_zoom(1.2)
///     .parse("1. Alpha\n- Kind: stuff")
///     .to_html()?;
/// assert!(html.contains("font-inter"));
/// # Ok::<(), chatdigest::Error>(())
/// ```
pub struct Digest {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Digest {
    /// Create a new Digest builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Date used when the text carries none.
    pub fn with_reference_date(mut self, date: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_reference_date(date);
        self
    }

    /// Wrap unstructured text in a single topic.
    pub fn with_fallback_topic(mut self) -> Self {
        self.parse_options = self.parse_options.with_fallback_topic();
        self
    }

    /// Set cleanup preset applied before parsing.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.parse_options = self.parse_options.with_cleanup_preset(preset);
        self
    }

    /// Set the page font.
    pub fn with_font(mut self, font: Font) -> Self {
        self.render_options = self.render_options.with_font(font);
        self
    }

    /// Set the QR/image slot reference.
    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_image_ref(image_ref);
        self
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_title(title);
        self
    }

    /// Set the page zoom factor.
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.render_options = self.render_options.with_zoom(zoom);
        self
    }

    /// Use a custom page template.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_template(template);
        self
    }

    /// Parse digest text and return a result wrapper.
    pub fn parse(self, text: &str) -> DigestResult {
        let document = TextParser::with_options(self.parse_options).parse(text);
        DigestResult {
            document,
            render_options: self.render_options,
        }
    }

    /// Parse a digest file.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<DigestResult> {
        let text = convert::read_text(path)?;
        Ok(self.parse(&text))
    }
}

impl Default for Digest {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a digest.
pub struct DigestResult {
    /// The parsed document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl DigestResult {
    /// Convert to HTML.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.document, &self.render_options)
    }

    /// Convert to a plain text outline.
    pub fn to_text(&self) -> String {
        render::to_text(&self.document)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get plain text of all topics without the date line.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_builder() {
        let digest = Digest::new()
            .with_reference_date("2025-02-03")
            .with_fallback_topic()
            .with_cleanup(CleanupPreset::Standard)
            .with_font(Font::NotoSerif)
            .with_title("Weekly");

        assert_eq!(
            digest.parse_options.reference_date.as_deref(),
            Some("2025-02-03")
        );
        assert_eq!(digest.parse_options.fallback, FallbackMode::SingleTopic);
        assert!(digest.parse_options.cleanup.is_some());
        assert_eq!(digest.render_options.font, Font::NotoSerif);
        assert_eq!(digest.render_options.title, "Weekly");
    }

    #[test]
    fn test_digest_builder_default() {
        let digest = Digest::default();
        assert!(digest.parse_options.cleanup.is_none());
        assert_eq!(digest.render_options, RenderOptions::default());
    }

    #[test]
    fn test_digest_result_outputs() {
        let result = Digest::new().parse("2025-01-01\n1. Alpha\n- Kind: stuff");
        assert_eq!(result.document().topic_count(), 1);
        assert!(result.to_html().unwrap().contains("2025-01-01"));
        assert_eq!(result.to_text(), "2025-01-01\n\n1. Alpha\n- Kind: stuff");
        assert_eq!(result.plain_text(), "Alpha\nKind: stuff");
        assert!(result
            .to_json(JsonFormat::Compact)
            .unwrap()
            .starts_with("{\"date\":\"2025-01-01\""));
    }

    #[test]
    fn test_digest_invalid_template() {
        let result = Digest::new()
            .with_template("<html>no slots</html>")
            .parse("1. Alpha");
        assert!(matches!(result.to_html(), Err(Error::Template(_))));
    }

    #[test]
    fn test_parse_many_keeps_order() {
        let texts = vec!["1. A", "1. B", "1. C", "1. D"];
        let docs = parse_many(&texts, ParseOptions::new().with_reference_date("2025-01-01"));
        let titles: Vec<&str> = docs.iter().map(|d| d.topics[0].title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_default_parser_is_shared() {
        assert!(std::ptr::eq(default_parser(), default_parser()));
        assert_eq!(parse("1. A").topics[0].title, parse("1. A").topics[0].title);
    }

    #[test]
    fn test_parse_empty_input() {
        let doc = parse("");
        assert!(doc.is_empty());
        assert!(parser::is_valid_date(&doc.date));
        assert!(to_html("").unwrap().contains("</html>"));
    }

    #[test]
    fn test_parse_file_missing() {
        assert!(matches!(
            parse_file("/nonexistent/daily.md"),
            Err(Error::Io(_))
        ));
    }
}
