//! One-shot conversion from digest text to an output format.
//!
//! # Example
//!
//! ```no_run
//! use chatdigest::convert::{convert_file, ConvertOptions, OutputFormat};
//!
//! fn main() -> chatdigest::Result<()> {
//!     let options = ConvertOptions::new().with_format(OutputFormat::Html);
//!     let result = convert_file("daily.md", &options)?;
//!     std::fs::write("daily.html", result.content)?;
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Result;
use crate::model::Document;
use crate::parser::{ParseOptions, TextParser};
use crate::render::{self, JsonFormat, RenderOptions, RenderStats};

/// File extensions accepted as digest input.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Parsing options
    pub parse: ParseOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Output format
    pub output_format: OutputFormat,

    /// Whether to collect statistics during conversion
    pub collect_stats: bool,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Standalone HTML page
    #[default]
    Html,

    /// Plain text outline
    Text,

    /// JSON structure
    Json,
}

impl OutputFormat {
    /// MIME type of the output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Html => "text/html",
            OutputFormat::Text => "text/plain",
            OutputFormat::Json => "application/json",
        }
    }

    /// File extension used for the output.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

/// Result of document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Converted content
    pub content: String,

    /// Parsed source document
    pub document: Document,

    /// Rendering statistics (if collected)
    pub stats: Option<RenderStats>,

    /// MIME type of the output
    pub mime_type: &'static str,
}

impl ConvertResult {
    /// Create a new conversion result.
    pub fn new(content: String, document: Document) -> Self {
        Self {
            content,
            document,
            stats: None,
            mime_type: OutputFormat::default().mime_type(),
        }
    }

    /// Set rendering statistics.
    pub fn with_stats(mut self, stats: RenderStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Set MIME type.
    pub fn with_mime_type(mut self, mime_type: &'static str) -> Self {
        self.mime_type = mime_type;
        self
    }

    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Check if a path has a supported input extension.
pub fn is_supported_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            SUPPORTED_EXTENSIONS.iter().any(|e| *e == ext)
        })
        .unwrap_or(false)
}

/// Read a UTF-8 text file, dropping a leading byte order mark.
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let bytes = std::fs::read(path.as_ref())?;
    let mut text = String::from_utf8(bytes)?;
    if text.starts_with('\u{feff}') {
        text.replace_range(..'\u{feff}'.len_utf8(), "");
    }
    Ok(text)
}

/// Convert digest text.
pub fn convert_str(text: &str, options: &ConvertOptions) -> Result<ConvertResult> {
    let document = TextParser::with_options(options.parse.clone()).parse(text);
    render_document(document, options)
}

/// Convert a digest text file.
pub fn convert_file<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> Result<ConvertResult> {
    let path = path.as_ref();
    log::debug!("Converting {}", path.display());
    let text = read_text(path)?;
    convert_str(&text, options)
}

/// Convert many files in parallel.
///
/// Results are returned in input order, one per path.
pub fn convert_files(paths: &[PathBuf], options: &ConvertOptions) -> Vec<Result<ConvertResult>> {
    paths
        .par_iter()
        .map(|path| convert_file(path, options))
        .collect()
}

fn render_document(document: Document, options: &ConvertOptions) -> Result<ConvertResult> {
    let format = options.output_format;
    let mut stats = None;

    let content = match format {
        OutputFormat::Html if options.collect_stats => {
            let rendered = render::to_html_with_stats(&document, &options.render)?;
            stats = Some(rendered.stats);
            rendered.content
        }
        OutputFormat::Html => render::to_html(&document, &options.render)?,
        OutputFormat::Text => render::to_text(&document),
        OutputFormat::Json => render::to_json(&document, JsonFormat::Pretty)?,
    };

    if stats.is_none() && options.collect_stats {
        stats = Some(document_stats(&document));
    }

    let mut result = ConvertResult::new(content, document).with_mime_type(format.mime_type());
    if let Some(stats) = stats {
        result = result.with_stats(stats);
    }
    Ok(result)
}

/// Statistics over the whole document, independent of any renderer.
fn document_stats(document: &Document) -> RenderStats {
    let mut stats = RenderStats::new();
    for topic in &document.topics {
        stats.add_topic(topic);
        for section in &topic.sections {
            stats.add_section(section);
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_options_builder() {
        let options = ConvertOptions::new()
            .with_stats(true)
            .with_format(OutputFormat::Text);

        assert!(options.collect_stats);
        assert_eq!(options.output_format, OutputFormat::Text);
    }

    #[test]
    fn test_supported_paths() {
        assert!(is_supported_path(Path::new("daily.md")));
        assert!(is_supported_path(Path::new("daily.TXT")));
        assert!(!is_supported_path(Path::new("daily.pdf")));
        assert!(!is_supported_path(Path::new("daily")));
    }

    #[test]
    fn test_convert_str_formats() {
        let text = "2025-01-01\n1. Alpha\n- Kind: stuff";

        let html = convert_str(text, &ConvertOptions::new()).unwrap();
        assert_eq!(html.mime_type, "text/html");
        assert!(html.content.contains("Alpha"));
        assert!(html.stats.is_none());

        let json = convert_str(text, &ConvertOptions::new().with_format(OutputFormat::Json))
            .unwrap();
        assert_eq!(json.mime_type, "application/json");
        assert!(json.content.contains("\"date\": \"2025-01-01\""));

        let outline = convert_str(text, &ConvertOptions::new().with_format(OutputFormat::Text))
            .unwrap();
        assert_eq!(outline.content, "2025-01-01\n\n1. Alpha\n- Kind: stuff");
    }

    #[test]
    fn test_stats_for_every_format() {
        let text = "1. Alpha\n- Kind: stuff\n- More: a\n2. Beta";
        for format in [OutputFormat::Html, OutputFormat::Text, OutputFormat::Json] {
            let options = ConvertOptions::new().with_format(format).with_stats(true);
            let stats = convert_str(text, &options).unwrap().stats.unwrap();
            assert_eq!(stats.topic_count, 2);
            assert_eq!(stats.section_count, 2);
            assert_eq!(stats.fragment_count, 2);
        }
    }
}
