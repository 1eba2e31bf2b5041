//! Single-pass digest text parser.

use crate::model::{Document, Section, Topic};

use super::cleanup::CleanupPipeline;
use super::date::DateExtractor;
use super::grammar::{split_label, strip_trailing_colons, LineGrammar, LineKind};
use super::options::{FallbackMode, ParseOptions};

/// Title of the topic synthesized by [`FallbackMode::SingleTopic`].
pub const FALLBACK_TOPIC_TITLE: &str = "content summary";

/// Section title of the topic synthesized by [`FallbackMode::SingleTopic`].
pub const FALLBACK_SECTION_TITLE: &str = "main content";

/// Parser for semi-structured digest text.
///
/// The parser holds compiled patterns only; every call to [`TextParser::parse`]
/// starts from fresh state, so one parser can be shared across threads.
#[derive(Debug, Clone)]
pub struct TextParser {
    options: ParseOptions,
    grammar: LineGrammar,
    dates: DateExtractor,
    cleanup: Option<CleanupPipeline>,
}

impl TextParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        let grammar = LineGrammar::new(options.boilerplate_labels.as_slice());
        let cleanup = options.cleanup.clone().map(CleanupPipeline::new);
        Self {
            options,
            grammar,
            dates: DateExtractor::new(),
            cleanup,
        }
    }

    /// Get the parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Get the line grammar.
    pub fn grammar(&self) -> &LineGrammar {
        &self.grammar
    }

    /// Parse text into a document. Never fails.
    pub fn parse(&self, text: &str) -> Document {
        let cleaned;
        let text = match self.cleanup {
            Some(ref cleanup) => {
                cleaned = cleanup.process(text);
                cleaned.as_str()
            }
            None => text,
        };

        let date = self
            .dates
            .resolve(text, self.options.reference_date.as_deref());

        let state = text
            .lines()
            .fold(ParseState::new(date, &self.options), |mut state, line| {
                state.apply(self.grammar.classify(line));
                state
            });

        let document = state.finish();
        log::debug!(
            "Parsed {} topics, {} sections, {} preamble lines",
            document.topic_count(),
            document.section_count(),
            document.preamble.len()
        );
        document
    }
}

impl Default for TextParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable state threaded through one parse.
///
/// The current topic is always the last one in the document and the
/// current section is always that topic's last section, so the state only
/// needs the document under construction.
struct ParseState<'o> {
    document: Document,
    options: &'o ParseOptions,
}

impl<'o> ParseState<'o> {
    fn new(date: String, options: &'o ParseOptions) -> Self {
        Self {
            document: Document::new(date),
            options,
        }
    }

    fn apply(&mut self, kind: LineKind<'_>) {
        log::trace!("{:?}", kind);
        match kind {
            LineKind::Skip(_) => {}
            LineKind::TopicOpening { remainder, .. } => self.open_topic(remainder),
            LineKind::ListItem { indent, body, line } => self.list_item(indent, body, line),
            LineKind::Paragraph {
                text,
                suspect_heading,
            } => {
                if suspect_heading {
                    log::debug!("Line looks like a heading but is kept as content: {}", text);
                }
                self.paragraph(text);
            }
        }
    }

    fn open_topic(&mut self, remainder: &str) {
        let topic = match split_label(remainder) {
            Some((label, content)) if !content.is_empty() => {
                let mut topic = Topic::new(strip_trailing_colons(label));
                topic.add_section(Section::with_content(
                    self.options.default_section_title.clone(),
                    vec![content.to_string()],
                ));
                topic
            }
            Some((label, _)) => Topic::new(strip_trailing_colons(label)),
            None => Topic::new(strip_trailing_colons(remainder)),
        };
        log::debug!(
            "Opened topic {}: {}",
            self.document.topic_count(),
            topic.title
        );
        self.document.add_topic(topic);
    }

    fn list_item(&mut self, indent: usize, body: &str, line: &str) {
        let nested_indent = self.options.nested_indent;
        let Some(topic) = self.document.last_topic_mut() else {
            self.orphan(line);
            return;
        };

        let nested = nested_indent.is_some_and(|threshold| indent >= threshold);
        if nested {
            if let Some(section) = topic.last_section_mut() {
                section.push(nested_fragment(body));
                return;
            }
        }

        match split_label(body) {
            Some((label, content)) => {
                let mut section = Section::new(label);
                if !content.is_empty() {
                    section.push(content);
                }
                topic.add_section(section);
            }
            None => self.attach_fragment(body),
        }
    }

    fn paragraph(&mut self, text: &str) {
        if self.document.is_empty() {
            self.orphan(text);
            return;
        }
        self.attach_fragment(text);
    }

    /// Append to the current section, synthesizing one if the topic has none.
    fn attach_fragment(&mut self, text: &str) {
        let default_title = &self.options.default_section_title;
        if let Some(topic) = self.document.last_topic_mut() {
            match topic.last_section_mut() {
                Some(section) => section.push(text),
                None => topic.add_section(Section::with_content(
                    default_title.clone(),
                    vec![text.to_string()],
                )),
            }
        }
    }

    fn orphan(&mut self, line: &str) {
        log::debug!("No open topic, keeping line in preamble: {}", line);
        self.document.preamble.push(line.to_string());
    }

    fn finish(mut self) -> Document {
        if self.document.is_empty() && self.options.fallback == FallbackMode::SingleTopic {
            let lines = std::mem::take(&mut self.document.preamble);
            if !lines.is_empty() {
                log::debug!("No topic recognized, wrapping {} lines", lines.len());
            }
            self.document
                .wrap_in_topic(FALLBACK_TOPIC_TITLE, FALLBACK_SECTION_TITLE, lines);
        }
        self.document
    }
}

/// Format a deeply indented list item as a sub-item of the previous section.
fn nested_fragment(body: &str) -> String {
    match split_label(body) {
        Some((label, content)) if !content.is_empty() => format!("- {}: {}", label, content),
        Some((label, _)) => format!("- {}", label),
        None => format!("- {}", body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Document {
        TextParser::new().parse(text)
    }

    #[test]
    fn test_topic_with_inline_summary() {
        let doc = parse("1. Alpha: quick overview");
        assert_eq!(doc.topics[0].title, "Alpha");
        assert_eq!(doc.topics[0].sections[0].title, "content");
        assert_eq!(doc.topics[0].sections[0].content, vec!["quick overview"]);
    }

    #[test]
    fn test_topic_trailing_colon_stripped() {
        let doc = parse("二、 出海经验：");
        assert_eq!(doc.topics[0].title, "出海经验");
        assert!(doc.topics[0].sections.is_empty());
    }

    #[test]
    fn test_unlabeled_bullet_joins_last_section() {
        let doc = parse("1. Alpha\n- Kind: stuff\n- more stuff");
        let sections = &doc.topics[0].sections;
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, vec!["stuff", "more stuff"]);
    }

    #[test]
    fn test_unlabeled_bullet_synthesizes_section() {
        let doc = parse("1. Alpha\n- just a note");
        assert_eq!(doc.topics[0].sections[0].title, "content");
        assert_eq!(doc.topics[0].sections[0].content, vec!["just a note"]);
    }

    #[test]
    fn test_label_without_value_collects_nested_items() {
        let doc = parse("1. Alpha\n- Tools:\n    - cargo\n    - Linter: clippy");
        let section = &doc.topics[0].sections[0];
        assert_eq!(section.title, "Tools");
        assert_eq!(section.content, vec!["- cargo", "- Linter: clippy"]);
    }

    #[test]
    fn test_nesting_disabled() {
        let parser = TextParser::with_options(ParseOptions::new().with_nested_indent(None));
        let doc = parser.parse("1. Alpha\n- A: x\n    - B: y");
        assert_eq!(doc.topics[0].sections.len(), 2);
    }

    #[test]
    fn test_orphans_go_to_preamble() {
        let doc = parse("Daily notes\n- Kind: stuff\n1. Alpha");
        assert_eq!(doc.preamble, vec!["Daily notes", "- Kind: stuff"]);
        assert_eq!(doc.topic_count(), 1);
        assert!(doc.topics[0].sections.is_empty());
    }

    #[test]
    fn test_fallback_topic() {
        let parser = TextParser::with_options(ParseOptions::new().with_fallback_topic());
        let doc = parser.parse("2025-01-01\nfirst line\n\nsecond line");
        assert_eq!(doc.topic_count(), 1);
        assert_eq!(doc.topics[0].title, FALLBACK_TOPIC_TITLE);
        assert_eq!(doc.topics[0].sections[0].title, FALLBACK_SECTION_TITLE);
        assert_eq!(
            doc.topics[0].sections[0].content,
            vec!["first line", "second line"]
        );
        assert!(doc.preamble.is_empty());
    }

    #[test]
    fn test_fallback_ignored_when_topics_exist() {
        let parser = TextParser::with_options(ParseOptions::new().with_fallback_topic());
        let doc = parser.parse("intro\n1. Alpha");
        assert_eq!(doc.topics[0].title, "Alpha");
        assert_eq!(doc.preamble, vec!["intro"]);
    }

    #[test]
    fn test_cleanup_before_parse() {
        let parser = TextParser::with_options(
            ParseOptions::new().with_cleanup_preset(super::super::CleanupPreset::Standard),
        );
        let doc = parser.parse("**1. Alpha**\n- **Kind**: stuff");
        assert_eq!(doc.topics[0].title, "Alpha");
        assert_eq!(doc.topics[0].sections[0].title, "Kind");
    }

    #[test]
    fn test_cleanup_pipeline_reused_across_parses() {
        let parser = TextParser::with_options(
            ParseOptions::new().with_cleanup_preset(super::super::CleanupPreset::Standard),
        );
        assert!(parser.cleanup.is_some());
        assert!(TextParser::new().cleanup.is_none());

        for title in ["Alpha", "Beta", "Gamma"] {
            let doc = parser.parse(&format!("1. **{}**", title));
            assert_eq!(doc.topics[0].title, title);
        }
    }

    #[test]
    fn test_custom_section_title() {
        let parser =
            TextParser::with_options(ParseOptions::new().with_default_section_title("内容"));
        let doc = parser.parse("1. Alpha\nloose paragraph");
        assert_eq!(doc.topics[0].sections[0].title, "内容");
    }
}
