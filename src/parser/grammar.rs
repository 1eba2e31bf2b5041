//! Line classification for digest text.
//!
//! Every input line falls into exactly one [`LineKind`]. The rules are
//! checked in a fixed order (skip, topic opening, list item, paragraph) and
//! the first match wins, so precedence lives in one place: [`LineGrammar::classify`].

use regex::Regex;

/// Numbering scheme of a topic-opening line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numbering {
    /// `1. Title`, `1、Title`
    Arabic,
    /// `一、Title`
    Chinese,
    /// `II. Title`
    Roman,
}

/// Why a line was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Empty or whitespace-only
    Blank,
    /// A line holding nothing but a `YYYY-MM-DD` date
    Date,
    /// A standalone header such as `内容总结：`
    Boilerplate,
}

/// Classification of one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Line carries no content.
    Skip(SkipReason),

    /// Line opens a new topic.
    TopicOpening {
        /// Numbering scheme that matched
        numbering: Numbering,
        /// Text after the numbering prefix
        remainder: &'a str,
    },

    /// Bulleted or dashed list item.
    ListItem {
        /// Leading indentation in columns
        indent: usize,
        /// Text after the marker
        body: &'a str,
        /// The whole trimmed line
        line: &'a str,
    },

    /// Anything else.
    Paragraph {
        /// The whole trimmed line
        text: &'a str,
        /// Looks like a topic opener that failed strict matching
        suspect_heading: bool,
    },
}

/// Compiled line patterns.
#[derive(Debug, Clone)]
pub struct LineGrammar {
    date_line: Regex,
    topic_rules: Vec<(Numbering, Regex)>,
    list_rules: Vec<Regex>,
    suspect_heading: Regex,
    boilerplate_labels: Vec<String>,
}

impl LineGrammar {
    /// Create a grammar that skips the given standalone header labels.
    pub fn new<S: AsRef<str>>(boilerplate_labels: &[S]) -> Self {
        Self {
            date_line: Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap(),
            topic_rules: vec![
                (
                    Numbering::Arabic,
                    Regex::new(r"^\d{1,3}\\?(?:[.．]\s+|、\s*)(.+)$").unwrap(),
                ),
                (
                    Numbering::Chinese,
                    Regex::new(r"^[一二三四五六七八九十百零]+\s*[、.．]\s*(.+)$").unwrap(),
                ),
                // a lone lowercase letter is prose ("v. the team said no")
                (
                    Numbering::Roman,
                    Regex::new(r"^(?:[IVX]+|[ivx]{2,})(?:[.．]\s+|\s*、\s*)(.+)$").unwrap(),
                ),
            ],
            list_rules: vec![
                // &nbsp; - item
                Regex::new(r"^(?:&nbsp;\s*)+[-–—*•·●]\s*(.+)$").unwrap(),
                Regex::new(r"^[-–—]\s+(.+)$").unwrap(),
                Regex::new(r"^[*+]\s+(.+)$").unwrap(),
                Regex::new(r"^[•·●▪◦]\s*(.+)$").unwrap(),
            ],
            suspect_heading: Regex::new(r"^(?:\d+|[一二三四五六七八九十百零]+|[IVXivx]+)\s*[.、．]")
                .unwrap(),
            boilerplate_labels: boilerplate_labels
                .iter()
                .map(|l| l.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    /// Classify a raw (untrimmed) line.
    pub fn classify<'a>(&self, raw: &'a str) -> LineKind<'a> {
        let line = raw.trim();

        if line.is_empty() {
            return LineKind::Skip(SkipReason::Blank);
        }
        if self.date_line.is_match(line) {
            return LineKind::Skip(SkipReason::Date);
        }
        if self.is_boilerplate(line) {
            return LineKind::Skip(SkipReason::Boilerplate);
        }

        for (numbering, rule) in &self.topic_rules {
            if let Some(remainder) = capture_body(rule, line) {
                if !strip_trailing_colons(remainder).is_empty() {
                    return LineKind::TopicOpening {
                        numbering: *numbering,
                        remainder,
                    };
                }
            }
        }

        for rule in &self.list_rules {
            if let Some(body) = capture_body(rule, line) {
                return LineKind::ListItem {
                    indent: indent_width(raw),
                    body,
                    line,
                };
            }
        }

        LineKind::Paragraph {
            text: line,
            suspect_heading: self.suspect_heading.is_match(line),
        }
    }

    fn is_boilerplate(&self, line: &str) -> bool {
        let label = strip_trailing_colons(line);
        if label.len() == line.len() {
            // a header needs its trailing colon
            return false;
        }
        let label = label.to_lowercase();
        self.boilerplate_labels.iter().any(|l| *l == label)
    }
}

impl Default for LineGrammar {
    fn default() -> Self {
        Self::new(super::options::DEFAULT_BOILERPLATE_LABELS)
    }
}

fn capture_body<'a>(rule: &Regex, line: &'a str) -> Option<&'a str> {
    rule.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

fn is_colon(c: char) -> bool {
    c == ':' || c == '：'
}

/// Split `label: content` at the first half- or full-width colon.
///
/// Both halves are trimmed. Returns `None` when there is no colon or the
/// label would be empty.
pub fn split_label(text: &str) -> Option<(&str, &str)> {
    let (idx, colon) = text.char_indices().find(|(_, c)| is_colon(*c))?;
    let label = text[..idx].trim();
    if label.is_empty() {
        return None;
    }
    let content = text[idx + colon.len_utf8()..].trim();
    Some((label, content))
}

/// Trim the text and drop any trailing colons.
pub fn strip_trailing_colons(text: &str) -> &str {
    text.trim().trim_end_matches(is_colon).trim_end()
}

/// Leading indentation in columns.
///
/// Spaces and non-breaking spaces count 1, ideographic spaces 2, tabs 4,
/// and each leading `&nbsp;` entity counts 1.
pub fn indent_width(raw: &str) -> usize {
    let mut width = 0;
    let mut rest = raw;
    loop {
        if let Some(after) = rest.strip_prefix("&nbsp;") {
            width += 1;
            rest = after;
            continue;
        }
        let mut chars = rest.chars();
        let step = match chars.next() {
            Some(' ') | Some('\u{a0}') => 1,
            Some('\u{3000}') => 2,
            Some('\t') => 4,
            _ => break,
        };
        width += step;
        rest = chars.as_str();
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar() -> LineGrammar {
        LineGrammar::default()
    }

    #[test]
    fn test_skip_lines() {
        let g = grammar();
        assert_eq!(g.classify(""), LineKind::Skip(SkipReason::Blank));
        assert_eq!(g.classify("   \t"), LineKind::Skip(SkipReason::Blank));
        assert_eq!(g.classify("2025-01-01"), LineKind::Skip(SkipReason::Date));
        assert_eq!(g.classify("内容总结："), LineKind::Skip(SkipReason::Boilerplate));
        assert_eq!(
            g.classify("Content Summary:"),
            LineKind::Skip(SkipReason::Boilerplate)
        );
    }

    #[test]
    fn test_boilerplate_needs_colon() {
        let g = grammar();
        assert!(matches!(
            g.classify("summary"),
            LineKind::Paragraph { .. }
        ));
    }

    #[test]
    fn test_topic_numbering_variants() {
        let g = grammar();
        assert_eq!(
            g.classify("1. Alpha"),
            LineKind::TopicOpening {
                numbering: Numbering::Arabic,
                remainder: "Alpha"
            }
        );
        assert_eq!(
            g.classify("一、 First"),
            LineKind::TopicOpening {
                numbering: Numbering::Chinese,
                remainder: "First"
            }
        );
        assert_eq!(
            g.classify("II. Second"),
            LineKind::TopicOpening {
                numbering: Numbering::Roman,
                remainder: "Second"
            }
        );
        assert!(matches!(
            g.classify("12、出海经验"),
            LineKind::TopicOpening {
                numbering: Numbering::Arabic,
                ..
            }
        ));
    }

    #[test]
    fn test_topic_requires_title() {
        let g = grammar();
        assert!(matches!(g.classify("1. ："), LineKind::Paragraph { .. }));
    }

    #[test]
    fn test_decimal_is_not_topic() {
        let g = grammar();
        assert_eq!(
            g.classify("3.5% growth this week"),
            LineKind::Paragraph {
                text: "3.5% growth this week",
                suspect_heading: true
            }
        );
    }

    #[test]
    fn test_single_lowercase_roman_is_prose() {
        let g = grammar();
        assert_eq!(
            g.classify("v. the other team said no"),
            LineKind::Paragraph {
                text: "v. the other team said no",
                suspect_heading: true
            }
        );
        assert!(matches!(
            g.classify("V. Wrap-up"),
            LineKind::TopicOpening {
                numbering: Numbering::Roman,
                remainder: "Wrap-up"
            }
        ));
    }

    #[test]
    fn test_full_width_date_line_is_not_skipped() {
        let g = grammar();
        assert!(matches!(g.classify("2025-01-01"), LineKind::Skip(SkipReason::Date)));
        assert!(matches!(
            g.classify("２０２５-０１-０１"),
            LineKind::Paragraph { .. }
        ));
    }

    #[test]
    fn test_list_markers() {
        let g = grammar();
        for line in ["- Kind: stuff", "* Kind: stuff", "• Kind: stuff", "&nbsp; - Kind: stuff"] {
            match g.classify(line) {
                LineKind::ListItem { body, .. } => assert_eq!(body, "Kind: stuff", "{}", line),
                other => panic!("{} classified as {:?}", line, other),
            }
        }
    }

    #[test]
    fn test_emphasis_is_not_list_item() {
        let g = grammar();
        assert!(matches!(
            g.classify("**bold** text"),
            LineKind::Paragraph { .. }
        ));
    }

    #[test]
    fn test_list_indent() {
        let g = grammar();
        match g.classify("    - detail") {
            LineKind::ListItem { indent, body, .. } => {
                assert_eq!(indent, 4);
                assert_eq!(body, "detail");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_split_label() {
        assert_eq!(split_label("Kind: stuff"), Some(("Kind", "stuff")));
        assert_eq!(split_label("类型：内容"), Some(("类型", "内容")));
        assert_eq!(split_label("a：b: c"), Some(("a", "b: c")));
        assert_eq!(split_label("Tools:"), Some(("Tools", "")));
        assert_eq!(split_label(": orphan"), None);
        assert_eq!(split_label("no colon"), None);
    }

    #[test]
    fn test_strip_trailing_colons() {
        assert_eq!(strip_trailing_colons(" Alpha：: "), "Alpha");
        assert_eq!(strip_trailing_colons("Beta"), "Beta");
    }

    #[test]
    fn test_indent_width() {
        assert_eq!(indent_width("- a"), 0);
        assert_eq!(indent_width("  - a"), 2);
        assert_eq!(indent_width("\t- a"), 4);
        assert_eq!(indent_width("&nbsp; - a"), 2);
        assert_eq!(indent_width("\u{3000}\u{3000}- a"), 4);
    }
}
