//! Document-level types.

use super::{Section, Topic};
use serde::{Deserialize, Serialize};

/// A parsed digest document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Digest date (`YYYY-MM-DD`)
    pub date: String,

    /// Topics in order of appearance
    pub topics: Vec<Topic>,

    /// Lines that appeared before the first topic.
    ///
    /// These are kept outside the topic tree and are not rendered.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preamble: Vec<String>,
}

impl Document {
    /// Create a new empty document for the given date.
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            topics: Vec::new(),
            preamble: Vec::new(),
        }
    }

    /// Get the number of topics in the document.
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    /// Get the total number of sections across all topics.
    pub fn section_count(&self) -> usize {
        self.topics.iter().map(|t| t.sections.len()).sum()
    }

    /// Get the total number of content fragments across all sections.
    pub fn fragment_count(&self) -> usize {
        self.topics
            .iter()
            .flat_map(|t| t.sections.iter())
            .map(|s| s.content.len())
            .sum()
    }

    /// Get a topic by zero-based index.
    pub fn topic(&self, index: usize) -> Option<&Topic> {
        self.topics.get(index)
    }

    /// Add a topic to the document.
    pub fn add_topic(&mut self, topic: Topic) {
        self.topics.push(topic);
    }

    /// Mutable access to the most recently added topic.
    pub fn last_topic_mut(&mut self) -> Option<&mut Topic> {
        self.topics.last_mut()
    }

    /// Check if the document has no topics.
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Replace an empty topic list with a single topic wrapping `lines`.
    ///
    /// Does nothing when the document already has topics or `lines` is empty.
    pub fn wrap_in_topic(
        &mut self,
        topic_title: impl Into<String>,
        section_title: impl Into<String>,
        lines: Vec<String>,
    ) {
        if !self.topics.is_empty() || lines.is_empty() {
            return;
        }
        let mut topic = Topic::new(topic_title);
        topic.add_section(Section::with_content(section_title, lines));
        self.topics.push(topic);
    }

    /// Get plain text content of the entire document, one fragment per line.
    pub fn plain_text(&self) -> String {
        self.topics
            .iter()
            .map(|topic| topic.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
