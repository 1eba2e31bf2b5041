//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

use crate::model::{Section, Topic};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (HTML, text, etc.)
    pub content: String,

    /// Rendering statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: RenderStats) -> Self {
        Self { content, stats }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            stats: RenderStats::default(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected while rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of topics rendered
    pub topic_count: u32,

    /// Number of sections rendered
    pub section_count: u32,

    /// Number of content fragments rendered
    pub fragment_count: u32,

    /// Character count of rendered text (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rendered topic (title only).
    pub fn add_topic(&mut self, topic: &Topic) {
        self.topic_count += 1;
        self.count_text(&topic.title);
    }

    /// Record a rendered section with all of its fragments.
    pub fn add_section(&mut self, section: &Section) {
        self.section_count += 1;
        self.fragment_count += section.content.len() as u32;
        self.count_text(&section.title);
        for fragment in &section.content {
            self.count_text(fragment);
        }
    }

    /// Add character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.topic_count += other.topic_count;
        self.section_count += other.section_count;
        self.fragment_count += other.fragment_count;
        self.char_count += other.char_count;
    }
}
