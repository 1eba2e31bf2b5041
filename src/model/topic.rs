//! Topic and section types.

use serde::{Deserialize, Serialize};

/// A top-level subject opened by a numbered heading line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Heading text without numbering or trailing colon
    pub title: String,

    /// Sections in order of appearance
    pub sections: Vec<Section>,
}

impl Topic {
    /// Create a new topic with no sections.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Append a section.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Mutable access to the most recently added section.
    pub fn last_section_mut(&mut self) -> Option<&mut Section> {
        self.sections.last_mut()
    }

    /// Check if the topic has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Get plain text: the title followed by each section.
    pub fn plain_text(&self) -> String {
        let mut lines = vec![self.title.clone()];
        lines.extend(self.sections.iter().map(|s| s.plain_text()));
        lines.join("\n")
    }
}

/// A labeled sub-unit of a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Label text
    pub title: String,

    /// Content fragments in order of appearance
    pub content: Vec<String>,
}

impl Section {
    /// Create a section with no content yet.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: Vec::new(),
        }
    }

    /// Create a section with the given content fragments.
    pub fn with_content(title: impl Into<String>, content: Vec<String>) -> Self {
        Self {
            title: title.into(),
            content,
        }
    }

    /// Append a content fragment.
    pub fn push(&mut self, fragment: impl Into<String>) {
        self.content.push(fragment.into());
    }

    /// Get plain text as `label: fragment` plus any further fragments.
    pub fn plain_text(&self) -> String {
        match self.content.split_first() {
            Some((first, rest)) => {
                let mut lines = vec![format!("{}: {}", self.title, first)];
                lines.extend(rest.iter().cloned());
                lines.join("\n")
            }
            None => self.title.clone(),
        }
    }
}
