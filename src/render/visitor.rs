//! Visitor pattern for customizing HTML rendering.
//!
//! A visitor sees each topic and section before the renderer emits its
//! markup, and may keep the default output, replace it or drop it.
//!
//! # Example
//!
//! ```
//! use chatdigest::model::Section;
//! use chatdigest::render::visitor::{DocumentVisitor, VisitorAction};
//!
//! struct HideLinks;
//!
//! impl DocumentVisitor for HideLinks {
//!     fn visit_section(&mut self, section: &Section) -> VisitorAction {
//!         if section.title == "links" {
//!             VisitorAction::Skip
//!         } else {
//!             VisitorAction::Continue
//!         }
//!     }
//! }
//! ```

use crate::model::{Section, Topic};

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the element with custom markup, inserted verbatim.
    Replace(String),

    /// Skip this element entirely (produce no output).
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the element should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides replacement content.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Get replacement content if available.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            VisitorAction::Replace(s) => Some(s),
            _ => None,
        }
    }
}

/// Trait for visiting document elements during rendering.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait DocumentVisitor: Send + Sync {
    /// Called before rendering a topic card.
    ///
    /// # Arguments
    /// * `topic` - The topic about to be rendered
    /// * `index` - Zero-based position of the topic in the document
    fn visit_topic(&mut self, topic: &Topic, index: usize) -> VisitorAction {
        let _ = (topic, index);
        VisitorAction::Continue
    }

    /// Called before rendering a section block inside a topic card.
    fn visit_section(&mut self, section: &Section) -> VisitorAction {
        let _ = section;
        VisitorAction::Continue
    }

    /// Called when rendering starts, with the document date.
    fn on_document_start(&mut self, date: &str) {
        let _ = date;
    }

    /// Called after the last topic has been rendered.
    fn on_document_end(&mut self) {}
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentVisitor for DefaultVisitor {}

/// Visitor that drops topics without any sections.
#[derive(Debug, Clone, Default)]
pub struct SkipEmptyTopicsVisitor;

impl DocumentVisitor for SkipEmptyTopicsVisitor {
    fn visit_topic(&mut self, topic: &Topic, _index: usize) -> VisitorAction {
        if topic.is_empty() {
            VisitorAction::Skip
        } else {
            VisitorAction::Continue
        }
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn DocumentVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: DocumentVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    /// Number of chained visitors.
    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    /// Check if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentVisitor for CompositeVisitor {
    fn visit_topic(&mut self, topic: &Topic, index: usize) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = visitor.visit_topic(topic, index);
            if !matches!(action, VisitorAction::Continue) {
                return action;
            }
        }
        VisitorAction::Continue
    }

    fn visit_section(&mut self, section: &Section) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = visitor.visit_section(section);
            if !matches!(action, VisitorAction::Continue) {
                return action;
            }
        }
        VisitorAction::Continue
    }

    fn on_document_start(&mut self, date: &str) {
        for visitor in &mut self.visitors {
            visitor.on_document_start(date);
        }
    }

    fn on_document_end(&mut self) {
        for visitor in &mut self.visitors {
            visitor.on_document_end();
        }
    }
}
