//! Document model types for digest content representation.
//!
//! This module defines the tree that bridges text parsing and rendering:
//! a [`Document`] owns ordered [`Topic`]s, each owning ordered [`Section`]s.
//! Ownership is strictly hierarchical, so a section always has exactly one
//! topic.

mod document;
mod topic;

pub use document::Document;
pub use topic::{Section, Topic};
