//! Rendering module for converting documents to HTML and other formats.

mod html;
mod json;
mod options;
mod result;
mod style;
pub mod template;
mod text;
pub mod visitor;

pub use html::{to_html, to_html_with_stats, HtmlRenderer, ZOOM_STYLE_ID};
pub use json::{to_json, JsonFormat};
pub use options::{Font, RenderOptions, DEFAULT_TITLE, MAX_ZOOM, MIN_ZOOM};
pub use result::{RenderResult, RenderStats};
pub use style::{topic_style, TopicStyle, TOPIC_COLORS, TOPIC_ICONS};
pub use template::{escape_html, inject_head_style, Template, DEFAULT_TEMPLATE};
pub use text::to_text;
pub use visitor::{
    CompositeVisitor, DefaultVisitor, DocumentVisitor, SkipEmptyTopicsVisitor, VisitorAction,
};
