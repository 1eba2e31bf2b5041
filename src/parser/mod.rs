//! Digest text parsing module.

mod cleanup;
mod date;
mod grammar;
mod options;
mod text_parser;

pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use date::{is_valid_date, today, DateExtractor, DATE_FORMAT};
pub use grammar::{
    indent_width, split_label, strip_trailing_colons, LineGrammar, LineKind, Numbering, SkipReason,
};
pub use options::{
    FallbackMode, ParseOptions, DEFAULT_BOILERPLATE_LABELS, DEFAULT_NESTED_INDENT,
    DEFAULT_SECTION_TITLE,
};
pub use text_parser::{TextParser, FALLBACK_SECTION_TITLE, FALLBACK_TOPIC_TITLE};
