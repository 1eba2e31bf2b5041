//! Input cleanup pipeline applied before parsing.
//!
//! Chat exports tend to carry Markdown emphasis, runs of blank lines, and
//! stray symbols. The pipeline removes that noise without touching the line
//! structure the grammar depends on.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Symbols outside the Basic Multilingual Plane that survive symbol filtering.
const ALLOWED_SYMBOLS: &[char] = &[
    '🔥', '📋', '✅', '❌', '🎯', '🚀', '📸', '📁', '💡', '🔍', '⏳', '🎉', '📊', '🌟', '💪',
];

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Minimal cleanup: Unicode NFC normalization only
    Minimal,
    /// Standard cleanup: NFC + blank line collapsing + emphasis stripping
    #[default]
    Standard,
    /// Aggressive cleanup: everything, including CJK spacing and symbol filtering
    Aggressive,
}

/// Options for input cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Collapse three or more line breaks around blank lines into one blank line
    pub collapse_blank_lines: bool,

    /// Remove Markdown `**bold**` and `*italic*` markers
    pub strip_emphasis: bool,

    /// Insert a space between adjacent Latin letters and CJK ideographs
    pub space_cjk_latin: bool,

    /// Drop astral-plane symbols that are not in the allow-list
    pub filter_symbols: bool,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
            CleanupPreset::Aggressive => Self::aggressive(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            collapse_blank_lines: false,
            strip_emphasis: false,
            space_cjk_latin: false,
            filter_symbols: false,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            collapse_blank_lines: true,
            strip_emphasis: true,
            space_cjk_latin: false,
            filter_symbols: false,
        }
    }

    /// Aggressive cleanup options.
    pub fn aggressive() -> Self {
        Self {
            normalize_unicode: true,
            collapse_blank_lines: true,
            strip_emphasis: true,
            space_cjk_latin: true,
            filter_symbols: true,
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text cleanup pipeline.
#[derive(Debug, Clone)]
pub struct CleanupPipeline {
    options: CleanupOptions,
    blank_lines_regex: Regex,
    bold_regex: Regex,
    italic_regex: Regex,
    latin_cjk_regex: Regex,
    cjk_latin_regex: Regex,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self {
            options,
            blank_lines_regex: Regex::new(r"\n(?:[ \t]*\n){2,}").unwrap(),
            bold_regex: Regex::new(r"\*\*").unwrap(),
            italic_regex: Regex::new(r"\*([^*\s][^*\n]*)\*").unwrap(),
            latin_cjk_regex: Regex::new(r"([A-Za-z])([\x{4e00}-\x{9fff}])").unwrap(),
            cjk_latin_regex: Regex::new(r"([\x{4e00}-\x{9fff}])([A-Za-z])").unwrap(),
        }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.collapse_blank_lines {
            result = self.blank_lines_regex.replace_all(&result, "\n\n").into_owned();
        }

        // Bold markers first so `**x**` does not look like two italics
        if self.options.strip_emphasis {
            result = self.bold_regex.replace_all(&result, "").into_owned();
            result = self.italic_regex.replace_all(&result, "$1").into_owned();
        }

        if self.options.space_cjk_latin {
            result = self.latin_cjk_regex.replace_all(&result, "$1 $2").into_owned();
            result = self.cjk_latin_regex.replace_all(&result, "$1 $2").into_owned();
        }

        if self.options.filter_symbols {
            result = filter_symbols(&result);
        }

        result.trim().to_string()
    }
}

fn filter_symbols(text: &str) -> String {
    text.chars()
        .filter(|c| (*c as u32) <= 0xFFFF || ALLOWED_SYMBOLS.contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_only_normalizes() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Minimal);
        // e + combining acute -> é
        assert_eq!(pipeline.process("cafe\u{301} **x**"), "café **x**");
    }

    #[test]
    fn test_collapse_blank_lines() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Standard);
        assert_eq!(pipeline.process("a\n\n\n\nb\n \n\t\nc"), "a\n\nb\n\nc");
        assert_eq!(pipeline.process("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_strip_emphasis_keeps_list_markers() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Standard);
        assert_eq!(
            pipeline.process("**1. Alpha**\n* Kind: *very* good"),
            "1. Alpha\n* Kind: very good"
        );
    }

    #[test]
    fn test_cjk_latin_spacing() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Aggressive);
        assert_eq!(pipeline.process("使用Rust开发"), "使用 Rust 开发");
    }

    #[test]
    fn test_filter_symbols() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Aggressive);
        assert_eq!(pipeline.process("🔥 hot 🦀 crab"), "🔥 hot  crab");
    }
}
