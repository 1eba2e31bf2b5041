//! Digest date detection.

use chrono::{Local, NaiveDate};
use regex::Regex;

/// Format used for digest dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Finds the first `YYYY-MM-DD` token in a text.
#[derive(Debug, Clone)]
pub struct DateExtractor {
    token: Regex,
}

impl DateExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self {
            token: Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}").unwrap(),
        }
    }

    /// First date-shaped token in `text`, if any.
    pub fn extract<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.token.find(text).map(|m| m.as_str())
    }

    /// Date found in `text`, else `reference`, else today.
    pub fn resolve(&self, text: &str, reference: Option<&str>) -> String {
        if let Some(found) = self.extract(text) {
            return found.to_string();
        }
        match reference.map(str::trim).filter(|r| !r.is_empty()) {
            Some(reference) => {
                if !is_valid_date(reference) {
                    log::warn!("Reference date {:?} is not YYYY-MM-DD, using it as-is", reference);
                }
                reference.to_string()
            }
            None => today(),
        }
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Today's local date as `YYYY-MM-DD`.
pub fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Check that `date` is a real calendar date in `YYYY-MM-DD` form.
pub fn is_valid_date(date: &str) -> bool {
    NaiveDate::parse_from_str(date, DATE_FORMAT).is_ok()
}
