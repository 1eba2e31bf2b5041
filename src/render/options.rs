//! Rendering options and configuration.

use std::fmt;

/// Smallest accepted zoom factor.
pub const MIN_ZOOM: f32 = 0.3;

/// Largest accepted zoom factor.
pub const MAX_ZOOM: f32 = 2.0;

/// Default page title.
pub const DEFAULT_TITLE: &str = "Tech Chat Daily";

/// Options for rendering a digest document.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Typeface applied to the page body
    pub font: Font,

    /// Image reference for the QR slot (data URI, URL, path or inline SVG).
    ///
    /// A value starting with `<svg` is inlined verbatim and must come from a
    /// trusted source. Other values are escaped into an `<img src>`.
    pub image_ref: Option<String>,

    /// Page title shown in the header and `<title>`
    pub title: String,

    /// Custom page shell replacing the built-in template
    pub template: Option<String>,

    /// Zoom factor injected as a style block before `</head>`
    pub zoom: Option<f32>,

    /// Collect rendering statistics
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font.
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Set the font from an identifier such as `font-inter`.
    ///
    /// Unrecognized identifiers fall back to the default font.
    pub fn with_font_name(mut self, identifier: &str) -> Self {
        self.font = Font::from_identifier(identifier);
        self
    }

    /// Set the image reference for the QR slot.
    ///
    /// Inline SVG is not sanitized; only pass markup you trust.
    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        let image_ref = image_ref.into();
        self.image_ref = if image_ref.trim().is_empty() {
            None
        } else {
            Some(image_ref)
        };
        self
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Use a custom page template.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Set the zoom factor, clamped to `MIN_ZOOM..=MAX_ZOOM`.
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = if zoom.is_finite() {
            Some(zoom.clamp(MIN_ZOOM, MAX_ZOOM))
        } else {
            None
        };
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            font: Font::default(),
            image_ref: None,
            title: DEFAULT_TITLE.to_string(),
            template: None,
            zoom: None,
            collect_stats: false,
        }
    }
}

/// Built-in typefaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    /// Noto Sans SC with CJK system fallbacks
    #[default]
    NotoSans,
    /// Noto Serif SC
    NotoSerif,
    /// Inter with CJK fallbacks
    Inter,
    /// Platform UI font
    SystemUi,
    /// Monospace
    Mono,
}

impl Font {
    /// All built-in fonts.
    pub const ALL: [Font; 5] = [
        Font::NotoSans,
        Font::NotoSerif,
        Font::Inter,
        Font::SystemUi,
        Font::Mono,
    ];

    /// Resolve an identifier (`font-inter`, `inter`, ...) to a font.
    pub fn from_identifier(identifier: &str) -> Self {
        let id = identifier.trim().to_ascii_lowercase();
        let id = id.strip_prefix("font-").unwrap_or(&id);
        match id {
            "noto-sans" | "noto-sans-sc" | "sans" => Font::NotoSans,
            "noto-serif" | "noto-serif-sc" | "serif" => Font::NotoSerif,
            "inter" => Font::Inter,
            "system" | "system-ui" => Font::SystemUi,
            "mono" | "monospace" => Font::Mono,
            _ => {
                log::warn!("Unknown font {:?}, using {}", identifier, Font::default());
                Font::default()
            }
        }
    }

    /// CSS class placed on `<body>`.
    pub fn class_name(&self) -> &'static str {
        match self {
            Font::NotoSans => "font-noto-sans",
            Font::NotoSerif => "font-noto-serif",
            Font::Inter => "font-inter",
            Font::SystemUi => "font-system",
            Font::Mono => "font-mono",
        }
    }

    /// CSS `font-family` stack.
    pub fn font_stack(&self) -> &'static str {
        match self {
            Font::NotoSans => "'Noto Sans SC', 'PingFang SC', 'Microsoft YaHei', sans-serif",
            Font::NotoSerif => "'Noto Serif SC', 'Songti SC', 'SimSun', serif",
            Font::Inter => "'Inter', 'PingFang SC', 'Microsoft YaHei', sans-serif",
            Font::SystemUi => "system-ui, -apple-system, 'Segoe UI', sans-serif",
            Font::Mono => "'JetBrains Mono', 'SFMono-Regular', Consolas, monospace",
        }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_font(Font::Inter)
            .with_image_ref("data:image/png;base64,AAAA")
            .with_title("Weekly")
            .with_zoom(5.0)
            .with_stats(true);

        assert_eq!(options.font, Font::Inter);
        assert_eq!(options.image_ref.as_deref(), Some("data:image/png;base64,AAAA"));
        assert_eq!(options.title, "Weekly");
        assert_eq!(options.zoom, Some(MAX_ZOOM));
        assert!(options.collect_stats);
    }

    #[test]
    fn test_blank_image_ref_is_ignored() {
        let options = RenderOptions::new().with_image_ref("  ");
        assert!(options.image_ref.is_none());
    }

    #[test]
    fn test_zoom_rejects_nan() {
        let options = RenderOptions::new().with_zoom(f32::NAN);
        assert!(options.zoom.is_none());
        let options = RenderOptions::new().with_zoom(0.1);
        assert_eq!(options.zoom, Some(MIN_ZOOM));
    }

    #[test]
    fn test_font_from_identifier() {
        assert_eq!(Font::from_identifier("font-inter"), Font::Inter);
        assert_eq!(Font::from_identifier("Noto-Serif"), Font::NotoSerif);
        assert_eq!(Font::from_identifier("font-system"), Font::SystemUi);
        assert_eq!(Font::from_identifier("comic-sans"), Font::NotoSans);
        assert_eq!(Font::from_identifier(""), Font::NotoSans);
    }

    #[test]
    fn test_font_class_round_trip() {
        for font in Font::ALL {
            assert_eq!(Font::from_identifier(font.class_name()), font);
        }
    }
}
