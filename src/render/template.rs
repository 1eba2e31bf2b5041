//! Page shell and placeholder substitution.

use std::collections::HashMap;

use regex::{Captures, Regex};

use crate::error::{Error, Result};

/// Placeholder for the digest date; may appear any number of times.
pub const DATE_SLOT: &str = "DATE";
/// Placeholder for the page title.
pub const TITLE_SLOT: &str = "TITLE";
/// Placeholder for the font class on `<body>`.
pub const FONT_SLOT: &str = "FONT_CLASS";
/// Placeholder for the QR/image slot.
pub const IMAGE_SLOT: &str = "QR_CODE";
/// Placeholder for the rendered topics.
pub const TOPICS_SLOT: &str = "TOPICS";

/// Marker before which head styles are injected.
pub const HEAD_END: &str = "</head>";

/// Built-in placeholder graphic for the image slot.
pub const DEFAULT_IMAGE_SVG: &str = r#"<svg width="96" height="96" viewBox="0 0 24 24" fill="currentColor" aria-label="QR code placeholder"><path d="M3 4a1 1 0 011-1h3a1 1 0 011 1v3a1 1 0 01-1 1H4a1 1 0 01-1-1V4zm2 2V5h1v1H5zM3 13a1 1 0 011-1h3a1 1 0 011 1v3a1 1 0 01-1 1H4a1 1 0 01-1-1v-3zm2 2v-1h1v1H5zM13 3a1 1 0 00-1 1v3a1 1 0 001 1h3a1 1 0 001-1V4a1 1 0 00-1-1h-3zm1 2v1h1V5h-1z"/></svg>"#;

/// Built-in page shell.
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="chatdigest">
    <title>{{TITLE}} · {{DATE}}</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }

        body {
            background: linear-gradient(135deg, #f8fafc 0%, #e2e8f0 100%);
            color: #1f2937;
            line-height: 1.6;
            min-height: 100vh;
            padding: 20px;
        }

        .font-noto-sans { font-family: 'Noto Sans SC', 'PingFang SC', 'Microsoft YaHei', sans-serif; }
        .font-noto-serif { font-family: 'Noto Serif SC', 'Songti SC', 'SimSun', serif; }
        .font-inter { font-family: 'Inter', 'PingFang SC', 'Microsoft YaHei', sans-serif; }
        .font-system { font-family: system-ui, -apple-system, 'Segoe UI', sans-serif; }
        .font-mono { font-family: 'JetBrains Mono', 'SFMono-Regular', Consolas, monospace; }

        .container { max-width: 800px; margin: 0 auto; }

        .header { text-align: center; margin-bottom: 40px; }
        .logo { font-size: 40px; margin-bottom: 8px; }
        .title { font-size: 40px; font-weight: 700; color: #111827; }
        .subtitle { font-size: 20px; color: #6b7280; margin-top: 8px; }

        .topic-card {
            background: #ffffff;
            border-radius: 16px;
            box-shadow: 0 4px 6px rgba(0, 0, 0, 0.08);
            padding: 28px;
            margin-bottom: 24px;
        }
        .topic-header { display: flex; align-items: center; gap: 16px; margin-bottom: 20px; }
        .topic-icon {
            width: 48px;
            height: 48px;
            border-radius: 12px;
            display: flex;
            align-items: center;
            justify-content: center;
            font-size: 24px;
            flex-shrink: 0;
        }
        .topic-title { font-size: 24px; font-weight: 600; color: #111827; }

        .icon-blue { background: #dbeafe; }
        .icon-purple { background: #ede9fe; }
        .icon-red { background: #fee2e2; }
        .icon-orange { background: #ffedd5; }
        .icon-green { background: #dcfce7; }
        .icon-yellow { background: #fef9c3; }
        .icon-pink { background: #fce7f3; }
        .icon-indigo { background: #e0e7ff; }

        .content-block {
            background: #f9fafb;
            border-left: 4px solid #6366f1;
            border-radius: 8px;
            padding: 16px 20px;
            margin-top: 12px;
        }
        .topic-blue .content-block { border-left-color: #3b82f6; }
        .topic-purple .content-block { border-left-color: #8b5cf6; }
        .topic-red .content-block { border-left-color: #ef4444; }
        .topic-orange .content-block { border-left-color: #f97316; }
        .topic-green .content-block { border-left-color: #22c55e; }
        .topic-yellow .content-block { border-left-color: #eab308; }
        .topic-pink .content-block { border-left-color: #ec4899; }
        .topic-indigo .content-block { border-left-color: #6366f1; }

        .section-title { font-size: 18px; font-weight: 600; color: #374151; margin-bottom: 8px; }
        .content-block p { font-size: 16px; color: #4b5563; margin-top: 4px; }

        .footer {
            background: #ffffff;
            border-radius: 16px;
            padding: 28px;
            margin-top: 40px;
        }
        .footer-content { display: flex; justify-content: space-between; align-items: center; gap: 24px; }
        .footer-info h3 { font-size: 20px; font-weight: 600; }
        .footer-info p, .footer-date p { font-size: 14px; color: #6b7280; }
        .footer-meta { display: flex; align-items: center; gap: 32px; }
        .footer-qr h4 { font-size: 14px; font-weight: 600; margin-bottom: 8px; }
        .footer-qr .qr-placeholder {
            width: 96px;
            height: 96px;
            background: #f3f4f6;
            border: 2px solid #e5e7eb;
            border-radius: 12px;
            display: flex;
            align-items: center;
            justify-content: center;
            color: #9ca3af;
            overflow: hidden;
        }
        .footer-qr .qr-placeholder img { width: 100%; height: 100%; object-fit: cover; }
        .footer-note {
            margin-top: 24px;
            padding-top: 24px;
            border-top: 1px solid #e5e7eb;
            text-align: center;
            color: #6b7280;
            font-size: 14px;
        }

        @media (max-width: 768px) {
            .footer-content { flex-direction: column; text-align: center; }
        }
    </style>
</head>
<body class="{{FONT_CLASS}}">
    <div class="container">
        <header class="header">
            <div class="logo">💬</div>
            <h1 class="title">{{TITLE}}</h1>
            <p class="subtitle">{{DATE}}</p>
        </header>

        <main class="main-content">
{{TOPICS}}
        </main>

        <footer class="footer">
            <div class="footer-content">
                <div class="footer-info">
                    <h3>{{TITLE}}</h3>
                    <p>Highlights from today's group discussion</p>
                </div>
                <div class="footer-meta">
                    <div class="footer-date">
                        <p>Updated</p>
                        <p class="date">{{DATE}}</p>
                    </div>
                    <div class="footer-qr">
                        <h4>Scan to join</h4>
                        <div class="qr-placeholder">{{QR_CODE}}</div>
                    </div>
                </div>
            </div>
            <div class="footer-note">Compiled from group chat messages</div>
        </footer>
    </div>
</body>
</html>
"#;

/// A page shell with `{{NAME}}` placeholders.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    placeholder: Regex,
}

impl Template {
    /// The built-in template.
    pub fn builtin() -> Self {
        Self {
            source: DEFAULT_TEMPLATE.to_string(),
            placeholder: placeholder_regex(),
        }
    }

    /// A custom template.
    ///
    /// It must contain the topics placeholder and a `</head>` marker.
    pub fn custom(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let topics = format!("{{{{{}}}}}", TOPICS_SLOT);
        if !source.contains(&topics) {
            return Err(Error::Template(format!("missing {} placeholder", topics)));
        }
        if !source.contains(HEAD_END) {
            return Err(Error::Template(format!("missing {} marker", HEAD_END)));
        }
        for slot in [DATE_SLOT, FONT_SLOT, IMAGE_SLOT] {
            if !source.contains(&format!("{{{{{}}}}}", slot)) {
                log::warn!("Custom template has no {{{{{}}}}} placeholder", slot);
            }
        }
        Ok(Self {
            source,
            placeholder: placeholder_regex(),
        })
    }

    /// Template source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Substitute every known placeholder in one pass.
    ///
    /// Values are inserted verbatim and never rescanned, so placeholder-like
    /// text inside a value survives. Unknown placeholders are left as-is.
    pub fn fill(&self, slots: &HashMap<&str, String>) -> String {
        self.placeholder
            .replace_all(&self.source, |caps: &Captures| match slots.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::builtin()
    }
}

fn placeholder_regex() -> Regex {
    Regex::new(r"\{\{([A-Z_]+)\}\}").unwrap()
}

/// Insert a `<style>` block right before the first `</head>`.
///
/// Returns the html unchanged if it has no `</head>` marker.
pub fn inject_head_style(html: &str, id: &str, css: &str) -> String {
    match html.find(HEAD_END) {
        Some(pos) => {
            let block = format!(
                "<style id=\"{}\">\n{}\n</style>\n",
                escape_html(id),
                css.trim()
            );
            let mut out = String::with_capacity(html.len() + block.len());
            out.push_str(&html[..pos]);
            out.push_str(&block);
            out.push_str(&html[pos..]);
            out
        }
        None => {
            log::warn!("No {} marker, style {:?} not injected", HEAD_END, id);
            html.to_string()
        }
    }
}

/// Style block applying a page zoom factor.
pub fn zoom_style(zoom: f32) -> String {
    format!("body {{ zoom: {}; }}", zoom)
}

/// Markup for the image slot.
///
/// Inline `<svg>` is kept as markup without sanitizing; anything else becomes
/// an escaped `<img>` source.
pub fn image_markup(image_ref: Option<&str>) -> String {
    match image_ref.map(str::trim).filter(|r| !r.is_empty()) {
        Some(svg) if svg.starts_with("<svg") => svg.to_string(),
        Some(src) => format!("<img src=\"{}\" alt=\"QR code\">", escape_html(src)),
        None => DEFAULT_IMAGE_SVG.to_string(),
    }
}

/// Escape text for HTML, keeping well-formed character entities.
///
/// `&nbsp;` and `&#39;` pass through untouched; a bare `&` becomes `&amp;`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        match c {
            '&' if is_entity(&text[i..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Check whether `text` starts with a character entity such as `&nbsp;`.
fn is_entity(text: &str) -> bool {
    let Some(body) = text.strip_prefix('&') else {
        return false;
    };
    let Some(end) = body.find(';') else {
        return false;
    };
    let name = &body[..end];
    if name.is_empty() || name.len() > 32 {
        return false;
    }
    if let Some(num) = name.strip_prefix('#') {
        return match num.strip_prefix(['x', 'X']) {
            Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => !num.is_empty() && num.chars().all(|c| c.is_ascii_digit()),
        };
    }
    name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && name.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_all_slots() {
        let source = Template::builtin().source().to_string();
        for slot in [DATE_SLOT, TITLE_SLOT, FONT_SLOT, IMAGE_SLOT, TOPICS_SLOT] {
            assert!(source.contains(&format!("{{{{{}}}}}", slot)), "{}", slot);
        }
        assert!(source.contains(HEAD_END));
        assert!(source.matches("{{DATE}}").count() > 1);
    }

    #[test]
    fn test_builtin_defines_every_font_class() {
        for font in crate::render::Font::ALL {
            assert!(
                DEFAULT_TEMPLATE.contains(&format!(".{} {{", font.class_name())),
                "{}",
                font
            );
        }
    }

    #[test]
    fn test_fill_single_pass() {
        let template = Template::custom("<head></head>{{DATE}}|{{TOPICS}}|{{DATE}}|{{OTHER}}").unwrap();
        let mut slots = HashMap::new();
        slots.insert(DATE_SLOT, "2025-01-01".to_string());
        slots.insert(TOPICS_SLOT, "{{DATE}}".to_string());
        assert_eq!(
            template.fill(&slots),
            "<head></head>2025-01-01|{{DATE}}|2025-01-01|{{OTHER}}"
        );
    }

    #[test]
    fn test_custom_template_validation() {
        assert!(matches!(
            Template::custom("<head></head>no topics"),
            Err(Error::Template(_))
        ));
        assert!(matches!(
            Template::custom("{{TOPICS}} without head"),
            Err(Error::Template(_))
        ));
        assert!(Template::custom("<head></head>{{TOPICS}}").is_ok());
    }

    #[test]
    fn test_inject_head_style() {
        let html = "<html><head><title>x</title></head><body></body></html>";
        let out = inject_head_style(html, "zoom-style", &zoom_style(1.5));
        assert!(out.contains("<style id=\"zoom-style\">\nbody { zoom: 1.5; }\n</style>\n</head>"));
        assert!(out.starts_with("<html><head><title>x</title>"));

        assert_eq!(inject_head_style("<p>no head</p>", "zoom-style", "x"), "<p>no head</p>");
    }

    #[test]
    fn test_image_markup() {
        assert_eq!(image_markup(None), DEFAULT_IMAGE_SVG);
        assert_eq!(image_markup(Some("  ")), DEFAULT_IMAGE_SVG);
        assert_eq!(
            image_markup(Some("data:image/png;base64,AAA=")),
            "<img src=\"data:image/png;base64,AAA=\" alt=\"QR code\">"
        );
        assert_eq!(image_markup(Some("<svg></svg>")), "<svg></svg>");
        assert_eq!(
            image_markup(Some("qr.png\" onerror=\"x")),
            "<img src=\"qr.png&quot; onerror=&quot;x\" alt=\"QR code\">"
        );
    }

    #[test]
    fn test_escape_html_keeps_entities() {
        assert_eq!(escape_html("a &nbsp; b"), "a &nbsp; b");
        assert_eq!(escape_html("&#39;&#x27;"), "&#39;&#x27;");
        assert_eq!(escape_html("R&D <b>"), "R&amp;D &lt;b&gt;");
        assert_eq!(escape_html("& ;"), "&amp; ;");
        assert_eq!(escape_html("&;"), "&amp;;");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
    }
}
