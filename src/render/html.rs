//! HTML rendering for digest documents.

use std::collections::HashMap;
use std::fmt::Write;

use crate::error::Result;
use crate::model::{Document, Section, Topic};

use super::style::topic_style;
use super::template::{
    escape_html, image_markup, inject_head_style, zoom_style, Template, DATE_SLOT, FONT_SLOT,
    IMAGE_SLOT, TITLE_SLOT, TOPICS_SLOT,
};
use super::visitor::{DocumentVisitor, VisitorAction};
use super::{RenderOptions, RenderResult, RenderStats};

/// Id of the injected zoom `<style>` block.
pub const ZOOM_STYLE_ID: &str = "zoom-style";

/// Convert a document to a standalone HTML page.
pub fn to_html(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to HTML with statistics.
pub fn to_html_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = HtmlRenderer::new(options);
    renderer.render_with_stats(doc)
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
    visitor: Option<Box<dyn DocumentVisitor>>,
    stats: RenderStats,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            visitor: None,
            stats: RenderStats::new(),
        }
    }

    /// Attach a visitor that can replace or skip topics and sections.
    pub fn with_visitor<V: DocumentVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitor = Some(Box::new(visitor));
        self
    }

    /// Render a document to HTML.
    pub fn render(mut self, doc: &Document) -> Result<String> {
        self.render_internal(doc)
    }

    /// Render a document to HTML with statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        self.options.collect_stats = true;
        let content = self.render_internal(doc)?;
        Ok(RenderResult::new(content, self.stats))
    }

    fn render_internal(&mut self, doc: &Document) -> Result<String> {
        let template = match self.options.template {
            Some(ref source) => Template::custom(source.as_str())?,
            None => Template::builtin(),
        };

        if let Some(ref mut visitor) = self.visitor {
            visitor.on_document_start(&doc.date);
        }

        let mut topics = String::new();
        for (index, topic) in doc.topics.iter().enumerate() {
            self.render_topic(&mut topics, topic, index);
        }

        if let Some(ref mut visitor) = self.visitor {
            visitor.on_document_end();
        }

        let mut slots = HashMap::new();
        slots.insert(DATE_SLOT, escape_html(&doc.date));
        slots.insert(TITLE_SLOT, escape_html(&self.options.title));
        slots.insert(FONT_SLOT, self.options.font.class_name().to_string());
        slots.insert(IMAGE_SLOT, image_markup(self.options.image_ref.as_deref()));
        slots.insert(TOPICS_SLOT, topics);

        let mut html = template.fill(&slots);
        if let Some(zoom) = self.options.zoom {
            html = inject_head_style(&html, ZOOM_STYLE_ID, &zoom_style(zoom));
        }

        log::debug!(
            "Rendered {} topics into {} bytes of HTML",
            doc.topic_count(),
            html.len()
        );
        Ok(html)
    }

    fn render_topic(&mut self, output: &mut String, topic: &Topic, index: usize) {
        if let Some(ref mut visitor) = self.visitor {
            match visitor.visit_topic(topic, index) {
                VisitorAction::Skip => return,
                VisitorAction::Replace(markup) => {
                    output.push_str(&markup);
                    return;
                }
                VisitorAction::Continue => {}
            }
        }

        if self.options.collect_stats {
            self.stats.add_topic(topic);
        }

        let style = topic_style(index);
        let _ = write!(
            output,
            concat!(
                "<div class=\"topic-card topic-{color}\">\n",
                "    <div class=\"topic-header\">\n",
                "        <div class=\"topic-icon icon-{color}\"><span>{icon}</span></div>\n",
                "        <h3 class=\"topic-title\">{title}</h3>\n",
                "    </div>\n"
            ),
            color = style.color,
            icon = style.icon,
            title = escape_html(&topic.title),
        );

        for section in &topic.sections {
            self.render_section(output, section);
        }

        output.push_str("</div>\n");
    }

    fn render_section(&mut self, output: &mut String, section: &Section) {
        if let Some(ref mut visitor) = self.visitor {
            match visitor.visit_section(section) {
                VisitorAction::Skip => return,
                VisitorAction::Replace(markup) => {
                    output.push_str(&markup);
                    return;
                }
                VisitorAction::Continue => {}
            }
        }

        if self.options.collect_stats {
            self.stats.add_section(section);
        }

        output.push_str("    <div class=\"content-block\">\n");
        let label = display_label(&section.title);
        if !label.is_empty() {
            let _ = writeln!(
                output,
                "        <h4 class=\"section-title\">{}：</h4>",
                escape_html(&label)
            );
        }
        for fragment in &section.content {
            let _ = writeln!(output, "        <p>{}</p>", escape_html(fragment.trim()));
        }
        output.push_str("    </div>\n");
    }
}

/// Section label as displayed: every ASCII and full-width colon removed.
fn display_label(title: &str) -> String {
    title
        .chars()
        .filter(|c| !matches!(c, ':' | '：'))
        .collect::<String>()
        .trim()
        .to_string()
}
