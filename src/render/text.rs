//! Plain text outline rendering.

use crate::model::Document;

const CONTINUATION_INDENT: &str = "    ";

/// Convert a document to a plain text outline.
///
/// The outline starts with the date, numbers each topic and writes each
/// section as `- label: fragment`. Further fragments go on lines indented to
/// the default nesting depth so they stay in their section.
/// Parsing the outline again yields the same topic titles and section labels
/// as long as titles and labels contain no colon.
pub fn to_text(doc: &Document) -> String {
    let mut lines = vec![doc.date.clone()];

    for (i, topic) in doc.topics.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!("{}. {}", i + 1, topic.title));
        for section in &topic.sections {
            let mut fragments = section.content.iter();
            match fragments.next() {
                Some(first) => lines.push(format!("- {}: {}", section.title, first)),
                None => lines.push(format!("- {}:", section.title)),
            }
            lines.extend(fragments.map(|f| format!("{}{}", CONTINUATION_INDENT, f)));
        }
    }

    lines.join("\n")
}
