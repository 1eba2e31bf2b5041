//! Per-topic icon and color assignment.

/// Topic icons, cycled by topic position.
pub const TOPIC_ICONS: [&str; 8] = ["💡", "🛠️", "📊", "🎯", "🔥", "⚡", "🌟", "💪"];

/// Topic color names, cycled by topic position.
pub const TOPIC_COLORS: [&str; 8] = [
    "blue", "purple", "red", "orange", "green", "yellow", "pink", "indigo",
];

/// Icon and color for one topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicStyle {
    /// Emoji icon
    pub icon: &'static str,
    /// Color name used in CSS classes (`icon-<color>`)
    pub color: &'static str,
}

/// Style for the topic at zero-based `index`.
pub fn topic_style(index: usize) -> TopicStyle {
    TopicStyle {
        icon: TOPIC_ICONS[index % TOPIC_ICONS.len()],
        color: TOPIC_COLORS[index % TOPIC_COLORS.len()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_same_length() {
        assert_eq!(TOPIC_ICONS.len(), TOPIC_COLORS.len());
    }

    #[test]
    fn test_first_styles() {
        assert_eq!(
            topic_style(0),
            TopicStyle {
                icon: "💡",
                color: "blue"
            }
        );
        assert_eq!(topic_style(7).color, "indigo");
    }

    #[test]
    fn test_styles_cycle() {
        let len = TOPIC_ICONS.len();
        for i in 0..len {
            for k in 1..4 {
                assert_eq!(topic_style(i), topic_style(i + k * len));
            }
        }
    }
}
