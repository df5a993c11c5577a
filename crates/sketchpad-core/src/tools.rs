//! Drawing tools and their style policies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Available drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
    Brush,
    Fill,
}

/// How a tool resolves the width of the strokes it commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthPolicy {
    /// The tool stores its own width, independent of every other tool.
    Own,
    /// The width comes from the session configuration and cannot be changed.
    Fixed,
    /// Width has no meaning for this tool (filled regions).
    Ignored,
}

/// How a tool resolves the color of the strokes it commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorPolicy {
    /// The tool stores its own color.
    Own,
    /// The tool paints with the canvas background color.
    Background,
    /// The tool reads and writes another tool's color slot.
    SharesWith(ToolKind),
}

impl ToolKind {
    /// All tools in toolbar order.
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Pen,
        ToolKind::Eraser,
        ToolKind::Brush,
        ToolKind::Fill,
    ];

    /// Get display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            ToolKind::Pen => "Pen",
            ToolKind::Eraser => "Eraser",
            ToolKind::Brush => "Brush",
            ToolKind::Fill => "Fill",
        }
    }

    pub fn width_policy(&self) -> WidthPolicy {
        match self {
            ToolKind::Pen | ToolKind::Brush => WidthPolicy::Own,
            ToolKind::Eraser => WidthPolicy::Fixed,
            ToolKind::Fill => WidthPolicy::Ignored,
        }
    }

    pub fn color_policy(&self) -> ColorPolicy {
        match self {
            ToolKind::Pen | ToolKind::Brush => ColorPolicy::Own,
            ToolKind::Eraser => ColorPolicy::Background,
            ToolKind::Fill => ColorPolicy::SharesWith(ToolKind::Pen),
        }
    }

    /// Whether strokes committed by this tool are rendered as filled regions.
    pub fn fills(&self) -> bool {
        matches!(self, ToolKind::Fill)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tool() {
        assert_eq!(ToolKind::default(), ToolKind::Pen);
    }

    #[test]
    fn test_toolbar_order() {
        let names: Vec<_> = ToolKind::ALL.iter().map(|t| t.to_string()).collect();
        assert_eq!(names, vec!["Pen", "Eraser", "Brush", "Fill"]);
    }

    #[test]
    fn test_policies() {
        assert_eq!(ToolKind::Pen.width_policy(), WidthPolicy::Own);
        assert_eq!(ToolKind::Brush.width_policy(), WidthPolicy::Own);
        assert_eq!(ToolKind::Eraser.width_policy(), WidthPolicy::Fixed);
        assert_eq!(ToolKind::Fill.width_policy(), WidthPolicy::Ignored);

        assert_eq!(ToolKind::Eraser.color_policy(), ColorPolicy::Background);
        assert_eq!(
            ToolKind::Fill.color_policy(),
            ColorPolicy::SharesWith(ToolKind::Pen)
        );
        assert!(ToolKind::Fill.fills());
        assert!(!ToolKind::Brush.fills());
    }
}
