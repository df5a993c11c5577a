//! Text labels.

use super::{ElementId, ElementTrait};
use crate::style::InkColor;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Size};
use uuid::Uuid;

/// Average glyph advance relative to font size, used until a rasterizer measures the label.
const CHAR_WIDTH_FACTOR: f64 = 0.55;
const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// A text label anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub(crate) id: ElementId,
    pub content: String,
    pub position: Point,
    pub color: InkColor,
    pub font_size: f64,
    pub selected: bool,
    /// Size reported by a text rasterizer. If None, approximate bounds are used.
    measured_size: Option<Size>,
}

impl TextLabel {
    pub fn new(content: String, position: Point, color: InkColor, font_size: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            position,
            color,
            font_size,
            selected: false,
            measured_size: None,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the content and drop any stale measurement.
    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.measured_size = None;
    }

    pub fn measured_size(&self) -> Option<Size> {
        self.measured_size
    }

    pub fn set_measured_size(&mut self, size: Size) {
        self.measured_size = Some(size);
    }

    /// Measured size if known, otherwise an estimate from the font size.
    pub fn size(&self) -> Size {
        self.measured_size.unwrap_or_else(|| self.approximate_size())
    }

    fn approximate_size(&self) -> Size {
        let longest = self
            .content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let lines = self.content.lines().count().max(1);
        Size::new(
            longest as f64 * self.font_size * CHAR_WIDTH_FACTOR,
            lines as f64 * self.font_size * LINE_HEIGHT_FACTOR,
        )
    }
}

impl ElementTrait for TextLabel {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size())
    }

    /// Inclusive on every edge, matching the `<=` reach of strokes and shapes.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let b = self.bounds();
        point.x >= b.x0 - tolerance
            && point.x <= b.x1 + tolerance
            && point.y >= b.y0 - tolerance
            && point.y <= b.y1 + tolerance
    }

    /// The label's frame; glyph outlines are the renderer's concern.
    fn to_path(&self) -> BezPath {
        self.bounds().to_path(0.1)
    }

    fn color(&self) -> InkColor {
        self.color
    }
}
