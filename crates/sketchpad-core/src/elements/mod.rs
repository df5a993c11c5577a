//! Drawable elements stored on the canvas.

mod shape;
mod stroke;
mod text;

pub use shape::{Shape, ShapeType};
pub use stroke::Stroke;
pub use text::TextLabel;

use crate::style::InkColor;
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Unique identifier for elements.
pub type ElementId = uuid::Uuid;

/// The kind of an element. Selection is exclusive within a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Stroke,
    Shape,
    Text,
}

impl ElementKind {
    /// Whether elements of this kind can be selected and moved.
    pub fn is_selectable(&self) -> bool {
        !matches!(self, ElementKind::Stroke)
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Common trait for all elements.
pub trait ElementTrait {
    /// Get the unique identifier.
    fn id(&self) -> ElementId;

    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point hits this element.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Get the path representation for rendering.
    fn to_path(&self) -> BezPath;

    fn color(&self) -> InkColor;
}

/// A drawable element: the unit stored in a session's paint order.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Stroke(Stroke),
    Shape(Shape),
    Text(TextLabel),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Stroke(e) => e.id(),
            Element::Shape(e) => e.id(),
            Element::Text(e) => e.id(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Stroke(_) => ElementKind::Stroke,
            Element::Shape(_) => ElementKind::Shape,
            Element::Text(_) => ElementKind::Text,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Element::Stroke(e) => e.bounds(),
            Element::Shape(e) => e.bounds(),
            Element::Text(e) => e.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Element::Stroke(e) => e.hit_test(point, tolerance),
            Element::Shape(e) => e.hit_test(point, tolerance),
            Element::Text(e) => e.hit_test(point, tolerance),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Element::Stroke(e) => e.to_path(),
            Element::Shape(e) => e.to_path(),
            Element::Text(e) => e.to_path(),
        }
    }

    pub fn color(&self) -> InkColor {
        match self {
            Element::Stroke(e) => e.color(),
            Element::Shape(e) => e.color(),
            Element::Text(e) => e.color(),
        }
    }

    /// Strokes are never selected.
    pub fn is_selected(&self) -> bool {
        match self {
            Element::Stroke(_) => false,
            Element::Shape(s) => s.selected,
            Element::Text(t) => t.selected,
        }
    }

    pub fn set_selected(&mut self, selected: bool) {
        match self {
            Element::Stroke(_) => {}
            Element::Shape(s) => s.selected = selected,
            Element::Text(t) => t.selected = selected,
        }
    }

    /// Anchor position for movable elements.
    pub fn position(&self) -> Option<Point> {
        match self {
            Element::Stroke(_) => None,
            Element::Shape(s) => Some(s.position),
            Element::Text(t) => Some(t.position),
        }
    }

    /// Move a movable element. Returns false for strokes.
    pub fn set_position(&mut self, position: Point) -> bool {
        match self {
            Element::Stroke(_) => false,
            Element::Shape(s) => {
                s.position = position;
                true
            }
            Element::Text(t) => {
                t.position = position;
                true
            }
        }
    }

    /// Offset a movable element. Returns false for strokes.
    pub fn translate(&mut self, delta: Vec2) -> bool {
        match self.position() {
            Some(position) => self.set_position(position + delta),
            None => false,
        }
    }

    pub fn as_stroke(&self) -> Option<&Stroke> {
        match self {
            Element::Stroke(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_shape(&self) -> Option<&Shape> {
        match self {
            Element::Shape(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_shape_mut(&mut self) -> Option<&mut Shape> {
        match self {
            Element::Shape(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextLabel> {
        match self {
            Element::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextLabel> {
        match self {
            Element::Text(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    #[test]
    fn test_segment_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((point_to_segment_dist(Point::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-9);
        // Beyond the end clamps to the endpoint
        assert!((point_to_segment_dist(Point::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-9);
        // Degenerate segment
        assert!((point_to_segment_dist(Point::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_kinds() {
        let shape = Element::Shape(Shape::new(
            ShapeType::Rectangle,
            Point::ZERO,
            Size::new(10.0, 10.0),
            InkColor::black(),
        ));
        assert_eq!(shape.kind(), ElementKind::Shape);
        assert!(shape.kind().is_selectable());
        assert!(!ElementKind::Stroke.is_selectable());
    }

    #[test]
    fn test_stroke_is_not_movable() {
        let mut stroke = Element::Stroke(Stroke::new(
            crate::geometry::Geometry::default(),
            InkColor::black(),
            2.0,
            false,
        ));
        assert!(!stroke.set_position(Point::new(1.0, 1.0)));
        assert!(!stroke.translate(Vec2::new(1.0, 1.0)));
        stroke.set_selected(true);
        assert!(!stroke.is_selected());
    }

    #[test]
    fn test_translate_text() {
        let mut text = Element::Text(TextLabel::new(
            "hi".to_string(),
            Point::new(10.0, 10.0),
            InkColor::black(),
            20.0,
        ));
        assert!(text.translate(Vec2::new(5.0, -5.0)));
        assert_eq!(text.position(), Some(Point::new(15.0, 5.0)));
    }
}
