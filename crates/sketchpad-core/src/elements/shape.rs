//! Geometric shapes placed on the canvas.

use super::{ElementId, ElementTrait};
use crate::geometry::Geometry;
use crate::style::InkColor;
use kurbo::{BezPath, Circle, Ellipse, Point, Rect, Shape as KurboShape, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Accuracy used when converting curved outlines to paths.
const PATH_TOLERANCE: f64 = 0.1;

/// The kind of geometric shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeType {
    Triangle,
    Rectangle,
    Circle,
    Oval,
    Square,
}

impl ShapeType {
    /// Shape-picker order.
    pub const ALL: [ShapeType; 5] = [
        ShapeType::Triangle,
        ShapeType::Rectangle,
        ShapeType::Circle,
        ShapeType::Oval,
        ShapeType::Square,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ShapeType::Triangle => "Triangle",
            ShapeType::Rectangle => "Rectangle",
            ShapeType::Circle => "Circle",
            ShapeType::Oval => "Oval",
            ShapeType::Square => "Square",
        }
    }

    /// Whether the outline keeps a 1:1 aspect ratio inside its frame.
    pub fn is_uniform(&self) -> bool {
        matches!(self, ShapeType::Circle | ShapeType::Square)
    }
}

/// A shape anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub(crate) id: ElementId,
    pub shape_type: ShapeType,
    /// Top-left corner of the frame.
    pub position: Point,
    /// Frame size. Circles and squares use the shorter side.
    pub size: Size,
    pub color: InkColor,
    pub selected: bool,
}

impl Shape {
    pub fn new(shape_type: ShapeType, position: Point, size: Size, color: InkColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            shape_type,
            position,
            size,
            color,
            selected: false,
        }
    }

    /// The frame rectangle as given.
    pub fn frame(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// The rectangle the outline actually occupies.
    pub fn outline_rect(&self) -> Rect {
        if self.shape_type.is_uniform() {
            let side = self.size.width.min(self.size.height);
            Rect::from_origin_size(self.position, Size::new(side, side))
        } else {
            self.frame()
        }
    }
}

impl ElementTrait for Shape {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.outline_rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let path = self.to_path();
        path.contains(point) || Geometry::from_path(path).distance_to(point) <= tolerance
    }

    fn to_path(&self) -> BezPath {
        let rect = self.outline_rect();
        match self.shape_type {
            ShapeType::Rectangle | ShapeType::Square => rect.to_path(PATH_TOLERANCE),
            ShapeType::Circle => {
                Circle::new(rect.center(), rect.width() / 2.0).to_path(PATH_TOLERANCE)
            }
            ShapeType::Oval => Ellipse::from_rect(rect).to_path(PATH_TOLERANCE),
            ShapeType::Triangle => {
                let mut path = BezPath::new();
                path.move_to((rect.center().x, rect.y0));
                path.line_to((rect.x1, rect.y1));
                path.line_to((rect.x0, rect.y1));
                path.close_path();
                path
            }
        }
    }

    fn color(&self) -> InkColor {
        self.color
    }
}
