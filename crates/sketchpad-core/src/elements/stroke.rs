//! Committed freehand strokes and fills.

use super::{ElementId, ElementTrait};
use crate::geometry::Geometry;
use crate::style::InkColor;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use uuid::Uuid;

/// A finished stroke.
///
/// Filled strokes render as a filled region and ignore `width`; outlined strokes render
/// the path with the given width.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub(crate) id: ElementId,
    pub geometry: Geometry,
    pub color: InkColor,
    pub width: f64,
    pub filled: bool,
}

impl Stroke {
    pub fn new(geometry: Geometry, color: InkColor, width: f64, filled: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            geometry,
            color,
            width,
            filled,
        }
    }
}

impl ElementTrait for Stroke {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let bounds = self.geometry.bounds();
        if self.filled {
            bounds
        } else {
            bounds.inflate(self.width / 2.0, self.width / 2.0)
        }
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if self.geometry.is_empty() {
            return false;
        }
        if self.filled && self.geometry.to_path().contains(point) {
            return true;
        }
        let reach = if self.filled {
            tolerance
        } else {
            tolerance + self.width / 2.0
        };
        self.geometry.distance_to(point) <= reach
    }

    fn to_path(&self) -> BezPath {
        self.geometry.to_path()
    }

    fn color(&self) -> InkColor {
        self.color
    }
}
