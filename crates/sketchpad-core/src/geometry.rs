//! Stroke geometry: a mutable builder fed by gestures and the frozen result.

use kurbo::{BezPath, PathEl, Point, Rect};

/// Flattening tolerance used when measuring distances to curved geometry.
const FLATTEN_TOLERANCE: f64 = 0.25;

/// Geometry under construction during a gesture.
#[derive(Debug, Clone, Default)]
pub struct GeometryBuilder {
    path: BezPath,
    last: Option<Point>,
}

impl GeometryBuilder {
    /// Start a new path at `start`.
    pub fn new(start: Point) -> Self {
        let mut path = BezPath::new();
        path.move_to(start);
        Self {
            path,
            last: Some(start),
        }
    }

    /// The most recent sample appended to the path.
    pub fn last_point(&self) -> Option<Point> {
        self.last
    }

    /// Append a straight segment to `point`.
    pub fn line_to(&mut self, point: Point) {
        match self.last {
            Some(_) => self.path.line_to(point),
            None => self.path.move_to(point),
        }
        self.last = Some(point);
    }

    /// Append a smoothed segment to `point`.
    ///
    /// Emits a quadratic curve to the midpoint of the previous and new samples, with the
    /// previous sample as control point, followed by a straight segment to the new sample.
    pub fn smooth_to(&mut self, point: Point) {
        let Some(prev) = self.last else {
            self.path.move_to(point);
            self.last = Some(point);
            return;
        };
        let mid = prev.midpoint(point);
        self.path.quad_to(prev, mid);
        self.path.line_to(point);
        self.last = Some(point);
    }

    /// Replace the buffered path wholesale.
    pub fn replace(&mut self, path: BezPath) {
        self.last = path.elements().iter().rev().find_map(end_point);
        self.path = path;
    }

    /// The in-progress path, for live previews.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Freeze the buffered path.
    pub fn finish(self) -> Geometry {
        Geometry { path: self.path }
    }
}

/// A finished, immutable path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Geometry {
    path: BezPath,
}

impl Geometry {
    pub fn from_path(path: BezPath) -> Self {
        Self { path }
    }

    /// A closed rectangle path.
    pub fn rect(rect: Rect) -> Self {
        let mut path = BezPath::new();
        path.move_to((rect.x0, rect.y0));
        path.line_to((rect.x1, rect.y0));
        path.line_to((rect.x1, rect.y1));
        path.line_to((rect.x0, rect.y1));
        path.close_path();
        Self { path }
    }

    pub fn elements(&self) -> &[PathEl] {
        self.path.elements()
    }

    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    /// On-curve points in path order (control points excluded).
    pub fn points(&self) -> Vec<Point> {
        self.path.elements().iter().filter_map(end_point).collect()
    }

    /// Number of straight segments.
    pub fn line_count(&self) -> usize {
        self.count(|el| matches!(el, PathEl::LineTo(_)))
    }

    /// Number of curve segments.
    pub fn curve_count(&self) -> usize {
        self.count(|el| matches!(el, PathEl::QuadTo(..) | PathEl::CurveTo(..)))
    }

    fn count(&self, pred: impl Fn(&PathEl) -> bool) -> usize {
        self.path.elements().iter().filter(|el| pred(*el)).count()
    }

    /// Bounding box over on-curve and control points.
    pub fn bounds(&self) -> Rect {
        let mut points = self.path.elements().iter().flat_map(all_points);
        let Some(first) = points.next() else {
            return Rect::ZERO;
        };
        points.fold(Rect::from_points(first, first), |r, p| r.union_pt(p))
    }

    /// Shortest distance from `point` to the path outline.
    pub fn distance_to(&self, point: Point) -> f64 {
        let mut polylines: Vec<Vec<Point>> = Vec::new();
        kurbo::flatten(self.path.iter(), FLATTEN_TOLERANCE, |el| match el {
            PathEl::MoveTo(p) => polylines.push(vec![p]),
            PathEl::LineTo(p) => match polylines.last_mut() {
                Some(line) => line.push(p),
                None => polylines.push(vec![p]),
            },
            PathEl::ClosePath => {
                if let Some(line) = polylines.last_mut() {
                    if let Some(&first) = line.first() {
                        line.push(first);
                    }
                }
            }
            _ => {}
        });

        polylines
            .iter()
            .map(|line| match line.as_slice() {
                [single] => (point - *single).hypot(),
                _ => crate::elements::point_to_polyline_dist(point, line),
            })
            .fold(f64::INFINITY, f64::min)
    }

    pub fn to_path(&self) -> BezPath {
        self.path.clone()
    }
}

fn end_point(el: &PathEl) -> Option<Point> {
    match *el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(p),
        PathEl::QuadTo(_, p) => Some(p),
        PathEl::CurveTo(_, _, p) => Some(p),
        PathEl::ClosePath => None,
    }
}

fn all_points(el: &PathEl) -> Vec<Point> {
    match *el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => vec![p],
        PathEl::QuadTo(c, p) => vec![c, p],
        PathEl::CurveTo(c1, c2, p) => vec![c1, c2, p],
        PathEl::ClosePath => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_segments() {
        let mut builder = GeometryBuilder::new(Point::new(0.0, 0.0));
        builder.line_to(Point::new(5.0, 5.0));
        builder.line_to(Point::new(10.0, 0.0));
        let geometry = builder.finish();

        assert_eq!(geometry.line_count(), 2);
        assert_eq!(geometry.curve_count(), 0);
        assert_eq!(
            geometry.points(),
            vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(10.0, 0.0)]
        );
    }

    #[test]
    fn test_smoothing_targets_midpoints() {
        let mut builder = GeometryBuilder::new(Point::new(0.0, 0.0));
        builder.smooth_to(Point::new(10.0, 0.0));
        builder.smooth_to(Point::new(20.0, 0.0));
        let geometry = builder.finish();

        let curves: Vec<_> = geometry
            .elements()
            .iter()
            .filter_map(|el| match *el {
                PathEl::QuadTo(ctrl, to) => Some((ctrl, to)),
                _ => None,
            })
            .collect();
        assert_eq!(
            curves,
            vec![
                (Point::new(0.0, 0.0), Point::new(5.0, 0.0)),
                (Point::new(10.0, 0.0), Point::new(15.0, 0.0)),
            ]
        );
        assert_eq!(geometry.points().last(), Some(&Point::new(20.0, 0.0)));
    }

    #[test]
    fn test_bounds() {
        let mut builder = GeometryBuilder::new(Point::new(0.0, 0.0));
        builder.line_to(Point::new(100.0, 50.0));
        builder.line_to(Point::new(50.0, 100.0));
        let bounds = builder.finish().bounds();

        assert!((bounds.x0).abs() < f64::EPSILON);
        assert!((bounds.y0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
        assert_eq!(Geometry::default().bounds(), Rect::ZERO);
    }

    #[test]
    fn test_distance() {
        let mut builder = GeometryBuilder::new(Point::new(0.0, 0.0));
        builder.line_to(Point::new(100.0, 0.0));
        let geometry = builder.finish();

        assert!((geometry.distance_to(Point::new(50.0, 20.0)) - 20.0).abs() < 1e-9);

        let dot = GeometryBuilder::new(Point::new(3.0, 4.0)).finish();
        assert!((dot.distance_to(Point::ZERO) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_replace_tracks_last_point() {
        let mut builder = GeometryBuilder::new(Point::new(1.0, 1.0));
        builder.replace(Geometry::rect(Rect::new(0.0, 0.0, 10.0, 20.0)).to_path());
        assert_eq!(builder.last_point(), Some(Point::new(0.0, 20.0)));
        assert_eq!(builder.finish().line_count(), 3);
    }
}
