//! Gesture pipeline: turns a pointer drag into stroke geometry and commits it.
//!
//! One gesture runs from pointer-down to pointer-up and never nests. The tool is captured
//! at pointer-down, and its [`ToolRules`] decide how each sample extends the buffer and
//! how the buffer is finalized. The pipeline touches the session only once per gesture,
//! through [`DrawingSession::commit_stroke_for`].

use crate::elements::ElementId;
use crate::error::{SketchError, SketchResult};
use crate::geometry::{Geometry, GeometryBuilder};
use crate::session::DrawingSession;
use crate::tools::ToolKind;
use kurbo::{BezPath, Point, Rect, Size};

/// Appends one pointer sample to the buffer.
pub type ExtendFn = fn(&mut GeometryBuilder, Point);

/// Finalizes the buffer at pointer-up, given the canvas size.
pub type FinishFn = fn(&mut GeometryBuilder, Size);

/// Per-tool geometry rules.
#[derive(Debug, Clone, Copy)]
pub struct ToolRules {
    pub extend: ExtendFn,
    pub finish: FinishFn,
}

const STRAIGHT: ToolRules = ToolRules {
    extend: extend_straight,
    finish: keep_buffer,
};

const SMOOTHED: ToolRules = ToolRules {
    extend: extend_smoothed,
    finish: keep_buffer,
};

const CANVAS_FILL: ToolRules = ToolRules {
    extend: ignore_sample,
    finish: fill_canvas,
};

impl ToolRules {
    pub fn for_tool(tool: ToolKind) -> Self {
        match tool {
            ToolKind::Pen | ToolKind::Eraser => STRAIGHT,
            ToolKind::Brush => SMOOTHED,
            ToolKind::Fill => CANVAS_FILL,
        }
    }
}

fn extend_straight(builder: &mut GeometryBuilder, point: Point) {
    builder.line_to(point);
}

fn extend_smoothed(builder: &mut GeometryBuilder, point: Point) {
    builder.smooth_to(point);
}

// The fill drag only marks when the gesture ends.
fn ignore_sample(_: &mut GeometryBuilder, _: Point) {}

fn keep_buffer(_: &mut GeometryBuilder, _: Size) {}

fn fill_canvas(builder: &mut GeometryBuilder, canvas: Size) {
    let rect = Rect::from_origin_size(Point::ZERO, canvas);
    builder.replace(Geometry::rect(rect).to_path());
}

/// State of the pipeline.
#[derive(Debug, Clone, Default)]
pub enum GestureState {
    /// No buffered geometry.
    #[default]
    Idle,
    /// A drag is in progress.
    Accumulating {
        /// Tool captured at pointer-down.
        tool: ToolKind,
        /// Pointer-down location.
        start: Point,
        builder: GeometryBuilder,
    },
}

/// Converts pointer events into committed strokes.
#[derive(Debug, Clone, Default)]
pub struct GesturePipeline {
    state: GestureState,
    /// Last pointer location, for a cursor-following indicator.
    cursor: Option<Point>,
}

impl GesturePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.state, GestureState::Accumulating { .. })
    }

    /// Tool of the gesture in progress.
    pub fn active_tool(&self) -> Option<ToolKind> {
        match &self.state {
            GestureState::Accumulating { tool, .. } => Some(*tool),
            GestureState::Idle => None,
        }
    }

    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// The in-progress path, for live rendering.
    pub fn preview(&self) -> Option<&BezPath> {
        match &self.state {
            GestureState::Accumulating { builder, .. } => Some(builder.path()),
            GestureState::Idle => None,
        }
    }

    /// Start a gesture with the session's active tool.
    pub fn pointer_down(&mut self, session: &DrawingSession, point: Point) -> SketchResult<()> {
        if self.is_active() {
            log::warn!("Pointer down at {:?} while a gesture is in progress", point);
            return Err(SketchError::GestureInProgress);
        }
        let tool = session.active_tool();
        log::trace!("Gesture start: {} at {:?}", tool, point);
        self.cursor = Some(point);
        self.state = GestureState::Accumulating {
            tool,
            start: point,
            builder: GeometryBuilder::new(point),
        };
        Ok(())
    }

    /// Feed a pointer sample. While idle only the cursor is updated.
    pub fn pointer_move(&mut self, point: Point) {
        self.cursor = Some(point);
        if let GestureState::Accumulating { tool, builder, .. } = &mut self.state {
            log::trace!("Gesture sample: {:?}", point);
            (ToolRules::for_tool(*tool).extend)(builder, point);
        }
    }

    /// Finish the gesture and commit the stroke. Returns None if no gesture was active.
    pub fn pointer_up(&mut self, session: &mut DrawingSession) -> Option<ElementId> {
        let GestureState::Accumulating {
            tool, mut builder, ..
        } = std::mem::take(&mut self.state)
        else {
            log::debug!("Pointer up without an active gesture");
            return None;
        };

        (ToolRules::for_tool(tool).finish)(&mut builder, session.canvas_size());
        let geometry = builder.finish();
        Some(session.commit_stroke_for(tool, geometry, tool.fills()))
    }

    /// Drop the gesture in progress without committing.
    pub fn cancel(&mut self) {
        if self.is_active() {
            log::debug!("Gesture cancelled");
        }
        self.state = GestureState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ElementKind, Stroke};
    use crate::style::InkColor;
    use kurbo::PathEl;

    fn drag(
        pipeline: &mut GesturePipeline,
        session: &mut DrawingSession,
        points: &[(f64, f64)],
    ) -> Option<ElementId> {
        let (first, rest) = points.split_first()?;
        pipeline
            .pointer_down(session, Point::new(first.0, first.1))
            .unwrap();
        for &(x, y) in rest {
            pipeline.pointer_move(Point::new(x, y));
        }
        pipeline.pointer_up(session)
    }

    fn stroke(session: &DrawingSession, id: ElementId) -> &Stroke {
        session.get(id).unwrap().as_stroke().unwrap()
    }

    #[test]
    fn test_pen_drag_end_to_end() {
        let mut session = DrawingSession::new();
        let mut pipeline = GesturePipeline::new();
        session.set_tool(ToolKind::Pen);
        let pen = session.style_for(ToolKind::Pen);

        let id = drag(&mut pipeline, &mut session, &[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)]).unwrap();

        assert_eq!(session.len(), 1);
        assert_eq!(session.elements()[0].kind(), ElementKind::Stroke);
        let stroke = stroke(&session, id);
        assert!(!stroke.filled);
        assert_eq!(stroke.color, pen.color);
        assert_eq!(stroke.width, pen.width);
        assert_eq!(stroke.geometry.line_count(), 2);
        assert_eq!(stroke.geometry.curve_count(), 0);
        assert_eq!(
            stroke.geometry.points(),
            vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(10.0, 0.0)]
        );
        assert!(!pipeline.is_active());
    }

    #[test]
    fn test_brush_uses_midpoints_as_curve_targets() {
        let mut session = DrawingSession::new();
        let mut pipeline = GesturePipeline::new();
        session.set_tool(ToolKind::Brush);

        let id = drag(&mut pipeline, &mut session, &[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]).unwrap();
        let geometry = &stroke(&session, id).geometry;

        assert_eq!(geometry.curve_count(), 2);
        assert_eq!(
            geometry.elements(),
            &[
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::QuadTo(Point::new(0.0, 0.0), Point::new(5.0, 0.0)),
                PathEl::LineTo(Point::new(10.0, 0.0)),
                PathEl::QuadTo(Point::new(10.0, 0.0), Point::new(15.0, 0.0)),
                PathEl::LineTo(Point::new(20.0, 0.0)),
            ]
        );
        assert_eq!(stroke(&session, id).width, session.style_for(ToolKind::Brush).width);
    }

    #[test]
    fn test_fill_covers_canvas_with_pen_color() {
        let mut session = DrawingSession::new();
        let mut pipeline = GesturePipeline::new();
        let teal = InkColor::rgb(0, 128, 128);
        session.set_style(ToolKind::Pen, Some(teal), None).unwrap();
        session.set_canvas_size(320.0, 200.0).unwrap();
        session.set_tool(ToolKind::Fill);

        pipeline.pointer_down(&session, Point::new(40.0, 40.0)).unwrap();
        pipeline.pointer_move(Point::new(60.0, 80.0));
        // The drag does not extend the buffer
        assert_eq!(pipeline.preview().map(|p| p.elements().len()), Some(1));
        let id = pipeline.pointer_up(&mut session).unwrap();

        let fill = stroke(&session, id);
        assert!(fill.filled);
        assert_eq!(fill.color, teal);
        assert_eq!(fill.width, 0.0);
        assert_eq!(fill.geometry.bounds(), Rect::new(0.0, 0.0, 320.0, 200.0));
    }

    #[test]
    fn test_fill_after_rejected_canvas_size_uses_prior_canvas() {
        let mut session = DrawingSession::new();
        let mut pipeline = GesturePipeline::new();
        assert!(session.set_canvas_size(-100.0, f64::NAN).is_err());
        session.set_tool(ToolKind::Fill);

        pipeline.pointer_down(&session, Point::new(10.0, 10.0)).unwrap();
        let id = pipeline.pointer_up(&mut session).unwrap();

        let fill = stroke(&session, id);
        assert_eq!(fill.geometry.bounds(), Rect::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn test_eraser_commit_uses_override() {
        let mut session = DrawingSession::new();
        let mut pipeline = GesturePipeline::new();
        session
            .set_style(ToolKind::Pen, Some(InkColor::rgb(255, 0, 0)), Some(2.0))
            .unwrap();
        session.set_tool(ToolKind::Eraser);

        let id = drag(&mut pipeline, &mut session, &[(0.0, 0.0), (3.0, 3.0)]).unwrap();
        let erased = stroke(&session, id);
        assert_eq!(erased.color, session.config().background_color);
        assert_eq!(erased.width, session.config().eraser_width);
        assert!(!erased.filled);
        assert_eq!(erased.geometry.line_count(), 1);
    }

    #[test]
    fn test_tool_switch_mid_gesture_keeps_captured_tool() {
        let mut session = DrawingSession::new();
        let mut pipeline = GesturePipeline::new();
        session.set_tool(ToolKind::Pen);

        pipeline.pointer_down(&session, Point::new(0.0, 0.0)).unwrap();
        session.set_tool(ToolKind::Brush);
        pipeline.pointer_move(Point::new(10.0, 0.0));
        assert_eq!(pipeline.active_tool(), Some(ToolKind::Pen));

        let id = pipeline.pointer_up(&mut session).unwrap();
        let committed = stroke(&session, id);
        assert_eq!(committed.geometry.curve_count(), 0);
        assert_eq!(committed.width, session.style_for(ToolKind::Pen).width);
        assert_eq!(session.active_tool(), ToolKind::Brush);
    }

    #[test]
    fn test_nested_pointer_down_is_rejected() {
        let session = DrawingSession::new();
        let mut pipeline = GesturePipeline::new();

        pipeline.pointer_down(&session, Point::new(1.0, 1.0)).unwrap();
        pipeline.pointer_move(Point::new(2.0, 2.0));
        let err = pipeline.pointer_down(&session, Point::new(50.0, 50.0));
        assert_eq!(err, Err(SketchError::GestureInProgress));

        match pipeline.state() {
            GestureState::Accumulating { start, builder, .. } => {
                assert_eq!(*start, Point::new(1.0, 1.0));
                assert_eq!(builder.last_point(), Some(Point::new(2.0, 2.0)));
            }
            GestureState::Idle => panic!("gesture should still be accumulating"),
        }
    }

    #[test]
    fn test_idle_events() {
        let mut session = DrawingSession::new();
        let mut pipeline = GesturePipeline::new();

        pipeline.pointer_move(Point::new(7.0, 8.0));
        assert_eq!(pipeline.cursor(), Some(Point::new(7.0, 8.0)));
        assert!(pipeline.preview().is_none());
        assert!(pipeline.pointer_up(&mut session).is_none());
        assert!(session.is_empty());
    }

    #[test]
    fn test_tap_commits_single_point() {
        let mut session = DrawingSession::new();
        let mut pipeline = GesturePipeline::new();

        let id = drag(&mut pipeline, &mut session, &[(4.0, 4.0)]).unwrap();
        let dot = stroke(&session, id);
        assert_eq!(dot.geometry.points(), vec![Point::new(4.0, 4.0)]);
        assert_eq!(dot.geometry.line_count(), 0);
    }

    #[test]
    fn test_cancel_discards_buffer() {
        let mut session = DrawingSession::new();
        let mut pipeline = GesturePipeline::new();

        pipeline.pointer_down(&session, Point::new(0.0, 0.0)).unwrap();
        pipeline.pointer_move(Point::new(5.0, 5.0));
        pipeline.cancel();

        assert!(!pipeline.is_active());
        assert!(pipeline.pointer_up(&mut session).is_none());
        assert!(session.is_empty());
    }

    #[test]
    fn test_gesture_after_undo_invalidates_redo() {
        let mut session = DrawingSession::new();
        let mut pipeline = GesturePipeline::new();

        drag(&mut pipeline, &mut session, &[(0.0, 0.0), (1.0, 1.0)]);
        session.undo();
        let fresh = drag(&mut pipeline, &mut session, &[(5.0, 5.0), (6.0, 6.0)]).unwrap();

        assert!(!session.redo());
        assert_eq!(session.len(), 1);
        assert_eq!(session.elements()[0].id(), fresh);
    }

    #[test]
    fn test_cursor_tracks_drag() {
        let session = DrawingSession::new();
        let mut pipeline = GesturePipeline::new();

        pipeline.pointer_down(&session, Point::new(1.0, 2.0)).unwrap();
        assert_eq!(pipeline.cursor(), Some(Point::new(1.0, 2.0)));
        pipeline.pointer_move(Point::new(3.0, 4.0));
        assert_eq!(pipeline.cursor(), Some(Point::new(3.0, 4.0)));
    }
}
