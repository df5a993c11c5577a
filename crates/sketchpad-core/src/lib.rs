//! Sketchpad Core Library
//!
//! Platform-agnostic drawing-session model and gesture pipeline for the Sketchpad
//! annotation surface. Rendering, widgets and input capture live in the host; they talk
//! to [`DrawingSession`] and [`GesturePipeline`] only.

pub mod assets;
pub mod config;
pub mod elements;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod session;
pub mod style;
pub mod tools;

pub use assets::{AssetProvider, BackgroundImage, DrawableHandle, RasterizedText, TextRasterizer};
pub use config::{EmptyTextPolicy, SessionConfig, ValueRange};
pub use elements::{Element, ElementId, ElementKind, Shape, ShapeType, Stroke, TextLabel};
pub use error::{SketchError, SketchResult};
pub use geometry::{Geometry, GeometryBuilder};
pub use gesture::{GesturePipeline, GestureState, ToolRules};
pub use session::DrawingSession;
pub use style::{InkColor, StrokeStyle, ToolStyles};
pub use tools::{ColorPolicy, ToolKind, WidthPolicy};
