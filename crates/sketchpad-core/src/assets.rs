//! Opaque collaborators: image decoding and text rasterization.
//!
//! The core never touches pixels. An [`AssetProvider`] turns a platform image handle into
//! a [`BackgroundImage`] reference the renderer can resolve later, and a
//! [`TextRasterizer`] turns label text into a drawable of known size.

use crate::error::SketchResult;
use crate::style::InkColor;
use kurbo::{Point, Rect, Size};
use uuid::Uuid;

/// Identifier for an asset held by the presentation layer.
pub type AssetId = Uuid;

/// Reference to a decoded background image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundImage {
    id: AssetId,
    /// Original image width in pixels.
    pub source_width: u32,
    /// Original image height in pixels.
    pub source_height: u32,
}

impl BackgroundImage {
    pub fn new(source_width: u32, source_height: u32) -> Self {
        Self::with_id(Uuid::new_v4(), source_width, source_height)
    }

    /// Wrap an id already known to the provider.
    pub fn with_id(id: AssetId, source_width: u32, source_height: u32) -> Self {
        Self {
            id,
            source_width,
            source_height,
        }
    }

    pub fn id(&self) -> AssetId {
        self.id
    }

    /// Largest rectangle with the image's aspect ratio that fits the canvas, centered.
    pub fn fit_rect(&self, canvas: Size) -> Rect {
        if self.source_width == 0 || self.source_height == 0 {
            return Rect::from_origin_size(Point::ZERO, canvas);
        }
        let scale = (canvas.width / self.source_width as f64)
            .min(canvas.height / self.source_height as f64);
        let size = Size::new(
            self.source_width as f64 * scale,
            self.source_height as f64 * scale,
        );
        let origin = Point::new(
            (canvas.width - size.width) / 2.0,
            (canvas.height - size.height) / 2.0,
        );
        Rect::from_origin_size(origin, size)
    }
}

/// Decodes platform image handles into background references.
pub trait AssetProvider {
    /// Platform-specific image handle (file path, picker result, bytes).
    type Handle;

    fn decode(&self, handle: Self::Handle) -> SketchResult<BackgroundImage>;
}

/// Opaque handle to a rasterized drawable owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawableHandle(pub u64);

/// Result of rasterizing a label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterizedText {
    pub drawable: DrawableHandle,
    /// Pixel size of the drawable.
    pub size: Size,
}

/// Renders label text to a bitmap drawable.
pub trait TextRasterizer {
    fn rasterize(&self, content: &str, font_size: f64, color: InkColor) -> RasterizedText;
}
