//! Session configuration.

use crate::error::{SketchError, SketchResult};
use crate::style::{InkColor, StrokeStyle, validate_width};
use crate::tools::ToolKind;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Inclusive range of accepted values for a slider-backed setting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, name: &'static str) -> SketchResult<()> {
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
            Ok(())
        } else {
            Err(SketchError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// What `add_text` does with empty content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmptyTextPolicy {
    /// Empty content is dropped and nothing is appended.
    #[default]
    Reject,
    /// Empty content is stored as an empty label.
    Store,
}

/// Configuration for a drawing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Canvas size used for full-canvas fills.
    pub canvas_size: Size,
    /// Canvas background color. The eraser paints with it.
    pub background_color: InkColor,
    /// Fixed eraser width.
    pub eraser_width: f64,
    /// Initial pen style.
    pub pen: StrokeStyle,
    pub pen_width_range: ValueRange,
    /// Initial brush style.
    pub brush: StrokeStyle,
    pub brush_width_range: ValueRange,
    pub default_font_size: f64,
    pub font_size_range: ValueRange,
    /// Where labels added without an explicit position are placed.
    pub default_text_position: Point,
    pub empty_text: EmptyTextPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            canvas_size: Size::new(800.0, 600.0),
            background_color: InkColor::white(),
            eraser_width: 10.0,
            pen: StrokeStyle::new(InkColor::black(), 3.0),
            pen_width_range: ValueRange::new(1.0, 6.0),
            brush: StrokeStyle::new(InkColor::black(), 10.0),
            brush_width_range: ValueRange::new(1.0, 40.0),
            default_font_size: 20.0,
            font_size_range: ValueRange::new(12.0, 36.0),
            default_text_position: Point::new(150.0, 150.0),
            empty_text: EmptyTextPolicy::default(),
        }
    }
}

impl SessionConfig {
    /// Parse and validate a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> SketchResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SketchError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check that the configuration satisfies the rules runtime updates are held to.
    ///
    /// Ranges are checked first, so initial pen and brush widths and the default font
    /// size are then tested against well-formed bounds.
    pub fn validate(&self) -> SketchResult<()> {
        self.pen_width_range.validate("pen width")?;
        self.brush_width_range.validate("brush width")?;
        self.font_size_range.validate("font size")?;
        validate_size(self.canvas_size)?;
        if !self.eraser_width.is_finite() || self.eraser_width <= 0.0 {
            return Err(SketchError::InvalidWidth(self.eraser_width));
        }
        validate_width(ToolKind::Pen, self.pen.width, self)?;
        validate_width(ToolKind::Brush, self.brush.width, self)?;
        self.check_font_size(self.default_font_size)
    }

    /// Font sizes must be positive, finite and inside `font_size_range`.
    pub(crate) fn check_font_size(&self, font_size: f64) -> SketchResult<()> {
        if font_size.is_finite() && font_size > 0.0 && self.font_size_range.contains(font_size) {
            Ok(())
        } else {
            Err(SketchError::InvalidFontSize(font_size))
        }
    }

    /// Accepted width range for tools with an adjustable width.
    pub fn width_range(&self, tool: ToolKind) -> Option<ValueRange> {
        match tool {
            ToolKind::Pen => Some(self.pen_width_range),
            ToolKind::Brush => Some(self.brush_width_range),
            ToolKind::Eraser | ToolKind::Fill => None,
        }
    }

    /// Initial style for a tool slot.
    pub fn default_style(&self, tool: ToolKind) -> StrokeStyle {
        match tool {
            ToolKind::Pen | ToolKind::Fill => self.pen,
            ToolKind::Brush => self.brush,
            ToolKind::Eraser => StrokeStyle::new(self.background_color, self.eraser_width),
        }
    }
}

/// Sizes must be finite and non-negative on both axes.
pub(crate) fn validate_size(size: Size) -> SketchResult<()> {
    if size.width.is_finite() && size.height.is_finite() && size.width >= 0.0 && size.height >= 0.0 {
        Ok(())
    } else {
        Err(SketchError::InvalidSize {
            width: size.width,
            height: size.height,
        })
    }
}
