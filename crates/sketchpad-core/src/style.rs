//! Colors and per-tool stroke styles.

use crate::config::SessionConfig;
use crate::error::{SketchError, SketchResult};
use crate::tools::{ColorPolicy, ToolKind, WidthPolicy};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// RGBA8 color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InkColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl InkColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        // from_str_radix would also take a sign
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = channel(0..1)? * 17;
                let g = channel(1..2)? * 17;
                let b = channel(2..3)? * 17;
                Some(Self::rgb(r, g, b))
            }
            6 => Some(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Some(Self::new(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => None,
        }
    }
}

impl Default for InkColor {
    fn default() -> Self {
        Self::black()
    }
}

impl From<Color> for InkColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

impl From<InkColor> for Color {
    fn from(color: InkColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Color and width applied to committed strokes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: InkColor,
    pub width: f64,
}

impl StrokeStyle {
    pub fn new(color: InkColor, width: f64) -> Self {
        Self { color, width }
    }

    /// Get the color as a peniko Color.
    pub fn peniko_color(&self) -> Color {
        self.color.into()
    }
}

/// Stored styles for the tools that own a color or width slot.
///
/// Tools without a slot of their own (eraser, fill) are resolved through their
/// [`ColorPolicy`] and [`WidthPolicy`] in [`ToolStyles::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct ToolStyles {
    styles: HashMap<ToolKind, StrokeStyle>,
}

impl ToolStyles {
    /// Seed the pen and brush slots from the configuration.
    pub fn from_config(config: &SessionConfig) -> Self {
        let mut styles = HashMap::new();
        styles.insert(ToolKind::Pen, config.pen);
        styles.insert(ToolKind::Brush, config.brush);
        Self { styles }
    }

    /// The stored style for a tool, if it owns one.
    pub fn stored(&self, tool: ToolKind) -> Option<&StrokeStyle> {
        self.styles.get(&tool)
    }

    fn slot(&self, tool: ToolKind, config: &SessionConfig) -> StrokeStyle {
        self.styles
            .get(&tool)
            .copied()
            .unwrap_or_else(|| config.default_style(tool))
    }

    /// Resolve the style a commit with `tool` would use right now.
    pub fn resolve(&self, tool: ToolKind, config: &SessionConfig) -> StrokeStyle {
        let color = match tool.color_policy() {
            ColorPolicy::Own => self.slot(tool, config).color,
            ColorPolicy::Background => config.background_color,
            ColorPolicy::SharesWith(owner) => self.slot(owner, config).color,
        };
        let width = match tool.width_policy() {
            WidthPolicy::Own => self.slot(tool, config).width,
            WidthPolicy::Fixed => config.eraser_width,
            WidthPolicy::Ignored => 0.0,
        };
        StrokeStyle::new(color, width)
    }

    /// Update a tool's stored color and/or width.
    ///
    /// The width is validated before anything is written, so a rejected call leaves
    /// both the color and the width untouched. Widths for tools that do not own one
    /// and colors for the eraser are accepted and ignored.
    pub fn set(
        &mut self,
        tool: ToolKind,
        color: Option<InkColor>,
        width: Option<f64>,
        config: &SessionConfig,
    ) -> SketchResult<()> {
        let width = match (width, tool.width_policy()) {
            (Some(width), WidthPolicy::Own) => Some(validate_width(tool, width, config)?),
            (Some(width), _) => {
                log::debug!("Ignoring width {} for {}: width is not adjustable", width, tool);
                None
            }
            (None, _) => None,
        };

        let color_slot = match tool.color_policy() {
            ColorPolicy::Own => Some(tool),
            ColorPolicy::SharesWith(owner) => Some(owner),
            ColorPolicy::Background => None,
        };

        if let Some(color) = color {
            match color_slot {
                Some(slot) => {
                    let mut style = self.slot(slot, config);
                    style.color = color;
                    self.styles.insert(slot, style);
                }
                None => log::debug!("Ignoring color for {}: it paints with the background", tool),
            }
        }

        if let Some(width) = width {
            let mut style = self.slot(tool, config);
            style.width = width;
            self.styles.insert(tool, style);
        }

        Ok(())
    }
}

pub(crate) fn validate_width(tool: ToolKind, width: f64, config: &SessionConfig) -> SketchResult<f64> {
    if !width.is_finite() || width <= 0.0 {
        return Err(SketchError::InvalidWidth(width));
    }
    if let Some(range) = config.width_range(tool) {
        if !range.contains(width) {
            return Err(SketchError::WidthOutOfRange {
                tool,
                width,
                min: range.min,
                max: range.max,
            });
        }
    }
    Ok(width)
}
