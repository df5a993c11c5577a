//! Drawing session: committed elements, per-tool styles and undo/redo history.

use crate::assets::{AssetProvider, BackgroundImage, RasterizedText, TextRasterizer};
use crate::config::{EmptyTextPolicy, SessionConfig};
use crate::elements::{Element, ElementId, ElementKind, Shape, ShapeType, Stroke, TextLabel};
use crate::error::SketchResult;
use crate::geometry::Geometry;
use crate::style::{InkColor, StrokeStyle, ToolStyles};
use crate::tools::ToolKind;
use kurbo::{Point, Size, Vec2};

/// State owner for one editing context.
///
/// `elements` is kept in paint order: later elements render on top. The redo buffer only
/// holds elements taken off by [`undo`](Self::undo) and is emptied by every new commit.
/// Lookups that miss and undo/redo with nothing to move are no-ops that return `false`.
#[derive(Debug, Clone)]
pub struct DrawingSession {
    elements: Vec<Element>,
    redo_buffer: Vec<Element>,
    active_tool: ToolKind,
    styles: ToolStyles,
    background_image: Option<BackgroundImage>,
    canvas_size: Size,
    config: SessionConfig,
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingSession {
    /// Create a session with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(SessionConfig::default())
    }

    /// Create a session from a host-supplied configuration.
    ///
    /// The configuration is held to the same rules as runtime style and size updates.
    pub fn with_config(config: SessionConfig) -> SketchResult<Self> {
        config
            .validate()
            .inspect_err(|e| log::warn!("Rejected session config: {}", e))?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: SessionConfig) -> Self {
        Self {
            elements: Vec::new(),
            redo_buffer: Vec::new(),
            active_tool: ToolKind::default(),
            styles: ToolStyles::from_config(&config),
            background_image: None,
            canvas_size: config.canvas_size,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Committed elements in paint order (back to front).
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Undone elements; the last one is restored first by [`redo`](Self::redo).
    pub fn redo_buffer(&self) -> &[Element] {
        &self.redo_buffer
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    /// Set the canvas size used for full-canvas fills.
    ///
    /// Negative or non-finite sizes are rejected and the prior size is kept.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) -> SketchResult<()> {
        let size = Size::new(width, height);
        validate_size(size)?;
        self.canvas_size = size;
        Ok(())
    }

    // --- Tools and styles ---

    pub fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    /// Switch tools. Selection and any in-progress gesture are left alone.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.active_tool != tool {
            log::debug!("Tool changed: {} -> {}", self.active_tool, tool);
        }
        self.active_tool = tool;
    }

    pub fn styles(&self) -> &ToolStyles {
        &self.styles
    }

    /// The style a commit with `tool` would use.
    pub fn style_for(&self, tool: ToolKind) -> StrokeStyle {
        self.styles.resolve(tool, &self.config)
    }

    /// The style a commit with the active tool would use.
    pub fn effective_style(&self) -> StrokeStyle {
        self.style_for(self.active_tool)
    }

    /// Update a tool's color and/or width. A rejected call changes nothing.
    pub fn set_style(
        &mut self,
        tool: ToolKind,
        color: Option<InkColor>,
        width: Option<f64>,
    ) -> SketchResult<()> {
        self.styles
            .set(tool, color, width, &self.config)
            .inspect_err(|e| log::warn!("Rejected style change for {}: {}", tool, e))
    }

    // --- Commits ---

    /// Commit a stroke using the active tool's effective style.
    pub fn commit_stroke(&mut self, geometry: Geometry, filled: bool) -> ElementId {
        self.commit_stroke_for(self.active_tool, geometry, filled)
    }

    /// Commit a stroke drawn with `tool`.
    ///
    /// The eraser always paints with the background color at its fixed width, whatever
    /// the pen and brush are configured to.
    pub fn commit_stroke_for(
        &mut self,
        tool: ToolKind,
        geometry: Geometry,
        filled: bool,
    ) -> ElementId {
        let style = self.style_for(tool);
        let stroke = Stroke::new(geometry, style.color, style.width, filled);
        self.push_element(Element::Stroke(stroke))
    }

    /// Append a text label.
    ///
    /// Empty content follows [`SessionConfig::empty_text`]: with `Reject` nothing is
    /// appended and `Ok(None)` is returned.
    pub fn add_text(
        &mut self,
        content: impl Into<String>,
        position: Point,
        color: InkColor,
        font_size: f64,
    ) -> SketchResult<Option<ElementId>> {
        let content = content.into();
        if content.is_empty() && self.config.empty_text == EmptyTextPolicy::Reject {
            log::debug!("Ignoring empty text label");
            return Ok(None);
        }
        self.validate_font_size(font_size)?;

        let label = TextLabel::new(content, position, color, font_size);
        Ok(Some(self.push_element(Element::Text(label))))
    }

    /// Append a text label at the configured default position and font size.
    pub fn add_text_at_default(
        &mut self,
        content: impl Into<String>,
        color: InkColor,
    ) -> SketchResult<Option<ElementId>> {
        let position = self.config.default_text_position;
        let font_size = self.config.default_font_size;
        self.add_text(content, position, color, font_size)
    }

    pub fn add_shape(
        &mut self,
        shape_type: ShapeType,
        position: Point,
        size: Size,
        color: InkColor,
    ) -> SketchResult<ElementId> {
        validate_size(size)?;
        let shape = Shape::new(shape_type, position, size, color);
        Ok(self.push_element(Element::Shape(shape)))
    }

    fn push_element(&mut self, element: Element) -> ElementId {
        self.deselect_all();
        self.redo_buffer.clear();

        let id = element.id();
        log::debug!("Committed {:?} {} ({} elements)", element.kind(), id, self.elements.len() + 1);
        self.elements.push(element);
        id
    }

    fn validate_font_size(&self, font_size: f64) -> SketchResult<()> {
        self.config
            .check_font_size(font_size)
            .inspect_err(|_| log::warn!("Rejected font size {}", font_size))
    }

    // --- Selection and editing ---

    /// Select an element, deselecting every other element of the same kind.
    /// Returns false if no such element exists or the kind is not selectable.
    pub fn select_element(&mut self, kind: ElementKind, id: ElementId) -> bool {
        if !kind.is_selectable() || self.position_of(kind, id).is_none() {
            log::debug!("Select missed: {:?} {}", kind, id);
            return false;
        }
        for element in self.elements.iter_mut().filter(|e| e.kind() == kind) {
            let selected = element.id() == id;
            element.set_selected(selected);
        }
        true
    }

    /// Clear selection on every element.
    pub fn deselect_all(&mut self) {
        for element in &mut self.elements {
            element.set_selected(false);
        }
    }

    /// The selected element of a kind, if any.
    pub fn selected(&self, kind: ElementKind) -> Option<&Element> {
        self.elements
            .iter()
            .find(|e| e.kind() == kind && e.is_selected())
    }

    /// Move a shape or text label. Returns false on a miss or for strokes.
    pub fn move_element(&mut self, kind: ElementKind, id: ElementId, position: Point) -> bool {
        let moved = self
            .find_mut(kind, id)
            .is_some_and(|e| e.set_position(position));
        if !moved {
            log::debug!("Move missed: {:?} {}", kind, id);
        }
        moved
    }

    /// Offset a shape or text label. Returns false on a miss or for strokes.
    pub fn translate_element(&mut self, kind: ElementKind, id: ElementId, delta: Vec2) -> bool {
        let moved = self.find_mut(kind, id).is_some_and(|e| e.translate(delta));
        if !moved {
            log::debug!("Translate missed: {:?} {}", kind, id);
        }
        moved
    }

    /// Resize a shape in place.
    ///
    /// An invalid size is rejected before the lookup; `Ok(false)` means no such shape.
    pub fn resize_shape(&mut self, id: ElementId, size: Size) -> SketchResult<bool> {
        validate_size(size)?;
        match self.find_mut(ElementKind::Shape, id).and_then(Element::as_shape_mut) {
            Some(shape) => {
                shape.size = size;
                Ok(true)
            }
            None => {
                log::debug!("Resize missed: {}", id);
                Ok(false)
            }
        }
    }

    /// Elements under a point, front to back.
    pub fn elements_at_point(&self, point: Point, tolerance: f64) -> Vec<(ElementKind, ElementId)> {
        self.elements
            .iter()
            .rev()
            .filter(|e| e.hit_test(point, tolerance))
            .map(|e| (e.kind(), e.id()))
            .collect()
    }

    fn position_of(&self, kind: ElementKind, id: ElementId) -> Option<usize> {
        self.elements
            .iter()
            .position(|e| e.kind() == kind && e.id() == id)
    }

    fn find_mut(&mut self, kind: ElementKind, id: ElementId) -> Option<&mut Element> {
        self.elements
            .iter_mut()
            .find(|e| e.kind() == kind && e.id() == id)
    }

    // --- History ---

    /// Move the most recent element to the redo buffer.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.elements.pop() {
            Some(mut element) => {
                element.set_selected(false);
                log::debug!("Undo {:?} {}", element.kind(), element.id());
                self.redo_buffer.push(element);
                true
            }
            None => {
                log::debug!("Undo with empty history");
                false
            }
        }
    }

    /// Restore the most recently undone element.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.redo_buffer.pop() {
            Some(element) => {
                log::debug!("Redo {:?} {}", element.kind(), element.id());
                self.elements.push(element);
                true
            }
            None => {
                log::debug!("Redo with empty history");
                false
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.elements.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_buffer.is_empty()
    }

    /// Drop every element and the redo history. The background image is kept.
    pub fn clear(&mut self) {
        log::debug!(
            "Clearing {} elements and {} redo entries",
            self.elements.len(),
            self.redo_buffer.len()
        );
        self.elements.clear();
        self.redo_buffer.clear();
    }

    // --- Assets ---

    pub fn background_image(&self) -> Option<&BackgroundImage> {
        self.background_image.as_ref()
    }

    pub fn set_background_image(&mut self, image: Option<BackgroundImage>) {
        self.background_image = image;
    }

    /// Decode a platform image through `provider` and use it as the background.
    /// On failure the current background is kept.
    pub fn import_background<P: AssetProvider>(
        &mut self,
        provider: &P,
        handle: P::Handle,
    ) -> SketchResult<BackgroundImage> {
        let image = provider
            .decode(handle)
            .inspect_err(|e| log::warn!("Background import failed: {}", e))?;
        log::info!(
            "Background image set: {}x{}",
            image.source_width,
            image.source_height
        );
        self.background_image = Some(image);
        Ok(image)
    }

    /// Rasterize a text label and remember its measured size for bounds and hit-testing.
    pub fn rasterize_text(
        &mut self,
        id: ElementId,
        rasterizer: &dyn TextRasterizer,
    ) -> Option<RasterizedText> {
        let Some(label) = self
            .find_mut(ElementKind::Text, id)
            .and_then(Element::as_text_mut)
        else {
            log::debug!("Rasterize missed: {}", id);
            return None;
        };
        let raster = rasterizer.rasterize(&label.content, label.font_size, label.color);
        label.set_measured_size(raster.size);
        Some(raster)
    }
}

fn validate_size(size: Size) -> SketchResult<()> {
    crate::config::validate_size(size)
        .inspect_err(|_| log::warn!("Rejected size {}x{}", size.width, size.height))
}
