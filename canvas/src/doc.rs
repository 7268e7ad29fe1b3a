//! Document model: layers, their payloads, and the design document that owns them.
//!
//! A [`DesignDocument`] is a plain value. The hosting view keeps the current
//! document, hands a reference to the engine on every event, and replaces it
//! whenever the engine (or an [`crate::ops`] call) returns a new one. Nothing
//! in this module mutates a document that is visible to anyone else.
//!
//! Data enters from tool defaults, from the layer panel, from asynchronously
//! generated content ([`PartialLayer`]) and from JSON. The renderer reads
//! layers via [`DesignDocument::layers_bottom_up`]; hit-testing walks
//! [`DesignDocument::layers_top_down`].

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DocError, DocResult};
use crate::geom::{Rect, is_positive};

/// Unique identifier for a layer within a document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(String);

impl LayerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Horizontal alignment of text within its layer box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// The Canvas 2D `textAlign` value.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Geometry of a shape layer, drawn inside the layer box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Fills the whole box.
    Rectangle,
    /// Inscribed in the box.
    Ellipse,
    /// Apex at top-centre, base along the bottom edge.
    Triangle,
    /// Diagonal from top-left to bottom-right.
    Line,
}

/// Kind-specific payload of a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayerKind {
    /// A block of text. Newlines start new lines.
    Text {
        content: String,
        #[serde(default = "default_font_family")]
        font_family: String,
        /// Font size in canvas pixels.
        #[serde(default = "default_font_size")]
        font_size: f64,
        #[serde(default = "default_text_color")]
        color: String,
        #[serde(default)]
        align: TextAlign,
    },
    /// A bitmap scaled to the layer box. `src` is resolved by the host.
    Image { src: String },
    /// A filled and optionally stroked primitive.
    Shape {
        shape: ShapeKind,
        #[serde(default = "default_fill")]
        fill: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke: Option<String>,
        #[serde(default = "default_stroke_width")]
        stroke_width: f64,
    },
}

fn default_font_family() -> String {
    "sans-serif".to_owned()
}

fn default_font_size() -> f64 {
    16.0
}

fn default_text_color() -> String {
    "#111111".to_owned()
}

fn default_fill() -> String {
    "#D4D4D8".to_owned()
}

fn default_stroke_width() -> f64 {
    1.0
}

fn default_opacity() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

impl LayerKind {
    /// Text with the default font, size and colour.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            color: default_text_color(),
            align: TextAlign::default(),
        }
    }

    #[must_use]
    pub fn image(src: impl Into<String>) -> Self {
        Self::Image { src: src.into() }
    }

    /// An unstroked shape with the given fill.
    #[must_use]
    pub fn shape(shape: ShapeKind, fill: impl Into<String>) -> Self {
        Self::Shape { shape, fill: fill.into(), stroke: None, stroke_width: default_stroke_width() }
    }

    /// Human-readable kind name, used as the default layer name.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text { .. } => "Text",
            Self::Image { .. } => "Image",
            Self::Shape { .. } => "Shape",
        }
    }
}

/// A single positioned, sized visual element on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Unique within the owning document; never changes.
    pub id: LayerId,
    /// Label shown in the layer panel.
    pub name: String,
    pub kind: LayerKind,
    /// Left edge in canvas space. May be negative.
    pub x: f64,
    /// Top edge in canvas space. May be negative.
    pub y: f64,
    /// Always finite and positive.
    pub width: f64,
    /// Always finite and positive.
    pub height: f64,
    /// Clockwise rotation in degrees about the box centre. Paint-only.
    #[serde(default)]
    pub rotation: f64,
    /// 0.0 (transparent) to 1.0 (opaque). Paint-only.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Locked layers can be selected but not moved, resized or deleted by
    /// pointer or keyboard interaction.
    #[serde(default)]
    pub locked: bool,
}

impl Layer {
    /// A visible, unlocked layer with a fresh id, named after its kind.
    #[must_use]
    pub fn new(kind: LayerKind, bounds: Rect) -> Self {
        Self {
            id: LayerId::generate(),
            name: kind.label().to_owned(),
            kind,
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            rotation: 0.0,
            opacity: 1.0,
            visible: true,
            locked: false,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<LayerId>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Set the opacity, clamped to `0.0..=1.0`. Non-finite values are ignored.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        if opacity.is_finite() {
            self.opacity = opacity.clamp(0.0, 1.0);
        }
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Check the invariants a document relies on: positive size and an
    /// opacity within `0.0..=1.0`.
    fn validate(&self) -> DocResult<()> {
        if !self.bounds().has_positive_size() {
            return Err(DocError::InvalidSize(self.id.clone()));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(DocError::InvalidOpacity { id: self.id.clone(), opacity: self.opacity });
        }
        Ok(())
    }

    /// The layer box in canvas space.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub(crate) fn set_bounds(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }

    /// Apply a sparse update. Fields the layer's kind does not carry are
    /// ignored, as are non-positive sizes. Returns whether anything changed.
    pub(crate) fn apply_partial(&mut self, partial: &PartialLayer) -> bool {
        let before = self.clone();
        if let Some(ref name) = partial.name {
            self.name.clone_from(name);
        }
        if let Some(x) = partial.x.filter(|v| v.is_finite()) {
            self.x = x;
        }
        if let Some(y) = partial.y.filter(|v| v.is_finite()) {
            self.y = y;
        }
        if let Some(w) = partial.width.filter(|v| is_positive(*v)) {
            self.width = w;
        }
        if let Some(h) = partial.height.filter(|v| is_positive(*v)) {
            self.height = h;
        }
        if let Some(r) = partial.rotation.filter(|v| v.is_finite()) {
            self.rotation = r;
        }
        if let Some(o) = partial.opacity.filter(|v| v.is_finite()) {
            self.opacity = o.clamp(0.0, 1.0);
        }
        if let Some(v) = partial.visible {
            self.visible = v;
        }
        if let Some(l) = partial.locked {
            self.locked = l;
        }
        match &mut self.kind {
            LayerKind::Text { content, .. } => {
                if let Some(ref text) = partial.text {
                    content.clone_from(text);
                }
            }
            LayerKind::Image { src } => {
                if let Some(ref new_src) = partial.src {
                    src.clone_from(new_src);
                }
            }
            LayerKind::Shape { fill, .. } => {
                if let Some(ref new_fill) = partial.fill {
                    fill.clone_from(new_fill);
                }
            }
        }
        *self != before
    }
}

/// Sparse update for a layer. Only present fields are applied.
///
/// Asynchronously generated content is merged through this type so that a
/// late response only overwrites the fields it actually produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialLayer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    /// New content for text layers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// New source for image layers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// New fill for shape layers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
}

/// The ordered collection of layers plus selection state for one canvas.
///
/// Invariants, upheld by every constructor and by [`crate::ops`]:
/// - every layer appears exactly once in the layer order;
/// - the order and the selection only name existing layers;
/// - every layer has a positive size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DocumentSnapshot")]
pub struct DesignDocument {
    pub(crate) layers: BTreeMap<LayerId, Layer>,
    /// Back to front; the last id is the topmost layer.
    pub(crate) layer_order: Vec<LayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) selection: Option<LayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) background: Option<String>,
}

/// Unvalidated wire form of a document.
#[derive(Deserialize)]
struct DocumentSnapshot {
    #[serde(default)]
    layers: BTreeMap<LayerId, Layer>,
    #[serde(default)]
    layer_order: Vec<LayerId>,
    #[serde(default)]
    selection: Option<LayerId>,
    #[serde(default)]
    background: Option<String>,
}

impl TryFrom<DocumentSnapshot> for DesignDocument {
    type Error = DocError;

    fn try_from(snapshot: DocumentSnapshot) -> Result<Self, Self::Error> {
        for (key, layer) in &snapshot.layers {
            if *key != layer.id {
                return Err(DocError::MismatchedKey { key: key.clone(), id: layer.id.clone() });
            }
            layer.validate()?;
        }

        let mut seen = BTreeSet::new();
        for id in &snapshot.layer_order {
            if !snapshot.layers.contains_key(id) {
                return Err(DocError::UnknownOrderId(id.clone()));
            }
            if !seen.insert(id) {
                return Err(DocError::DuplicateOrderId(id.clone()));
            }
        }
        if let Some(missing) = snapshot.layers.keys().find(|id| !seen.contains(id)) {
            return Err(DocError::Unordered(missing.clone()));
        }

        if let Some(ref sel) = snapshot.selection {
            if !snapshot.layers.contains_key(sel) {
                return Err(DocError::UnknownSelection(sel.clone()));
            }
        }

        Ok(Self {
            layers: snapshot.layers,
            layer_order: snapshot.layer_order,
            selection: snapshot.selection,
            background: snapshot.background,
        })
    }
}

impl DesignDocument {
    /// An empty document with no background.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from layers listed back to front, with nothing selected.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::DuplicateOrderId`] if two layers share an id,
    /// [`DocError::InvalidSize`] if a layer has a non-positive size and
    /// [`DocError::InvalidOpacity`] if its opacity is out of range.
    pub fn from_layers(layers: impl IntoIterator<Item = Layer>) -> DocResult<Self> {
        let mut doc = Self::new();
        for layer in layers {
            layer.validate()?;
            match doc.layers.entry(layer.id.clone()) {
                Entry::Occupied(_) => return Err(DocError::DuplicateOrderId(layer.id)),
                Entry::Vacant(slot) => {
                    doc.layer_order.push(layer.id.clone());
                    slot.insert(layer);
                }
            }
        }
        Ok(doc)
    }

    /// Set the colour painted beneath all layers.
    #[must_use]
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    /// Look up a layer by id.
    #[must_use]
    pub fn get(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &LayerId) -> bool {
        self.layers.contains_key(id)
    }

    /// Number of layers in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if the document has no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layer ids from back to front.
    #[must_use]
    pub fn layer_order(&self) -> &[LayerId] {
        &self.layer_order
    }

    /// Position of `id` in the paint order (0 = bottom).
    #[must_use]
    pub fn index_of(&self, id: &LayerId) -> Option<usize> {
        self.layer_order.iter().position(|lid| lid == id)
    }

    /// Layers in paint order, bottom first.
    pub fn layers_bottom_up(&self) -> impl Iterator<Item = &Layer> {
        self.layer_order.iter().filter_map(|id| self.layers.get(id))
    }

    /// Layers in hit-test order, topmost first.
    pub fn layers_top_down(&self) -> impl Iterator<Item = &Layer> {
        self.layer_order.iter().rev().filter_map(|id| self.layers.get(id))
    }

    /// The selected layer id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&LayerId> {
        self.selection.as_ref()
    }

    /// The selected layer, if any.
    #[must_use]
    pub fn selected_layer(&self) -> Option<&Layer> {
        self.selection.as_ref().and_then(|id| self.layers.get(id))
    }

    #[must_use]
    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    /// Serialize to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> DocResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> DocResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a document.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Json`] for malformed JSON, or the specific
    /// invariant violation for a well-formed but inconsistent document.
    pub fn from_json(json: &str) -> DocResult<Self> {
        let snapshot: DocumentSnapshot = serde_json::from_str(json)?;
        Self::try_from(snapshot)
    }
}
