//! Shared numeric constants for the canvas crate.

// ── Layers ──────────────────────────────────────────────────────

/// Smallest width or height a pointer resize may produce, in canvas units.
pub const MIN_LAYER_SIZE: f64 = 20.0;

/// Offset applied to both axes when a layer is duplicated.
pub const DUPLICATE_OFFSET: f64 = 10.0;

/// Suffix appended to the name of a duplicated layer.
pub const DUPLICATE_NAME_SUFFIX: &str = " copy";

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space slop in pixels around each resize handle.
pub const HANDLE_TOLERANCE_PX: f64 = 8.0;

// ── Selection overlay ───────────────────────────────────────────

/// Side length of a drawn resize handle square, in screen pixels.
pub const HANDLE_SIZE_PX: f64 = 8.0;

/// Stroke width of the selection outline, in screen pixels.
pub const SELECTION_LINE_PX: f64 = 1.5;

/// Selection outline and handle border colour.
pub const SELECTION_COLOR: &str = "#2F6FEB";

/// Fill colour of the handle squares.
pub const HANDLE_FILL: &str = "#FFFFFF";

// ── Text ────────────────────────────────────────────────────────

/// Line height as a multiple of the font size.
pub const TEXT_LINE_HEIGHT: f64 = 1.2;

// ── Images ──────────────────────────────────────────────────────

/// Fill for an image layer whose source is not loaded yet.
pub const IMAGE_PLACEHOLDER_FILL: &str = "#E4E4E7";

/// Border for an image layer whose source is not loaded yet.
pub const IMAGE_PLACEHOLDER_STROKE: &str = "#A1A1AA";
