//! Layered design canvas for the DMSuite creative tools.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It holds the
//! shared layer document model, the pure mutations applied to it, hit-testing,
//! the pointer/keyboard gesture state machine, and the Canvas 2D rendering
//! dispatch. Each tool (poster, banner, social post, ...) owns its document
//! and supplies its own design pass; the engine draws the selection overlay on
//! top and reports document changes back as [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Layers, layer kinds and the [`doc::DesignDocument`] |
//! | [`ops`] | Pure document mutations |
//! | [`hit`] | Hit-testing and resize handles |
//! | [`input`] | Input event types and the gesture state |
//! | [`view`] | Display scale and screen/canvas conversion |
//! | [`render`] | Design pass and selection overlay |
//! | [`surface`] | Canvas 2D surface and a headless command recorder |
//! | [`config`] | Interaction tuning ([`config::EngineConfig`]) |
//! | [`geom`] | Points and rectangles |
//! | [`error`] | Document and render errors |
//! | [`consts`] | Shared numeric constants (minimum sizes, handle metrics, etc.) |

pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod geom;
pub mod hit;
pub mod input;
pub mod ops;
pub mod render;
pub mod surface;
pub mod view;

pub use config::{EngineConfig, ResizeMode};
pub use doc::{DesignDocument, Layer, LayerId, LayerKind, PartialLayer, ShapeKind, TextAlign};
pub use engine::{Action, Engine, EngineCore};
pub use error::{DocError, DocResult, RenderError};
pub use geom::{Point, Rect};
pub use input::{Button, InputState, Key, Modifiers};
pub use render::{DesignRenderer, LayerPainter, render_design};
pub use view::{CanvasSize, View};
