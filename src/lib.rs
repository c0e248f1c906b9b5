//! Springboard layout and zoom-navigation engine.
//!
//! Lays application icons out on an implicit odd-column grid inside a
//! zoomable, pannable surface: per-item placement, proximity-based edge
//! scaling, and the snap/settle policy for drags and pinches. Rendering,
//! gesture recognition and the application registry stay host-side and
//! talk to the engine through [`render::RenderTarget`] and
//! [`events::GestureEvent`].

pub mod board;
pub mod config;
pub mod events;
pub mod geometry;
pub mod item;
pub mod render;

pub use board::{GesturePhase, GridGeometry, ItemTransform, Springboard};
pub use config::Tuning;
pub use events::GestureEvent;
pub use geometry::{Insets, Point, Rect, Size};
pub use item::{Item, ItemId, ItemLabel, ImageRef};
pub use render::{Animation, FrameRecorder, ItemFrame, RenderTarget, ViewportState};
