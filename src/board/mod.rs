pub mod grid;
pub mod model;
pub mod transform;

pub use grid::GridGeometry;
pub use model::{GesturePhase, RecomputeReason, Springboard};
pub use transform::{ItemTransform, ProximityResult, proximity_transform};

/// Full zoom; double-tap centering zooms to this.
pub const MAX_ZOOM_SCALE: f64 = 1.0;

// Intro (appear) transform shape: items start shrunk and pulled toward
// the focused item, then the host animates them to identity.
pub const INTRO_BASE_SCALE: f64 = 0.5;
pub const INTRO_SCALE_FLOOR: f64 = 0.2;
pub const INTRO_SCALE_SPAN: f64 = 0.8;
pub const INTRO_TRANSLATE_FACTOR: f64 = -0.9;
