use crate::board::transform::ItemTransform;
use crate::geometry::{Point, Size};
use crate::item::ItemId;
use std::collections::HashMap;

/// Per-item write-back produced by every layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFrame {
    /// Content-space center of the item's cell.
    pub center: Point,
    /// Proximity transform applied on top of the cell placement.
    pub transform: ItemTransform,
    /// Effective on-screen scale (transform scale times zoom).
    pub scale: f64,
    pub label_visible: bool,
    /// True while a drag or pinch is in progress; hosts may animate the
    /// scale change instead of applying it immediately.
    pub animated: bool,
}

/// Overall scrollable-surface state written once per layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportState {
    /// Content size scaled by the current zoom.
    pub content_size: Size,
    pub content_offset: Point,
    pub zoom_scale: f64,
    pub minimum_zoom_scale: f64,
}

/// Fire-and-forget animation request. The host drives the timing and
/// reports completion back with the generation token; a completion
/// carrying a superseded generation is ignored by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub generation: u64,
    pub target_zoom: f64,
    pub target_offset: Point,
}

/// Sink the engine writes layout results into. Implemented by the host's
/// presentation layer.
pub trait RenderTarget {
    fn place_item(&mut self, id: &ItemId, frame: ItemFrame);
    fn update_viewport(&mut self, state: ViewportState);
    fn begin_animation(&mut self, animation: Animation);
}

/// Render target that records the latest frame per item. Useful for
/// headless hosts and tests.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    pub frames: HashMap<ItemId, ItemFrame>,
    pub viewport: ViewportState,
    pub animations: Vec<Animation>,
}

impl RenderTarget for FrameRecorder {
    fn place_item(&mut self, id: &ItemId, frame: ItemFrame) {
        self.frames.insert(id.clone(), frame);
    }

    fn update_viewport(&mut self, state: ViewportState) {
        self.viewport = state;
    }

    fn begin_animation(&mut self, animation: Animation) {
        self.animations.push(animation);
    }
}
