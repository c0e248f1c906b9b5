use crate::board::grid::GridGeometry;
use crate::board::transform::{ItemTransform, proximity_transform};
use crate::board::{
    INTRO_BASE_SCALE, INTRO_SCALE_FLOOR, INTRO_SCALE_SPAN, INTRO_TRANSLATE_FACTOR, MAX_ZOOM_SCALE,
};
use crate::config::Tuning;
use crate::geometry::{EPSILON, Insets, Point, Rect, Size, content_to_viewport, viewport_to_content};
use crate::item::{Item, ItemId, ItemStore};
use crate::render::{Animation, ItemFrame, RenderTarget, ViewportState};
use std::collections::HashSet;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
pub enum GesturePhase {
    #[default]
    Idle,
    Dragging,
    Decelerating,
}

/// Why the next layout pass has to recompute something. Reasons are
/// collected wherever state mutates and resolved into a pass plan at the
/// start of the next layout pass, so redundant triggers coalesce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
pub enum RecomputeReason {
    ItemsReplaced,
    ItemGeometryChanged,
    ViewportResized,
    InsetsChanged,
    ItemScalingChanged,
    AnimationSettled,
}

impl RecomputeReason {
    /// Whether grid geometry and placement have to be rebuilt (which also
    /// re-derives the zoom bounds). The remaining reasons only need the
    /// per-item transforms refreshed, which every pass does anyway.
    fn invalidates_layout(&self) -> bool {
        matches!(
            self,
            RecomputeReason::ItemsReplaced
                | RecomputeReason::ItemGeometryChanged
                | RecomputeReason::ViewportResized
                | RecomputeReason::InsetsChanged
        )
    }
}

#[derive(Debug, Default)]
struct PendingRecompute {
    reasons: HashSet<RecomputeReason>,
}

#[derive(Debug, Clone, Copy, Default)]
struct PassPlan {
    layout: bool,
    zoom_bounds: bool,
}

impl PendingRecompute {
    fn mark(&mut self, reason: RecomputeReason) {
        self.reasons.insert(reason);
    }

    fn take(&mut self) -> PassPlan {
        let layout = self.reasons.iter().any(RecomputeReason::invalidates_layout);
        self.reasons.clear();
        // Zoom bounds derive from the same inputs as the grid geometry,
        // so the two always invalidate together.
        PassPlan {
            layout,
            zoom_bounds: layout,
        }
    }
}

/// The springboard engine: owns zoom scale and content offset, lays the
/// items out on the implicit grid, applies the proximity transform and
/// decides where drags settle. All methods run synchronously on the
/// host's event thread.
pub struct Springboard {
    tuning: Tuning,
    items: ItemStore,
    viewport: Size,
    insets: Insets,
    grid: GridGeometry,
    zoom_scale: f64,
    content_offset: Point,
    last_focused: Option<ItemId>,
    phase: GesturePhase,
    /// A pinch is in flight. Tracked outside the drag phase because the
    /// host's pan and pinch recognizers run independently.
    zoom_in_flight: bool,
    snap_on_drag_end: bool,
    snap_on_decel_end: bool,
    pending: PendingRecompute,
    /// Monotonic token carried by animation requests; completions for a
    /// superseded generation are ignored.
    generation: u64,
    queued_animation: Option<Animation>,
}

impl Springboard {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            items: ItemStore::default(),
            viewport: Size::default(),
            insets: Insets::default(),
            grid: GridGeometry::default(),
            zoom_scale: MAX_ZOOM_SCALE,
            content_offset: Point::default(),
            last_focused: None,
            phase: GesturePhase::Idle,
            zoom_in_flight: false,
            snap_on_drag_end: false,
            snap_on_decel_end: false,
            pending: PendingRecompute::default(),
            generation: 0,
            queued_animation: None,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn items(&self) -> &ItemStore {
        &self.items
    }

    pub fn grid(&self) -> &GridGeometry {
        &self.grid
    }

    pub fn zoom_scale(&self) -> f64 {
        self.zoom_scale
    }

    pub fn minimum_zoom_scale(&self) -> f64 {
        self.grid.minimum_zoom_scale
    }

    pub fn content_offset(&self) -> Point {
        self.content_offset
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn focused_item(&self) -> Option<&ItemId> {
        self.last_focused
            .as_ref()
            .filter(|id| self.items.contains(id))
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focused_item().and_then(|id| self.items.index_of(id))
    }

    // ------------------------------------------------------------------
    // Host mutations

    pub fn set_items(&mut self, items: Vec<Item>) {
        self.items.replace(items);

        // Keep the anchor valid; fall back to the first item so the
        // initial layout has something to center on.
        let focus_gone = self
            .last_focused
            .as_ref()
            .is_none_or(|id| !self.items.contains(id));
        if focus_gone {
            self.last_focused = self.items.id_at(0).cloned();
        }

        self.pending.mark(RecomputeReason::ItemsReplaced);
    }

    pub fn set_item_geometry(&mut self, diameter: f64, padding: f64, minimum_item_scaling: f64) {
        if self.tuning.item_diameter != diameter || self.tuning.item_padding != padding {
            self.tuning.item_diameter = diameter;
            self.tuning.item_padding = padding;
            self.pending.mark(RecomputeReason::ItemGeometryChanged);
        }
        if self.tuning.minimum_item_scaling != minimum_item_scaling {
            self.tuning.minimum_item_scaling = minimum_item_scaling;
            self.pending.mark(RecomputeReason::ItemScalingChanged);
        }
    }

    pub fn on_viewport_resized(&mut self, size: Size) {
        if size != self.viewport {
            self.viewport = size.clamped();
            self.pending.mark(RecomputeReason::ViewportResized);
        }
    }

    pub fn set_content_insets(&mut self, insets: Insets) {
        if insets != self.insets {
            self.insets = insets;
            self.pending.mark(RecomputeReason::InsetsChanged);
        }
    }

    /// Host-reported scroll position while a pan/deceleration is in
    /// flight. The engine is the owner of the offset between gestures;
    /// during one, the host's scroller drives it.
    pub fn on_scrolled(&mut self, offset: Point) {
        self.content_offset = offset;
    }

    pub fn on_zoom_changed(&mut self, scale: f64) {
        self.zoom_scale = scale.max(EPSILON);
    }

    pub fn on_zoom_started(&mut self) {
        self.zoom_in_flight = true;
    }

    pub fn on_zoom_ended(&mut self) {
        self.zoom_in_flight = false;
    }

    // ------------------------------------------------------------------
    // Coordinate mapping

    pub fn content_point_to_viewport(&self, point: Point) -> Point {
        content_to_viewport(point, self.zoom_scale, self.content_offset)
    }

    pub fn viewport_point_to_content(&self, point: Point) -> Point {
        viewport_to_content(point, self.zoom_scale, self.content_offset)
    }

    fn viewport_center(&self) -> Point {
        Point::new(self.viewport.width * 0.5, self.viewport.height * 0.5)
    }

    /// Content-space point a given scroll offset would put at the center
    /// of the viewport.
    fn center_for_offset(&self, offset: Point) -> Point {
        viewport_to_content(self.viewport_center(), self.zoom_scale, offset)
    }

    /// Scroll offset putting `center` at the center of the viewport,
    /// unclamped.
    fn offset_for_center(&self, center: Point, zoom: f64) -> Point {
        Point::new(
            center.x * zoom - self.viewport.width * 0.5,
            center.y * zoom - self.viewport.height * 0.5,
        )
    }

    fn clamp_offset(&self, offset: Point) -> Point {
        let max_x =
            (self.grid.content_size_unscaled.width * self.zoom_scale - self.viewport.width).max(0.0);
        let max_y = (self.grid.content_size_unscaled.height * self.zoom_scale
            - self.viewport.height)
            .max(0.0);
        Point::new(offset.x.clamp(0.0, max_x), offset.y.clamp(0.0, max_y))
    }

    // ------------------------------------------------------------------
    // Navigation operations

    pub fn index_closest_to_point(&self, point_in_viewport: Point) -> Option<usize> {
        self.items
            .closest_to(self.viewport_point_to_content(point_in_viewport))
    }

    /// Centers on the item at `index`. Out-of-range indices clamp to the
    /// last item (the value may come from stale gesture state); an empty
    /// board is a no-op.
    pub fn center_on_index(&mut self, index: usize, zoom_scale: f64, animated: bool) {
        if self.items.is_empty() {
            return;
        }
        let index = index.min(self.items.len() - 1);
        if let Some(id) = self.items.id_at(index).cloned() {
            self.center_on_item(&id, zoom_scale, animated);
        }
    }

    pub fn center_on_item(&mut self, id: &ItemId, zoom_scale: f64, animated: bool) {
        let Some(center) = self.items.center_of(id) else {
            log::warn!("center_on_item: unknown item '{}'", id);
            return;
        };
        self.last_focused = Some(id.clone());

        if (zoom_scale - self.zoom_scale).abs() > EPSILON {
            // Rect sized to what the viewport will show at the target
            // zoom, centered on the item.
            let zoom = zoom_scale.max(EPSILON);
            let rect = Rect::with_center(
                center,
                Size::new(self.viewport.width / zoom, self.viewport.height / zoom),
            );
            self.zoom_to_rect(rect, animated);
        } else {
            let target = self.clamp_offset(self.offset_for_center(center, self.zoom_scale));
            self.apply_navigation(self.zoom_scale, target, animated);
        }
    }

    /// Zooms out so the whole grid (border margin excluded) is visible.
    pub fn show_all(&mut self, animated: bool) {
        if self.items.is_empty() {
            return;
        }
        let rect = self.grid.full_content_rect();
        self.last_focused = self
            .items
            .closest_to(rect.center())
            .and_then(|index| self.items.id_at(index))
            .cloned();
        self.zoom_to_rect(rect, animated);
    }

    fn zoom_to_rect(&mut self, rect: Rect, animated: bool) {
        let viewport = self.viewport.clamped();
        let zoom = (viewport.width / rect.size.width.max(EPSILON))
            .min(viewport.height / rect.size.height.max(EPSILON))
            .min(MAX_ZOOM_SCALE)
            .max(self.grid.minimum_zoom_scale);

        self.zoom_scale = zoom;
        let target = self.clamp_offset(self.offset_for_center(rect.center(), zoom));
        self.apply_navigation(zoom, target, animated);
    }

    /// State is applied immediately (last writer wins); `animated` only
    /// decides whether a presentation-side animation request is queued.
    fn apply_navigation(&mut self, zoom: f64, offset: Point, animated: bool) {
        self.zoom_scale = zoom;
        self.content_offset = offset;

        if animated {
            self.generation += 1;
            self.queued_animation = Some(Animation {
                generation: self.generation,
                target_zoom: zoom,
                target_offset: offset,
            });
        }
    }

    pub fn animation_completed(&mut self, generation: u64) {
        if generation == self.generation {
            self.pending.mark(RecomputeReason::AnimationSettled);
        } else {
            log::debug!(
                "ignoring stale animation completion {} (current {})",
                generation,
                self.generation
            );
        }
    }

    // ------------------------------------------------------------------
    // Gestures

    pub fn on_drag_started(&mut self) {
        self.phase = GesturePhase::Dragging;
    }

    /// Settle decision for an ending drag. Takes the host scroller's
    /// proposed deceleration target offset and returns the corrected one:
    /// exact snap to the nearest item when the roll would end inside the
    /// grid, a `settle_bias`-weighted pull toward it when the roll would
    /// overshoot, and a freeze on the current offset when the view is
    /// already outside the grid.
    pub fn on_drag_will_end(&mut self, proposed_offset: Point, _velocity: Point) -> Point {
        let Some(index) = self
            .items
            .closest_to(self.center_for_offset(proposed_offset))
        else {
            return proposed_offset;
        };
        let id = match self.items.id_at(index) {
            Some(id) => id.clone(),
            None => return proposed_offset,
        };
        self.last_focused = Some(id.clone());

        let ideal_center = match self.items.center_of(&id) {
            Some(c) => c,
            None => return proposed_offset,
        };
        let ideal_offset = self.offset_for_center(ideal_center, self.zoom_scale);

        let valid = self.grid.full_content_rect();
        let proposed_center = self.center_for_offset(proposed_offset);
        let current_center = self.center_for_offset(self.content_offset);

        if !valid.contains(proposed_center) {
            if !valid.contains(current_center) {
                // Already outside; stop the roll and snap back once the
                // drag callback fires.
                self.snap_on_drag_end = true;
                return self.content_offset;
            }
            // Still inside but rolling out: let the deceleration run,
            // biased toward the nearest item, then snap on its end.
            let bias = self.tuning.settle_bias;
            self.snap_on_decel_end = true;
            return Point::new(
                proposed_offset.x * (1.0 - bias) + ideal_offset.x * bias,
                proposed_offset.y * (1.0 - bias) + ideal_offset.y * bias,
            );
        }

        ideal_offset
    }

    pub fn on_drag_did_end(&mut self, will_decelerate: bool) {
        self.phase = if will_decelerate {
            GesturePhase::Decelerating
        } else {
            GesturePhase::Idle
        };

        if self.snap_on_drag_end {
            self.snap_on_drag_end = false;
            if let Some(id) = self.last_focused.clone() {
                self.center_on_item(&id, self.zoom_scale, true);
            }
        }
    }

    pub fn on_deceleration_did_end(&mut self) {
        self.phase = GesturePhase::Idle;

        if self.snap_on_decel_end {
            self.snap_on_decel_end = false;
            if let Some(id) = self.last_focused.clone() {
                self.center_on_item(&id, self.zoom_scale, true);
            }
        }
    }

    /// Zoomed in past the launch threshold a double tap zooms back out to
    /// show-all; otherwise it centers the tapped item at full zoom.
    pub fn on_double_tap(&mut self, location_in_viewport: Point) {
        if self.zoom_scale >= self.tuning.launch_zoom_threshold
            && (self.zoom_scale - self.grid.minimum_zoom_scale).abs() > EPSILON
        {
            self.show_all(true);
        } else if let Some(index) = self.index_closest_to_point(location_in_viewport) {
            self.center_on_index(index, MAX_ZOOM_SCALE, true);
        }
    }

    // ------------------------------------------------------------------
    // Layout pass

    /// Recomputes whatever the collected reasons require, re-places the
    /// items, runs the proximity transform and writes everything to the
    /// render target. Safe to call any number of times per frame; with no
    /// pending reasons it only refreshes transforms.
    pub fn layout_pass(&mut self, out: &mut dyn RenderTarget) {
        let plan = self.pending.take();

        if plan.layout {
            self.grid = GridGeometry::compute(
                self.items.len(),
                self.tuning.item_diameter,
                self.tuning.item_padding,
                self.viewport,
                self.insets,
            );
        }

        if plan.zoom_bounds && self.zoom_scale < self.grid.minimum_zoom_scale {
            self.zoom_scale = self.grid.minimum_zoom_scale;
        }

        if plan.layout {
            let count = self.items.len();
            let centers: Vec<(ItemId, Point)> = (0..count)
                .filter_map(|index| {
                    self.items.id_at(index).map(|id| {
                        (
                            id.clone(),
                            self.grid.center_for_index(
                                index,
                                count,
                                self.tuning.item_diameter,
                                self.tuning.item_padding,
                            ),
                        )
                    })
                })
                .collect();
            for (id, center) in centers {
                if let Some(slot) = self.items.slot_mut(&id) {
                    slot.center = center;
                }
            }
        }

        if plan.zoom_bounds
            && let Some(id) = self.focused_item().cloned()
        {
            self.center_on_item(&id, self.zoom_scale, false);
        }

        self.content_offset = self.clamp_offset(self.content_offset);
        self.refresh_transforms(out);

        out.update_viewport(ViewportState {
            content_size: Size::new(
                self.grid.content_size_unscaled.width * self.zoom_scale,
                self.grid.content_size_unscaled.height * self.zoom_scale,
            ),
            content_offset: self.content_offset,
            zoom_scale: self.zoom_scale,
            minimum_zoom_scale: self.grid.minimum_zoom_scale,
        });

        if let Some(animation) = self.queued_animation.take() {
            out.begin_animation(animation);
        }
    }

    fn refresh_transforms(&mut self, out: &mut dyn RenderTarget) {
        let animated = self.zoom_in_flight || self.phase != GesturePhase::Idle;
        let ids: Vec<ItemId> = (0..self.items.len())
            .filter_map(|index| self.items.id_at(index).cloned())
            .collect();

        for id in ids {
            let Some(center) = self.items.center_of(&id) else {
                continue;
            };
            let center_in_viewport = self.content_point_to_viewport(center);
            let result = proximity_transform(
                center_in_viewport,
                self.viewport,
                self.insets,
                self.zoom_scale,
                &self.tuning,
            );
            let label_visible = result.effective_scale >= self.tuning.label_visibility_threshold;

            if let Some(slot) = self.items.slot_mut(&id) {
                slot.transform = result.transform;
                slot.scale = result.effective_scale;
                slot.label_visible = label_visible;
            }

            out.place_item(
                &id,
                ItemFrame {
                    center,
                    transform: result.transform,
                    scale: result.effective_scale,
                    label_visible,
                    animated,
                },
            );
        }
    }

    // ------------------------------------------------------------------
    // Intro transforms

    /// Starting transforms for the appear animation: every item begins
    /// shrunk and pulled toward the focused item, scaled down further the
    /// farther away it sits. The host animates from these to identity.
    pub fn intro_transforms(&self) -> Vec<(ItemId, ItemTransform)> {
        let Some(focus_center) = self
            .focused_item()
            .or_else(|| self.items.id_at(0))
            .and_then(|id| self.items.center_of(id))
        else {
            return Vec::new();
        };
        let max_side = self.viewport.clamped().max_side();

        self.items
            .iter()
            .map(|(_, item, slot)| {
                let dx = slot.center.x - focus_center.x;
                let dy = slot.center.y - focus_center.y;
                let distance_sq = dx * dx + dy * dy;

                let factor = if distance_sq < EPSILON {
                    1.0
                } else {
                    (max_side / distance_sq).clamp(0.0, 1.0)
                };
                let scale = INTRO_BASE_SCALE * (factor * INTRO_SCALE_SPAN + INTRO_SCALE_FLOOR);

                (
                    item.id.clone(),
                    ItemTransform {
                        scale,
                        tx: dx * INTRO_TRANSLATE_FACTOR,
                        ty: dy * INTRO_TRANSLATE_FACTOR,
                    },
                )
            })
            .collect()
    }
}
