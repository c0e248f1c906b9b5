use crate::board::Springboard;
use crate::geometry::{Point, Size};

/// Gesture and viewport callbacks delivered by the host, for hosts that
/// prefer a single event channel over direct method calls.
#[derive(Debug, Clone)]
pub enum GestureEvent {
    ViewportResized(Size),
    /// Scroll position reported while a pan or deceleration is in
    /// flight.
    Scrolled(Point),
    ZoomStarted,
    /// Zoom scale reported while a pinch is in flight.
    ZoomChanged(f64),
    ZoomEnded,
    DragStarted,
    DragWillEnd {
        proposed_offset: Point,
        velocity: Point,
    },
    DragEnded {
        will_decelerate: bool,
    },
    DecelerationEnded,
    DoubleTap(Point),
    AnimationCompleted(u64),
}

impl Springboard {
    /// Dispatches one gesture event. `DragWillEnd` answers with the
    /// corrected settle offset; every other event returns `None`.
    pub fn handle(&mut self, event: GestureEvent) -> Option<Point> {
        match event {
            GestureEvent::ViewportResized(size) => self.on_viewport_resized(size),
            GestureEvent::Scrolled(offset) => self.on_scrolled(offset),
            GestureEvent::ZoomStarted => self.on_zoom_started(),
            GestureEvent::ZoomChanged(scale) => self.on_zoom_changed(scale),
            GestureEvent::ZoomEnded => self.on_zoom_ended(),
            GestureEvent::DragStarted => self.on_drag_started(),
            GestureEvent::DragWillEnd {
                proposed_offset,
                velocity,
            } => return Some(self.on_drag_will_end(proposed_offset, velocity)),
            GestureEvent::DragEnded { will_decelerate } => self.on_drag_did_end(will_decelerate),
            GestureEvent::DecelerationEnded => self.on_deceleration_did_end(),
            GestureEvent::DoubleTap(location) => self.on_double_tap(location),
            GestureEvent::AnimationCompleted(generation) => self.animation_completed(generation),
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;
    use crate::item::Item;
    use crate::render::FrameRecorder;

    #[test]
    fn test_event_dispatch_matches_direct_calls() {
        let mut board = Springboard::new(Tuning::default());
        board.handle(GestureEvent::ViewportResized(Size::new(320.0, 480.0)));
        board.set_items(vec![
            Item::new("a", "A", "a.png"),
            Item::new("b", "B", "b.png"),
        ]);
        let mut recorder = FrameRecorder::default();
        board.layout_pass(&mut recorder);

        board.handle(GestureEvent::DragStarted);
        let corrected = board.handle(GestureEvent::DragWillEnd {
            proposed_offset: Point::new(10.0, 10.0),
            velocity: Point::default(),
        });
        assert!(corrected.is_some());
        assert!(
            board
                .handle(GestureEvent::DragEnded {
                    will_decelerate: false
                })
                .is_none()
        );
    }
}
