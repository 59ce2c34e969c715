use crate::constants::TOUCH_TAP_MAX_PX;
use glam::Vec2;

/// Single-finger touch tracking: drag deltas for looking around and tap
/// detection on release.
#[derive(Default, Clone, Copy, Debug)]
pub struct TouchTracker {
    start: Option<Vec2>,
    last: Vec2,
    travel: f32,
}

impl TouchTracker {
    pub fn begin(&mut self, at: Vec2) {
        self.start = Some(at);
        self.last = at;
        self.travel = 0.0;
    }

    /// Movement since the previous sample, `None` when no touch is active.
    pub fn move_to(&mut self, at: Vec2) -> Option<Vec2> {
        self.start?;
        let delta = at - self.last;
        self.last = at;
        self.travel += delta.length();
        Some(delta)
    }

    /// Finish the touch; returns the release point when it was a tap.
    pub fn end(&mut self, at: Vec2) -> Option<Vec2> {
        self.start.take()?;
        let travel = self.travel + (at - self.last).length();
        (travel < TOUCH_TAP_MAX_PX).then_some(at)
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }
}

/// Client (CSS pixel) coordinates relative to an element's bounding box.
#[inline]
pub fn client_to_local(client: Vec2, rect_origin: Vec2) -> Vec2 {
    client - rect_origin
}
