use super::commands::{CueId, UiCommand};
use super::lighting::SceneLight;
use crate::constants::*;
use glam::{Vec2, Vec3};
use instant::Instant;
use rand::Rng;
use smallvec::SmallVec;
use std::time::Duration;

/// One-shot wall-clock timer. Starting it again while armed moves the deadline.
#[derive(Clone, Copy, Debug, Default)]
pub struct EffectTimer {
    deadline: Option<Instant>,
}

impl EffectTimer {
    pub fn start(&mut self, now: Instant, duration: Duration) {
        self.deadline = Some(now + duration);
    }

    pub fn is_active(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// True exactly once, on the first poll at or after the deadline.
    pub fn poll_expired(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

// ---------------- Easter egg ----------------

/// Rolling buffer of the last typed characters.
#[derive(Debug, Default)]
pub struct EasterEggDetector {
    buffer: SmallVec<[char; 8]>,
}

impl EasterEggDetector {
    pub fn buffer(&self) -> String {
        self.buffer.iter().collect()
    }

    /// Feed a `KeyboardEvent.key`. Ctrl chords are ignored. Returns true when
    /// the buffer spells the sequence; the buffer is then cleared.
    pub fn push_key(&mut self, key: &str, ctrl: bool) -> bool {
        if ctrl {
            return false;
        }
        let target_len = EASTER_EGG_SEQUENCE.chars().count();
        for c in key.chars().flat_map(char::to_uppercase) {
            self.buffer.push(c);
        }
        if self.buffer.len() > target_len {
            let excess = self.buffer.len() - target_len;
            self.buffer.drain(..excess);
        }
        if self.buffer.iter().copied().eq(EASTER_EGG_SEQUENCE.chars()) {
            self.buffer.clear();
            return true;
        }
        false
    }
}

/// Red point lights shown during the flourish; never registered with the
/// lighting state.
pub fn easter_egg_lights() -> [SceneLight; 2] {
    [
        SceneLight::point(0xff0000, 5.0, 30.0, Vec3::new(0.0, 2.0, 0.0)),
        SceneLight::point(0xff0000, 5.0, 30.0, Vec3::new(5.0, 2.0, 5.0)),
    ]
}

#[derive(Debug, Default)]
pub struct EasterEggFlourish {
    timer: EffectTimer,
}

impl EasterEggFlourish {
    pub fn is_active(&self) -> bool {
        self.timer.is_active()
    }

    /// Start or restart the flourish. Overlay and sting only fire on a fresh start.
    pub fn trigger(&mut self, now: Instant, out: &mut Vec<UiCommand>) {
        let fresh = !self.timer.is_active();
        self.timer.start(now, Duration::from_millis(EASTER_EGG_MS));
        if fresh {
            log::info!("[egg] flourish");
            out.push(UiCommand::show(EASTER_EGG_ID));
        }
        out.push(UiCommand::play(CueId::EasterEgg, EASTER_EGG_VOLUME));
    }

    pub fn poll(&mut self, now: Instant, out: &mut Vec<UiCommand>) {
        if self.timer.poll_expired(now) {
            out.push(UiCommand::hide(EASTER_EGG_ID));
        }
    }

    /// Lights to draw this frame.
    pub fn lights(&self) -> Option<[SceneLight; 2]> {
        self.is_active().then(easter_egg_lights)
    }
}

// ---------------- Teleport ----------------

/// Horizontal camera glide between two points on the ground plane.
#[derive(Clone, Copy, Debug)]
pub struct Teleport {
    pub start: Vec2,
    pub dest: Vec2,
    pub started: Instant,
    pub duration: Duration,
}

/// Uniform destination in `[-half, half)` on both axes.
pub fn random_destination<R: Rng + ?Sized>(rng: &mut R, half_extent: f32) -> Vec2 {
    Vec2::new(
        rng.gen_range(-half_extent..half_extent),
        rng.gen_range(-half_extent..half_extent),
    )
}

impl Teleport {
    pub fn new(start: Vec2, dest: Vec2, now: Instant) -> Self {
        Self {
            start,
            dest,
            started: now,
            duration: Duration::from_millis(TELEPORT_MS),
        }
    }

    pub fn progress(&self, now: Instant) -> f32 {
        if now <= self.started {
            return 0.0;
        }
        let elapsed = now.duration_since(self.started).as_secs_f32();
        let total = self.duration.as_secs_f32();
        if total <= 0.0 {
            return 1.0;
        }
        (elapsed / total).clamp(0.0, 1.0)
    }

    /// Linear interpolation; `progress` is clamped to 0..1.
    #[inline]
    pub fn sample(&self, progress: f32) -> Vec2 {
        self.start.lerp(self.dest, progress.clamp(0.0, 1.0))
    }
}

// ---------------- Quote popup ----------------

#[derive(Debug, Default)]
pub struct QuotePopup {
    pending: Option<(Instant, String)>,
    hide: EffectTimer,
}

impl QuotePopup {
    pub fn is_visible(&self) -> bool {
        self.hide.is_active()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Show `text` after the quote delay. A newer quote replaces any pending one.
    pub fn schedule(&mut self, now: Instant, text: impl Into<String>) {
        self.pending = Some((now + Duration::from_millis(QUOTE_DELAY_MS), text.into()));
    }

    pub fn poll(&mut self, now: Instant, out: &mut Vec<UiCommand>) {
        if let Some((at, _)) = &self.pending {
            if now >= *at {
                if let Some((_, text)) = self.pending.take() {
                    out.push(UiCommand::set_text(QUOTE_TEXT_ID, text));
                    out.push(UiCommand::show(QUOTE_POPUP_ID));
                    self.hide.start(now, Duration::from_millis(QUOTE_VISIBLE_MS));
                }
            }
        }
        if self.hide.poll_expired(now) {
            out.push(UiCommand::hide(QUOTE_POPUP_ID));
        }
    }
}

pub fn random_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    SIGIL_QUOTES[rng.gen_range(0..SIGIL_QUOTES.len())]
}

// ---------------- Deferred commands ----------------

/// Commands to emit at a later instant, in due order.
#[derive(Debug, Default)]
pub struct Deferred {
    queue: SmallVec<[(Instant, UiCommand); 4]>,
}

impl Deferred {
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn push(&mut self, at: Instant, cmd: UiCommand) {
        let idx = self.queue.partition_point(|(t, _)| *t <= at);
        self.queue.insert(idx, (at, cmd));
    }

    pub fn after(&mut self, now: Instant, delay_ms: u64, cmd: UiCommand) {
        self.push(now + Duration::from_millis(delay_ms), cmd);
    }

    pub fn drain_due(&mut self, now: Instant, out: &mut Vec<UiCommand>) {
        let due = self.queue.partition_point(|(t, _)| *t <= now);
        out.extend(self.queue.drain(..due).map(|(_, c)| c));
    }
}
