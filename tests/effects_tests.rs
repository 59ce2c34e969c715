// Host-side tests for timed effects: easter egg, teleport, quotes, deferred commands.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod scene {
    pub mod camera {
        include!("../src/core/camera.rs");
    }
    pub mod commands {
        include!("../src/core/commands.rs");
    }
    pub mod drawlist {
        include!("../src/core/drawlist.rs");
    }
    pub mod effects {
        include!("../src/core/effects.rs");
    }
    pub mod entry {
        include!("../src/core/entry.rs");
    }
    pub mod lighting {
        include!("../src/core/lighting.rs");
    }
    pub mod loading {
        include!("../src/core/loading.rs");
    }
    pub mod markers {
        include!("../src/core/markers.rs");
    }
    pub mod models {
        include!("../src/core/models.rs");
    }
    pub mod movement {
        include!("../src/core/movement.rs");
    }
    pub mod panels {
        include!("../src/core/panels.rs");
    }
    pub mod picking {
        include!("../src/core/picking.rs");
    }
    pub mod session {
        include!("../src/core/session.rs");
    }
    pub mod shapes {
        include!("../src/core/shapes.rs");
    }
}

use constants::*;
use glam::Vec2;
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene::commands::{CueId, UiCommand};
use scene::effects::*;
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn type_keys(d: &mut EasterEggDetector, keys: &str) -> Vec<bool> {
    keys.chars()
        .map(|c| d.push_key(&c.to_string(), false))
        .collect()
}

#[test]
fn easter_egg_fires_once_on_sequence() {
    let mut d = EasterEggDetector::default();
    let fired = type_keys(&mut d, "RITUAL");
    assert_eq!(fired, vec![false, false, false, false, false, true]);
    assert_eq!(d.buffer(), "");
}

#[test]
fn easter_egg_is_case_insensitive_and_rolling() {
    let mut d = EasterEggDetector::default();
    let fired = type_keys(&mut d, "xxritual");
    assert_eq!(fired.iter().filter(|f| **f).count(), 1);
    assert!(*fired.last().unwrap());
}

#[test]
fn easter_egg_does_not_refire_on_trailing_keys() {
    let mut d = EasterEggDetector::default();
    let fired = type_keys(&mut d, "RITUALXQZRITUA");
    assert_eq!(fired.iter().filter(|f| **f).count(), 1);
    assert_eq!(d.buffer(), "ZRITUA");
}

#[test]
fn easter_egg_ignores_ctrl_chords() {
    let mut d = EasterEggDetector::default();
    for c in "RITUA".chars() {
        d.push_key(&c.to_string(), false);
    }
    assert!(!d.push_key("L", true));
    assert_eq!(d.buffer(), "RITUA");
    assert!(d.push_key("L", false));
}

#[test]
fn flourish_shows_then_hides_after_a_second() {
    let t0 = Instant::now();
    let mut f = EasterEggFlourish::default();
    let mut out = Vec::new();
    f.trigger(t0, &mut out);
    assert_eq!(
        out,
        vec![
            UiCommand::show(EASTER_EGG_ID),
            UiCommand::play(CueId::EasterEgg, EASTER_EGG_VOLUME),
        ]
    );
    assert_eq!(f.lights().map(|l| l.len()), Some(2));

    out.clear();
    f.poll(t0 + ms(999), &mut out);
    assert!(out.is_empty());
    f.poll(t0 + ms(EASTER_EGG_MS), &mut out);
    assert_eq!(out, vec![UiCommand::hide(EASTER_EGG_ID)]);
    assert!(f.lights().is_none());
}

#[test]
fn flourish_retrigger_restarts_timer_without_second_overlay() {
    let t0 = Instant::now();
    let mut f = EasterEggFlourish::default();
    let mut out = Vec::new();
    f.trigger(t0, &mut out);
    out.clear();
    f.trigger(t0 + ms(800), &mut out);
    assert!(!out.contains(&UiCommand::show(EASTER_EGG_ID)));

    out.clear();
    f.poll(t0 + ms(1200), &mut out);
    assert!(out.is_empty(), "restart should push the deadline out");
    f.poll(t0 + ms(1800), &mut out);
    assert_eq!(out, vec![UiCommand::hide(EASTER_EGG_ID)]);
}

#[test]
fn teleport_interpolates_endpoints() {
    let t0 = Instant::now();
    let tp = Teleport::new(Vec2::new(-5.66, 10.0), Vec2::new(2.0, -3.0), t0);
    assert_eq!(tp.sample(0.0), tp.start);
    assert_eq!(tp.sample(1.0), tp.dest);
    assert_eq!(tp.progress(t0), 0.0);
    assert!((tp.progress(t0 + ms(TELEPORT_MS / 2)) - 0.5).abs() < 1e-3);
    assert_eq!(tp.progress(t0 + ms(TELEPORT_MS * 3)), 1.0);
    assert_eq!(tp.sample(2.0), tp.dest);
}

#[test]
fn teleport_destinations_stay_in_bounds() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..1000 {
        let d = random_destination(&mut rng, TELEPORT_HALF_EXTENT);
        assert!(d.x >= -TELEPORT_HALF_EXTENT && d.x < TELEPORT_HALF_EXTENT);
        assert!(d.y >= -TELEPORT_HALF_EXTENT && d.y < TELEPORT_HALF_EXTENT);
    }
}

#[test]
fn random_quote_comes_from_the_list() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        assert!(SIGIL_QUOTES.contains(&random_quote(&mut rng)));
    }
}

#[test]
fn quote_appears_after_delay_and_hides() {
    let t0 = Instant::now();
    let mut q = QuotePopup::default();
    let mut out = Vec::new();
    q.schedule(t0, "The ritual is within you.");
    q.poll(t0 + ms(QUOTE_DELAY_MS - 100), &mut out);
    assert!(out.is_empty());
    assert!(q.is_pending());

    q.poll(t0 + ms(QUOTE_DELAY_MS), &mut out);
    assert_eq!(
        out,
        vec![
            UiCommand::set_text(QUOTE_TEXT_ID, "The ritual is within you."),
            UiCommand::show(QUOTE_POPUP_ID),
        ]
    );
    assert!(q.is_visible());

    out.clear();
    q.poll(t0 + ms(QUOTE_DELAY_MS + QUOTE_VISIBLE_MS), &mut out);
    assert_eq!(out, vec![UiCommand::hide(QUOTE_POPUP_ID)]);
    assert!(!q.is_visible());
}

#[test]
fn newer_quote_supersedes_and_restarts_hide() {
    let t0 = Instant::now();
    let mut q = QuotePopup::default();
    let mut out = Vec::new();
    q.schedule(t0, "first");
    q.poll(t0 + ms(500), &mut out);
    q.schedule(t0 + ms(1000), "second");
    out.clear();
    q.poll(t0 + ms(1500), &mut out);
    assert_eq!(out[0], UiCommand::set_text(QUOTE_TEXT_ID, "second"));

    out.clear();
    q.poll(t0 + ms(3600), &mut out);
    assert!(out.is_empty(), "hide timer restarted with the new quote");
    q.poll(t0 + ms(4500), &mut out);
    assert_eq!(out, vec![UiCommand::hide(QUOTE_POPUP_ID)]);
}

#[test]
fn deferred_commands_drain_in_due_order() {
    let t0 = Instant::now();
    let mut d = Deferred::default();
    d.after(t0, 500, UiCommand::StopCue(CueId::Wow));
    d.after(t0, 100, UiCommand::RequestCapture);
    d.after(t0, 100, UiCommand::hide(HINT_ID));
    assert_eq!(d.len(), 3);

    let mut out = Vec::new();
    d.drain_due(t0 + ms(50), &mut out);
    assert!(out.is_empty());
    d.drain_due(t0 + ms(100), &mut out);
    assert_eq!(out, vec![UiCommand::RequestCapture, UiCommand::hide(HINT_ID)]);
    out.clear();
    d.drain_due(t0 + ms(1000), &mut out);
    assert_eq!(out, vec![UiCommand::StopCue(CueId::Wow)]);
    assert!(d.is_empty());
}

#[test]
fn effect_timer_fires_once() {
    let t0 = Instant::now();
    let mut timer = EffectTimer::default();
    assert!(!timer.poll_expired(t0));
    timer.start(t0, ms(10));
    assert!(timer.is_active());
    assert!(timer.poll_expired(t0 + ms(10)));
    assert!(!timer.poll_expired(t0 + ms(20)));
    timer.start(t0, ms(10));
    timer.cancel();
    assert!(!timer.poll_expired(t0 + ms(20)));
}
