use super::camera::FirstPersonCamera;
use super::commands::{CueId, UiCommand};
use super::effects::{
    random_destination, random_quote, Deferred, EasterEggDetector, EasterEggFlourish, QuotePopup,
    Teleport,
};
use super::lighting::{
    default_lights, EnvironmentPreset, FullMoonCue, LightKind, LightingState, SceneLight,
};
use super::loading::{AssetKind, LoadLatch};
use super::markers::{animate, create_markers, default_specs, MarkerSet, MarkerSpec};
use super::movement::{intent_for_code, Intent, MoveMode, MovementParams, MovementState};
use super::panels::{AccessOutcome, PanelController};
use super::picking::{hint_text, pick, pick_marker, EnvironmentTargets, PickMesh, PickTarget};
use super::shapes::MeshData;
use crate::constants::*;
use glam::{Mat4, Quat, Vec2, Vec3};
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Model matrix of the logo in the main scene.
pub fn logo_transform() -> Mat4 {
    Mat4::from_scale_rotation_translation(Vec3::splat(LOGO_SCALE), Quat::IDENTITY, LOGO_POSITION)
}

/// Per-session settings, detected once at start.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub mobile: bool,
    pub movement: MovementParams,
    pub markers: Vec<MarkerSpec>,
    /// Fixed seed for teleport/quote randomness; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mobile: false,
            movement: MovementParams::default(),
            markers: default_specs(),
            seed: None,
        }
    }
}

/// What the shell should do with the DOM event after the session saw it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    pub prevent_default: bool,
}

/// Everything alive in the main scene, driven by the frame loop and input
/// handlers. Side effects on the page are queued as [`UiCommand`]s.
pub struct SceneSession {
    pub config: SessionConfig,
    pub camera: FirstPersonCamera,
    pub movement: MovementState,
    pub markers: MarkerSet,
    pub lighting: LightingState,
    pub panels: PanelController,
    pub environment_targets: EnvironmentTargets,
    egg: EasterEggDetector,
    flourish: EasterEggFlourish,
    teleport: Option<Teleport>,
    quote: QuotePopup,
    deferred: Deferred,
    latch: LoadLatch,
    secret_light: Option<usize>,
    rng: StdRng,
    started: Instant,
    last_tick: Instant,
    aspect: f32,
    outbox: Vec<UiCommand>,
}

impl SceneSession {
    pub fn new(config: SessionConfig, now: Instant) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let markers = create_markers(&config.markers);
        let lighting = LightingState::new(default_lights(config.mobile));
        log::info!(
            "[session] markers={} lights={} mobile={}",
            markers.len(),
            lighting.lights().len(),
            config.mobile
        );
        Self {
            camera: FirstPersonCamera::default(),
            movement: MovementState::new(config.movement),
            markers,
            lighting,
            panels: PanelController::default(),
            environment_targets: EnvironmentTargets::default(),
            egg: EasterEggDetector::default(),
            flourish: EasterEggFlourish::default(),
            teleport: None,
            quote: QuotePopup::default(),
            deferred: Deferred::default(),
            latch: LoadLatch::new(AssetKind::GATED.len()),
            secret_light: None,
            rng,
            started: now,
            last_tick: now,
            aspect: 16.0 / 9.0,
            outbox: Vec::new(),
            config,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn is_loaded(&self) -> bool {
        self.latch.is_complete()
    }

    pub fn teleporting(&self) -> bool {
        self.teleport.is_some()
    }

    pub fn secret_unlocked(&self) -> bool {
        self.panels.secret_unlocked()
    }

    pub fn environment(&self) -> EnvironmentPreset {
        self.lighting.environment
    }

    /// Take the queued page side effects.
    pub fn drain_commands(&mut self) -> Vec<UiCommand> {
        std::mem::take(&mut self.outbox)
    }

    // ---------------- Keyboard ----------------

    pub fn on_key_down(&mut self, code: &str, key: &str, ctrl: bool, now: Instant) -> KeyOutcome {
        let mut outcome = KeyOutcome::default();
        if ctrl {
            let mode = match code {
                "KeyF" => Some(MoveMode::Flying),
                "KeyW" => Some(MoveMode::Walking),
                _ => None,
            };
            if let Some(mode) = mode {
                self.set_move_mode(mode);
                outcome.prevent_default = true;
                return outcome;
            }
        }

        if let Some(intent) = intent_for_code(code, self.movement.mode) {
            self.movement.set_intent(intent, true);
            if intent == Intent::Up {
                outcome.prevent_default = true;
            }
        } else if code == "KeyM" {
            self.toggle_lights();
        }

        if self.egg.push_key(key, ctrl) {
            self.flourish.trigger(now, &mut self.outbox);
        }
        outcome
    }

    pub fn on_key_up(&mut self, code: &str) {
        // Release regardless of mode so a held Space/Shift never sticks
        if let Some(intent) = intent_for_code(code, MoveMode::Flying) {
            self.movement.set_intent(intent, false);
        }
    }

    pub fn set_move_mode(&mut self, mode: MoveMode) {
        if !self.movement.set_mode(mode) {
            return;
        }
        log::info!("[keys] mode={:?}", mode);
        let text = match mode {
            MoveMode::Walking => WALK_INSTRUCTIONS,
            MoveMode::Flying => FLY_INSTRUCTIONS,
        };
        self.outbox.push(UiCommand::set_text(INSTRUCTIONS_ID, text));
    }

    pub fn toggle_lights(&mut self) {
        match self.lighting.toggle(&mut self.markers) {
            Some(FullMoonCue::Start) => self
                .outbox
                .push(UiCommand::play_loop(CueId::FullMoon, FULL_MOON_VOLUME)),
            Some(FullMoonCue::Stop) => self.outbox.push(UiCommand::StopCue(CueId::FullMoon)),
            None => {}
        }
        log::info!("[lights] lights_on={}", self.lighting.lights_on);
    }

    // ---------------- Pointer ----------------

    /// Pointer-lock mouse motion in pixels; ignored unless captured.
    pub fn on_look_delta(&mut self, dx: f32, dy: f32) {
        if self.panels.captured() {
            self.camera.look(dx, dy);
        }
    }

    /// Touch drag in pixels; ignored while a panel is open.
    pub fn on_touch_look(&mut self, dx: f32, dy: f32) {
        if !self.panels.any_open() {
            self.camera.look(dx, dy);
        }
    }

    pub fn on_capture_changed(&mut self, captured: bool) {
        self.panels.set_captured(captured);
        log::info!("[mouse] captured={}", captured);
        if !captured {
            self.update_hover(None);
        }
    }

    /// A click (or synthesized tap). `on_canvas` is false when the event
    /// target is anything but the render canvas.
    pub fn on_click(&mut self, on_canvas: bool, pointer_ndc: Vec2, now: Instant) {
        if !on_canvas || !self.latch.is_complete() {
            return;
        }
        let ndc = if self.panels.captured() {
            Vec2::ZERO
        } else {
            pointer_ndc
        };
        let hit = pick(
            ndc,
            &self.camera,
            self.aspect,
            &self.markers,
            &self.environment_targets,
        );
        match hit {
            Some(PickTarget::Marker(id)) => {
                let Some(panel) = self.markers.get(id).map(|m| m.panel_id.clone()) else {
                    return;
                };
                self.show_panel(&panel);
                self.outbox.push(UiCommand::play(CueId::Ritual, RITUAL_VOLUME));
            }
            Some(PickTarget::MainModel) => self.start_teleport(now),
            Some(PickTarget::Logo) => {
                self.show_panel(PATREON_PANEL_ID);
                self.outbox.push(UiCommand::play(CueId::Ritual, RITUAL_VOLUME));
            }
            None => {
                if !self.panels.captured() && !self.panels.any_open() {
                    self.outbox.push(UiCommand::RequestCapture);
                }
            }
        }
    }

    fn start_teleport(&mut self, now: Instant) {
        if self.teleport.is_some() {
            return;
        }
        let start = Vec2::new(self.camera.position.x, self.camera.position.z);
        let dest = random_destination(&mut self.rng, TELEPORT_HALF_EXTENT);
        log::info!("[teleport] ({:.2},{:.2}) -> ({:.2},{:.2})", start.x, start.y, dest.x, dest.y);
        self.teleport = Some(Teleport::new(start, dest, now));
        self.outbox.push(UiCommand::play(CueId::Portal, PORTAL_VOLUME));
        let quote = random_quote(&mut self.rng);
        self.quote.schedule(now, quote);
    }

    // ---------------- Panels ----------------

    pub fn show_panel(&mut self, id: &str) {
        self.panels.show_panel(id, &mut self.outbox);
    }

    pub fn close_panel(&mut self, id: &str) {
        self.panels.close_panel(id, &mut self.outbox);
    }

    pub fn submit_access_code(&mut self, input: &str) -> AccessOutcome {
        let outcome = self.panels.submit_access_code(input, &mut self.outbox);
        if outcome == AccessOutcome::Unlocked && self.secret_light.is_none() {
            let light = SceneLight::point(SECRET_LIGHT_COLOR, 2.0, 10.0, SECRET_LIGHT_POSITION);
            self.secret_light = Some(self.lighting.register(light));
        }
        outcome
    }

    // ---------------- Assets ----------------

    /// Record a finished (or failed) asset load. `mesh` is the decoded
    /// model, `None` on failure.
    pub fn asset_settled(&mut self, kind: AssetKind, mesh: Option<&MeshData>, now: Instant) {
        if self.latch.is_complete() || self.latch.has_settled(kind) {
            return;
        }
        match (kind, mesh) {
            (AssetKind::MainModel, Some(mesh)) => {
                let target = PickMesh::new(mesh, Mat4::IDENTITY);
                if let Some((min, max)) = target.as_ref().map(PickMesh::bounds) {
                    let center = (min + max) * 0.5;
                    self.lighting.register(SceneLight::point(
                        0xffffff,
                        MODEL_LIGHT_INTENSITY,
                        MODEL_LIGHT_RANGE,
                        center + Vec3::new(0.0, MODEL_LIGHT_LIFT, 0.0),
                    ));
                }
                self.environment_targets.main_model = target;
            }
            (AssetKind::Logo, Some(mesh)) => {
                self.environment_targets.logo = PickMesh::new(mesh, logo_transform());
            }
            (AssetKind::MarkerModel, Some(_)) => self.markers.use_model(),
            (AssetKind::MarkerModel, None) => {
                log::warn!("[assets] marker model unavailable, using fallback spheres");
                self.markers.use_fallback();
            }
            (_, None) => {}
        }
        if self.latch.settle(kind, mesh.is_some()) {
            log::info!("[assets] all settled, revealing scene");
            self.outbox.push(UiCommand::hide(LOADING_SCREEN_ID));
            self.outbox.push(UiCommand::show(SCENE_CONTAINER_ID));
            self.deferred
                .after(now, CAPTURE_DELAY_MS, UiCommand::RequestCapture);
            self.outbox
                .push(UiCommand::play_loop(CueId::Ambient, AMBIENT_VOLUME));
        }
    }

    // ---------------- Frame ----------------

    /// Advance one rendered frame.
    pub fn tick(&mut self, now: Instant) {
        let dt = if now > self.last_tick {
            now.duration_since(self.last_tick).as_secs_f32()
        } else {
            0.0
        };
        self.last_tick = now;
        let elapsed = if now > self.started {
            now.duration_since(self.started).as_secs_f32()
        } else {
            0.0
        };

        if self.panels.captured() {
            self.movement.step(&mut self.camera, MOVE_DELTA);
        }

        if let Some(tp) = self.teleport {
            let p = tp.progress(now);
            let xz = tp.sample(p);
            self.camera.position.x = xz.x;
            self.camera.position.z = xz.y;
            if p >= 1.0 {
                self.teleport = None;
            }
        }

        let hovered = if self.panels.captured() {
            pick_marker(Vec2::ZERO, &self.camera, self.aspect, &self.markers)
        } else {
            None
        };
        self.update_hover(hovered);

        animate(&mut self.markers, elapsed, dt);

        self.flourish.poll(now, &mut self.outbox);
        self.quote.poll(now, &mut self.outbox);
        self.deferred.drain_due(now, &mut self.outbox);
    }

    fn update_hover(&mut self, hovered: Option<usize>) {
        if !self.markers.set_hovered(hovered) {
            return;
        }
        match hovered.and_then(|id| self.markers.get(id)) {
            Some(m) => {
                self.outbox
                    .push(UiCommand::set_text(HINT_TEXT_ID, hint_text(&m.name)));
                self.outbox.push(UiCommand::show(HINT_ID));
            }
            None => self.outbox.push(UiCommand::hide(HINT_ID)),
        }
    }

    /// Every light to draw this frame: registered lights, one point light
    /// per marker and the flourish lights while active.
    pub fn frame_lights(&self) -> Vec<SceneLight> {
        let mut out: Vec<SceneLight> = self.lighting.lights().to_vec();
        out.extend(self.markers.iter().map(|m| SceneLight {
            intensity: m.light.intensity,
            range: m.light.range,
            ..SceneLight::new(LightKind::Point, m.color, m.position, 0.0, 0.0)
        }));
        if let Some(extra) = self.flourish.lights() {
            out.extend(extra);
        }
        out
    }

    /// Defer a command (used by the shell for the entry chime cut-off).
    pub fn defer(&mut self, now: Instant, delay_ms: u64, cmd: UiCommand) {
        self.deferred.after(now, delay_ms, cmd);
    }
}
