// Scene, movement and interaction tuning constants.
//
// Colors are kept as `0xRRGGBB` and expanded with `color_from_hex`.
use glam::Vec3;

// ---------------- Movement ----------------
// Fixed nominal timestep fed to the integrator once per rendered frame
pub const MOVE_DELTA: f32 = 0.1;
pub const MOVE_DAMPING_RATE: f32 = 10.0;
pub const MOVE_SPEED: f32 = 50.0;
pub const EYE_HEIGHT: f32 = 1.8;
pub const EYE_SMOOTHING: f32 = 0.1; // fraction of the remaining gap closed per frame
pub const FLY_FLOOR_Y: f32 = 0.5;

// Look sensitivity (radians per pixel) for pointer-lock and touch drags
pub const LOOK_SENSITIVITY: f32 = 0.002;
pub const TOUCH_TAP_MAX_PX: f32 = 10.0;

// Camera
pub const CAMERA_FOV_Y_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_START: Vec3 = Vec3::new(-5.66, 5.57, 10.0);

// ---------------- Markers ----------------
// (name, panel id, color, position)
pub const MARKER_TABLE: [(&str, &str, u32, [f32; 3]); 8] = [
    ("Home", "home-panel", 0x00d4ff, [8.0, 3.0, 8.0]),
    ("About", "about-panel", 0x4a9eff, [-8.0, 3.0, 8.0]),
    ("Event Calendar", "event-panel", 0xc0c0c0, [12.0, 3.0, 0.0]),
    ("Workshop", "workshop-panel", 0x00fff7, [8.0, 3.0, -8.0]),
    ("Address", "address-panel", 0xff00ff, [-8.0, 3.0, -8.0]),
    ("Archives", "archives-panel", 0xffaa00, [-12.0, 3.0, 0.0]),
    ("Ritual Merch", "merch-panel", 0x00ff88, [0.0, 3.0, 12.0]),
    ("3D Design", "design-panel", 0xff0088, [0.0, 3.0, -12.0]),
];

pub const BOB_AMPLITUDE: f32 = 0.3;
pub const BOB_FREQUENCY: f32 = 2.0;
pub const RING_SPIN_PER_FRAME: f32 = 0.02;
pub const CRYSTAL_SPIN_PER_FRAME: f32 = 0.01;
pub const CRYSTAL_TILT: f32 = 0.1;
pub const CRYSTAL_HEIGHT: f32 = 3.5;
pub const CRYSTAL_BOUNCE: f32 = 0.15;
pub const MODEL_SPIN_Y_PER_FRAME: f32 = 0.01;
pub const MODEL_SPIN_X_STEP: f32 = 0.01; // multiplied by marker index

pub const MARKER_EMISSIVE: f32 = 0.8;
pub const HOVER_PULSE_BOOST: f32 = 0.4;
pub const HOVER_PULSE_DELTA: f32 = 0.2;
pub const HOVER_PULSE_FREQUENCY: f32 = 5.0;
pub const HOVER_SCALE_DELTA: f32 = 0.1;
pub const EMISSIVE_DECAY_PER_SEC: f32 = 8.0;

// Hit-test bounds (marker-local)
pub const MODEL_HIT_RADIUS: f32 = 1.0;
pub const FALLBACK_SPHERE_RADIUS: f32 = 0.8;
pub const RING_RADIUS: f32 = 1.2;
pub const RING_TUBE: f32 = 0.1;
pub const CRYSTAL_HIT_RADIUS: f32 = 0.7;

// Marker point light
pub const MARKER_LIGHT_INTENSITY: f32 = 2.0;
pub const MARKER_LIGHT_RANGE: f32 = 10.0;

// ---------------- Lighting presets ----------------
pub const DAY_BACKGROUND: u32 = 0x0a0a0a;
pub const DAY_FOG: u32 = 0x0f0f15;
pub const DAY_FOG_NEAR: f32 = 25.0;
pub const DAY_FOG_FAR: f32 = 120.0;

pub const NIGHT_BACKGROUND: u32 = 0x000000;
pub const NIGHT_FOG: u32 = 0x000000;
pub const NIGHT_FOG_NEAR: f32 = 10.0;
pub const NIGHT_FOG_FAR: f32 = 50.0;

pub const NIGHT_MARKER_EMISSIVE: f32 = 3.5;
pub const NIGHT_MARKER_LIGHT_INTENSITY: f32 = 5.0;
pub const NIGHT_MARKER_LIGHT_RANGE: f32 = 20.0;

pub const MODEL_LIGHT_INTENSITY: f32 = 4.0;
pub const MODEL_LIGHT_RANGE: f32 = 60.0;
pub const MODEL_LIGHT_LIFT: f32 = 10.0;

pub const SECRET_LIGHT_COLOR: u32 = 0x00ff00;
pub const SECRET_LIGHT_POSITION: Vec3 = Vec3::new(10.0, 1.0, 10.0);

// ---------------- Effects ----------------
pub const EASTER_EGG_SEQUENCE: &str = "RITUAL";
pub const EASTER_EGG_MS: u64 = 1000;
pub const TELEPORT_MS: u64 = 1000;
pub const TELEPORT_HALF_EXTENT: f32 = 5.0;
pub const QUOTE_DELAY_MS: u64 = 500;
pub const QUOTE_VISIBLE_MS: u64 = 3000;
pub const CAPTURE_DELAY_MS: u64 = 100;
pub const ENTRY_CHIME_MS: u64 = 500;
pub const RELOAD_DELAY_MS: i32 = 2000;

pub const ACCESS_CODE: &str = "FULLMOON";
pub const CONTEXT_LOST_MESSAGE: &str = "Connection lost. Refreshing...";

// Cue volumes
pub const AMBIENT_VOLUME: f32 = 0.5;
pub const RITUAL_VOLUME: f32 = 0.2;
pub const PORTAL_VOLUME: f32 = 0.4;
pub const FULL_MOON_VOLUME: f32 = 0.25;
pub const EASTER_EGG_VOLUME: f32 = 0.4;
pub const WOW_VOLUME: f32 = 0.4;

pub const SIGIL_QUOTES: [&str; 7] = [
    "Ritual begins with listening.",
    "Drunken moonlight, when it ferments within you.",
    "The cycle returns with each full moon.",
    "In darkness we find our light.",
    "Sound is bridge between worlds, u & i",
    "Brew your intentions with extra care.",
    "The ritual is within you.",
];

// ---------------- Environment layout ----------------
pub const GROUND_SIZE: f32 = 150.0;
pub const GROUND_COLOR: u32 = 0x1a1a1a;
pub const GRID_DIVISIONS: u32 = 75;
pub const GRID_LINE_WIDTH: f32 = 0.04;
pub const GRID_CENTRE_COLOR: u32 = 0x00d4ff;
pub const GRID_COLOR: u32 = 0x4a9eff;
pub const GRID_OPACITY: f32 = 0.3;
pub const LOGO_POSITION: Vec3 = Vec3::new(0.0, 10.0, 0.0);
pub const LOGO_SCALE: f32 = 2.0;

// ---------------- Assets ----------------
pub const MAIN_MODEL_URL: &str = "main.glb";
pub const LOGO_MODEL_URL: &str = "rituallogo.glb";
pub const MARKER_MODEL_URL: &str = "marker.glb";

// ---------------- DOM ----------------
pub const ENTRY_SCREEN_ID: &str = "entry-screen";
pub const ENTRY_CANVAS_ID: &str = "entry-canvas";
pub const LOADING_SCREEN_ID: &str = "loading-screen";
pub const SCENE_CONTAINER_ID: &str = "scene-container";
pub const RITUAL_CANVAS_ID: &str = "ritual-canvas";
pub const HINT_ID: &str = "interaction-hint";
pub const HINT_TEXT_ID: &str = "hint-text";
pub const QUOTE_POPUP_ID: &str = "quote-popup";
pub const QUOTE_TEXT_ID: &str = "quote-text";
pub const EASTER_EGG_ID: &str = "easter-egg-effect";
pub const INSTRUCTIONS_ID: &str = "instructions";
pub const ACCESS_INPUT_ID: &str = "access-code-input";
pub const ACCESS_SUBMIT_ID: &str = "access-code-submit";
pub const ACCESS_STATUS_ID: &str = "access-code-status";
pub const PATREON_PANEL_ID: &str = "patreon-panel";

pub const WALK_INSTRUCTIONS: &str =
    "WASD - Move | Mouse - Look Around | M - Full Moon Mode | Ctrl+F - Fly Mode | Click - Interact";
pub const FLY_INSTRUCTIONS: &str =
    "WASD - Move | Space - Up | Shift - Down | Mouse - Look | M - Full Moon | Ctrl+W - Walk Mode";

/// Expand a `0xRRGGBB` color into linear-ish 0..1 channels.
#[inline]
pub fn color_from_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}
