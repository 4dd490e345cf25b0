use glam::Vec3;

// Shared field/interaction tuning constants used by the core and the web frontend.
// Per-frame values from the original 60 Hz tuning are expressed per second here.

// World layout
pub const WORLD_SIZE: f32 = 25.0; // half-size of the wrap volume around the camera
pub const SPAWN_SPREAD_XZ: f32 = 1.8; // spawn box width/depth as a multiple of WORLD_SIZE
pub const SPAWN_SPREAD_Y: f32 = 1.2; // spawn box height as a multiple of WORLD_SIZE
pub const DRIFT_SPEED: f32 = 0.012; // initial per-entity velocity magnitude bound

// Matching
pub const MATCH_THRESHOLD: usize = 3;

// Distance-based opacity
pub const OPACITY_MAX: f32 = 1.0;
pub const OPACITY_NEAR: f32 = 0.6; // full intensity for a free keyword
pub const OPACITY_MID: f32 = 0.25;
pub const OPACITY_FAR: f32 = 0.08;
pub const NEAR_RADIUS: f32 = 10.0;
pub const MID_RADIUS: f32 = 20.0;
pub const FADE_MARGIN: f32 = 5.0; // fade to zero beyond WORLD_SIZE over this distance
pub const HINT_OPACITY_GAIN: f32 = 1.6; // multiplier for hinted keywords (clamped to OPACITY_MAX)
pub const OPACITY_SMOOTH_TAU_SEC: f32 = 0.16;

// Decorative vertical drift: y += sin(t * freq + x) * amp * dt
pub const FLOAT_AMPLITUDE_PER_SEC: f32 = 0.12;
pub const FLOAT_FREQUENCY: f32 = 1.0;

// Redistribution after a selection
pub const REDISTRIBUTE_BASE_RADIUS: f32 = 8.0;
pub const REDISTRIBUTE_RADIUS_STEP: f32 = 4.0; // three layers: 12, 16, 20
pub const REDISTRIBUTE_LAYERS: usize = 3;
pub const REDISTRIBUTE_ANGLE: f32 = std::f32::consts::FRAC_PI_2;
pub const REDISTRIBUTE_ANGLE_JITTER: f32 = 0.5;
pub const REDISTRIBUTE_VERTICAL_JITTER: f32 = 6.0;
pub const REDISTRIBUTE_DURATION_SEC: f32 = 2.5;

// Keyword styling
pub const BASE_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const HOVER_COLOR: [f32; 3] = [0.25, 0.56, 0.60]; // #408F98
pub const SELECT_COLOR: [f32; 3] = [0.0, 1.0, 0.8]; // #00FFCC
pub const HINT_COLOR: [f32; 3] = [0.36, 0.75, 0.74];
pub const HOVER_SCALE: f32 = 1.2;
pub const SELECT_SCALE: f32 = 1.15;
pub const STYLE_TWEEN_SEC: f32 = 0.25;

// Label geometry in world units (64px mono glyphs, 40px padding, 0.005 world/px)
pub const GLYPH_ADVANCE: f32 = 0.192;
pub const LABEL_PADDING: f32 = 0.4;
pub const LABEL_HEIGHT: f32 = 0.72;

// Hint lines
pub const HINT_LINE_OPACITY: f32 = 0.4;
pub const HINT_LINE_FADE_IN_SEC: f32 = 1.0;
pub const HINT_LINE_FADE_OUT_SEC: f32 = 0.5;

// Landing
pub const SHATTER_DELAY_SEC: f32 = 1.0;
pub const FIELD_FADE_IN_SEC: f32 = 2.0;
pub const BURST_PARTICLES: usize = 500;
pub const BURST_SPEED_PER_SEC: f32 = 6.0; // 0.1 per frame
pub const BURST_DRAG_PER_FRAME: f32 = 0.98;
pub const BURST_FADE_PER_SEC: f32 = 0.6; // 0.01 per frame

// Unlock sequence timings
pub const GATHER_SEC: f32 = 1.4;
pub const GATHER_MOVE_SEC: f32 = 1.2;
pub const GATHER_STAGGER_SEC: f32 = 0.1;
pub const GATHER_DISTANCE: f32 = 8.0; // in front of the camera
pub const GATHER_SPREAD: [f32; 2] = [2.0, 1.5];
pub const GATHER_FADE_SEC: f32 = 0.8;
pub const SENTENCE_SEC: f32 = 3.5;
pub const DISSOLVE_SEC: f32 = 1.2;
pub const TITLE_SEC: f32 = 2.5;
pub const DETAIL_SEC: f32 = 1.9;

// Camera
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const CAMERA_START: [f32; 3] = [0.0, 0.0, 5.0];

// Flight (original per-frame tuning at 60 Hz)
pub const FLIGHT_ACCEL: f32 = 0.008;
pub const FLIGHT_YAW_ACCEL: f32 = 0.0015;
pub const FLIGHT_PITCH_ACCEL: f32 = 0.001;
pub const FLIGHT_FRICTION: f32 = 0.96;
pub const FLIGHT_MIN_DRIFT: f32 = 0.0008;
pub const REFERENCE_FPS: f32 = 60.0;

#[inline]
pub fn camera_start_vec3() -> Vec3 {
    Vec3::new(CAMERA_START[0], CAMERA_START[1], CAMERA_START[2])
}
