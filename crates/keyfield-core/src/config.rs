//! Runtime-tunable parameters for a [`Session`](crate::Session).
//!
//! `FieldConfig::default()` mirrors the constants in [`crate::constants`];
//! front-ends and tests override individual fields with struct update syntax.

use crate::constants::*;

/// Distance-based opacity falloff parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpacityFalloff {
    pub near_radius: f32,
    pub mid_radius: f32,
    pub near: f32,
    pub mid: f32,
    pub far: f32,
    pub margin: f32,
    pub max: f32,
    pub hint_gain: f32,
    pub smooth_tau_sec: f32,
}

impl Default for OpacityFalloff {
    fn default() -> Self {
        Self {
            near_radius: NEAR_RADIUS,
            mid_radius: MID_RADIUS,
            near: OPACITY_NEAR,
            mid: OPACITY_MID,
            far: OPACITY_FAR,
            margin: FADE_MARGIN,
            max: OPACITY_MAX,
            hint_gain: HINT_OPACITY_GAIN,
            smooth_tau_sec: OPACITY_SMOOTH_TAU_SEC,
        }
    }
}

/// Scripted reveal phase durations, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealTimings {
    pub gather: f32,
    pub gather_move: f32,
    pub gather_stagger: f32,
    pub sentence: f32,
    pub dissolve: f32,
    pub title: f32,
    pub detail: f32,
}

impl Default for RevealTimings {
    fn default() -> Self {
        Self {
            gather: GATHER_SEC,
            gather_move: GATHER_MOVE_SEC,
            gather_stagger: GATHER_STAGGER_SEC,
            sentence: SENTENCE_SEC,
            dissolve: DISSOLVE_SEC,
            title: TITLE_SEC,
            detail: DETAIL_SEC,
        }
    }
}

/// Camera flight tuning, in units per 60 Hz frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlightParams {
    pub accel: f32,
    pub yaw_accel: f32,
    pub pitch_accel: f32,
    pub friction: f32,
    pub min_drift: f32,
}

impl Default for FlightParams {
    fn default() -> Self {
        Self {
            accel: FLIGHT_ACCEL,
            yaw_accel: FLIGHT_YAW_ACCEL,
            pitch_accel: FLIGHT_PITCH_ACCEL,
            friction: FLIGHT_FRICTION,
            min_drift: FLIGHT_MIN_DRIFT,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    /// Half-size of the toroidal world around the camera.
    pub world_size: f32,
    pub match_threshold: usize,
    pub opacity: OpacityFalloff,
    pub float_amplitude: f32,
    pub float_frequency: f32,
    pub redistribute_base_radius: f32,
    pub redistribute_radius_step: f32,
    pub redistribute_angle: f32,
    pub redistribute_angle_jitter: f32,
    pub redistribute_vertical_jitter: f32,
    pub redistribute_duration: f32,
    pub shatter_delay: f32,
    pub field_fade_in: f32,
    pub burst_particles: usize,
    pub reveal: RevealTimings,
    pub flight: FlightParams,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            world_size: WORLD_SIZE,
            match_threshold: MATCH_THRESHOLD,
            opacity: OpacityFalloff::default(),
            float_amplitude: FLOAT_AMPLITUDE_PER_SEC,
            float_frequency: FLOAT_FREQUENCY,
            redistribute_base_radius: REDISTRIBUTE_BASE_RADIUS,
            redistribute_radius_step: REDISTRIBUTE_RADIUS_STEP,
            redistribute_angle: REDISTRIBUTE_ANGLE,
            redistribute_angle_jitter: REDISTRIBUTE_ANGLE_JITTER,
            redistribute_vertical_jitter: REDISTRIBUTE_VERTICAL_JITTER,
            redistribute_duration: REDISTRIBUTE_DURATION_SEC,
            shatter_delay: SHATTER_DELAY_SEC,
            field_fade_in: FIELD_FADE_IN_SEC,
            burst_particles: BURST_PARTICLES,
            reveal: RevealTimings::default(),
            flight: FlightParams::default(),
        }
    }
}
