//! Free-flying camera: pose, projection and keyboard-driven flight.

use crate::config::FlightParams;
use crate::constants::*;
use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

/// Right-handed camera looking down its local -Z axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub orientation: Quat,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: camera_start_vec3(),
            orientation: Quat::IDENTITY,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl CameraPose {
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.orientation * Vec3::X
    }
    #[inline]
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position).inverse()
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, aspect.max(1e-3), self.znear, self.zfar)
    }

    /// World-space ray through a point in normalized device coordinates.
    ///
    /// Returns `(origin, direction)` with a unit direction.
    pub fn ray_from_ndc(&self, ndc: Vec2, aspect: f32) -> (Vec3, Vec3) {
        let inv = (self.projection_matrix(aspect) * self.view_matrix()).inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1 = p_far.truncate() / p_far.w;
        let ro = self.position;
        let rd = (p1 - ro).try_normalize().unwrap_or(self.forward());
        (ro, rd)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlightKey {
    Forward,
    Back,
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
}

impl FlightKey {
    /// Map a `KeyboardEvent.key` value (W/A/S/D/Q/E, any case).
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "w" => Some(Self::Forward),
            "s" => Some(Self::Back),
            "a" => Some(Self::YawLeft),
            "d" => Some(Self::YawRight),
            "q" => Some(Self::PitchUp),
            "e" => Some(Self::PitchDown),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub forward: bool,
    pub back: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
    pub pitch_up: bool,
    pub pitch_down: bool,
}

impl HeldKeys {
    pub fn set(&mut self, key: FlightKey, down: bool) {
        match key {
            FlightKey::Forward => self.forward = down,
            FlightKey::Back => self.back = down,
            FlightKey::YawLeft => self.yaw_left = down,
            FlightKey::YawRight => self.yaw_right = down,
            FlightKey::PitchUp => self.pitch_up = down,
            FlightKey::PitchDown => self.pitch_down = down,
        }
    }
}

/// Camera pose plus flight velocities. Velocities are in units (or radians)
/// per 60 Hz frame; `step` rescales them by the real frame time.
#[derive(Clone, Debug, Default)]
pub struct CameraRig {
    pub pose: CameraPose,
    pub speed: f32,
    pub yaw_rate: f32,
    pub pitch_rate: f32,
    pub keys: HeldKeys,
}

impl CameraRig {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn step(&mut self, dt: f32, p: &FlightParams) {
        let frames = dt.max(0.0) * REFERENCE_FPS;
        if frames <= 0.0 {
            return;
        }
        let k = &self.keys;
        // local -Z is forward
        if k.forward {
            self.speed -= p.accel * frames;
        }
        if k.back {
            self.speed += p.accel * frames;
        }
        if k.yaw_left {
            self.yaw_rate += p.yaw_accel * frames;
        }
        if k.yaw_right {
            self.yaw_rate -= p.yaw_accel * frames;
        }
        if k.pitch_up {
            self.pitch_rate += p.pitch_accel * frames;
        }
        if k.pitch_down {
            self.pitch_rate -= p.pitch_accel * frames;
        }

        let damping = p.friction.powf(frames);
        self.speed *= damping;
        self.yaw_rate *= damping;
        self.pitch_rate *= damping;
        if self.speed.abs() < p.min_drift {
            self.speed = -p.min_drift;
        }

        let pose = &mut self.pose;
        pose.position += pose.orientation * Vec3::Z * (self.speed * frames);
        pose.orientation = (pose.orientation
            * Quat::from_rotation_y(self.yaw_rate * frames)
            * Quat::from_rotation_x(self.pitch_rate * frames))
        .normalize();
    }
}
