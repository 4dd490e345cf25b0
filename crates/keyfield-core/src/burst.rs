use crate::constants::{BURST_DRAG_PER_FRAME, BURST_FADE_PER_SEC, BURST_SPEED_PER_SEC, REFERENCE_FPS};
use glam::Vec3;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// One-shot particle explosion that scatters the landing title. The whole
/// burst shares a single opacity and disappears when it reaches zero.
#[derive(Clone, Debug, Default)]
pub struct Burst {
    particles: Vec<Particle>,
    opacity: f32,
}

impl Burst {
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }

    pub fn spawn<R: Rng>(&mut self, count: usize, origin: Vec3, rng: &mut R) {
        self.particles.clear();
        self.particles.extend((0..count).map(|_| {
            let dir = Vec3::new(
                rng.gen::<f32>() - 0.5,
                rng.gen::<f32>() - 0.5,
                rng.gen::<f32>() - 0.5,
            ) * 2.0;
            Particle {
                position: origin,
                velocity: dir * BURST_SPEED_PER_SEC,
            }
        }));
        self.opacity = 1.0;
    }

    pub fn tick(&mut self, dt: f32) {
        if self.particles.is_empty() {
            return;
        }
        let drag = BURST_DRAG_PER_FRAME.powf(dt.max(0.0) * REFERENCE_FPS);
        for p in self.particles.iter_mut() {
            p.position += p.velocity * dt;
            p.velocity *= drag;
        }
        self.opacity -= BURST_FADE_PER_SEC * dt;
        if self.opacity <= 0.0 {
            self.clear();
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.opacity = 0.0;
    }
}
