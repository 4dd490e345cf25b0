//! The keyword field: a flat table of keyword entities plus their per-frame
//! motion (decorative drift, camera-relative wrap-around, distance-based
//! opacity) and styling.
//!
//! Entities are created once from the vocabulary and never destroyed. They
//! are addressed by [`KeywordId`], an index into the table, or by their word
//! through a hash index. Unknown words are no-ops everywhere.

use crate::camera::CameraPose;
use crate::config::{FieldConfig, OpacityFalloff};
use crate::constants::*;
use crate::easing::Easing;
use crate::tween::{Tween, TweenKind, TweenSet};
use fnv::FnvHashMap;
use glam::{Quat, Vec3};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeywordId(pub usize);

#[derive(Clone, Debug)]
pub struct KeywordEntity {
    pub word: String,
    pub position: Vec3,
    /// Spawn position, restored on a full reset.
    pub home: Vec3,
    pub velocity: Vec3,
    pub hovered: bool,
    pub selected: bool,
    pub hinted: bool,
    /// Pinned by the unlock sequence; excluded from drift and wrap.
    pub fixed: bool,
    /// Faded out while another set of keywords is on stage.
    pub dimmed: bool,
    pub opacity: f32,
    pub scale: f32,
    pub color: [f32; 3],
    pub orientation: Quat,
}

impl KeywordEntity {
    pub fn new(word: String, position: Vec3, velocity: Vec3) -> Self {
        Self {
            word,
            position,
            home: position,
            velocity,
            hovered: false,
            selected: false,
            hinted: false,
            fixed: false,
            dimmed: false,
            opacity: 0.0,
            scale: 1.0,
            color: BASE_COLOR,
            orientation: Quat::IDENTITY,
        }
    }

    /// Free entities drift, wrap and fade with distance.
    #[inline]
    pub fn is_free(&self) -> bool {
        !self.selected && !self.fixed
    }

    /// Half width/height of the label billboard in world units.
    pub fn half_extents(&self) -> (f32, f32) {
        let glyphs = self.word.chars().count() as f32;
        let w = glyphs * GLYPH_ADVANCE + LABEL_PADDING;
        (0.5 * w * self.scale, 0.5 * LABEL_HEIGHT * self.scale)
    }

    fn reset_visuals(&mut self) {
        self.hovered = false;
        self.selected = false;
        self.hinted = false;
        self.fixed = false;
        self.dimmed = false;
        self.opacity = 0.0;
        self.scale = 1.0;
        self.color = BASE_COLOR;
    }

    fn style_color(&self) -> [f32; 3] {
        if self.selected {
            SELECT_COLOR
        } else if self.hovered {
            HOVER_COLOR
        } else if self.hinted {
            HINT_COLOR
        } else {
            BASE_COLOR
        }
    }

    fn style_scale(&self) -> f32 {
        if self.selected {
            SELECT_SCALE
        } else if self.hovered {
            HOVER_SCALE
        } else {
            1.0
        }
    }
}

/// Piecewise-linear falloff: `near` inside `near_radius`, down to `mid` at
/// `mid_radius`, down to `far` at `world_size`, then to zero over `margin`.
pub fn opacity_target(distance: f32, world_size: f32, f: &OpacityFalloff) -> f32 {
    let d = distance.max(0.0);
    let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t.clamp(0.0, 1.0);
    let v = if d <= f.near_radius {
        f.near
    } else if d <= f.mid_radius {
        lerp(f.near, f.mid, (d - f.near_radius) / (f.mid_radius - f.near_radius))
    } else if d <= world_size {
        lerp(f.mid, f.far, (d - f.mid_radius) / (world_size - f.mid_radius))
    } else if f.margin > 0.0 && d <= world_size + f.margin {
        lerp(f.far, 0.0, (d - world_size) / f.margin)
    } else {
        0.0
    };
    v.clamp(0.0, f.max)
}

pub struct KeywordField {
    entities: Vec<KeywordEntity>,
    index: FnvHashMap<String, KeywordId>,
    tweens: TweenSet,
    config: FieldConfig,
    time: f32,
    /// Field-wide opacity multiplier, eased toward `presence_target`.
    presence: f32,
    presence_target: f32,
}

impl KeywordField {
    /// Spawn one entity per unique word at a random point in the spawn box.
    pub fn initialize<R: Rng>(vocabulary: &[String], config: FieldConfig, rng: &mut R) -> Self {
        let ws = config.world_size;
        let mut entities = Vec::with_capacity(vocabulary.len());
        let mut index = FnvHashMap::default();
        for word in vocabulary {
            if index.contains_key(word) {
                continue;
            }
            let position = Vec3::new(
                (rng.gen::<f32>() - 0.5) * ws * SPAWN_SPREAD_XZ,
                (rng.gen::<f32>() - 0.5) * ws * SPAWN_SPREAD_Y,
                (rng.gen::<f32>() - 0.5) * ws * SPAWN_SPREAD_XZ,
            );
            let velocity = Vec3::new(
                (rng.gen::<f32>() - 0.5) * DRIFT_SPEED,
                (rng.gen::<f32>() - 0.5) * DRIFT_SPEED,
                (rng.gen::<f32>() - 0.5) * DRIFT_SPEED,
            );
            index.insert(word.clone(), KeywordId(entities.len()));
            entities.push(KeywordEntity::new(word.clone(), position, velocity));
        }
        log::debug!("[field] spawned {} keywords", entities.len());
        Self {
            entities,
            index,
            tweens: TweenSet::new(),
            config,
            time: 0.0,
            presence: 0.0,
            presence_target: 0.0,
        }
    }

    pub fn entities(&self) -> &[KeywordEntity] {
        &self.entities
    }

    pub fn entity(&self, id: KeywordId) -> Option<&KeywordEntity> {
        self.entities.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn id_of(&self, word: &str) -> Option<KeywordId> {
        self.index.get(word).copied()
    }

    pub fn word(&self, id: KeywordId) -> Option<&str> {
        self.entities.get(id.0).map(|e| e.word.as_str())
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn presence(&self) -> f32 {
        self.presence
    }

    pub fn is_animating(&self, id: KeywordId, kind: TweenKind) -> bool {
        self.tweens.is_animating(id, kind)
    }

    /// Start easing the whole field in (after the landing burst).
    pub fn fade_in(&mut self) {
        self.presence_target = 1.0;
    }

    pub fn tick(&mut self, dt: f32, camera: &CameraPose) {
        let dt = dt.max(0.0);
        self.time += dt;
        self.tweens.advance(dt, &mut self.entities);

        if self.presence < self.presence_target {
            let rate = if self.config.field_fade_in > 0.0 {
                dt / self.config.field_fade_in
            } else {
                1.0
            };
            self.presence = (self.presence + rate).min(self.presence_target);
        }

        let ws = self.config.world_size;
        let axes = [camera.right(), camera.up(), camera.forward()];
        let alpha = 1.0 - (-dt / self.config.opacity.smooth_tau_sec.max(1e-4)).exp();
        let amp = self.config.float_amplitude;
        let freq = self.config.float_frequency;

        for (i, e) in self.entities.iter_mut().enumerate() {
            e.orientation = camera.orientation;
            if !e.is_free() {
                continue;
            }

            e.position += e.velocity * dt;
            e.position.y += (self.time * freq + e.position.x).sin() * amp * dt;

            let rel = e.position - camera.position;
            let mut shift = Vec3::ZERO;
            for axis in axes {
                let d = rel.dot(axis);
                if d > ws {
                    shift -= axis * (2.0 * ws);
                } else if d < -ws {
                    shift += axis * (2.0 * ws);
                }
            }
            if shift != Vec3::ZERO {
                e.position += shift;
                self.tweens.shift_position(KeywordId(i), shift);
            }

            let f = &self.config.opacity;
            let target = if e.dimmed {
                0.0
            } else {
                let mut t = opacity_target(e.position.distance(camera.position), ws, f);
                if e.hinted {
                    t *= f.hint_gain;
                }
                if e.hovered {
                    t = t.max(f.near);
                }
                (t * self.presence).clamp(0.0, f.max)
            };
            if !self.tweens.is_animating(KeywordId(i), TweenKind::Opacity) {
                e.opacity = (e.opacity + (target - e.opacity) * alpha).clamp(0.0, f.max);
            }
        }
    }

    fn restyle(&mut self, id: KeywordId) {
        let Some(e) = self.entities.get_mut(id.0) else {
            return;
        };
        e.color = e.style_color();
        let to = e.style_scale();
        self.tweens
            .add(id, Tween::scale(to, STYLE_TWEEN_SEC, Easing::QuadOut));
    }

    pub fn set_hovered(&mut self, word: &str, hovered: bool) {
        let Some(id) = self.id_of(word) else {
            return;
        };
        let e = &mut self.entities[id.0];
        if e.selected || e.hovered == hovered {
            return;
        }
        e.hovered = hovered;
        self.restyle(id);
    }

    pub fn set_selected(&mut self, word: &str) {
        let Some(id) = self.id_of(word) else {
            return;
        };
        let e = &mut self.entities[id.0];
        if e.selected {
            return;
        }
        e.selected = true;
        e.hovered = false;
        e.hinted = false;
        self.tweens.cancel(id, TweenKind::Position);
        self.restyle(id);
        let max = self.config.opacity.max;
        self.tweens
            .add(id, Tween::opacity(max, STYLE_TWEEN_SEC, Easing::QuadOut));
    }

    pub fn set_hinted(&mut self, id: KeywordId, hinted: bool) {
        let Some(e) = self.entities.get_mut(id.0) else {
            return;
        };
        if e.hinted == hinted {
            return;
        }
        e.hinted = hinted;
        e.color = e.style_color();
    }

    pub fn clear_hints(&mut self) {
        for e in self.entities.iter_mut().filter(|e| e.hinted) {
            e.hinted = false;
            e.color = e.style_color();
        }
    }

    pub fn set_fixed(&mut self, id: KeywordId, fixed: bool) {
        if let Some(e) = self.entities.get_mut(id.0) {
            e.fixed = fixed;
        }
    }

    /// Fade out every entity not in `keep`.
    pub fn dim_all_except(&mut self, keep: &[KeywordId]) {
        for (i, e) in self.entities.iter_mut().enumerate() {
            e.dimmed = !keep.contains(&KeywordId(i));
            if e.dimmed {
                e.hovered = false;
            }
        }
    }

    /// Return every selected or pinned entity to the free field with default
    /// styling. Positions are kept.
    pub fn release_selection(&mut self) {
        for i in 0..self.entities.len() {
            let e = &mut self.entities[i];
            let was_held = e.selected || e.fixed;
            e.selected = false;
            e.fixed = false;
            e.dimmed = false;
            e.hinted = false;
            e.hovered = false;
            if was_held {
                self.tweens.cancel_entity(KeywordId(i));
                self.restyle(KeywordId(i));
            } else {
                self.entities[i].color = BASE_COLOR;
            }
        }
    }

    /// Clear all flags and tweens, restore home positions, hide everything.
    pub fn reset_all(&mut self) {
        self.tweens.clear();
        for e in self.entities.iter_mut() {
            e.reset_visuals();
            e.position = e.home;
        }
        self.presence = 0.0;
        self.presence_target = 0.0;
    }

    /// Push every other free entity onto one of three rings around the
    /// selected one, rotated about the vertical axis.
    pub fn redistribute_around<R: Rng>(&mut self, id: KeywordId, rng: &mut R) {
        let Some(center) = self.entities.get(id.0).map(|e| e.position) else {
            return;
        };
        let cfg = &self.config;
        let mut targets = Vec::with_capacity(self.entities.len());
        for (i, e) in self.entities.iter().enumerate() {
            if i == id.0 || !e.is_free() {
                continue;
            }
            let dir = (e.position - center).try_normalize().unwrap_or(Vec3::X);
            let layer = (i % REDISTRIBUTE_LAYERS) as f32 + 1.0;
            let radius = cfg.redistribute_base_radius + layer * cfg.redistribute_radius_step;
            let angle = cfg.redistribute_angle + rng.gen::<f32>() * cfg.redistribute_angle_jitter;
            let rotated = Quat::from_rotation_y(angle) * dir;
            let lift = (rng.gen::<f32>() - 0.5) * cfg.redistribute_vertical_jitter;
            targets.push((KeywordId(i), center + rotated * radius + Vec3::Y * lift));
        }
        let duration = cfg.redistribute_duration;
        log::debug!("[field] redistributing {} keywords", targets.len());
        for (i, to) in targets {
            self.tweens
                .add(i, Tween::position(to, duration, Easing::QuartOut));
        }
    }

    pub fn animate_position(&mut self, id: KeywordId, to: Vec3, duration: f32, delay: f32, easing: Easing) {
        if id.0 < self.entities.len() {
            self.tweens
                .add(id, Tween::position(to, duration, easing).with_delay(delay));
        }
    }

    pub fn animate_opacity(&mut self, id: KeywordId, to: f32, duration: f32, delay: f32) {
        if id.0 < self.entities.len() {
            self.tweens
                .add(id, Tween::opacity(to, duration, Easing::Linear).with_delay(delay));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field(words: &[&str]) -> KeywordField {
        let vocab: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        let mut rng = StdRng::seed_from_u64(7);
        KeywordField::initialize(&vocab, FieldConfig::default(), &mut rng)
    }

    #[test]
    fn spawn_is_invisible_and_inside_box() {
        let f = field(&["A", "B", "C", "A"]);
        assert_eq!(f.len(), 3);
        let ws = WORLD_SIZE;
        for e in f.entities() {
            assert_eq!(e.opacity, 0.0);
            assert!(e.position.x.abs() <= ws * SPAWN_SPREAD_XZ * 0.5);
            assert!(e.position.y.abs() <= ws * SPAWN_SPREAD_Y * 0.5);
            assert_eq!(e.position, e.home);
        }
    }

    #[test]
    fn falloff_segments() {
        let f = OpacityFalloff::default();
        assert_eq!(opacity_target(0.0, WORLD_SIZE, &f), OPACITY_NEAR);
        assert!((opacity_target(20.0, WORLD_SIZE, &f) - OPACITY_MID).abs() < 1e-5);
        assert!((opacity_target(25.0, WORLD_SIZE, &f) - OPACITY_FAR).abs() < 1e-5);
        assert_eq!(opacity_target(31.0, WORLD_SIZE, &f), 0.0);
        let a = opacity_target(12.0, WORLD_SIZE, &f);
        let b = opacity_target(18.0, WORLD_SIZE, &f);
        assert!(a > b && b > OPACITY_MID);
    }

    #[test]
    fn unknown_word_is_ignored() {
        let mut f = field(&["A"]);
        f.set_selected("ZZZ");
        f.set_hovered("ZZZ", true);
        assert!(!f.entities()[0].selected);
    }

    #[test]
    fn selected_entity_keeps_its_place() {
        let mut f = field(&["A", "B"]);
        f.set_selected("A");
        let before = f.entities()[0].position;
        let cam = CameraPose::default();
        for _ in 0..30 {
            f.tick(1.0 / 60.0, &cam);
        }
        assert_eq!(f.entities()[0].position, before);
        assert_eq!(f.entities()[0].color, SELECT_COLOR);
    }

    #[test]
    fn hover_is_ignored_on_selected() {
        let mut f = field(&["A"]);
        f.set_selected("A");
        f.set_hovered("A", true);
        assert!(!f.entities()[0].hovered);
    }

    #[test]
    fn reset_restores_home() {
        let mut f = field(&["A", "B", "C"]);
        let mut rng = StdRng::seed_from_u64(1);
        f.set_selected("A");
        f.redistribute_around(KeywordId(0), &mut rng);
        let cam = CameraPose::default();
        for _ in 0..60 {
            f.tick(1.0 / 60.0, &cam);
        }
        f.reset_all();
        for e in f.entities() {
            assert_eq!(e.position, e.home);
            assert!(!e.selected && !e.hovered && !e.hinted);
            assert_eq!(e.opacity, 0.0);
        }
    }

    #[test]
    fn redistribution_lands_on_a_ring() {
        let mut f = field(&["A", "B", "C", "D"]);
        let mut rng = StdRng::seed_from_u64(3);
        f.set_selected("A");
        f.redistribute_around(KeywordId(0), &mut rng);
        let center = f.entities()[0].position;
        // camera on the center keeps every ring inside the wrap volume
        let cam = CameraPose {
            position: center,
            ..CameraPose::default()
        };
        let mut total = 0.0;
        while total < REDISTRIBUTE_DURATION_SEC + 0.1 {
            f.tick(0.05, &cam);
            total += 0.05;
        }
        for (i, e) in f.entities().iter().enumerate().skip(1) {
            let flat = Vec3::new(e.position.x - center.x, 0.0, e.position.z - center.z);
            let r = REDISTRIBUTE_BASE_RADIUS + ((i % 3) as f32 + 1.0) * REDISTRIBUTE_RADIUS_STEP;
            assert!(flat.length() <= r + 0.5, "entity {} at {}", i, flat.length());
            assert!(flat.length() > 0.0);
        }
    }
}
