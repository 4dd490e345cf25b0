//! Pointer ray casting against keyword billboards, and single-hover tracking.

use crate::camera::CameraPose;
use crate::field::{KeywordField, KeywordId};
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn from_ndc(camera: &CameraPose, ndc: Vec2, aspect: f32) -> Self {
        let (origin, dir) = camera.ray_from_ndc(ndc, aspect);
        Self { origin, dir }
    }
}

/// Intersect a ray with a camera-facing rectangle centered at `center`.
///
/// `right`/`up` span the billboard plane; returns the ray parameter of the hit.
#[inline]
pub fn ray_billboard(ray: &Ray, center: Vec3, right: Vec3, up: Vec3, half_w: f32, half_h: f32) -> Option<f32> {
    let normal = right.cross(up);
    let denom = ray.dir.dot(normal);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = (center - ray.origin).dot(normal) / denom;
    if t < 0.0 {
        return None;
    }
    let local = ray.origin + ray.dir * t - center;
    (local.dot(right).abs() <= half_w && local.dot(up).abs() <= half_h).then_some(t)
}

/// Nearest candidate hit by the ray, by distance along the ray.
pub fn hit_test(
    ray: &Ray,
    camera: &CameraPose,
    field: &KeywordField,
    candidates: impl IntoIterator<Item = KeywordId>,
) -> Option<KeywordId> {
    let right = camera.right();
    let up = camera.up();
    let mut best = None::<(KeywordId, f32)>;
    for id in candidates {
        let Some(e) = field.entity(id) else {
            continue;
        };
        let (hw, hh) = e.half_extents();
        if let Some(t) = ray_billboard(ray, e.position, right, up, hw, hh) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((id, t)),
            }
        }
    }
    best.map(|(id, _)| id)
}

/// Entities a pointer may currently interact with: visible and not dimmed.
pub fn pickable(field: &KeywordField) -> impl Iterator<Item = KeywordId> + '_ {
    field
        .entities()
        .iter()
        .enumerate()
        .filter(|(_, e)| !e.dimmed && e.opacity > 0.01)
        .map(|(i, _)| KeywordId(i))
}

/// Tracks the single hovered entity and keeps the field's hover flags in sync.
#[derive(Clone, Debug, Default)]
pub struct HoverTracker {
    current: Option<KeywordId>,
}

impl HoverTracker {
    pub fn current(&self) -> Option<KeywordId> {
        self.current
    }

    /// Move hover to `hit`. Selected entities never take hover. Returns true
    /// when the hovered entity changed.
    pub fn update(&mut self, hit: Option<KeywordId>, field: &mut KeywordField) -> bool {
        let hit = hit.filter(|id| field.entity(*id).is_some_and(|e| !e.selected));
        if hit == self.current {
            return false;
        }
        if let Some(word) = self.current.and_then(|id| field.word(id)).map(str::to_owned) {
            field.set_hovered(&word, false);
        }
        if let Some(word) = hit.and_then(|id| field.word(id)).map(str::to_owned) {
            field.set_hovered(&word, true);
        }
        self.current = hit;
        true
    }

    pub fn clear(&mut self, field: &mut KeywordField) {
        self.update(None, field);
    }

    /// Forget the hover without touching the field (after a full reset).
    pub fn forget(&mut self) {
        self.current = None;
    }
}
