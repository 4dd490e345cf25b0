//! Per-frame packing of the core's read-only frame into GPU instance and
//! vertex data. Visibility rules are applied here so the renderer only
//! uploads what should be drawn.

use super::atlas::AtlasLayout;
use super::constants::SELECTED_GLOW;
use keyfield_core::Frame;

// Labels below this opacity are not worth a draw
const MIN_VISIBLE_OPACITY: f32 = 0.003;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WordInstance {
    pub center: [f32; 3],
    pub glow: f32,
    pub extent: [f32; 2],
    pub opacity: f32,
    pub _pad: f32,
    pub uv_rect: [f32; 4],
    pub color: [f32; 4],
}

/// Hint-line endpoint or burst particle centre.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
    pub alpha: f32,
}

/// Visible labels sorted far to near for alpha blending.
pub fn pack_words(frame: &Frame, atlas: &AtlasLayout, out: &mut Vec<WordInstance>) {
    out.clear();
    if !frame.visibility.keywords {
        return;
    }
    let eye = frame.camera.position;
    let forward = frame.camera.forward();
    let mut keyed: Vec<(f32, WordInstance)> = frame
        .entities
        .iter()
        .enumerate()
        .filter(|(_, e)| e.opacity > MIN_VISIBLE_OPACITY)
        .filter_map(|(i, e)| {
            let depth = (e.position - eye).dot(forward);
            if depth <= frame.camera.znear {
                return None;
            }
            let (hw, hh) = e.half_extents();
            Some((
                depth,
                WordInstance {
                    center: e.position.to_array(),
                    glow: if e.selected { SELECTED_GLOW } else { 0.0 },
                    extent: [hw, hh],
                    opacity: e.opacity.clamp(0.0, 1.0),
                    _pad: 0.0,
                    uv_rect: atlas.uv_rect(i),
                    color: [e.color[0], e.color[1], e.color[2], 1.0],
                },
            ))
        })
        .collect();
    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    out.extend(keyed.into_iter().map(|(_, w)| w));
}

/// Line-list vertices, two per hint line.
pub fn pack_hint_lines(frame: &Frame, out: &mut Vec<PointVertex>) {
    out.clear();
    if !frame.visibility.keywords || frame.hint_opacity <= 0.0 {
        return;
    }
    for line in frame.hint_lines {
        for p in [line.start, line.end] {
            out.push(PointVertex {
                position: p.to_array(),
                alpha: frame.hint_opacity,
            });
        }
    }
}

pub fn pack_particles(frame: &Frame, out: &mut Vec<PointVertex>) {
    out.clear();
    if !frame.visibility.particles || !frame.burst.is_active() {
        return;
    }
    let alpha = frame.burst.opacity().clamp(0.0, 1.0);
    out.extend(frame.burst.particles().iter().map(|p| PointVertex {
        position: p.position.to_array(),
        alpha,
    }));
}
