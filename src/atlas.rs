/// Pixel rectangle of one label inside the atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtlasRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Shelf packing of fixed-height label cells. Labels keep the order they
/// were given, so entity `i` uses rect `i`.
#[derive(Clone, Debug, Default)]
pub struct AtlasLayout {
    pub width: u32,
    pub height: u32,
    rects: Vec<AtlasRect>,
}

impl AtlasLayout {
    pub fn pack(widths: &[u32], row_height: u32, max_width: u32, gutter: u32) -> Self {
        let mut rects = Vec::with_capacity(widths.len());
        let (mut x, mut y, mut used_w) = (0u32, 0u32, 0u32);
        for &w in widths {
            let w = w.clamp(1, max_width);
            if x > 0 && x + w > max_width {
                x = 0;
                y += row_height + gutter;
            }
            rects.push(AtlasRect { x, y, w, h: row_height });
            x += w + gutter;
            used_w = used_w.max(x.saturating_sub(gutter));
        }
        let height = if rects.is_empty() { 1 } else { y + row_height };
        Self {
            width: used_w.max(1),
            height,
            rects,
        }
    }

    pub fn rect(&self, i: usize) -> Option<AtlasRect> {
        self.rects.get(i).copied()
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Normalized `[u0, v0, u1, v1]`, v down.
    pub fn uv_rect(&self, i: usize) -> [f32; 4] {
        match self.rects.get(i) {
            Some(r) => {
                let w = self.width as f32;
                let h = self.height as f32;
                [
                    r.x as f32 / w,
                    r.y as f32 / h,
                    (r.x + r.w) as f32 / w,
                    (r.y + r.h) as f32 / h,
                ]
            }
            None => [0.0; 4],
        }
    }
}
