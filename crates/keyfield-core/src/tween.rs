//! Timed value transitions on keyword entities, addressed by [`KeywordId`].
//!
//! A tween captures its start value when its delay elapses, so staggered
//! animations begin from wherever the entity is at that moment. Adding a tween
//! replaces any running tween of the same kind on the same entity.

use crate::easing::Easing;
use crate::field::{KeywordEntity, KeywordId};
use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenKind {
    Position,
    Opacity,
    Scale,
}

#[derive(Debug, Clone, Copy)]
enum Channel {
    Position { from: Option<Vec3>, to: Vec3 },
    Opacity { from: Option<f32>, to: f32 },
    Scale { from: Option<f32>, to: f32 },
}

#[derive(Debug, Clone)]
pub struct Tween {
    channel: Channel,
    duration: f32,
    delay: f32,
    elapsed: f32,
    easing: Easing,
}

impl Tween {
    fn new(channel: Channel, duration: f32, easing: Easing) -> Self {
        Self {
            channel,
            duration,
            delay: 0.0,
            elapsed: 0.0,
            easing,
        }
    }

    pub fn position(to: Vec3, duration: f32, easing: Easing) -> Self {
        Self::new(Channel::Position { from: None, to }, duration, easing)
    }

    pub fn opacity(to: f32, duration: f32, easing: Easing) -> Self {
        Self::new(Channel::Opacity { from: None, to }, duration, easing)
    }

    pub fn scale(to: f32, duration: f32, easing: Easing) -> Self {
        Self::new(Channel::Scale { from: None, to }, duration, easing)
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn kind(&self) -> TweenKind {
        match self.channel {
            Channel::Position { .. } => TweenKind::Position,
            Channel::Opacity { .. } => TweenKind::Opacity,
            Channel::Scale { .. } => TweenKind::Scale,
        }
    }

    /// Normalized progress [0, 1], 0 while still delayed. Zero-length tweens
    /// jump straight to 1.
    pub fn progress(&self) -> f32 {
        let active = self.elapsed - self.delay;
        if active < 0.0 {
            0.0
        } else if self.duration <= 0.0 {
            1.0
        } else {
            (active / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.delay + self.duration
    }

    fn apply(&mut self, e: &mut KeywordEntity) {
        if self.elapsed < self.delay {
            return;
        }
        let t = self.easing.apply(self.progress());
        match &mut self.channel {
            Channel::Position { from, to } => {
                let start = *from.get_or_insert(e.position);
                e.position = start.lerp(*to, t);
            }
            Channel::Opacity { from, to } => {
                let start = *from.get_or_insert(e.opacity);
                e.opacity = start + (*to - start) * t;
            }
            Channel::Scale { from, to } => {
                let start = *from.get_or_insert(e.scale);
                e.scale = start + (*to - start) * t;
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct TweenSet {
    tweens: Vec<(KeywordId, Tween)>,
}

impl TweenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: KeywordId, tween: Tween) {
        let kind = tween.kind();
        self.tweens.retain(|(i, t)| !(*i == id && t.kind() == kind));
        self.tweens.push((id, tween));
    }

    pub fn cancel(&mut self, id: KeywordId, kind: TweenKind) {
        self.tweens.retain(|(i, t)| !(*i == id && t.kind() == kind));
    }

    pub fn cancel_entity(&mut self, id: KeywordId) {
        self.tweens.retain(|(i, _)| *i != id);
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }

    pub fn is_animating(&self, id: KeywordId, kind: TweenKind) -> bool {
        self.tweens.iter().any(|(i, t)| *i == id && t.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Move a running position tween along with its entity after a wrap.
    pub fn shift_position(&mut self, id: KeywordId, offset: Vec3) {
        for (i, t) in self.tweens.iter_mut() {
            if *i != id {
                continue;
            }
            if let Channel::Position { from, to } = &mut t.channel {
                if let Some(f) = from.as_mut() {
                    *f += offset;
                }
                *to += offset;
            }
        }
    }

    /// Advance all tweens by `dt`, write their values into `entities` and drop
    /// the completed ones. Returns how many completed this step.
    pub fn advance(&mut self, dt: f32, entities: &mut [KeywordEntity]) -> usize {
        for (id, tween) in self.tweens.iter_mut() {
            tween.elapsed += dt.max(0.0);
            if let Some(e) = entities.get_mut(id.0) {
                tween.apply(e);
            }
        }
        let before = self.tweens.len();
        self.tweens.retain(|(_, t)| !t.is_complete());
        before - self.tweens.len()
    }
}
