use dartroom_common::Transform;

use crate::config::TransitionStyle;

/// Timed move from a recorded start pose into a target pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionState {
    start: Transform,
    target: Transform,
    started_at: f32,
    duration: f32,
}

impl TransitionState {
    pub fn new(start: Transform, target: Transform, started_at: f32, duration: f32) -> Self {
        Self {
            start,
            target,
            started_at,
            duration,
        }
    }

    pub fn target(&self) -> Transform {
        self.target
    }

    pub fn started_at(&self) -> f32 {
        self.started_at
    }

    /// `(now - started_at) / duration`, clamped to `[0, 1]`.
    pub fn progress(&self, now: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self, now: f32) -> bool {
        self.progress(now) >= 1.0
    }

    /// Pose for this frame. At progress 1 the target is returned exactly.
    pub fn step(&self, current: &Transform, now: f32, style: TransitionStyle) -> Transform {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.target;
        }
        match style {
            TransitionStyle::FixedEndpoint => self.start.lerp(&self.target, t),
            TransitionStyle::Decaying => current.lerp(&self.target, t),
        }
    }
}
