use std::collections::BTreeSet;

use glam::Vec2;

use crate::action::{Action, Bindings, Button};

/// Everything the host polled for one frame.
///
/// `movement` is the (horizontal, vertical) move axis pair in `[-1, 1]`;
/// `look` is the raw (horizontal, vertical) look delta for this frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub movement: Vec2,
    pub look: Vec2,
    pressed: BTreeSet<Button>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movement(mut self, x: f32, z: f32) -> Self {
        self.movement = Vec2::new(x, z);
        self
    }

    pub fn with_look(mut self, x: f32, y: f32) -> Self {
        self.look = Vec2::new(x, y);
        self
    }

    /// Mark `button` as pressed down on this frame.
    pub fn press(mut self, button: Button) -> Self {
        self.pressed.insert(button);
        self
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }

    pub fn pressed(&self) -> impl Iterator<Item = Button> + '_ {
        self.pressed.iter().copied()
    }

    /// Whether any button bound to `action` went down this frame.
    pub fn triggered(&self, action: Action, bindings: &Bindings) -> bool {
        bindings
            .buttons(action)
            .iter()
            .any(|b| self.pressed.contains(b))
    }

    /// Replace non-finite axis values with zero and clamp movement to `[-1, 1]`.
    pub fn sanitized(mut self) -> Self {
        let clean = |v: f32| if v.is_finite() { v } else { 0.0 };
        let raw = self.movement;
        self.movement = Vec2::new(clean(raw.x), clean(raw.y)).clamp(Vec2::NEG_ONE, Vec2::ONE);
        self.look = Vec2::new(clean(self.look.x), clean(self.look.y));
        if raw != self.movement {
            tracing::trace!(?raw, clamped = ?self.movement, "movement axes sanitized");
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_triggers_nothing() {
        let input = InputSnapshot::new();
        let bindings = Bindings::default();
        assert!(!input.triggered(Action::Interact, &bindings));
        assert!(!input.triggered(Action::Confirm, &bindings));
        assert_eq!(input.movement, Vec2::ZERO);
    }

    #[test]
    fn either_interact_button_triggers() {
        let bindings = Bindings::default();
        let click = InputSnapshot::new().press(Button::MousePrimary);
        let key = InputSnapshot::new().press(Button::KeyE);
        assert!(click.triggered(Action::Interact, &bindings));
        assert!(key.triggered(Action::Interact, &bindings));
        assert!(!key.triggered(Action::Confirm, &bindings));
    }

    #[test]
    fn rebinding_changes_trigger() {
        let bindings = Bindings {
            interact: vec![Button::KeyF],
            confirm: vec![Button::Enter],
        };
        let input = InputSnapshot::new().press(Button::Space);
        assert!(!input.triggered(Action::Confirm, &bindings));
        let input = input.press(Button::Enter);
        assert!(input.triggered(Action::Confirm, &bindings));
    }

    #[test]
    fn sanitize_clamps_and_zeroes() {
        let input = InputSnapshot::new()
            .with_movement(3.0, f32::NAN)
            .with_look(f32::INFINITY, 12.0)
            .sanitized();
        assert_eq!(input.movement, Vec2::new(1.0, 0.0));
        assert_eq!(input.look, Vec2::new(0.0, 12.0));
    }
}
