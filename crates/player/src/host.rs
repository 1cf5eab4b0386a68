use dartroom_common::{EntityId, LayerMask, Ray, Transform};
use glam::Vec3;

/// Result of one collision-resolved character move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorStep {
    pub position: Vec3,
    /// Whether the character is standing on something after the move.
    pub grounded: bool,
}

/// Nearest object hit by an interaction ray.
#[derive(Debug, Clone, PartialEq)]
pub struct RayHit {
    pub target: EntityId,
    pub name: String,
    pub point: Vec3,
    pub distance: f32,
    /// World pose the player is moved into when this object starts a game.
    pub anchor: Option<Transform>,
}

/// Cursor state requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    Free,
    /// Hidden and confined to the window.
    Locked,
}

/// Engine services the player controller depends on.
///
/// Physics, raycasting, cursor control and object messaging all live on the
/// host side; the controller only owns its own state.
pub trait Host {
    /// Move a character from `from` by `delta`, resolving collisions.
    fn move_character(&mut self, from: Vec3, delta: Vec3) -> MotorStep;

    /// Nearest hit along `ray` within `max_distance` on a layer in `mask`.
    fn raycast(&self, ray: &Ray, max_distance: f32, mask: LayerMask) -> Option<RayHit>;

    /// Tell `target` it was interacted with. Returns false when nothing listens.
    fn notify_interact(&mut self, _target: EntityId) -> bool {
        false
    }

    fn set_cursor(&mut self, _mode: CursorMode) {}
}
