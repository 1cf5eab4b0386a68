use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an object in the host world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, for log lines.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Rigid pose: position and rotation.
///
/// Axis convention is right-handed: local forward is -Z, right is +X, up is +Y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose whose yaw is `degrees` about world up. Positive turns left.
    pub fn with_yaw_degrees(position: Vec3, degrees: f32) -> Self {
        Self::new(position, Quat::from_rotation_y(degrees.to_radians()))
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Map a point from local space into this pose's parent space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// Compose `self` (parent) with a child pose expressed in local space.
    pub fn mul_transform(&self, child: &Transform) -> Transform {
        Transform {
            position: self.transform_point(child.position),
            rotation: (self.rotation * child.rotation).normalize(),
        }
    }

    /// Component-wise interpolation: linear on position, normalized lerp on rotation.
    pub fn lerp(&self, other: &Transform, t: f32) -> Transform {
        Transform {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation.lerp(other.rotation, t),
        }
    }
}

/// A ray with a unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`. A zero direction yields `None`.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Collision/query layer index in `0..32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Layer(pub u8);

impl Layer {
    pub const DEFAULT: Layer = Layer(0);
    pub const INTERACTABLE: Layer = Layer(6);
}

/// Bit set of layers a query accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    pub fn of(layer: Layer) -> Self {
        Self::NONE.with(layer)
    }

    pub fn with(self, layer: Layer) -> Self {
        if layer.0 >= 32 {
            return self;
        }
        Self(self.0 | (1 << layer.0))
    }

    pub fn contains(&self, layer: Layer) -> bool {
        layer.0 < 32 && self.0 & (1 << layer.0) != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::of(Layer::INTERACTABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_uniqueness() {
        let a = EntityId::new();
        let b = EntityId::new();
        assert_ne!(a, b);
        assert_eq!(a.short().len(), 8);
    }

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.forward(), Vec3::NEG_Z);
        assert_eq!(t.right(), Vec3::X);
    }

    #[test]
    fn yaw_turns_forward_about_up() {
        let t = Transform::with_yaw_degrees(Vec3::ZERO, 90.0);
        assert!(t.forward().abs_diff_eq(Vec3::NEG_X, 1e-6));
        assert!(t.up().abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn child_pose_composes_with_parent() {
        let parent = Transform::with_yaw_degrees(Vec3::new(10.0, 0.0, 0.0), 90.0);
        let child = Transform::from_position(Vec3::new(0.0, 0.0, -2.0));
        let world = parent.mul_transform(&child);
        assert!(world.position.abs_diff_eq(Vec3::new(8.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn lerp_endpoints_are_exact() {
        let a = Transform::default();
        let b = Transform::with_yaw_degrees(Vec3::new(4.0, 2.0, 0.0), 45.0);
        assert_eq!(a.lerp(&b, 0.0).position, a.position);
        assert_eq!(a.lerp(&b, 1.0).position, b.position);
        assert!(a.lerp(&b, 0.5).position.abs_diff_eq(Vec3::new(2.0, 1.0, 0.0), 1e-6));
    }

    #[test]
    fn ray_rejects_zero_direction() {
        assert!(Ray::new(Vec3::ZERO, Vec3::ZERO).is_none());
        let r = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0)).unwrap();
        assert_eq!(r.at(2.0), Vec3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn layer_mask_membership() {
        let mask = LayerMask::of(Layer::INTERACTABLE);
        assert!(mask.contains(Layer::INTERACTABLE));
        assert!(!mask.contains(Layer::DEFAULT));
        assert!(LayerMask::ALL.contains(Layer(31)));
        assert!(!LayerMask::NONE.contains(Layer::DEFAULT));
        assert_eq!(mask.with(Layer(40)), mask);
    }
}
