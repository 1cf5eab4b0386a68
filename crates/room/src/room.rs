use std::collections::BTreeMap;

use dartroom_common::{EntityId, Layer, LayerMask, Ray, Transform};
use dartroom_player::{CursorMode, DartBoard, Host, MotorStep, RayHit};
use glam::Vec3;

/// Errors from room editing operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    #[error("object {0:?} not found")]
    NotFound(EntityId),
    #[error("object {name:?} has invalid half extents {extents:?}")]
    InvalidExtents { name: String, extents: Vec3 },
}

/// An axis-aligned box in the room.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomObject {
    pub name: String,
    pub center: Vec3,
    pub half_extents: Vec3,
    pub layer: Layer,
    /// Blocks the player capsule.
    pub solid: bool,
    /// Child pose in the object's local space. The player is moved here when
    /// this object starts a game.
    pub anchor: Option<Transform>,
    /// Whether the object listens for interaction notifications.
    pub receiver: bool,
    interactions: u32,
}

impl RoomObject {
    pub fn new(name: impl Into<String>, center: Vec3, half_extents: Vec3) -> Self {
        Self {
            name: name.into(),
            center,
            half_extents,
            layer: Layer::DEFAULT,
            solid: true,
            anchor: None,
            receiver: false,
            interactions: 0,
        }
    }

    pub fn on_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_anchor(mut self, local: Transform) -> Self {
        self.anchor = Some(local);
        self
    }

    pub fn with_receiver(mut self) -> Self {
        self.receiver = true;
        self
    }

    pub fn non_solid(mut self) -> Self {
        self.solid = false;
        self
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    pub fn interactions(&self) -> u32 {
        self.interactions
    }

    /// Anchor in world space. Boxes are unrotated, so this is a translation.
    pub fn anchor_world(&self) -> Option<Transform> {
        self.anchor
            .map(|local| Transform::from_position(self.center).mul_transform(&local))
    }
}

/// Player capsule dimensions and floor height used by the motor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyShape {
    pub radius: f32,
    pub height: f32,
    pub floor_height: f32,
}

impl Default for BodyShape {
    fn default() -> Self {
        Self {
            radius: 0.4,
            height: 1.8,
            floor_height: 0.0,
        }
    }
}

/// A flat-floored room of box objects, usable as a `Host`.
///
/// Objects live in a BTreeMap so raycast ties resolve the same way on every run.
#[derive(Debug, Clone, Default)]
pub struct Room {
    objects: BTreeMap<EntityId, RoomObject>,
    body: BodyShape,
    cursor: Option<CursorMode>,
}

impl Room {
    pub fn new(body: BodyShape) -> Self {
        Self {
            body,
            ..Self::default()
        }
    }

    /// The demo range: a dartboard 12 units down -Z with a throwing spot
    /// 3 units in front of it, a back wall, and two side walls.
    ///
    /// Returns the room and the board geometry the mini-game scores against.
    pub fn dart_range() -> (Self, DartBoard) {
        let mut room = Self::new(BodyShape::default());
        let board_center = Vec3::new(0.0, 1.6, -12.0);

        let board = RoomObject::new("dartboard", board_center, Vec3::new(0.6, 0.6, 0.05))
            .on_layer(Layer::INTERACTABLE)
            .with_anchor(Transform::from_position(Vec3::new(0.0, -1.6, 3.0)))
            .with_receiver();
        let walls = [
            RoomObject::new("back_wall", Vec3::new(0.0, 2.0, -13.0), Vec3::new(6.0, 2.0, 0.2)),
            RoomObject::new("left_wall", Vec3::new(-6.0, 2.0, -6.0), Vec3::new(0.2, 2.0, 7.0)),
            RoomObject::new("right_wall", Vec3::new(6.0, 2.0, -6.0), Vec3::new(0.2, 2.0, 7.0)),
        ];

        // extents are literals above, insertion cannot fail
        for object in std::iter::once(board).chain(walls) {
            let _ = room.insert(object);
        }

        let geometry = DartBoard {
            origin: board_center,
            bullseye: board_center + Vec3::new(0.0, 0.0, 1.0),
            bullseye_radius: 0.35,
        };
        (room, geometry)
    }

    pub fn insert(&mut self, object: RoomObject) -> Result<EntityId, RoomError> {
        let e = object.half_extents;
        if !e.is_finite() || e.min_element() < 0.0 {
            return Err(RoomError::InvalidExtents {
                name: object.name,
                extents: e,
            });
        }
        let id = EntityId::new();
        tracing::debug!(id = %id.short(), name = %object.name, "room object added");
        self.objects.insert(id, object);
        Ok(id)
    }

    pub fn remove(&mut self, id: EntityId) -> Result<RoomObject, RoomError> {
        self.objects.remove(&id).ok_or(RoomError::NotFound(id))
    }

    pub fn get(&self, id: EntityId) -> Option<&RoomObject> {
        self.objects.get(&id)
    }

    pub fn find(&self, name: &str) -> Option<(EntityId, &RoomObject)> {
        self.objects
            .iter()
            .find(|(_, o)| o.name == name)
            .map(|(id, o)| (*id, o))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Last cursor mode requested by the controller.
    pub fn cursor(&self) -> Option<CursorMode> {
        self.cursor
    }

    /// Whether an axis-aligned move from `from` to `to` sweeps the capsule
    /// through any solid box.
    fn blocked(&self, from: Vec3, to: Vec3) -> bool {
        let r = self.body.radius;
        let (lo, hi) = (from.min(to), from.max(to));
        let feet = lo.y;
        let head = hi.y + self.body.height;
        self.objects.values().filter(|o| o.solid).any(|o| {
            let (min, max) = (o.min(), o.max());
            hi.x > min.x - r
                && lo.x < max.x + r
                && hi.z > min.z - r
                && lo.z < max.z + r
                && head > min.y
                && feet < max.y
        })
    }
}

impl Host for Room {
    /// Horizontal motion is resolved per axis against solid boxes; vertical
    /// motion only collides with the floor.
    fn move_character(&mut self, from: Vec3, delta: Vec3) -> MotorStep {
        let mut pos = from;

        let along_x = Vec3::new(from.x + delta.x, from.y, from.z);
        if delta.x != 0.0 && !self.blocked(pos, along_x) {
            pos = along_x;
        }
        let along_z = Vec3::new(pos.x, from.y, from.z + delta.z);
        if delta.z != 0.0 && !self.blocked(pos, along_z) {
            pos = along_z;
        }
        if (delta.x != 0.0 && pos.x == from.x) || (delta.z != 0.0 && pos.z == from.z) {
            tracing::trace!(?from, ?delta, "horizontal move blocked");
        }

        pos.y = from.y + delta.y;
        let grounded = pos.y <= self.body.floor_height;
        if grounded {
            pos.y = self.body.floor_height;
        }
        MotorStep {
            position: pos,
            grounded,
        }
    }

    fn raycast(&self, ray: &Ray, max_distance: f32, mask: LayerMask) -> Option<RayHit> {
        self.objects
            .iter()
            .filter(|(_, o)| mask.contains(o.layer))
            .filter_map(|(id, o)| {
                let t = ray_box(ray, o.min(), o.max())?;
                (t <= max_distance).then_some((*id, o, t))
            })
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(id, o, t)| RayHit {
                target: id,
                name: o.name.clone(),
                point: ray.at(t),
                distance: t,
                anchor: o.anchor_world(),
            })
    }

    fn notify_interact(&mut self, target: EntityId) -> bool {
        match self.objects.get_mut(&target) {
            Some(o) if o.receiver => {
                o.interactions += 1;
                tracing::debug!(name = %o.name, count = o.interactions, "interaction received");
                true
            }
            _ => false,
        }
    }

    fn set_cursor(&mut self, mode: CursorMode) {
        tracing::debug!(?mode, "cursor mode set");
        self.cursor = Some(mode);
    }
}

/// Slab test. Returns the entry distance, or 0 when the origin is inside.
fn ray_box(ray: &Ray, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_enter = 0.0_f32;
    let mut t_exit = f32::INFINITY;
    for axis in 0..3 {
        let o = ray.origin[axis];
        let d = ray.direction[axis];
        if d.abs() < f32::EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let (mut t0, mut t1) = ((min[axis] - o) * inv, (max[axis] - o) * inv);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_enter = t_enter.max(t0);
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }
    Some(t_enter)
}
