//! Shared types: object ids, rigid poses, rays, and query layer masks.

mod types;

pub use types::{EntityId, Layer, LayerMask, Ray, Transform};
