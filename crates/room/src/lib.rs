//! Headless host for the player controller: a flat room of box colliders
//! with slab raycasts, plus a scripted session over the dart range.
//!
//! # Workaround
//! Stands in for a physics engine. The motor only resolves horizontal motion
//! against boxes and vertical motion against the floor plane.

mod room;
mod session;

pub use room::{BodyShape, Room, RoomError, RoomObject};
pub use session::{AimPolicy, SessionError, SessionReport, SessionSettings, run_dart_session};

pub fn crate_info() -> &'static str {
    "dartroom-room v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("room"));
    }
}
