use dartroom_common::{EntityId, Transform};
use serde::Serialize;

use crate::board::ThrowResult;

/// A record appended for every controller state transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PlayerEvent {
    /// The interact action fired while the ray was on `target`.
    Interacted {
        target: EntityId,
        name: String,
        /// Whether the host had a receiver for the notification.
        received: bool,
    },
    /// Controls locked; the player is moving into `anchor`.
    GameStarted { anchor: Transform, at: f32 },
    /// Controls unlocked. `result` is `None` when no crosshair exists.
    GameEnded {
        result: Option<ThrowResult>,
        at: f32,
    },
}
