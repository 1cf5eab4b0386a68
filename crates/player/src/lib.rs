//! Player controller: locomotion, mouse-look, raycast interaction, and the
//! dart mini-game state machine.
//!
//! # Invariants
//! - Controls are locked iff a dart game is in progress; movement and look
//!   only apply while unlocked.
//! - The crosshair is visible iff controls are locked and a crosshair exists.
//! - Transition progress is clamped to `[0, 1]`; at 1 the body pose equals
//!   the anchor pose exactly.
//! - All engine services go through the `Host` trait. Frame updates never fail;
//!   missing hits, anchors or crosshairs degrade to no-ops.

pub mod board;
pub mod config;
pub mod controller;
pub mod events;
pub mod host;
pub mod inspector;
pub mod transition;

pub use board::{Crosshair, DartBoard, Scorecard, ThrowOutcome, ThrowResult};
pub use config::{ConfigError, PlayerConfig, TransitionStyle};
pub use controller::{FrameReport, Mode, PlayerController};
pub use events::PlayerEvent;
pub use host::{CursorMode, Host, MotorStep, RayHit};
pub use inspector::PlayerSummary;
pub use transition::TransitionState;

pub fn crate_info() -> &'static str {
    "dartroom-player v0.1.0"
}
