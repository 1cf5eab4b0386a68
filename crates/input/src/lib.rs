//! Input: per-frame snapshots of axes and pressed buttons, mapped to player actions.
//!
//! # Invariants
//! - The controller consumes `Action`s through `Bindings`, never raw buttons.
//! - A snapshot describes exactly one frame; "pressed" means went down this frame.

pub mod action;
pub mod snapshot;

pub use action::{Action, Bindings, Button};
pub use snapshot::InputSnapshot;

pub fn crate_info() -> &'static str {
    "dartroom-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
