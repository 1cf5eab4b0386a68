use serde::{Deserialize, Serialize};

/// A discrete physical control the host can report as pressed this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    MousePrimary,
    MouseSecondary,
    KeyE,
    KeyF,
    Space,
    Enter,
    Escape,
}

/// A high-level action the player controller consumes.
///
/// The controller never looks at raw buttons; `Bindings` decides which
/// buttons produce which action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Use whatever the interaction ray is pointing at.
    Interact,
    /// Lock in the mini-game (throw the dart).
    Confirm,
}

/// Button-to-action table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bindings {
    pub interact: Vec<Button>,
    pub confirm: Vec<Button>,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            interact: vec![Button::MousePrimary, Button::KeyE],
            confirm: vec![Button::Space],
        }
    }
}

impl Bindings {
    /// Buttons bound to `action`.
    pub fn buttons(&self, action: Action) -> &[Button] {
        match action {
            Action::Interact => &self.interact,
            Action::Confirm => &self.confirm,
        }
    }
}
