use dartroom_common::{Ray, Transform};
use dartroom_input::{Action, InputSnapshot};
use glam::{Quat, Vec3};

use crate::board::{Crosshair, DartBoard, Scorecard, ThrowResult};
use crate::config::{ConfigError, PlayerConfig};
use crate::events::PlayerEvent;
use crate::host::{CursorMode, Host, RayHit};
use crate::transition::TransitionState;

/// Controller mode. `Locked` covers both the move into the anchor pose and
/// the aiming phase that follows; `transition_progress()` tells them apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    FreeRoam,
    Locked(TransitionState),
}

/// What changed during one `update` call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    pub game_started: bool,
    pub game_ended: bool,
    /// Set when a game ended with a crosshair to score.
    pub result: Option<ThrowResult>,
}

/// First-person player: body pose, camera pitch, locomotion, interaction,
/// and the dart mini-game state machine.
///
/// The host owns physics, raycasts and rendering. The controller owns its
/// clock, which advances by the `dt` passed to `update`.
#[derive(Debug, Clone)]
pub struct PlayerController {
    config: PlayerConfig,
    board: DartBoard,
    body: Transform,
    /// Camera rotation about its local side axis, radians. Positive looks up.
    camera_pitch: f32,
    vertical_velocity: f32,
    grounded: bool,
    clock: f32,
    mode: Mode,
    crosshair: Option<Crosshair>,
    focus: Option<RayHit>,
    scorecard: Scorecard,
    event_log: Vec<PlayerEvent>,
}

impl PlayerController {
    /// Validate the config, lock the cursor, and create the crosshair.
    pub fn spawn<H: Host>(
        config: PlayerConfig,
        board: DartBoard,
        spawn: Transform,
        host: &mut H,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        board.validate()?;

        host.set_cursor(CursorMode::Locked);
        let crosshair = config.spawn_crosshair.then(Crosshair::new);

        tracing::info!(
            position = ?spawn.position,
            crosshair = crosshair.is_some(),
            "player spawned"
        );

        Ok(Self {
            config,
            board,
            body: spawn,
            camera_pitch: 0.0,
            vertical_velocity: 0.0,
            grounded: false,
            clock: 0.0,
            mode: Mode::FreeRoam,
            crosshair,
            focus: None,
            scorecard: Scorecard::default(),
            event_log: Vec::new(),
        })
    }

    /// Advance one frame.
    ///
    /// Free roam: move, look, then cast the interaction ray. Locked: cast the
    /// ray, move toward the anchor, circle the crosshair, and end the game on
    /// `Confirm`. A game that starts this frame is animated from the next one.
    pub fn update<H: Host>(
        &mut self,
        host: &mut H,
        dt: f32,
        input: &InputSnapshot,
    ) -> FrameReport {
        let _span = tracing::info_span!("player_update").entered();
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        self.clock += dt;
        let input = input.clone().sanitized();
        let mut report = FrameReport::default();

        let locked = self.controls_locked();
        if !locked {
            self.handle_movement(host, &input, dt);
            self.handle_mouse_look(&input);
        }

        report.game_started = self.handle_interaction(host, &input, locked);

        if locked {
            self.smooth_move_to_target();
            self.move_crosshair();
            if input.triggered(Action::Confirm, &self.config.bindings) {
                report.result = self.end_dart_game();
                report.game_ended = true;
            }
        }

        tracing::trace!(
            clock = self.clock,
            position = ?self.body.position,
            locked = self.controls_locked(),
            "frame complete"
        );
        report
    }

    fn handle_movement<H: Host>(&mut self, host: &mut H, input: &InputSnapshot, dt: f32) {
        let wish = self.body.right() * input.movement.x + self.body.forward() * input.movement.y;
        let step = host.move_character(self.body.position, wish * self.config.move_speed * dt);
        self.body.position = step.position;

        self.vertical_velocity += self.config.gravity * dt;
        let step = host.move_character(self.body.position, Vec3::Y * self.vertical_velocity * dt);
        self.body.position = step.position;
        self.grounded = step.grounded;

        if self.grounded && self.vertical_velocity < 0.0 {
            self.vertical_velocity = self.config.grounded_stick_velocity;
        }
    }

    fn handle_mouse_look(&mut self, input: &InputSnapshot) {
        let yaw = -input.look.x * self.config.look_speed;
        let pitch = input.look.y * self.config.look_speed;

        if yaw != 0.0 {
            let turn = Quat::from_rotation_y(yaw.to_radians());
            self.body.rotation = (turn * self.body.rotation).normalize();
        }
        self.camera_pitch += pitch.to_radians();
        if let Some(limit) = self.config.pitch_limit_degrees {
            let limit = limit.to_radians();
            self.camera_pitch = self.camera_pitch.clamp(-limit, limit);
        }
    }

    /// Cast the interaction ray and start a game when the interact action
    /// fires on a hit. Returns whether a game started.
    fn handle_interaction<H: Host>(
        &mut self,
        host: &mut H,
        input: &InputSnapshot,
        locked: bool,
    ) -> bool {
        let camera = self.camera_transform();
        self.focus = Ray::new(camera.position, camera.forward()).and_then(|ray| {
            host.raycast(
                &ray,
                self.config.interact_range,
                self.config.interactable_layers,
            )
        });

        let Some(hit) = self.focus.clone() else {
            return false;
        };
        if locked || !input.triggered(Action::Interact, &self.config.bindings) {
            return false;
        }

        tracing::info!(entity = %hit.target.short(), "interacted with {}", hit.name);
        let received = host.notify_interact(hit.target);
        if !received {
            tracing::debug!(name = %hit.name, "interaction had no receiver");
        }
        self.event_log.push(PlayerEvent::Interacted {
            target: hit.target,
            name: hit.name.clone(),
            received,
        });

        match hit.anchor {
            Some(anchor) => {
                self.start_dart_game(anchor);
                true
            }
            None => {
                tracing::warn!(name = %hit.name, "interactable has no anchor, game not started");
                false
            }
        }
    }

    /// Lock controls and begin moving into `anchor`. Calling this while a
    /// game is running restarts the transition toward the new anchor.
    pub fn start_dart_game(&mut self, anchor: Transform) {
        let transition = TransitionState::new(
            self.body,
            anchor,
            self.clock,
            self.config.smooth_move_duration,
        );
        self.mode = Mode::Locked(transition);

        let camera = self.camera_transform();
        if let Some(crosshair) = self.crosshair.as_mut() {
            let distance = self.config.crosshair_spawn_distance;
            crosshair.activate_at(camera.position + camera.forward() * distance);
        }

        self.event_log.push(PlayerEvent::GameStarted {
            anchor,
            at: self.clock,
        });
        tracing::info!(anchor = ?anchor.position, "dart game started, player controls locked");
    }

    fn smooth_move_to_target(&mut self) {
        let Mode::Locked(transition) = self.mode else {
            return;
        };
        self.body = transition.step(&self.body, self.clock, self.config.transition_style);
    }

    fn move_crosshair(&mut self) {
        let Some(crosshair) = self.crosshair.as_mut() else {
            return;
        };
        if !crosshair.is_active() {
            return;
        }
        crosshair.set_position(self.board.crosshair_position(
            self.clock,
            self.config.crosshair_movement_speed,
            self.config.crosshair_movement_amplitude,
        ));
    }

    /// Unlock controls, hide the crosshair and score the throw.
    fn end_dart_game(&mut self) -> Option<ThrowResult> {
        self.mode = Mode::FreeRoam;
        let result = self.crosshair.as_mut().map(|crosshair| {
            crosshair.deactivate();
            self.board.evaluate(crosshair.position())
        });
        tracing::info!("dart game ended, player controls unlocked");

        match &result {
            Some(r) if r.is_hit() => tracing::info!(distance = r.distance, "hit the bullseye"),
            Some(r) => tracing::info!(distance = r.distance, "missed the bullseye"),
            None => tracing::debug!("no crosshair, throw not scored"),
        }
        if let Some(r) = &result {
            self.scorecard.record(r);
        }

        self.event_log.push(PlayerEvent::GameEnded {
            result,
            at: self.clock,
        });
        result
    }

    /// World pose of the camera: body pose, raised by the eye height, pitched.
    pub fn camera_transform(&self) -> Transform {
        self.body.mul_transform(&Transform::new(
            Vec3::Y * self.config.eye_height,
            Quat::from_rotation_x(self.camera_pitch),
        ))
    }

    pub fn body(&self) -> Transform {
        self.body
    }

    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    pub fn camera_pitch_degrees(&self) -> f32 {
        self.camera_pitch.to_degrees()
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn controls_locked(&self) -> bool {
        matches!(self.mode, Mode::Locked(_))
    }

    /// Transition progress in `[0, 1]` while locked.
    pub fn transition_progress(&self) -> Option<f32> {
        match self.mode {
            Mode::Locked(t) => Some(t.progress(self.clock)),
            Mode::FreeRoam => None,
        }
    }

    pub fn crosshair(&self) -> Option<&Crosshair> {
        self.crosshair.as_ref()
    }

    pub fn crosshair_visible(&self) -> bool {
        self.crosshair.is_some_and(|c| c.is_active())
    }

    /// What the interaction ray hit on the last frame.
    pub fn focus(&self) -> Option<&RayHit> {
        self.focus.as_ref()
    }

    pub fn scorecard(&self) -> &Scorecard {
        &self.scorecard
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn board(&self) -> &DartBoard {
        &self.board
    }

    pub fn events(&self) -> &[PlayerEvent] {
        &self.event_log
    }

    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.event_log)
    }
}
