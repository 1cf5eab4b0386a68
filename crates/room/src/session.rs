//! Scripted play-through of the dart range: walk to the board, interact,
//! aim, throw. Drives a `PlayerController` frame by frame against a `Room`.

use dartroom_common::Transform;
use dartroom_input::{Button, InputSnapshot};
use dartroom_player::{
    ConfigError, PlayerConfig, PlayerController, PlayerEvent, PlayerSummary, Scorecard,
    ThrowResult,
};

use crate::room::Room;

/// When the scripted player throws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AimPolicy {
    /// Throw a fixed number of seconds after the game starts.
    After(f32),
    /// Wait for the transition to finish, then throw on the first frame the
    /// crosshair will land inside the bullseye.
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    /// Fixed frame step in seconds.
    pub dt: f32,
    pub aim: AimPolicy,
    /// Give up after this much simulated time.
    pub max_seconds: f32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            aim: AimPolicy::Auto,
            max_seconds: 30.0,
        }
    }
}

/// Errors from a scripted session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid player config: {0}")]
    Config(#[from] ConfigError),
    #[error("frame step must be positive and finite, got {0}")]
    BadStep(f32),
    #[error("no dartboard in range after {0:.2}s")]
    BoardNotReached(f32),
    #[error("no throw after {0:.2}s")]
    TimedOut(f32),
}

/// Summary of one scripted session.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub frames: u32,
    /// Clock time at which the game started.
    pub started_at: f32,
    /// Clock time at which the dart was thrown.
    pub thrown_at: f32,
    pub result: Option<ThrowResult>,
    pub scorecard: Scorecard,
    pub events: Vec<PlayerEvent>,
    pub final_state: PlayerSummary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Approach,
    Aiming { started_at: f32 },
}

/// Run one session in the demo range with the player spawned at the origin
/// facing the board.
pub fn run_dart_session(
    config: PlayerConfig,
    settings: SessionSettings,
) -> Result<SessionReport, SessionError> {
    if !settings.dt.is_finite() || settings.dt <= 0.0 {
        return Err(SessionError::BadStep(settings.dt));
    }
    let (mut room, board) = Room::dart_range();
    let mut player = PlayerController::spawn(config, board, Transform::default(), &mut room)?;
    let bindings = player.config().bindings.clone();
    let interact = first_button(&bindings.interact, Button::KeyE);
    let confirm = first_button(&bindings.confirm, Button::Space);

    let _span = tracing::info_span!("dart_session").entered();
    let mut phase = Phase::Approach;
    let mut frames = 0;

    while player.clock() < settings.max_seconds {
        frames += 1;
        let input = match phase {
            Phase::Approach if player.focus().is_some() => InputSnapshot::new().press(interact),
            Phase::Approach => InputSnapshot::new().with_movement(0.0, 1.0),
            Phase::Aiming { started_at } => {
                if should_throw(&player, settings, started_at) {
                    InputSnapshot::new().press(confirm)
                } else {
                    InputSnapshot::new()
                }
            }
        };

        let report = player.update(&mut room, settings.dt, &input);
        if report.game_started {
            tracing::debug!(clock = player.clock(), "reached the board");
            phase = Phase::Aiming {
                started_at: player.clock(),
            };
        }
        if report.game_ended {
            let started_at = match phase {
                Phase::Aiming { started_at } => started_at,
                Phase::Approach => player.clock(),
            };
            tracing::info!(frames, scorecard = %player.scorecard(), "session finished");
            return Ok(SessionReport {
                frames,
                started_at,
                thrown_at: player.clock(),
                result: report.result,
                scorecard: *player.scorecard(),
                final_state: PlayerSummary::of(&player),
                events: player.drain_events(),
            });
        }
    }

    match phase {
        Phase::Approach => Err(SessionError::BoardNotReached(player.clock())),
        Phase::Aiming { .. } => Err(SessionError::TimedOut(player.clock())),
    }
}

fn should_throw(player: &PlayerController, settings: SessionSettings, started_at: f32) -> bool {
    match settings.aim {
        AimPolicy::After(secs) => player.clock() + settings.dt - started_at >= secs,
        AimPolicy::Auto => {
            if player.transition_progress() != Some(1.0) {
                return false;
            }
            let config = player.config();
            let next = player.board().crosshair_position(
                player.clock() + settings.dt,
                config.crosshair_movement_speed,
                config.crosshair_movement_amplitude,
            );
            player.board().evaluate(next).is_hit()
        }
    }
}

fn first_button(buttons: &[Button], fallback: Button) -> Button {
    buttons.first().copied().unwrap_or_else(|| {
        tracing::warn!(?fallback, "action has no binding, using fallback");
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dartroom_player::ThrowOutcome;

    #[test]
    fn auto_aim_hits_the_bullseye() {
        let report = run_dart_session(PlayerConfig::default(), SessionSettings::default()).unwrap();
        let result = report.result.unwrap();
        assert_eq!(result.outcome, ThrowOutcome::Hit);
        assert!(result.distance <= 0.35);
        assert_eq!(report.scorecard.hits, 1);
        assert!(!report.final_state.locked);
        assert!(report.thrown_at - report.started_at >= 1.0);
        assert!(matches!(
            report.events.as_slice(),
            [
                PlayerEvent::Interacted { received: true, .. },
                PlayerEvent::GameStarted { .. },
                PlayerEvent::GameEnded { result: Some(_), .. },
            ]
        ));
    }

    #[test]
    fn player_ends_on_the_throwing_spot() {
        let report = run_dart_session(PlayerConfig::default(), SessionSettings::default()).unwrap();
        let [x, y, z] = report.final_state.position;
        assert!(x.abs() < 1e-5 && y.abs() < 1e-5 && (z + 9.0).abs() < 1e-5);
    }

    #[test]
    fn fixed_delay_throw_is_scored() {
        let settings = SessionSettings {
            aim: AimPolicy::After(0.5),
            ..SessionSettings::default()
        };
        let report = run_dart_session(PlayerConfig::default(), settings).unwrap();
        assert!(report.result.is_some());
        assert_eq!(report.scorecard.throws, 1);
        assert!(report.thrown_at - report.started_at < 0.6);
    }

    #[test]
    fn stationary_player_never_reaches_board() {
        let config = PlayerConfig {
            move_speed: 0.0,
            ..PlayerConfig::default()
        };
        let settings = SessionSettings {
            max_seconds: 1.0,
            ..SessionSettings::default()
        };
        assert!(matches!(
            run_dart_session(config, settings),
            Err(SessionError::BoardNotReached(_))
        ));
    }

    #[test]
    fn bad_step_rejected() {
        let settings = SessionSettings {
            dt: 0.0,
            ..SessionSettings::default()
        };
        assert!(matches!(
            run_dart_session(PlayerConfig::default(), settings),
            Err(SessionError::BadStep(_))
        ));
    }

    #[test]
    fn invalid_config_surfaces_as_error() {
        let config = PlayerConfig {
            smooth_move_duration: -1.0,
            ..PlayerConfig::default()
        };
        assert!(matches!(
            run_dart_session(config, SessionSettings::default()),
            Err(SessionError::Config(_))
        ));
    }
}
