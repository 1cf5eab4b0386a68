use crate::controller::PlayerController;

/// Read-only snapshot of a controller for debug overlays and logs.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSummary {
    pub clock: f32,
    pub position: [f32; 3],
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
    pub grounded: bool,
    pub locked: bool,
    pub progress: Option<f32>,
    pub crosshair_visible: bool,
    pub focus: Option<String>,
    pub pending_events: usize,
}

impl PlayerSummary {
    pub fn of(player: &PlayerController) -> Self {
        let p = player.position();
        let forward = player.body().forward();
        // heading measured from -Z, positive turning left
        let yaw = (-forward.x).atan2(-forward.z).to_degrees();
        Self {
            clock: player.clock(),
            position: [p.x, p.y, p.z],
            yaw_degrees: yaw,
            pitch_degrees: player.camera_pitch_degrees(),
            grounded: player.is_grounded(),
            locked: player.controls_locked(),
            progress: player.transition_progress(),
            crosshair_visible: player.crosshair_visible(),
            focus: player.focus().map(|h| h.name.clone()),
            pending_events: player.events().len(),
        }
    }
}

impl std::fmt::Display for PlayerSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [x, y, z] = self.position;
        write!(
            f,
            "Player: t={:.2} pos=({x:.2}, {y:.2}, {z:.2}) yaw={:.1} pitch={:.1} grounded={} mode={}",
            self.clock,
            self.yaw_degrees,
            self.pitch_degrees,
            self.grounded,
            if self.locked { "locked" } else { "free" },
        )?;
        if let Some(p) = self.progress {
            write!(f, " progress={p:.2}")?;
        }
        if let Some(name) = &self.focus {
            write!(f, " focus={name}")?;
        }
        write!(
            f,
            " crosshair={} pending_events={}",
            self.crosshair_visible, self.pending_events
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::DartBoard;
    use crate::config::PlayerConfig;
    use crate::host::{Host, MotorStep, RayHit};
    use dartroom_common::{LayerMask, Ray, Transform};
    use dartroom_input::InputSnapshot;
    use glam::Vec3;

    struct Floor;

    impl Host for Floor {
        fn move_character(&mut self, from: Vec3, delta: Vec3) -> MotorStep {
            let position = (from + delta).max(Vec3::new(f32::MIN, 0.0, f32::MIN));
            MotorStep {
                position,
                grounded: position.y <= 0.0,
            }
        }

        fn raycast(&self, _ray: &Ray, _max: f32, _mask: LayerMask) -> Option<RayHit> {
            None
        }
    }

    #[test]
    fn summary_reflects_controller() {
        let mut host = Floor;
        let mut player = PlayerController::spawn(
            PlayerConfig::default(),
            DartBoard::default(),
            Transform::with_yaw_degrees(Vec3::new(1.0, 0.0, 2.0), 90.0),
            &mut host,
        )
        .unwrap();
        player.update(&mut host, 0.25, &InputSnapshot::new());

        let summary = PlayerSummary::of(&player);
        assert_eq!(summary.position, [1.0, 0.0, 2.0]);
        assert!((summary.yaw_degrees - 90.0).abs() < 1e-3);
        assert!(summary.grounded);
        assert!(!summary.locked);
        assert!(summary.focus.is_none());

        let text = summary.to_string();
        assert!(text.contains("mode=free"));
        assert!(text.contains("yaw=90.0"));
        assert!(!text.contains("progress"));
    }

    #[test]
    fn summary_shows_progress_when_locked() {
        let mut host = Floor;
        let mut player = PlayerController::spawn(
            PlayerConfig::default(),
            DartBoard::default(),
            Transform::default(),
            &mut host,
        )
        .unwrap();
        player.start_dart_game(Transform::from_position(Vec3::new(0.0, 0.0, -3.0)));
        player.update(&mut host, 0.5, &InputSnapshot::new());

        let summary = PlayerSummary::of(&player);
        assert!(summary.locked);
        assert_eq!(summary.progress, Some(0.5));
        assert!(summary.crosshair_visible);
        assert!(summary.to_string().contains("progress=0.50"));
    }
}
