//! Dartboard geometry, the circling crosshair, and throw scoring.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, finite, non_negative};

/// Fixed world reference for the mini-game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DartBoard {
    /// Centre of the crosshair circle.
    pub origin: Vec3,
    /// Scoring point.
    pub bullseye: Vec3,
    /// A throw within this distance of the bullseye is a hit.
    pub bullseye_radius: f32,
}

impl Default for DartBoard {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            bullseye: Vec3::ZERO,
            bullseye_radius: 1.0,
        }
    }
}

impl DartBoard {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, v) in [("origin", self.origin), ("bullseye", self.bullseye)] {
            for c in v.to_array() {
                finite(field, c)?;
            }
        }
        non_negative("bullseye_radius", self.bullseye_radius)
    }

    /// Crosshair point at clock time `t`: a circle of radius `amplitude`
    /// around `origin` in the horizontal plane.
    pub fn crosshair_position(&self, t: f32, speed: f32, amplitude: f32) -> Vec3 {
        let phase = t * speed;
        self.origin + Vec3::new(phase.sin() * amplitude, 0.0, phase.cos() * amplitude)
    }

    /// Score a throw landing at `point`. Distance equal to the radius is a hit.
    pub fn evaluate(&self, point: Vec3) -> ThrowResult {
        let distance = point.distance(self.bullseye);
        let outcome = if distance <= self.bullseye_radius {
            ThrowOutcome::Hit
        } else {
            ThrowOutcome::Miss
        };
        ThrowResult {
            outcome,
            point,
            distance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThrowOutcome {
    Hit,
    Miss,
}

/// One scored throw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThrowResult {
    pub outcome: ThrowOutcome,
    pub point: Vec3,
    /// Distance from the bullseye.
    pub distance: f32,
}

impl ThrowResult {
    pub fn is_hit(&self) -> bool {
        self.outcome == ThrowOutcome::Hit
    }
}

/// Visual aiming marker owned by the controller. Created once, toggled after.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Crosshair {
    active: bool,
    position: Vec3,
}

impl Crosshair {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn activate_at(&mut self, position: Vec3) {
        self.active = true;
        self.position = position;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Running tally of throws.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Scorecard {
    pub throws: u32,
    pub hits: u32,
    pub streak: u32,
    pub best_streak: u32,
}

impl Scorecard {
    pub fn record(&mut self, result: &ThrowResult) {
        self.throws += 1;
        if result.is_hit() {
            self.hits += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.streak = 0;
        }
    }

    pub fn misses(&self) -> u32 {
        self.throws - self.hits
    }
}

impl std::fmt::Display for Scorecard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "throws={} hits={} misses={} streak={} best_streak={}",
            self.throws,
            self.hits,
            self.misses(),
            self.streak,
            self.best_streak
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> DartBoard {
        DartBoard {
            origin: Vec3::new(0.0, 1.5, -8.0),
            bullseye: Vec3::new(0.0, 1.5, -7.0),
            bullseye_radius: 0.5,
        }
    }

    #[test]
    fn crosshair_stays_on_circle() {
        let b = board();
        for i in 0..200 {
            let t = i as f32 * 0.037;
            let p = b.crosshair_position(t, 1.7, 2.0);
            assert_eq!(p.y, b.origin.y);
            let r = ((p.x - b.origin.x).powi(2) + (p.z - b.origin.z).powi(2)).sqrt();
            assert!((r - 2.0).abs() < 1e-5, "radius {r} at t={t}");
        }
    }

    #[test]
    fn crosshair_starts_on_positive_z() {
        let b = board();
        let p = b.crosshair_position(0.0, 1.0, 1.0);
        assert_eq!(p, b.origin + Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn boundary_counts_as_hit() {
        let b = DartBoard {
            origin: Vec3::ZERO,
            bullseye: Vec3::new(0.0, 1.0, 0.0),
            bullseye_radius: 1.0,
        };
        let r = b.evaluate(Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(r.distance, 1.0);
        assert_eq!(r.outcome, ThrowOutcome::Hit);
    }

    #[test]
    fn outside_radius_misses() {
        let b = board();
        let r = b.evaluate(b.bullseye + Vec3::new(0.0, 0.0, 0.51));
        assert_eq!(r.outcome, ThrowOutcome::Miss);
        assert!(b.evaluate(b.bullseye).is_hit());
    }

    #[test]
    fn negative_radius_rejected() {
        let b = DartBoard {
            bullseye_radius: -0.1,
            ..DartBoard::default()
        };
        assert!(b.validate().is_err());
        assert!(DartBoard::default().validate().is_ok());
    }

    #[test]
    fn crosshair_toggles() {
        let mut c = Crosshair::new();
        assert!(!c.is_active());
        c.activate_at(Vec3::ONE);
        assert!(c.is_active());
        assert_eq!(c.position(), Vec3::ONE);
        c.deactivate();
        assert!(!c.is_active());
    }

    #[test]
    fn scorecard_tracks_streaks() {
        let b = board();
        let hit = b.evaluate(b.bullseye);
        let miss = b.evaluate(b.bullseye + Vec3::X * 3.0);
        let mut card = Scorecard::default();
        for r in [&hit, &hit, &miss, &hit] {
            card.record(r);
        }
        assert_eq!(card.throws, 4);
        assert_eq!(card.hits, 3);
        assert_eq!(card.misses(), 1);
        assert_eq!(card.streak, 1);
        assert_eq!(card.best_streak, 2);
    }
}
