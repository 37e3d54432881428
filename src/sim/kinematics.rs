//! Incline force and velocity math
//!
//! Forces are per unit mass, so they double as accelerations.

use glam::DVec2;

use crate::SimParams;
use crate::consts::{NET_ACCEL_EPSILON, STOP_EPSILON};

/// Force components acting on a block of unit mass resting on the incline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InclineForces {
    /// Gravity component parallel to the incline, g·sin(θ)
    pub along_plane: f64,
    /// Kinetic friction opposing motion, μ·g·cos(θ)
    pub friction: f64,
    /// along_plane - friction
    pub net: f64,
}

impl InclineForces {
    pub fn from_params(params: &SimParams) -> Self {
        let theta = params.angle_rad();
        let along_plane = params.gravity * theta.sin();
        let friction = params.friction * params.gravity * theta.cos();
        Self {
            along_plane,
            friction,
            net: along_plane - friction,
        }
    }

    /// Whether gravity beats friction and the block accelerates
    pub fn accelerates(&self) -> bool {
        self.net > 0.0
    }

    /// Time to reach `speed` from rest at constant net acceleration (v = a·t).
    ///
    /// `None` when the net acceleration is too small to divide by.
    pub fn time_to_reach(&self, speed: f64) -> Option<f64> {
        if self.net > NET_ACCEL_EPSILON {
            Some(speed / self.net)
        } else {
            None
        }
    }
}

/// Free fall: vertical speed grows by g·t, horizontal motion is cancelled.
///
/// `elapsed` is the time since the phase started, not the tick length, so the
/// vertical speed compounds across ticks.
pub fn free_fall_velocity(velocity: DVec2, gravity: f64, elapsed: f64) -> DVec2 {
    DVec2::new(0.0, velocity.y + gravity * elapsed)
}

/// Whether a block in contact with the incline counts as stopped.
///
/// Any one of the three checks is enough.
pub fn is_stopped(velocity: DVec2) -> bool {
    velocity.x.abs() < STOP_EPSILON || velocity.y.abs() < STOP_EPSILON || velocity.x < 0.0
}

/// Sliding velocity after `elapsed` seconds from rest, pointing down the incline.
///
/// Recomputed from t = 0 each call rather than integrated frame to frame.
/// Returns `None` when friction cancels gravity and no override should apply.
pub fn sliding_velocity(forces: &InclineForces, angle_rad: f64, elapsed: f64) -> Option<DVec2> {
    if !forces.accelerates() {
        return None;
    }
    let accel = DVec2::new(
        forces.net * angle_rad.cos(),
        forces.net * angle_rad.sin(),
    );
    Some((accel * elapsed).abs())
}
