//! Incline Lab - a block sliding down an inclined plane
//!
//! Core modules:
//! - `sim`: Deterministic simulation (world, collisions, incline kinematics)
//! - `readout`: Formula and value strings shown next to the canvas
//! - `renderer`: Screen-space outlines for the Canvas 2D view
//! - `settings`: Persisted simulation parameters

pub mod readout;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::SimParams;

use glam::DVec2;

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Largest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Canvas dimensions
    pub const CANVAS_WIDTH: f64 = 1000.0;
    pub const CANVAS_HEIGHT: f64 = 600.0;
    /// The plane's base sits on the bottom edge of the canvas
    pub const FLOOR_Y: f64 = CANVAS_HEIGHT;

    /// Plane height is fixed; width follows from the angle
    pub const PLANE_HEIGHT: f64 = 500.0;

    /// Block dimensions
    pub const BLOCK_WIDTH: f64 = 80.0;
    pub const BLOCK_HEIGHT: f64 = 20.0;
    /// Horizontal distance from the plane's vertical edge to the block's start
    pub const BLOCK_START_X: f64 = 50.0;
    /// Gap left between the block and the incline surface at start
    pub const BLOCK_START_GAP: f64 = 1.0;

    /// Below this speed component the sliding block counts as stopped
    pub const STOP_EPSILON: f64 = 1e-4;
    /// Net accelerations at or below this are too small to divide by
    pub const NET_ACCEL_EPSILON: f64 = 1e-9;

    /// Per-tick air damping at 60 Hz
    pub const FRICTION_AIR: f64 = 0.01;
    /// Penetration left in place after contact correction so contact persists
    pub const CONTACT_SLOP: f64 = 0.05;
}

/// Center of mass of a right triangle with its right angle at the origin
#[inline]
pub fn center_of_mass(height: f64, width: f64) -> DVec2 {
    DVec2::new(width / 3.0, height / 3.0)
}

/// Convert degrees to radians
#[inline]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Round to a fixed number of decimal places for display.
///
/// Ties round toward positive infinity on the scaled value, so
/// `round_to_decimal(-0.125, 2)` is `-0.12`. Binary representation decides
/// near-ties: `1.005 * 100.0` is `100.49999999999999`, so
/// `round_to_decimal(1.005, 2)` is `1.0`.
pub fn round_to_decimal(num: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = num * factor;
    let floor = scaled.floor();
    let rounded = if scaled - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_degrees_to_radians() {
        assert_eq!(degrees_to_radians(0.0), 0.0);
        assert!((degrees_to_radians(180.0) - PI).abs() < 1e-12);
        assert!((degrees_to_radians(45.0) - PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_round_to_decimal() {
        assert_eq!(round_to_decimal(1.2345, 2), 1.23);
        assert_eq!(round_to_decimal(12.3456, 3), 12.346);
        assert_eq!(round_to_decimal(10.0, 2), 10.0);
    }

    #[test]
    fn test_round_to_decimal_float_ties() {
        // 1.005 is stored just below the tie
        assert_eq!(round_to_decimal(1.005, 2), 1.0);
        // Exact ties go up, even for negatives
        assert_eq!(round_to_decimal(2.5, 0), 3.0);
        assert_eq!(round_to_decimal(-2.5, 0), -2.0);
        assert_eq!(round_to_decimal(-0.125, 2), -0.12);
    }

    #[test]
    fn test_center_of_mass() {
        let com = center_of_mass(300.0, 600.0);
        assert_eq!(com, DVec2::new(200.0, 100.0));
    }
}
