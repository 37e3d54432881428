//! Simulation parameters
//!
//! Persisted in LocalStorage so a page reload keeps the last setup.

use serde::{Deserialize, Serialize};

/// Smallest and largest incline angle the angle slider offers (degrees).
///
/// Past 80° the plane is narrower than the block's start offset.
pub const MIN_ANGLE_DEG: f64 = 1.0;
pub const MAX_ANGLE_DEG: f64 = 80.0;

/// User-adjustable simulation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Incline angle (degrees)
    pub angle_deg: f64,
    /// Coefficient of kinetic friction (0.0 - 1.0)
    pub friction: f64,
    /// Gravitational acceleration (units/s²)
    pub gravity: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            angle_deg: 45.0,
            friction: 0.6,
            gravity: 20.0,
        }
    }
}

impl SimParams {
    /// Incline angle in radians
    pub fn angle_rad(&self) -> f64 {
        crate::degrees_to_radians(self.angle_deg)
    }

    /// Friction as the 0-100 value shown on the slider
    pub fn friction_percent(&self) -> f64 {
        self.friction * 100.0
    }

    // Setters take values as given; the input widgets own the ranges.
    pub fn set_angle(&mut self, degrees: f64) {
        self.angle_deg = degrees;
    }

    /// Set friction from a slider percentage (0 - 100)
    pub fn set_friction_percent(&mut self, percent: f64) {
        self.friction = percent / 100.0;
    }

    pub fn set_gravity(&mut self, gravity: f64) {
        self.gravity = gravity;
    }

    /// Bring stored fields back into the range the controls allow
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.angle_deg.is_finite() {
            self.angle_deg = defaults.angle_deg;
        }
        if !self.friction.is_finite() {
            self.friction = defaults.friction;
        }
        if !self.gravity.is_finite() {
            self.gravity = defaults.gravity;
        }
        self.angle_deg = self.angle_deg.clamp(MIN_ANGLE_DEG, MAX_ANGLE_DEG);
        self.friction = self.friction.clamp(0.0, 1.0);
        self.gravity = self.gravity.max(0.0);
        self
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "incline_lab_params";

    /// Load parameters from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(params) = serde_json::from_str::<SimParams>(&json) {
                    log::info!("Loaded parameters from LocalStorage");
                    return params.sanitized();
                }
                log::warn!("Ignoring unreadable stored parameters");
            }
        }

        log::info!("Using default parameters");
        Self::default()
    }

    /// Save parameters to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::debug!("Parameters saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = SimParams::default();
        assert_eq!(params.angle_deg, 45.0);
        assert_eq!(params.friction, 0.6);
        assert_eq!(params.gravity, 20.0);
        assert_eq!(params.friction_percent(), 60.0);
    }

    #[test]
    fn test_setters_store_values_as_given() {
        let mut params = SimParams::default();
        params.set_angle(85.0);
        assert_eq!(params.angle_deg, 85.0);
        params.set_angle(0.5);
        assert_eq!(params.angle_deg, 0.5);

        params.set_friction_percent(35.0);
        assert_eq!(params.friction, 0.35);
        params.set_friction_percent(150.0);
        assert_eq!(params.friction, 1.5);

        params.set_gravity(-9.8);
        assert_eq!(params.gravity, -9.8);
    }

    #[test]
    fn test_sanitized_clamps_stored_values() {
        let params = SimParams {
            angle_deg: 120.0,
            friction: 0.3,
            gravity: -1.0,
        }
        .sanitized();
        assert_eq!(params.angle_deg, MAX_ANGLE_DEG);
        assert_eq!(params.friction, 0.3);
        assert_eq!(params.gravity, 0.0);
    }

    #[test]
    fn test_json_round_trip() {
        let params = SimParams {
            angle_deg: 30.0,
            friction: 0.25,
            gravity: 9.8,
        };
        let json = serde_json::to_string(&params).unwrap();
        let restored: SimParams = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, params);
    }

    #[test]
    fn test_sanitized_replaces_non_finite() {
        let params = SimParams {
            angle_deg: f64::NAN,
            friction: 3.0,
            gravity: f64::INFINITY,
        }
        .sanitized();
        assert_eq!(params.angle_deg, 45.0);
        assert_eq!(params.friction, 1.0);
        assert_eq!(params.gravity, 20.0);
    }
}
