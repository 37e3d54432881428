//! Incline geometry
//!
//! Screen space, y pointing down. The plane is a right triangle whose right
//! angle sits on the floor at x = 0; the incline surface runs from the top of
//! the vertical edge down to the floor on the right.

use glam::DVec2;

use crate::consts::*;
use crate::{center_of_mass, degrees_to_radians};

/// The inclined plane triangle for a given angle
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneGeometry {
    pub angle_deg: f64,
    pub height: f64,
    pub width: f64,
}

impl PlaneGeometry {
    pub fn new(angle_deg: f64) -> Self {
        let height = PLANE_HEIGHT;
        let width = (height / degrees_to_radians(angle_deg).tan()).abs();
        Self {
            angle_deg,
            height,
            width,
        }
    }

    /// Center of mass relative to the right-angle corner (x right, y up)
    pub fn center_of_mass(&self) -> DVec2 {
        center_of_mass(self.height, self.width)
    }

    /// Where the triangle's centroid sits in world space
    pub fn world_centroid(&self) -> DVec2 {
        let com = self.center_of_mass();
        DVec2::new(com.x, FLOOR_Y - com.y)
    }

    /// Triangle corners relative to the right-angle corner
    pub fn corners(&self) -> [DVec2; 3] {
        [
            DVec2::new(0.0, 0.0),
            DVec2::new(self.width, 0.0),
            DVec2::new(0.0, -self.height),
        ]
    }

    /// Triangle corners relative to the centroid, as a body outline
    pub fn local_vertices(&self) -> Vec<DVec2> {
        let com = self.center_of_mass();
        let centroid = DVec2::new(com.x, -com.y);
        self.corners().iter().map(|&c| c - centroid).collect()
    }

    /// Height of the incline surface above the floor line at `x`, in world y
    pub fn surface_y(&self, x: f64) -> f64 {
        let top = FLOOR_Y - self.height;
        top + x * degrees_to_radians(self.angle_deg).tan()
    }

    /// Block center that leaves the block's underside a small gap above the
    /// incline at `BLOCK_START_X`
    pub fn block_start(&self) -> DVec2 {
        let theta = degrees_to_radians(self.angle_deg);
        let lift = (BLOCK_HEIGHT / 2.0) / theta.cos();
        DVec2::new(
            BLOCK_START_X,
            self.surface_y(BLOCK_START_X) - lift - BLOCK_START_GAP,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_45_degree_plane_is_square() {
        let plane = PlaneGeometry::new(45.0);
        assert!((plane.width - PLANE_HEIGHT).abs() < 1e-9);
        let com = plane.center_of_mass();
        assert!((com.x - 500.0 / 3.0).abs() < 1e-9);
        assert!((com.y - 500.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_block_start_at_45_degrees() {
        let start = PlaneGeometry::new(45.0).block_start();
        let expected_y = 100.0 + 50.0 - 10.0 / (std::f64::consts::FRAC_PI_4).cos() - 1.0;
        assert_eq!(start.x, 50.0);
        assert!((start.y - expected_y).abs() < 1e-9);
    }

    #[test]
    fn test_local_vertices_center_on_centroid() {
        let plane = PlaneGeometry::new(30.0);
        let verts = plane.local_vertices();
        let mean = verts.iter().copied().sum::<DVec2>() / verts.len() as f64;
        assert!(mean.length() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_width_and_center_of_mass(angle in 1.0f64..89.0) {
            let plane = PlaneGeometry::new(angle);
            let expected_width = PLANE_HEIGHT / degrees_to_radians(angle).tan();
            prop_assert!((plane.width - expected_width).abs() < 1e-6 * expected_width.max(1.0));

            let com = plane.center_of_mass();
            prop_assert!((com.x - plane.width / 3.0).abs() < 1e-9 * plane.width.max(1.0));
            prop_assert!((com.y - PLANE_HEIGHT / 3.0).abs() < 1e-9);
        }

        #[test]
        fn prop_block_starts_above_surface(angle in 1.0f64..89.0) {
            let plane = PlaneGeometry::new(angle);
            let start = plane.block_start();
            prop_assert!(start.y < plane.surface_y(start.x));
        }
    }
}
