//! Rigid bodies for the world
//!
//! Bodies are convex polygons stored relative to their position. The angle
//! follows `angular_speed` but collisions never change it.

use glam::DVec2;

use crate::consts::FRICTION_AIR;

/// Stable handle to a body inside a `World`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub u32);

/// A convex polygon body
#[derive(Debug, Clone)]
pub struct Body {
    pub handle: BodyHandle,
    pub label: &'static str,
    /// Static bodies never move and push dynamic bodies out
    pub is_static: bool,
    /// Outline relative to `position` before rotation (convex, any winding)
    pub vertices: Vec<DVec2>,
    pub position: DVec2,
    /// Rotation (radians, clockwise on screen)
    pub angle: f64,
    pub velocity: DVec2,
    /// Radians per second
    pub angular_speed: f64,
    /// Fraction of velocity lost per 60 Hz step
    pub friction_air: f64,
    /// Held in place by the pointer; skipped by integration
    pub pinned: bool,
}

impl Body {
    fn with_vertices(label: &'static str, position: DVec2, vertices: Vec<DVec2>) -> Self {
        Self {
            handle: BodyHandle(0),
            label,
            is_static: false,
            vertices,
            position,
            angle: 0.0,
            velocity: DVec2::ZERO,
            angular_speed: 0.0,
            friction_air: FRICTION_AIR,
            pinned: false,
        }
    }

    /// Axis-aligned rectangle centered on `position`, then rotated by `angle`
    pub fn rectangle(label: &'static str, position: DVec2, width: f64, height: f64, angle: f64) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        let vertices = vec![
            DVec2::new(-hw, -hh),
            DVec2::new(hw, -hh),
            DVec2::new(hw, hh),
            DVec2::new(-hw, hh),
        ];
        let mut body = Self::with_vertices(label, position, vertices);
        body.angle = angle;
        body
    }

    /// Polygon from outline vertices relative to `position`
    pub fn polygon(label: &'static str, position: DVec2, vertices: Vec<DVec2>) -> Self {
        Self::with_vertices(label, position, vertices)
    }

    /// Mark the body as static (immovable)
    pub fn into_static(mut self) -> Self {
        self.is_static = true;
        self.friction_air = 0.0;
        self
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Outline in world space
    pub fn world_vertices(&self) -> Vec<DVec2> {
        let rot = DVec2::from_angle(self.angle);
        self.vertices
            .iter()
            .map(|&v| self.position + rot.rotate(v))
            .collect()
    }

    /// Whether a world-space point lies inside the outline
    pub fn contains_point(&self, point: DVec2) -> bool {
        let verts = self.world_vertices();
        let n = verts.len();
        if n < 3 {
            return false;
        }
        let mut sign = 0.0;
        for i in 0..n {
            let a = verts[i];
            let b = verts[(i + 1) % n];
            let cross = (b - a).perp_dot(point - a);
            if cross == 0.0 {
                continue;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_rectangle_world_vertices_rotate() {
        let body = Body::rectangle("block", DVec2::new(10.0, 10.0), 4.0, 2.0, FRAC_PI_2);
        let verts = body.world_vertices();
        // Quarter turn swaps the extents
        let max_x = verts.iter().map(|v| v.x).fold(f64::MIN, f64::max);
        let max_y = verts.iter().map(|v| v.y).fold(f64::MIN, f64::max);
        assert!((max_x - 11.0).abs() < 1e-9);
        assert!((max_y - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_contains_point() {
        let body = Body::rectangle("block", DVec2::ZERO, 80.0, 20.0, 0.0);
        assert!(body.contains_point(DVec2::new(30.0, 5.0)));
        assert!(!body.contains_point(DVec2::new(30.0, 15.0)));
    }

    #[test]
    fn test_static_bodies_do_not_damp() {
        let body = Body::polygon("plane", DVec2::ZERO, vec![DVec2::ZERO]).into_static();
        assert!(body.is_static);
        assert_eq!(body.friction_air, 0.0);
    }
}
