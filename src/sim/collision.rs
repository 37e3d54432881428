//! Collision detection between convex polygons
//!
//! Separating axis test over the edge normals of both outlines. The minimum
//! overlap axis gives the contact normal and penetration depth.

use glam::DVec2;

use super::body::Body;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the outlines overlap
    pub hit: bool,
    /// Contact normal (unit, pointing from `b` toward `a`)
    pub normal: DVec2,
    /// Overlap along the normal (for position correction)
    pub penetration: f64,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: DVec2::ZERO,
            penetration: 0.0,
        }
    }
}

fn project(verts: &[DVec2], axis: DVec2) -> (f64, f64) {
    verts.iter().fold((f64::MAX, f64::MIN), |(min, max), v| {
        let d = v.dot(axis);
        (min.min(d), max.max(d))
    })
}

fn centroid(verts: &[DVec2]) -> DVec2 {
    verts.iter().copied().sum::<DVec2>() / verts.len() as f64
}

/// Check two world-space convex outlines for overlap
pub fn polygon_collision(a: &[DVec2], b: &[DVec2]) -> CollisionResult {
    if a.len() < 3 || b.len() < 3 {
        return CollisionResult::miss();
    }

    let mut best_overlap = f64::MAX;
    let mut best_axis = DVec2::ZERO;

    for verts in [a, b] {
        for i in 0..verts.len() {
            let edge = verts[(i + 1) % verts.len()] - verts[i];
            let axis = edge.perp().normalize_or_zero();
            if axis == DVec2::ZERO {
                continue;
            }

            let (min_a, max_a) = project(a, axis);
            let (min_b, max_b) = project(b, axis);
            let overlap = max_a.min(max_b) - min_a.max(min_b);
            if overlap <= 0.0 {
                return CollisionResult::miss();
            }
            if overlap < best_overlap {
                best_overlap = overlap;
                best_axis = axis;
            }
        }
    }

    // Orient the normal from b toward a
    if (centroid(a) - centroid(b)).dot(best_axis) < 0.0 {
        best_axis = -best_axis;
    }

    CollisionResult {
        hit: true,
        normal: best_axis,
        penetration: best_overlap,
    }
}

/// Check two bodies for overlap
pub fn body_collision(a: &Body, b: &Body) -> CollisionResult {
    polygon_collision(&a.world_vertices(), &b.world_vertices())
}

/// Remove the part of `velocity` that drives into a surface with `normal`
pub fn remove_inbound_velocity(velocity: DVec2, normal: DVec2) -> DVec2 {
    let inbound = velocity.dot(normal);
    if inbound < 0.0 {
        velocity - normal * inbound
    } else {
        velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(center: DVec2, half: f64) -> Vec<DVec2> {
        vec![
            center + DVec2::new(-half, -half),
            center + DVec2::new(half, -half),
            center + DVec2::new(half, half),
            center + DVec2::new(-half, half),
        ]
    }

    #[test]
    fn test_overlapping_squares() {
        let a = square(DVec2::new(0.0, -9.0), 5.0);
        let b = square(DVec2::ZERO, 5.0);
        let result = polygon_collision(&a, &b);
        assert!(result.hit);
        assert!((result.penetration - 1.0).abs() < 1e-9);
        // a sits above b (smaller y), so the normal points up
        assert!((result.normal - DVec2::new(0.0, -1.0)).length() < 1e-9);
    }

    #[test]
    fn test_separated_squares() {
        let a = square(DVec2::new(20.0, 0.0), 5.0);
        let b = square(DVec2::ZERO, 5.0);
        assert!(!polygon_collision(&a, &b).hit);
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = square(DVec2::new(10.0, 0.0), 5.0);
        let b = square(DVec2::ZERO, 5.0);
        assert!(!polygon_collision(&a, &b).hit);
    }

    #[test]
    fn test_remove_inbound_velocity() {
        let normal = DVec2::new(0.0, -1.0);
        // Falling onto a floor: vertical part removed
        let v = remove_inbound_velocity(DVec2::new(3.0, 4.0), normal);
        assert_eq!(v, DVec2::new(3.0, 0.0));
        // Leaving the floor: untouched
        let v = remove_inbound_velocity(DVec2::new(3.0, -4.0), normal);
        assert_eq!(v, DVec2::new(3.0, -4.0));
    }

    #[test]
    fn test_falling_onto_incline_slides_downhill() {
        // Surface descending to the right at 45°, outward normal up-right
        let normal = DVec2::new(1.0, -1.0).normalize();
        let v = remove_inbound_velocity(DVec2::new(0.0, 10.0), normal);
        assert!(v.x > 0.0 && v.y > 0.0);
        assert!(v.dot(normal).abs() < 1e-9);
    }
}
