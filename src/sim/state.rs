//! Simulation context
//!
//! Everything the incline updater reads or mutates between ticks lives here:
//! parameters, the world and its two bodies, and the per-phase trackers.

use glam::DVec2;

use super::body::{Body, BodyHandle};
use super::geometry::PlaneGeometry;
use super::kinematics::InclineForces;
use super::world::{PhysicsWorld, World};
use crate::SimParams;
use crate::consts::{BLOCK_HEIGHT, BLOCK_WIDTH};

/// Motion phase of the block since the last reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not touching the plane, falling
    Airborne,
    /// In contact with the plane
    Sliding,
    /// Stopped on the plane; held until the next reset
    Stopped,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Airborne => "airborne",
            Phase::Sliding => "sliding",
            Phase::Stopped => "stopped",
        }
    }
}

/// Snapshot taken when the block sets a new top speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakReading {
    /// Seconds since the phase started
    pub elapsed: f64,
    pub speed: f64,
    pub forces: InclineForces,
    /// Parameters in effect when the reading was taken
    pub params: SimParams,
}

impl PeakReading {
    /// Time to reach this speed from rest at the current net acceleration
    pub fn expected_time(&self) -> Option<f64> {
        self.forces.time_to_reach(self.speed)
    }
}

/// Notifications produced by ticks and commands
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// Parameters changed (or a reset happened); the world was rebuilt
    ParamsChanged(SimParams),
    /// The block reached a new top speed within the phase
    PeakSpeed(PeakReading),
    PhaseChanged { from: Phase, to: Phase },
}

/// Pointer grab on the block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grab {
    /// Block position minus pointer position at grab time
    pub offset: DVec2,
}

/// Complete simulation state
#[derive(Debug)]
pub struct SimContext {
    pub params: SimParams,
    pub plane: PlaneGeometry,
    pub world: World,
    pub plane_body: BodyHandle,
    pub block_body: BodyHandle,
    /// Seconds since the last reset
    pub elapsed: f64,
    /// Highest speed seen since the last reset
    pub top_speed: f64,
    pub phase: Phase,
    pub grab: Option<Grab>,
}

impl SimContext {
    pub fn new(params: SimParams) -> Self {
        let mut ctx = Self {
            params,
            plane: PlaneGeometry::new(params.angle_deg),
            world: World::new(),
            plane_body: BodyHandle(0),
            block_body: BodyHandle(0),
            elapsed: 0.0,
            top_speed: 0.0,
            phase: Phase::Airborne,
            grab: None,
        };
        ctx.rebuild();
        ctx
    }

    /// Net force breakdown for the current parameters
    pub fn forces(&self) -> InclineForces {
        InclineForces::from_params(&self.params)
    }

    pub fn block(&self) -> Option<&Body> {
        self.world.get(self.block_body)
    }

    pub fn plane_body(&self) -> Option<&Body> {
        self.world.get(self.plane_body)
    }

    /// Replace the world contents with a fresh plane and block.
    ///
    /// Plane and start position come from the same geometry, so the world
    /// never holds a block placed for a different angle.
    pub fn rebuild(&mut self) {
        let plane = PlaneGeometry::new(self.params.angle_deg);
        let angle = self.params.angle_rad();
        let start = plane.block_start();

        self.world.clear();
        self.plane_body = self.world.add(
            Body::polygon("plane", plane.world_centroid(), plane.local_vertices()).into_static(),
        );
        self.block_body = self.world.add(Body::rectangle(
            "block",
            start,
            BLOCK_WIDTH,
            BLOCK_HEIGHT,
            0.0,
        ));
        // Lie flat on the incline, at rest
        self.world.set_angle(self.block_body, angle);
        self.world.set_velocity(self.block_body, DVec2::ZERO);
        self.world.set_angular_speed(self.block_body, 0.0);
        self.plane = plane;

        self.elapsed = 0.0;
        self.top_speed = 0.0;
        self.phase = Phase::Airborne;
        self.grab = None;

        log::debug!(
            "World rebuilt: angle {}°, plane width {:.1}, block at ({:.1}, {:.1})",
            self.params.angle_deg,
            self.plane.width,
            start.x,
            start.y
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_places_block_at_start() {
        let ctx = SimContext::new(SimParams::default());
        let block = ctx.block().unwrap();
        assert_eq!(block.position, ctx.plane.block_start());
        assert_eq!(block.velocity, DVec2::ZERO);
        assert_eq!(ctx.phase, Phase::Airborne);
        assert_eq!(ctx.world.bodies().len(), 2);
        assert!(ctx.plane_body().unwrap().is_static);
    }

    #[test]
    fn test_block_starts_just_clear_of_plane() {
        let ctx = SimContext::new(SimParams::default());
        assert!(!ctx.world.collides(ctx.block_body, ctx.plane_body));
    }

    #[test]
    fn test_rebuild_replaces_world_contents() {
        let mut ctx = SimContext::new(SimParams::default());
        let old_block = ctx.block_body;
        ctx.params.angle_deg = 30.0;
        ctx.rebuild();

        assert_eq!(ctx.world.bodies().len(), 2);
        assert!(ctx.world.get(old_block).is_none());
        assert_eq!(ctx.plane.angle_deg, 30.0);
        assert_eq!(ctx.block().unwrap().position, PlaneGeometry::new(30.0).block_start());
    }

    #[test]
    fn test_rebuild_lays_block_along_incline() {
        let mut ctx = SimContext::new(SimParams::default());
        ctx.world.set_angle(ctx.block_body, 0.0);
        ctx.world.set_angular_speed(ctx.block_body, 2.0);
        ctx.params.angle_deg = 20.0;
        ctx.rebuild();

        let block = ctx.block().unwrap();
        assert!((block.angle - crate::degrees_to_radians(20.0)).abs() < 1e-12);
        assert_eq!(block.angular_speed, 0.0);
    }
}
