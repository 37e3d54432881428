//! Minimal rigid-body world
//!
//! Provides what the incline updater consumes from a physics engine: body
//! queries and overrides, a collision query, world composition and a step.
//! No built-in gravity; the updater supplies it through velocity overrides.

use glam::DVec2;

use super::body::{Body, BodyHandle};
use super::collision::{body_collision, remove_inbound_velocity};
use crate::consts::CONTACT_SLOP;

/// Body capabilities the simulation context needs from a physics engine
pub trait PhysicsWorld {
    fn velocity(&self, handle: BodyHandle) -> Option<DVec2>;
    fn speed(&self, handle: BodyHandle) -> Option<f64>;
    fn set_velocity(&mut self, handle: BodyHandle, velocity: DVec2);
    fn set_position(&mut self, handle: BodyHandle, position: DVec2);
    fn set_angle(&mut self, handle: BodyHandle, angle: f64);
    fn set_angular_speed(&mut self, handle: BodyHandle, speed: f64);
    /// Whether two bodies currently overlap
    fn collides(&self, a: BodyHandle, b: BodyHandle) -> bool;
    /// Remove every body
    fn clear(&mut self);
    /// Add a body, returning its handle
    fn add(&mut self, body: Body) -> BodyHandle;
    /// Advance by `dt` seconds
    fn step(&mut self, dt: f64);
}

/// Body store with linear integration and static contact response
#[derive(Debug, Default)]
pub struct World {
    bodies: Vec<Body>,
    next_id: u32,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.iter().find(|b| b.handle == handle)
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.handle == handle)
    }

    /// Pin or unpin a body (pointer drag)
    pub fn set_pinned(&mut self, handle: BodyHandle, pinned: bool) {
        if let Some(body) = self.get_mut(handle) {
            body.pinned = pinned;
        }
    }

    /// Push `index` out of every static body it overlaps
    fn resolve_static_contacts(&mut self, index: usize) {
        for other in 0..self.bodies.len() {
            if other == index || !self.bodies[other].is_static {
                continue;
            }
            let contact = body_collision(&self.bodies[index], &self.bodies[other]);
            if !contact.hit {
                continue;
            }
            let body = &mut self.bodies[index];
            let correction = (contact.penetration - CONTACT_SLOP).max(0.0);
            body.position += contact.normal * correction;
            body.velocity = remove_inbound_velocity(body.velocity, contact.normal);
        }
    }
}

impl PhysicsWorld for World {
    fn velocity(&self, handle: BodyHandle) -> Option<DVec2> {
        self.get(handle).map(|b| b.velocity)
    }

    fn speed(&self, handle: BodyHandle) -> Option<f64> {
        self.get(handle).map(Body::speed)
    }

    fn set_velocity(&mut self, handle: BodyHandle, velocity: DVec2) {
        if let Some(body) = self.get_mut(handle) {
            body.velocity = velocity;
        }
    }

    fn set_position(&mut self, handle: BodyHandle, position: DVec2) {
        if let Some(body) = self.get_mut(handle) {
            body.position = position;
        }
    }

    fn set_angle(&mut self, handle: BodyHandle, angle: f64) {
        if let Some(body) = self.get_mut(handle) {
            body.angle = angle;
        }
    }

    fn set_angular_speed(&mut self, handle: BodyHandle, speed: f64) {
        if let Some(body) = self.get_mut(handle) {
            body.angular_speed = speed;
        }
    }

    fn collides(&self, a: BodyHandle, b: BodyHandle) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(a), Some(b)) => body_collision(a, b).hit,
            _ => false,
        }
    }

    fn clear(&mut self) {
        self.bodies.clear();
    }

    fn add(&mut self, mut body: Body) -> BodyHandle {
        self.next_id += 1;
        body.handle = BodyHandle(self.next_id);
        let handle = body.handle;
        self.bodies.push(body);
        handle
    }

    fn step(&mut self, dt: f64) {
        // Damping is specified per 60 Hz step
        let steps = dt * 60.0;
        for index in 0..self.bodies.len() {
            let body = &mut self.bodies[index];
            if body.is_static || body.pinned {
                continue;
            }
            body.velocity *= (1.0 - body.friction_air).powf(steps);
            body.position += body.velocity * dt;
            body.angle += body.angular_speed * dt;
            self.resolve_static_contacts(index);
        }
    }
}
