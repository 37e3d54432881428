//! Deterministic simulation module
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - Simulated time, never wall-clock time
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod geometry;
pub mod kinematics;
pub mod state;
pub mod tick;
pub mod world;

pub use body::{Body, BodyHandle};
pub use collision::{CollisionResult, body_collision, polygon_collision};
pub use geometry::PlaneGeometry;
pub use kinematics::InclineForces;
pub use state::{Grab, PeakReading, Phase, SimContext, SimEvent};
pub use tick::{SimCommand, dispatch, is_dragging, tick};
pub use world::{PhysicsWorld, World};
