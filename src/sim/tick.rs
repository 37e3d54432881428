//! Fixed timestep simulation tick
//!
//! Each tick the incline updater overrides the block's velocity before the
//! world integrates: free fall in the air, a kinematic slide on the plane.
//! Commands from the controls are dispatched between ticks.

use glam::DVec2;

use super::kinematics::{free_fall_velocity, is_stopped, sliding_velocity};
use super::state::{Grab, PeakReading, Phase, SimContext, SimEvent};
use super::world::PhysicsWorld;

/// Commands from the controls and the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimCommand {
    /// Incline angle (degrees)
    SetAngle(f64),
    /// Friction coefficient as a 0-100 percentage
    SetFrictionPercent(f64),
    SetGravity(f64),
    /// Put the block back at its start position
    Reset,
    /// Pointer pressed at a world position
    Grab(DVec2),
    /// Pointer moved to a world position
    DragTo(DVec2),
    /// Pointer released
    Release,
}

/// Apply a command to the context.
///
/// Every parameter change rebuilds the world and restarts the phase.
pub fn dispatch(ctx: &mut SimContext, command: SimCommand) -> Vec<SimEvent> {
    match command {
        SimCommand::SetAngle(degrees) => {
            ctx.params.set_angle(degrees);
            reset(ctx)
        }
        SimCommand::SetFrictionPercent(percent) => {
            ctx.params.set_friction_percent(percent);
            reset(ctx)
        }
        SimCommand::SetGravity(gravity) => {
            ctx.params.set_gravity(gravity);
            reset(ctx)
        }
        SimCommand::Reset => reset(ctx),
        SimCommand::Grab(point) => {
            grab(ctx, point);
            Vec::new()
        }
        SimCommand::DragTo(point) => {
            if let Some(grab) = ctx.grab {
                ctx.world.set_position(ctx.block_body, point + grab.offset);
            }
            Vec::new()
        }
        SimCommand::Release => {
            let mut events = Vec::new();
            if ctx.grab.take().is_some() {
                ctx.world.set_pinned(ctx.block_body, false);
                ctx.world.set_velocity(ctx.block_body, DVec2::ZERO);
                // Wherever it was dropped, the block starts over in free fall
                set_phase(ctx, Phase::Airborne, &mut events);
                log::debug!("Block released");
            }
            events
        }
    }
}

/// Whether the block will be held once `queued` is dispatched.
///
/// Pointer motion arriving before a queued grab lands still drags the block.
pub fn is_dragging(ctx: &SimContext, queued: &[SimCommand]) -> bool {
    let latest = queued
        .iter()
        .rev()
        .find(|c| matches!(c, SimCommand::Grab(_) | SimCommand::Release));
    match latest {
        Some(SimCommand::Grab(_)) => true,
        Some(_) => false,
        None => ctx.grab.is_some(),
    }
}

fn reset(ctx: &mut SimContext) -> Vec<SimEvent> {
    ctx.rebuild();
    log::info!(
        "Reset: angle {}°, friction {}, gravity {}",
        ctx.params.angle_deg,
        ctx.params.friction,
        ctx.params.gravity
    );
    vec![SimEvent::ParamsChanged(ctx.params)]
}

fn grab(ctx: &mut SimContext, point: DVec2) {
    let Some(block) = ctx.block() else {
        return;
    };
    if !block.contains_point(point) {
        return;
    }
    let offset = block.position - point;
    ctx.grab = Some(Grab { offset });
    ctx.world.set_pinned(ctx.block_body, true);
    ctx.world.set_velocity(ctx.block_body, DVec2::ZERO);
    log::debug!("Block grabbed at ({:.1}, {:.1})", point.x, point.y);
}

fn set_phase(ctx: &mut SimContext, to: Phase, events: &mut Vec<SimEvent>) {
    let from = ctx.phase;
    if from == to {
        return;
    }
    ctx.phase = to;
    log::info!("Block {} -> {} at t={:.3}s", from.as_str(), to.as_str(), ctx.elapsed);
    events.push(SimEvent::PhaseChanged { from, to });
}

/// Advance the simulation by one fixed timestep
pub fn tick(ctx: &mut SimContext, dt: f64) -> Vec<SimEvent> {
    let mut events = Vec::new();

    // A held block is frozen, and so is its clock
    if ctx.grab.is_none() {
        ctx.elapsed += dt;
        update_block(ctx, &mut events);
    }

    ctx.world.step(dt);
    events
}

/// Override the block's velocity for this tick
fn update_block(ctx: &mut SimContext, events: &mut Vec<SimEvent>) {
    let block = ctx.block_body;
    let Some(velocity) = ctx.world.velocity(block) else {
        return;
    };

    if ctx.phase == Phase::Stopped {
        ctx.world.set_velocity(block, DVec2::ZERO);
        return;
    }

    if !ctx.world.collides(block, ctx.plane_body) {
        set_phase(ctx, Phase::Airborne, events);
        let falling = free_fall_velocity(velocity, ctx.params.gravity, ctx.elapsed);
        ctx.world.set_velocity(block, falling);
        return;
    }

    if is_stopped(velocity) {
        ctx.world.set_velocity(block, DVec2::ZERO);
        set_phase(ctx, Phase::Stopped, events);
        return;
    }
    set_phase(ctx, Phase::Sliding, events);

    let forces = ctx.forces();
    let speed = ctx.world.speed(block).unwrap_or_default();
    if speed > ctx.top_speed {
        ctx.top_speed = speed;
        events.push(SimEvent::PeakSpeed(PeakReading {
            elapsed: ctx.elapsed,
            speed,
            forces,
            params: ctx.params,
        }));
    }

    if let Some(sliding) = sliding_velocity(&forces, ctx.params.angle_rad(), ctx.elapsed) {
        ctx.world.set_velocity(block, sliding);
    }
}
