//! Shape generation for the 2D view
//!
//! Turns world bodies into colored outlines in canvas coordinates.

use glam::DVec2;

use crate::sim::{Body, SimContext};

/// RGBA color, components in 0-1
pub type Color = [f64; 4];

/// Colors for scene elements
pub mod colors {
    use super::Color;

    pub const PLANE: Color = [0.55, 0.45, 0.35, 1.0];
    pub const PLANE_EDGE: Color = [0.3, 0.25, 0.2, 1.0];
    pub const BLOCK_EDGE: Color = [0.1, 0.1, 0.1, 1.0];
    pub const VELOCITY: Color = [0.9, 0.2, 0.2, 1.0];
    pub const BACKGROUND: Color = [0.96, 0.96, 0.98, 1.0];
}

/// Speed at which the block color saturates to red
pub const BLOCK_COLOR_MAX_SPEED: f64 = 60.0;

/// Arrow length per unit of speed
pub const VELOCITY_ARROW_SCALE: f64 = 2.0;

/// A closed polygon to fill and stroke
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub outline: Vec<DVec2>,
    pub fill: Color,
    pub stroke: Color,
}

/// A line segment with an arrow head at `to`
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub from: DVec2,
    pub to: DVec2,
    pub color: Color,
}

/// Everything drawn in one frame
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub shapes: Vec<Shape>,
    pub arrows: Vec<Arrow>,
}

/// Interpolate color based on speed (slow=blue, medium=green, fast=red/orange)
pub fn speed_color(speed: f64) -> Color {
    let t = (speed / BLOCK_COLOR_MAX_SPEED).clamp(0.0, 1.0);

    let (r, g, b) = if t < 0.5 {
        // Blue to green
        let u = t / 0.5;
        (0.2, 0.4 + 0.4 * u, 1.0 - 0.6 * u)
    } else {
        // Green to red/orange
        let u = (t - 0.5) / 0.5;
        (0.2 + 0.8 * u, 0.8 - 0.5 * u, 0.4 - 0.2 * u)
    };

    [r, g, b, 1.0]
}

fn body_shape(body: &Body, fill: Color, stroke: Color) -> Shape {
    Shape {
        outline: body.world_vertices(),
        fill,
        stroke,
    }
}

/// Build the frame's shapes from the simulation state
pub fn scene(ctx: &SimContext) -> Scene {
    let mut scene = Scene::default();

    if let Some(plane) = ctx.plane_body() {
        scene
            .shapes
            .push(body_shape(plane, colors::PLANE, colors::PLANE_EDGE));
    }

    if let Some(block) = ctx.block() {
        scene.shapes.push(body_shape(
            block,
            speed_color(block.speed()),
            colors::BLOCK_EDGE,
        ));
        if block.speed() > 0.0 {
            scene.arrows.push(Arrow {
                from: block.position,
                to: block.position + block.velocity * VELOCITY_ARROW_SCALE,
                color: colors::VELOCITY,
            });
        }
    }

    scene
}

/// CSS color string for a canvas fill or stroke style
pub fn css_color(color: Color) -> String {
    let [r, g, b, a] = color;
    format!(
        "rgba({}, {}, {}, {})",
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
        a
    )
}

/// Map a canvas-space point (CSS pixels) into world coordinates
pub fn screen_to_world(point: DVec2, canvas_size: DVec2) -> DVec2 {
    let world = DVec2::new(crate::consts::CANVAS_WIDTH, crate::consts::CANVAS_HEIGHT);
    point * world / canvas_size.max(DVec2::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimParams;

    #[test]
    fn test_speed_color_endpoints() {
        assert_eq!(speed_color(0.0), [0.2, 0.4, 1.0, 1.0]);
        let fast = speed_color(BLOCK_COLOR_MAX_SPEED * 2.0);
        assert!((fast[0] - 1.0).abs() < 1e-9);
        assert!(fast[2] < 0.3);
    }

    #[test]
    fn test_scene_has_plane_and_block() {
        let ctx = crate::sim::SimContext::new(SimParams::default());
        let scene = scene(&ctx);
        assert_eq!(scene.shapes.len(), 2);
        assert_eq!(scene.shapes[0].outline.len(), 3);
        assert_eq!(scene.shapes[1].outline.len(), 4);
        // Block at rest: no velocity arrow
        assert!(scene.arrows.is_empty());
    }

    #[test]
    fn test_css_color() {
        assert_eq!(css_color([1.0, 0.0, 0.5, 1.0]), "rgba(255, 0, 128, 1)");
    }

    #[test]
    fn test_screen_to_world_scales() {
        let world = screen_to_world(DVec2::new(250.0, 150.0), DVec2::new(500.0, 300.0));
        assert_eq!(world, DVec2::new(500.0, 300.0));
    }
}
