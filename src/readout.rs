//! Readout text shown next to the simulation
//!
//! Each readout is an HTML fragment keyed by the id of the element it fills.
//! Parameter readouts refresh whenever the parameters change; formula
//! readouts refresh on every new top speed.

use crate::SimParams;
use crate::round_to_decimal;
use crate::sim::PeakReading;

/// Element ids of the readout targets
pub mod ids {
    pub const ANGLE: &str = "angleNum";
    pub const FRICTION: &str = "frictionNum";
    pub const GRAVITY: &str = "gravityNum";
    pub const SPEED: &str = "speed";
    pub const TIME: &str = "time";
    pub const GRAVITY_COMPONENT: &str = "acceleration";
    pub const FRICTION_FORCE: &str = "frictionEx";
    pub const NET_FORCE: &str = "netAcc";
    pub const DERIVED_TIME: &str = "calculated";
}

/// One element's new content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadoutLine {
    pub element_id: &'static str,
    pub html: String,
}

impl ReadoutLine {
    fn new(element_id: &'static str, html: String) -> Self {
        Self { element_id, html }
    }
}

/// Current parameter values
pub fn params_readout(params: &SimParams) -> Vec<ReadoutLine> {
    vec![
        ReadoutLine::new(ids::ANGLE, format!("{} <sup>o</sup>", params.angle_deg)),
        ReadoutLine::new(ids::FRICTION, format!("{}", params.friction)),
        ReadoutLine::new(ids::GRAVITY, format!("{} m/s<sup>2</sup>", params.gravity)),
    ]
}

/// Speed, time and the force breakdown at a new top speed
pub fn peak_readout(reading: &PeakReading) -> Vec<ReadoutLine> {
    let angle = reading.params.angle_deg;
    let mu = reading.params.friction;
    let g = round_to_decimal(reading.params.gravity, 2);
    let along = round_to_decimal(reading.forces.along_plane, 2);
    let friction = round_to_decimal(reading.forces.friction, 2);
    let net = round_to_decimal(reading.forces.net, 2);

    vec![
        ReadoutLine::new(
            ids::SPEED,
            format!("Speed: {}m/s", round_to_decimal(reading.speed, 3)),
        ),
        ReadoutLine::new(
            ids::TIME,
            format!("Time: {}s", round_to_decimal(reading.elapsed, 3)),
        ),
        ReadoutLine::new(
            ids::GRAVITY_COMPONENT,
            format!(
                "F<sub>g</sub> || to plane : mgsin({angle}) = (1)({g})sin({angle})) = {along}N"
            ),
        ),
        ReadoutLine::new(
            ids::FRICTION_FORCE,
            format!(
                "F<sub>f</sub> : μmgcos({angle}) = ({mu})(1)({g})cos({angle})) = {friction}N"
            ),
        ),
        ReadoutLine::new(
            ids::NET_FORCE,
            format!(
                "F<sub>net</sub> = F<sub>g</sub>|| - F<sub>f</sub> = {along} - {friction} = {net}N"
            ),
        ),
        ReadoutLine::new(ids::DERIVED_TIME, derived_time(reading, net)),
    ]
}

/// Δt = v / a, or N/A when the block is not accelerating
fn derived_time(reading: &PeakReading, net: f64) -> String {
    let speed = round_to_decimal(reading.speed, 2);
    let result = match reading.expected_time() {
        Some(t) => format!("{}s", round_to_decimal(t, 3)),
        None => "N/A".to_string(),
    };
    format!("Δt = (V<sub>2</sub> - V<sub>1</sub>)/a = ({speed} - 0)/{net} = {result}")
}

/// Plain-text version of a fragment, for logs
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::InclineForces;

    fn reading(params: SimParams, speed: f64, elapsed: f64) -> PeakReading {
        PeakReading {
            elapsed,
            speed,
            forces: InclineForces::from_params(&params),
            params,
        }
    }

    fn html<'a>(lines: &'a [ReadoutLine], id: &str) -> &'a str {
        &lines.iter().find(|l| l.element_id == id).unwrap().html
    }

    #[test]
    fn test_params_readout() {
        let lines = params_readout(&SimParams::default());
        assert_eq!(html(&lines, ids::ANGLE), "45 <sup>o</sup>");
        assert_eq!(html(&lines, ids::FRICTION), "0.6");
        assert_eq!(html(&lines, ids::GRAVITY), "20 m/s<sup>2</sup>");
    }

    #[test]
    fn test_peak_readout_formulas() {
        let params = SimParams {
            angle_deg: 45.0,
            friction: 0.1,
            gravity: 20.0,
        };
        let lines = peak_readout(&reading(params, 12.7279, 1.0));

        assert_eq!(html(&lines, ids::SPEED), "Speed: 12.728m/s");
        assert_eq!(html(&lines, ids::TIME), "Time: 1s");
        assert_eq!(
            html(&lines, ids::GRAVITY_COMPONENT),
            "F<sub>g</sub> || to plane : mgsin(45) = (1)(20)sin(45)) = 14.14N"
        );
        assert_eq!(
            html(&lines, ids::FRICTION_FORCE),
            "F<sub>f</sub> : μmgcos(45) = (0.1)(1)(20)cos(45)) = 1.41N"
        );
        assert_eq!(
            html(&lines, ids::NET_FORCE),
            "F<sub>net</sub> = F<sub>g</sub>|| - F<sub>f</sub> = 14.14 - 1.41 = 12.73N"
        );
        assert_eq!(
            html(&lines, ids::DERIVED_TIME),
            "Δt = (V<sub>2</sub> - V<sub>1</sub>)/a = (12.73 - 0)/12.73 = 1s"
        );
    }

    #[test]
    fn test_derived_time_not_available_without_acceleration() {
        let params = SimParams {
            angle_deg: 30.0,
            friction: 0.6,
            gravity: 20.0,
        };
        let lines = peak_readout(&reading(params, 3.5, 0.4));
        assert!(html(&lines, ids::DERIVED_TIME).ends_with("/-0.39 = N/A"));
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("F<sub>g</sub> = 1N"), "Fg = 1N");
        assert_eq!(strip_tags("20 m/s<sup>2</sup>"), "20 m/s2");
    }
}
