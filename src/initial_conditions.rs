use glam::DVec2;
use rayon::prelude::*;

use crate::simulation::ComputationalCell;

/// Density of the near vacuum above the surface.
const AMBIENT_DENSITY: f64 = 1e-6;
const AMBIENT_PRESSURE: f64 = 1e-6;
/// Pressure of the hot spot representing the deposited impact energy.
const IMPACT_PRESSURE: f64 = 1e4;
const IMPACT_RADIUS: f64 = 0.1;
const IMPACT_POSITION: DVec2 = DVec2::new(0., -1.);
/// Everything above this height is treated as part of the atmosphere.
const SURFACE_HEIGHT: f64 = -1e-3;

fn impact(position: DVec2) -> ComputationalCell {
    let density = if position.y > SURFACE_HEIGHT {
        AMBIENT_DENSITY
    } else {
        (-position.y).powf(1.5)
    };
    let pressure = if (position - IMPACT_POSITION).length() < IMPACT_RADIUS {
        IMPACT_PRESSURE
    } else {
        AMBIENT_PRESSURE
    };
    ComputationalCell::new(density, pressure, DVec2::ZERO)
}

/// Initial state of the impact problem at the given mesh points.
///
/// A stratified half space (density `(-y)^1.5`) below a near vacuum, at rest, with
/// a small high pressure region buried at depth 1.
pub fn impact_initial_conditions(mesh_points: &[DVec2]) -> Vec<ComputationalCell> {
    mesh_points.par_iter().map(|position| impact(*position)).collect()
}
