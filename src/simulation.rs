//! Read only view on the state of a running simulation.
//!
//! The hydrodynamics itself (tessellation, Riemann solver, time integration) lives
//! in an external engine, which only needs to implement [`Simulation`] to be driven
//! by [`crate::main_loop`] and inspected by the diagnostics.

use glam::DVec2;

use crate::errors::{CraterError, Result};

/// Primitive hydrodynamic quantities of a single cell.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ComputationalCell {
    pub density: f64,
    pub pressure: f64,
    pub velocity: DVec2,
}

impl ComputationalCell {
    pub fn new(density: f64, pressure: f64, velocity: DVec2) -> Self {
        Self {
            density,
            pressure,
            velocity,
        }
    }

    /// Logarithm of the entropic function `P / rho^gamma`.
    pub fn entropy_proxy(&self, gamma: f64) -> f64 {
        self.pressure.log10() - gamma * self.density.log10()
    }
}

pub trait SimulationView {
    /// The cells, index aligned with [`SimulationView::mesh_points`].
    fn cells(&self) -> &[ComputationalCell];

    fn mesh_points(&self) -> &[DVec2];

    fn time(&self) -> f64;

    fn cycle(&self) -> usize;
}

/// A simulation that can be advanced in time by the driver loop.
pub trait Simulation: SimulationView {
    fn time_advance(&mut self) -> Result<()>;
}

/// Returns the cells and mesh points of `sim`, checking that they can be used.
pub fn checked_state(sim: &dyn SimulationView) -> Result<(&[ComputationalCell], &[DVec2])> {
    let cells = sim.cells();
    let mesh_points = sim.mesh_points();
    if cells.is_empty() {
        return Err(CraterError::StateRead(format!(
            "Simulation has no cells at cycle {}",
            sim.cycle()
        )));
    }
    if cells.len() != mesh_points.len() {
        return Err(CraterError::StateRead(format!(
            "Found {} cells but {} mesh points at cycle {}",
            cells.len(),
            mesh_points.len(),
            sim.cycle()
        )));
    }
    Ok((cells, mesh_points))
}

/// Owned snapshot of a simulation state.
#[derive(Debug, Default, Clone)]
pub struct SimulationState {
    pub cells: Vec<ComputationalCell>,
    pub mesh_points: Vec<DVec2>,
    pub time: f64,
    pub cycle: usize,
}

impl SimulationState {
    pub fn new(cells: Vec<ComputationalCell>, mesh_points: Vec<DVec2>, time: f64, cycle: usize) -> Self {
        Self {
            cells,
            mesh_points,
            time,
            cycle,
        }
    }
}

impl SimulationView for SimulationState {
    fn cells(&self) -> &[ComputationalCell] {
        &self.cells
    }

    fn mesh_points(&self) -> &[DVec2] {
        &self.mesh_points
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn cycle(&self) -> usize {
        self.cycle
    }
}
