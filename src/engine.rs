use tracing::info;

use crate::{
    diagnostics::Diagnostic,
    errors::Result,
    simulation::{Simulation, SimulationView},
};

pub trait TerminationCondition {
    /// Whether the simulation should be advanced for another cycle.
    fn should_continue(&self, sim: &dyn SimulationView) -> bool;
}

/// Runs until `t_end` is reached, or for at most `max_cycles` cycles.
#[derive(Debug, Clone, Copy)]
pub struct SafeTimeTermination {
    t_end: f64,
    max_cycles: usize,
}

impl SafeTimeTermination {
    pub fn new(t_end: f64, max_cycles: usize) -> Self {
        Self { t_end, max_cycles }
    }
}

impl TerminationCondition for SafeTimeTermination {
    fn should_continue(&self, sim: &dyn SimulationView) -> bool {
        sim.time() < self.t_end && sim.cycle() < self.max_cycles
    }
}

/// Advance `sim` until `termination` says otherwise, running `diagnostics` after
/// every cycle.
///
/// The first error (of the physics or of a diagnostic) aborts the run. The
/// diagnostics are not finalized here, that is the responsibility of their owner.
pub fn main_loop<S: Simulation>(
    sim: &mut S,
    termination: &dyn TerminationCondition,
    diagnostics: &mut dyn Diagnostic,
    status_interval: usize,
) -> Result<()> {
    info!(time = sim.time(), cycle = sim.cycle(), "Starting main loop");
    while termination.should_continue(&*sim) {
        sim.time_advance()?;
        diagnostics.observe(&*sim)?;
        if status_interval > 0 && sim.cycle() % status_interval == 0 {
            info!(time = sim.time(), cycle = sim.cycle(), "Status");
        }
    }
    info!(time = sim.time(), cycle = sim.cycle(), "Finished main loop");
    Ok(())
}
