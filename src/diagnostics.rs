//! Per cycle diagnostics and triggers.
//!
//! Diagnostics observe the simulation after every cycle without modifying it, but
//! may accumulate their own internal state (time series, counters) while doing so.
//! Triggers decide whether some external action, such as writing a snapshot,
//! should take place in the current cycle.

use tracing::error;

use crate::{errors::Result, simulation::SimulationView};

pub use consecutive_snapshots::ConsecutiveSnapshots;
pub use crater_history::{CraterSample, CraterSizeHistory};
pub use write_number::{WriteCycle, WriteTime};
pub use zeno_intervals::ZenoIntervals;

mod consecutive_snapshots;
mod crater_history;
mod write_number;
mod zeno_intervals;

/// Adiabatic index used by the diagnostics to compute entropies.
pub const GAMMA: f64 = 5. / 3.;

pub trait Diagnostic {
    /// Inspect the state of the simulation at the end of a cycle.
    fn observe(&mut self, sim: &dyn SimulationView) -> Result<()>;

    /// Flush any accumulated output. Calling this more than once has no further effect.
    fn finalize(&mut self) -> Result<()> {
        Ok(())
    }
}

pub trait Trigger {
    /// Returns whether the external action should take place in this cycle.
    fn decide(&mut self, sim: &dyn SimulationView) -> Result<bool>;
}

/// Ordered collection of diagnostics, run one after the other.
#[derive(Default)]
pub struct MultipleDiagnostics {
    diagnostics: Vec<Box<dyn Diagnostic>>,
    finalized: bool,
}

impl MultipleDiagnostics {
    pub fn new(diagnostics: Vec<Box<dyn Diagnostic>>) -> Self {
        Self {
            diagnostics,
            finalized: false,
        }
    }

    /// Append a diagnostic, it will be run after all previously added ones.
    pub fn push(&mut self, diagnostic: Box<dyn Diagnostic>) {
        self.diagnostics.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl Diagnostic for MultipleDiagnostics {
    /// Runs all diagnostics in registration order, stops at the first failure.
    fn observe(&mut self, sim: &dyn SimulationView) -> Result<()> {
        for diagnostic in self.diagnostics.iter_mut() {
            diagnostic.observe(sim)?;
        }
        Ok(())
    }

    /// Finalizes all diagnostics in registration order, returns the first error.
    fn finalize(&mut self) -> Result<()> {
        if self.finalized {
            return Ok(());
        }
        self.finalized = true;
        let mut result = Ok(());
        for diagnostic in self.diagnostics.iter_mut() {
            if let Err(e) = diagnostic.finalize() {
                if result.is_ok() {
                    result = Err(e);
                } else {
                    error!(error = %e, "Failed to finalize diagnostic");
                }
            }
        }
        result
    }
}

impl Drop for MultipleDiagnostics {
    fn drop(&mut self) {
        if let Err(e) = self.finalize() {
            error!(error = %e, "Failed to finalize diagnostics");
        }
    }
}
