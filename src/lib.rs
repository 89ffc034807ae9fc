//! Setup and diagnostics for moving mesh simulations of a vertical impact.
//!
//! The library seeds the computational mesh with a graded point distribution
//! (fine near the impact site, coarsening outwards), and provides the per cycle
//! diagnostics and triggers that track the crater front and decide when to write
//! snapshots. The hydrodynamics engine itself is external: it only needs to
//! implement [`Simulation`] to be driven by [`main_loop`].

pub use config::CraterConfig;
pub use diagnostics::{
    ConsecutiveSnapshots, CraterSample, CraterSizeHistory, Diagnostic, MultipleDiagnostics,
    Trigger, WriteCycle, WriteTime, ZenoIntervals,
};
pub use engine::{main_loop, SafeTimeTermination, TerminationCondition};
pub use errors::{ConfigError, CraterError, Result};
pub use geometry::{clip_grid, RightRectangle};
pub use initial_conditions::impact_initial_conditions;
pub use setup::SimSetup;
pub use simulation::{checked_state, ComputationalCell, Simulation, SimulationState, SimulationView};
pub use snapshot::{Hdf5SnapshotWriter, Rubric, SnapshotWriter};

/// Two dimensional vector type used for all positions and velocities.
pub type Vector2D = glam::DVec2;

pub mod config;
pub mod diagnostics;
mod engine;
mod errors;
mod geometry;
mod initial_conditions;
mod macros;
pub mod seed_points;
mod setup;
mod simulation;
mod snapshot;
mod utils;
