use std::path::PathBuf;

use tracing::{error, info};

use crate::{
    config::CraterConfig,
    diagnostics::{
        ConsecutiveSnapshots, CraterSizeHistory, Diagnostic, MultipleDiagnostics, WriteCycle,
        WriteTime, ZenoIntervals,
    },
    engine::{main_loop, SafeTimeTermination},
    errors::Result,
    geometry::RightRectangle,
    initial_conditions::impact_initial_conditions,
    simulation::{Simulation, SimulationState},
    snapshot::{Rubric, SnapshotWriter},
};

/// Everything needed to run the impact problem with an external hydro engine.
pub struct SimSetup {
    domain: RightRectangle,
    initial_state: SimulationState,
    diagnostics: MultipleDiagnostics,
    termination: SafeTimeTermination,
    status_interval: usize,
    writer: Box<dyn SnapshotWriter>,
    initial_snapshot: PathBuf,
    final_snapshot: PathBuf,
}

impl SimSetup {
    /// Seeds the mesh, computes the initial conditions and registers the diagnostics.
    ///
    /// Snapshots requested by the trigger, as well as the initial and final
    /// snapshots, are written with `writer`.
    pub fn from_config<W: SnapshotWriter + Clone + 'static>(
        config: &CraterConfig,
        writer: W,
    ) -> Result<Self> {
        let domain = RightRectangle::centered(config.domain.width)?;
        let strategy = config.seeding.strategy()?;
        let mesh_points = strategy.seed_points(&domain)?;
        info!(
            strategy = strategy.label(),
            num_points = mesh_points.len(),
            "Generated seed points"
        );
        let cells = impact_initial_conditions(&mesh_points);
        let initial_state = SimulationState::new(cells, mesh_points, 0., 0);

        let trigger_cfg = &config.trigger;
        let trigger = ZenoIntervals::new(
            trigger_cfg.generations,
            trigger_cfg.q,
            trigger_cfg.pressure_threshold,
            trigger_cfg.initial_separation,
        )?;
        let diagnostics_cfg = &config.diagnostics;
        let mut diagnostics = MultipleDiagnostics::default();
        diagnostics.push(Box::new(ConsecutiveSnapshots::new(
            Box::new(trigger),
            Rubric::new(&diagnostics_cfg.snapshot_prefix, &diagnostics_cfg.snapshot_suffix),
            Box::new(writer.clone()),
        )));
        diagnostics.push(Box::new(CraterSizeHistory::new(&diagnostics_cfg.crater_history)?));
        diagnostics.push(Box::new(WriteTime::new(&diagnostics_cfg.time_file)));
        diagnostics.push(Box::new(WriteCycle::new(&diagnostics_cfg.cycle_file)));

        Ok(Self {
            domain,
            initial_state,
            diagnostics,
            termination: SafeTimeTermination::new(
                config.time_integration.t_end,
                config.time_integration.max_cycles,
            ),
            status_interval: config.time_integration.status_interval,
            writer: Box::new(writer),
            initial_snapshot: PathBuf::from(&diagnostics_cfg.initial_snapshot),
            final_snapshot: PathBuf::from(&diagnostics_cfg.final_snapshot),
        })
    }

    pub fn domain(&self) -> &RightRectangle {
        &self.domain
    }

    /// Seed points and impact initial conditions, at time 0 and cycle 0.
    pub fn initial_state(&self) -> &SimulationState {
        &self.initial_state
    }

    pub fn diagnostics(&self) -> &MultipleDiagnostics {
        &self.diagnostics
    }

    /// Write the initial state, for the engine to build its mesh from.
    pub fn write_initial_snapshot(&self) -> Result<()> {
        info!(path = ?self.initial_snapshot, "Writing initial snapshot");
        self.writer
            .write_snapshot(&self.initial_state, &self.initial_snapshot)
    }

    /// Run `sim` to completion, write the final snapshot and finalize the diagnostics.
    ///
    /// The final snapshot is only written when the run succeeds. Failing to
    /// finalize the diagnostics is only logged, the returned result is that of
    /// the run itself.
    pub fn run<S: Simulation>(&mut self, sim: &mut S) -> Result<()> {
        let result = main_loop(
            sim,
            &self.termination,
            &mut self.diagnostics,
            self.status_interval,
        )
        .and_then(|()| {
            info!(path = ?self.final_snapshot, cycle = sim.cycle(), "Writing final snapshot");
            self.writer.write_snapshot(&*sim, &self.final_snapshot)
        });
        if let Err(e) = self.diagnostics.finalize() {
            error!(error = %e, "Failed to finalize diagnostics");
        }
        result
    }
}
