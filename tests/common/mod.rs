use std::{
    cell::RefCell,
    path::{Path, PathBuf},
    rc::Rc,
};

use crater_rs::{
    ComputationalCell, CraterError, Result, Simulation, SimulationState, SimulationView,
    SnapshotWriter, Vector2D,
};

/// Stand-in for the hydro engine: every cell simply drifts with its velocity.
pub struct DriftingEngine {
    state: SimulationState,
    dt: f64,
    fail_at: Option<usize>,
}

impl DriftingEngine {
    pub fn new(cells: Vec<ComputationalCell>, mesh_points: Vec<Vector2D>, dt: f64) -> Self {
        Self {
            state: SimulationState::new(cells, mesh_points, 0., 0),
            dt,
            fail_at: None,
        }
    }

    pub fn from_state(state: SimulationState, dt: f64) -> Self {
        Self {
            state,
            dt,
            fail_at: None,
        }
    }

    /// Fail when trying to advance to cycle `cycle`.
    pub fn failing_at(mut self, cycle: usize) -> Self {
        self.fail_at = Some(cycle);
        self
    }
}

impl SimulationView for DriftingEngine {
    fn cells(&self) -> &[ComputationalCell] {
        &self.state.cells
    }

    fn mesh_points(&self) -> &[Vector2D] {
        &self.state.mesh_points
    }

    fn time(&self) -> f64 {
        self.state.time
    }

    fn cycle(&self) -> usize {
        self.state.cycle
    }
}

impl Simulation for DriftingEngine {
    fn time_advance(&mut self) -> Result<()> {
        if self.fail_at == Some(self.state.cycle + 1) {
            return Err(CraterError::StateRead(format!(
                "Engine failure in cycle {}",
                self.state.cycle + 1
            )));
        }
        let dt = self.dt;
        for (cell, position) in self
            .state
            .cells
            .iter()
            .zip(self.state.mesh_points.iter_mut())
        {
            *position += dt * cell.velocity;
        }
        self.state.time += dt;
        self.state.cycle += 1;
        Ok(())
    }
}

/// Remembers the requested snapshots instead of writing them.
#[derive(Clone, Default)]
pub struct RecordingWriter {
    pub written: Rc<RefCell<Vec<(PathBuf, usize)>>>,
}

impl SnapshotWriter for RecordingWriter {
    fn write_snapshot(&self, sim: &dyn SimulationView, path: &Path) -> Result<()> {
        self.written
            .borrow_mut()
            .push((path.to_path_buf(), sim.cycle()));
        Ok(())
    }
}

pub fn read_columns(path: &Path) -> Vec<Vec<f64>> {
    std::fs::read_to_string(path)
        .expect("Error reading output file!")
        .lines()
        .map(|line| {
            line.split(' ')
                .map(|value| value.parse::<f64>().expect("Error parsing value!"))
                .collect()
        })
        .collect()
}
