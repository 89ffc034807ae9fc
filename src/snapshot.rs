use std::{
    fs,
    path::{Path, PathBuf},
};

use glam::DVec2;
use tracing::info;

use crate::{
    errors::{CraterError, Result},
    macros::{write_attr, write_cell_dataset},
    simulation::{checked_state, ComputationalCell, SimulationView},
};

/// Persists the full state of a simulation.
pub trait SnapshotWriter {
    fn write_snapshot(&self, sim: &dyn SimulationView, path: &Path) -> Result<()>;
}

/// Builds numbered file names: `{prefix}{index}{suffix}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rubric {
    prefix: String,
    suffix: String,
}

impl Rubric {
    pub fn new(prefix: &str, suffix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        }
    }

    pub fn path(&self, index: usize) -> PathBuf {
        PathBuf::from(format!("{}{}{}", self.prefix, index, self.suffix))
    }
}

/// Writes snapshots in hdf5 format.
///
/// The `Header` group holds the `Time`, `Cycle` and `NumCells` attributes, the
/// `Cells` group one dataset per quantity, index aligned with `Coordinates`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Hdf5SnapshotWriter;

impl SnapshotWriter for Hdf5SnapshotWriter {
    fn write_snapshot(&self, sim: &dyn SimulationView, path: &Path) -> Result<()> {
        let (cells, mesh_points) = checked_state(sim)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(CraterError::io(parent))?;
            }
        }

        let file = hdf5::File::create(path)?;

        let header = file.create_group("Header")?;
        write_attr!(header, "Time", sim.time())?;
        write_attr!(header, "Cycle", sim.cycle() as u64)?;
        write_attr!(header, "NumCells", cells.len() as u64)?;

        let group = file.create_group("Cells")?;
        write_cell_dataset!(group, "Coordinates", mesh_points, |p: &DVec2| p.to_array())?;
        write_cell_dataset!(group, "Density", cells, |c: &ComputationalCell| c.density)?;
        write_cell_dataset!(group, "Pressure", cells, |c: &ComputationalCell| c.pressure)?;
        write_cell_dataset!(group, "Velocities", cells, |c: &ComputationalCell| c
            .velocity
            .to_array())?;

        file.close()?;
        info!(path = %path.display(), cycle = sim.cycle(), "Wrote snapshot");
        Ok(())
    }
}
