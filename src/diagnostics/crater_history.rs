use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use glam::DVec2;
use tracing::{error, info};

use super::{Diagnostic, GAMMA};
use crate::{
    errors::{CraterError, Result},
    simulation::{checked_state, ComputationalCell, SimulationView},
};

/// The crater front at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CraterSample {
    pub time: f64,
    pub radius: f64,
    pub speed: f64,
    pub position: DVec2,
}

impl CraterSample {
    fn new(time: f64, cell: &ComputationalCell, position: DVec2) -> Self {
        Self {
            time,
            radius: position.length(),
            speed: cell.velocity.length(),
            position,
        }
    }
}

/// Index of the deepest cell below the surface with a non negative entropy.
///
/// Cells are scanned in order, a later cell at the same depth wins. When no
/// cell qualifies, index 0 is returned.
fn crater_front(cells: &[ComputationalCell], mesh_points: &[DVec2]) -> usize {
    let mut front = 0;
    let mut min_y = 0.;
    for (i, (cell, position)) in cells.iter().zip(mesh_points.iter()).enumerate() {
        if position.y > min_y || cell.entropy_proxy(GAMMA) < 0. {
            continue;
        }
        front = i;
        min_y = position.y;
    }
    front
}

/// Records the position and speed of the crater front after every cycle.
///
/// The output file is created when this diagnostic is constructed, the samples
/// are written to it once, when it is finalized (or dropped). Every line reads
/// `time radius speed x y`.
pub struct CraterSizeHistory {
    path: PathBuf,
    file: Option<File>,
    samples: Vec<CraterSample>,
}

impl CraterSizeHistory {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(CraterError::io(&path))?;
        Ok(Self {
            path,
            file: Some(file),
            samples: vec![],
        })
    }

    pub fn samples(&self) -> &[CraterSample] {
        &self.samples
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, file: File) -> std::io::Result<()> {
        let mut f = BufWriter::new(file);
        for sample in self.samples.iter() {
            writeln!(
                f,
                "{} {} {} {} {}",
                sample.time, sample.radius, sample.speed, sample.position.x, sample.position.y
            )?;
        }
        f.flush()
    }
}

impl Diagnostic for CraterSizeHistory {
    fn observe(&mut self, sim: &dyn SimulationView) -> Result<()> {
        let (cells, mesh_points) = checked_state(sim)?;
        let front = crater_front(cells, mesh_points);
        self.samples
            .push(CraterSample::new(sim.time(), &cells[front], mesh_points[front]));
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let Some(file) = self.file.take() else {
            return Ok(());
        };
        self.write(file).map_err(CraterError::io(&self.path))?;
        info!(
            path = %self.path.display(),
            num_samples = self.samples.len(),
            "Wrote crater size history"
        );
        Ok(())
    }
}

impl Drop for CraterSizeHistory {
    fn drop(&mut self) {
        if let Err(e) = self.finalize() {
            error!(error = %e, "Failed to write crater size history");
        }
    }
}
