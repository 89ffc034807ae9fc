use std::{
    fmt::Display,
    fs,
    path::{Path, PathBuf},
};

use super::Diagnostic;
use crate::{
    errors::{CraterError, Result},
    simulation::SimulationView,
};

fn write_number<T: Display>(value: T, path: &Path) -> Result<()> {
    fs::write(path, format!("{value}\n")).map_err(CraterError::io(path))
}

/// Overwrites a file with the current cycle number after every cycle.
pub struct WriteCycle {
    path: PathBuf,
}

impl WriteCycle {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Diagnostic for WriteCycle {
    fn observe(&mut self, sim: &dyn SimulationView) -> Result<()> {
        write_number(sim.cycle(), &self.path)
    }
}

/// Overwrites a file with the current simulation time after every cycle.
pub struct WriteTime {
    path: PathBuf,
}

impl WriteTime {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Diagnostic for WriteTime {
    fn observe(&mut self, sim: &dyn SimulationView) -> Result<()> {
        write_number(sim.time(), &self.path)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::simulation::SimulationState;

    #[test]
    fn test_write_cycle_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cycle.txt");
        let mut write_cycle = WriteCycle::new(&path);

        let mut state = SimulationState::default();
        state.cycle = 120;
        write_cycle.observe(&state).unwrap();
        state.cycle = 7;
        write_cycle.observe(&state).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "7\n");
    }

    #[test]
    fn test_write_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("time.txt");
        let mut write_time = WriteTime::new(&path);

        let mut state = SimulationState::default();
        state.time = 0.0125;
        write_time.observe(&state).unwrap();

        let time: f64 = fs::read_to_string(&path).unwrap().trim().parse().unwrap();
        assert_eq!(time, 0.0125);
    }

    #[test]
    fn test_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut write_cycle = WriteCycle::new(dir.path().join("missing").join("cycle.txt"));
        assert!(matches!(
            write_cycle.observe(&SimulationState::default()),
            Err(CraterError::Io { .. })
        ));
    }
}
