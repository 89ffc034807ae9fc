use super::{Diagnostic, Trigger};
use crate::{
    errors::Result,
    simulation::SimulationView,
    snapshot::{Rubric, SnapshotWriter},
};

/// Writes a numbered snapshot every time its trigger fires.
pub struct ConsecutiveSnapshots {
    trigger: Box<dyn Trigger>,
    rubric: Rubric,
    writer: Box<dyn SnapshotWriter>,
    num_snapshots: usize,
}

impl ConsecutiveSnapshots {
    pub fn new(trigger: Box<dyn Trigger>, rubric: Rubric, writer: Box<dyn SnapshotWriter>) -> Self {
        Self {
            trigger,
            rubric,
            writer,
            num_snapshots: 0,
        }
    }

    pub fn num_snapshots(&self) -> usize {
        self.num_snapshots
    }
}

impl Diagnostic for ConsecutiveSnapshots {
    fn observe(&mut self, sim: &dyn SimulationView) -> Result<()> {
        if self.trigger.decide(sim)? {
            let path = self.rubric.path(self.num_snapshots);
            self.writer.write_snapshot(sim, &path)?;
            self.num_snapshots += 1;
        }
        Ok(())
    }
}
