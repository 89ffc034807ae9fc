use rayon::prelude::*;
use tracing::debug;

use super::Trigger;
use crate::{
    errors::{CraterError, Result},
    simulation::{checked_state, SimulationView},
};

/// Fires when the high pressure region first comes within an ever shrinking
/// distance of the surface.
///
/// Generation `k` fires as soon as any cell with a pressure above the threshold
/// lies less than `initial_separation * q^k` below `y = 0`. After
/// `generations + 1` firings the trigger never fires again.
#[derive(Debug, Clone)]
pub struct ZenoIntervals {
    generations: usize,
    q: f64,
    pressure_threshold: f64,
    initial_separation: f64,
    counter: usize,
}

impl ZenoIntervals {
    pub fn new(generations: usize, q: f64, pressure_threshold: f64, initial_separation: f64) -> Result<Self> {
        if !(q > 0. && q < 1.) {
            return Err(CraterError::InvalidParameter(format!(
                "Decay ratio q must lie in (0, 1), got {q}"
            )));
        }
        if !(initial_separation > 0.) || !initial_separation.is_finite() {
            return Err(CraterError::InvalidParameter(format!(
                "Initial separation must be positive, got {initial_separation}"
            )));
        }
        Ok(Self {
            generations,
            q,
            pressure_threshold,
            initial_separation,
            counter: 0,
        })
    }

    /// Number of times this trigger has fired.
    pub fn counter(&self) -> usize {
        self.counter
    }

    pub fn is_exhausted(&self) -> bool {
        self.counter > self.generations
    }

    /// The depth threshold for the next firing.
    pub fn current_separation(&self) -> f64 {
        self.initial_separation * self.q.powf(self.counter as f64)
    }
}

impl Trigger for ZenoIntervals {
    fn decide(&mut self, sim: &dyn SimulationView) -> Result<bool> {
        if self.is_exhausted() {
            return Ok(false);
        }
        let (cells, mesh_points) = checked_state(sim)?;
        let separation = self.current_separation();
        let pressure_threshold = self.pressure_threshold;
        let fire = cells
            .par_iter()
            .zip(mesh_points.par_iter())
            .any(|(cell, position)| cell.pressure > pressure_threshold && -position.y < separation);
        if fire {
            self.counter += 1;
            debug!(
                generation = self.counter,
                separation,
                cycle = sim.cycle(),
                "Zeno interval trigger fired"
            );
        }
        Ok(fire)
    }
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;
    use glam::DVec2;

    use super::*;
    use crate::simulation::{ComputationalCell, SimulationState};

    fn single_cell(pressure: f64, depth: f64) -> SimulationState {
        SimulationState::new(
            vec![ComputationalCell::new(1., pressure, DVec2::ZERO)],
            vec![DVec2::new(0., -depth)],
            0.,
            0,
        )
    }

    #[test]
    fn test_generations() {
        let mut trigger = ZenoIntervals::new(2, 0.5, 1., 1.).unwrap();

        assert!(trigger.decide(&single_cell(2., 0.9)).unwrap());
        assert_eq!(trigger.counter(), 1);

        // Not close enough for the second generation
        assert!(!trigger.decide(&single_cell(2., 0.7)).unwrap());
        assert_eq!(trigger.counter(), 1);

        assert!(trigger.decide(&single_cell(2., 0.4)).unwrap());
        assert_eq!(trigger.counter(), 2);

        assert!(trigger.decide(&single_cell(2., 0.2)).unwrap());
        assert_eq!(trigger.counter(), 3);
        assert!(trigger.is_exhausted());

        for _ in 0..5 {
            assert!(!trigger.decide(&single_cell(100., 0.)).unwrap());
        }
        assert_eq!(trigger.counter(), 3);
    }

    #[test]
    fn test_unbounded_generations() {
        let mut trigger = ZenoIntervals::new(usize::MAX, 0.5, 1., 1.).unwrap();
        assert_approx_eq!(f64, trigger.current_separation(), 1.);
        assert!(trigger.decide(&single_cell(2., 0.9)).unwrap());
        assert!(trigger.decide(&single_cell(2., 0.4)).unwrap());
        assert_approx_eq!(f64, trigger.current_separation(), 0.25);
        assert!(!trigger.is_exhausted());
    }

    #[test]
    fn test_pressure_threshold() {
        let mut trigger = ZenoIntervals::new(2, 0.5, 1., 1.).unwrap();
        assert!(!trigger.decide(&single_cell(1., 0.1)).unwrap());
        assert_eq!(trigger.counter(), 0);
    }

    #[test]
    fn test_fires_once_per_call() {
        let mut trigger = ZenoIntervals::new(5, 0.5, 1., 1.).unwrap();
        let state = SimulationState::new(
            vec![ComputationalCell::new(1., 10., DVec2::ZERO); 3],
            vec![DVec2::new(0., -0.01), DVec2::new(1., -0.02), DVec2::new(2., -0.5)],
            0.,
            0,
        );
        assert!(trigger.decide(&state).unwrap());
        assert_eq!(trigger.counter(), 1);
    }

    #[test]
    fn test_exhausted_ignores_state() {
        let mut trigger = ZenoIntervals::new(0, 0.5, 1., 1.).unwrap();
        assert!(trigger.decide(&single_cell(2., 0.5)).unwrap());
        assert!(!trigger.decide(&SimulationState::default()).unwrap());
    }

    #[test]
    fn test_empty_state() {
        let mut trigger = ZenoIntervals::new(2, 0.5, 1., 1.).unwrap();
        assert!(matches!(
            trigger.decide(&SimulationState::default()),
            Err(CraterError::StateRead(_))
        ));
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(ZenoIntervals::new(2, 1., 1., 1.).is_err());
        assert!(ZenoIntervals::new(2, 0., 1., 1.).is_err());
        assert!(ZenoIntervals::new(2, 0.5, 1., 0.).is_err());
    }
}
