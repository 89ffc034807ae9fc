use glam::DVec2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rstar::{primitives::GeomWithData, RTree};
use tracing::debug;

use super::SeedStrategy;
use crate::{
    errors::{CraterError, Result},
    geometry::RightRectangle,
};

type ProcessNode = GeomWithData<[f64; 2], usize>;

/// Seeds only the part of the domain owned by one process of a distributed run.
///
/// Every process draws the same `num_ranks` generator points (same RNG seed), and
/// owns the part of a uniform `nx` x `ny` lattice closest to its own generator.
/// No communication between processes is needed.
#[derive(Debug, Clone, Copy)]
pub struct SubDomainSeeding {
    rank: usize,
    num_ranks: usize,
    nx: usize,
    ny: usize,
    seed: u64,
}

impl SubDomainSeeding {
    pub fn new(rank: usize, num_ranks: usize, nx: usize, ny: usize, seed: u64) -> Result<Self> {
        if num_ranks == 0 || rank >= num_ranks {
            return Err(CraterError::InvalidParameter(format!(
                "Rank {rank} does not exist in a run with {num_ranks} processes"
            )));
        }
        if nx == 0 || ny == 0 {
            return Err(CraterError::InvalidParameter(format!(
                "Lattice needs at least one point in each direction, got {nx}x{ny}"
            )));
        }
        Ok(Self {
            rank,
            num_ranks,
            nx,
            ny,
            seed,
        })
    }

    /// The generator point of every process, indexed by rank.
    pub fn process_positions(&self, domain: &RightRectangle) -> Vec<DVec2> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let lower_left = domain.lower_left();
        let upper_right = domain.upper_right();
        (0..self.num_ranks)
            .map(|_| {
                DVec2::new(
                    rng.gen_range(lower_left.x..upper_right.x),
                    rng.gen_range(lower_left.y..upper_right.y),
                )
            })
            .collect()
    }

    fn lattice(&self, domain: &RightRectangle) -> impl Iterator<Item = DVec2> + '_ {
        let lower_left = domain.lower_left();
        let dx = domain.width() / self.nx as f64;
        let dy = domain.height() / self.ny as f64;
        (0..self.ny).flat_map(move |j| {
            (0..self.nx).map(move |i| {
                lower_left + DVec2::new((i as f64 + 0.5) * dx, (j as f64 + 0.5) * dy)
            })
        })
    }
}

impl SeedStrategy for SubDomainSeeding {
    fn label(&self) -> &str {
        "sub_domain"
    }

    fn seed_points(&self, domain: &RightRectangle) -> Result<Vec<DVec2>> {
        let tree = RTree::bulk_load(
            self.process_positions(domain)
                .into_iter()
                .enumerate()
                .map(|(rank, position)| ProcessNode::new(position.to_array(), rank))
                .collect(),
        );
        let points: Vec<DVec2> = self
            .lattice(domain)
            .filter(|point| {
                tree.nearest_neighbor(&point.to_array())
                    .map_or(false, |node| node.data == self.rank)
            })
            .collect();
        debug!(
            rank = self.rank,
            num_ranks = self.num_ranks,
            num_points = points.len(),
            "Seeded local sub-domain"
        );
        Ok(points)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_invalid_sub_domain() {
        assert!(SubDomainSeeding::new(0, 0, 10, 10, 0).is_err());
        assert!(SubDomainSeeding::new(2, 2, 10, 10, 0).is_err());
        assert!(SubDomainSeeding::new(0, 2, 0, 10, 0).is_err());
    }

    #[test]
    fn test_single_rank_owns_everything() {
        let domain = RightRectangle::centered(2.).unwrap();
        let seeding = SubDomainSeeding::new(0, 1, 10, 5, 42).unwrap();
        let points = seeding.seed_points(&domain).unwrap();
        assert_eq!(points.len(), 50);
        assert!(points.iter().all(|p| domain.contains(*p)));
    }

    #[test]
    fn test_ranks_partition_lattice() {
        let domain = RightRectangle::centered(2.).unwrap();
        let num_ranks = 4;
        let mut total = 0;
        for rank in 0..num_ranks {
            let seeding = SubDomainSeeding::new(rank, num_ranks, 20, 20, 7).unwrap();
            total += seeding.seed_points(&domain).unwrap().len();
        }
        assert_eq!(total, 400);
    }

    #[test]
    fn test_process_positions_reproducible() {
        let domain = RightRectangle::centered(1.).unwrap();
        let a = SubDomainSeeding::new(0, 3, 4, 4, 11).unwrap();
        let b = SubDomainSeeding::new(2, 3, 4, 4, 11).unwrap();
        let positions = a.process_positions(&domain);
        assert_eq!(positions, b.process_positions(&domain));
        assert!(positions.iter().all(|p| domain.contains(*p)));
    }
}
