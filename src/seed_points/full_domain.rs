use glam::DVec2;
use tracing::{debug, warn};

use super::{complete_grid, SeedStrategy};
use crate::{
    errors::Result,
    geometry::{clip_grid, RightRectangle},
};

/// Seeds the whole domain with the clipped [`complete_grid`] distribution.
#[derive(Debug, Clone, Copy)]
pub struct FullDomainSeeding {
    r_inner: f64,
    r_outer: f64,
    alpha: f64,
}

impl FullDomainSeeding {
    pub fn new(r_inner: f64, r_outer: f64, alpha: f64) -> Self {
        Self {
            r_inner,
            r_outer,
            alpha,
        }
    }
}

impl SeedStrategy for FullDomainSeeding {
    fn label(&self) -> &str {
        "full"
    }

    fn seed_points(&self, domain: &RightRectangle) -> Result<Vec<DVec2>> {
        let required_radius = domain.circumscribed_radius();
        if self.r_outer < required_radius {
            warn!(
                r_outer = self.r_outer,
                required_radius,
                "Seed distribution does not reach the corners of the domain"
            );
        }
        let points = complete_grid(self.r_inner, self.r_outer, self.alpha)?;
        let generated = points.len();
        let points = clip_grid(domain, points);
        debug!(generated, kept = points.len(), "Clipped seed points to domain");
        Ok(points)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_full_domain_seeding() {
        let domain = RightRectangle::centered(1.).unwrap();
        let seeding = FullDomainSeeding::new(0.1, 2., 0.01);
        let points = seeding.seed_points(&domain).unwrap();
        let all = complete_grid(0.1, 2., 0.01).unwrap();

        assert!(!points.is_empty());
        assert!(points.len() < all.len());
        assert!(points.iter().all(|p| domain.contains(*p)));
        assert_eq!(points[0], DVec2::ZERO);
    }

    #[test]
    fn test_full_domain_seeding_invalid() {
        let domain = RightRectangle::centered(1.).unwrap();
        assert!(FullDomainSeeding::new(0.1, 2., 3.)
            .seed_points(&domain)
            .is_err());
    }
}
