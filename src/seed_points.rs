//! Generation of the mesh generating (seed) points.
//!
//! The composite distribution resolves the impact region with a dense, uniform
//! hexagonal core and coarsens outwards along a logarithmic spiral. The two parts
//! are matched such that the point density is continuous where they meet.

use std::f64::consts::PI;

use glam::DVec2;

use crate::{
    errors::{CraterError, Result},
    geometry::RightRectangle,
    utils::arange,
};

pub use full_domain::FullDomainSeeding;
pub use sub_domain::SubDomainSeeding;

mod full_domain;
mod sub_domain;

/// Strategy producing the seed points of (a part of) the simulation domain.
pub trait SeedStrategy {
    fn label(&self) -> &str;

    fn seed_points(&self, domain: &RightRectangle) -> Result<Vec<DVec2>>;
}

fn validate_radii(r_min: f64, r_max: f64) -> Result<()> {
    if !r_min.is_finite() || !r_max.is_finite() {
        return Err(CraterError::InvalidRange(format!(
            "Radii must be finite, got r_min={r_min}, r_max={r_max}"
        )));
    }
    if r_min <= 0. {
        return Err(CraterError::InvalidRange(format!(
            "r_min must be positive, got {r_min}"
        )));
    }
    if r_max < r_min {
        return Err(CraterError::InvalidRange(format!(
            "r_max ({r_max}) must not be smaller than r_min ({r_min})"
        )));
    }
    Ok(())
}

fn validate_alpha(alpha: f64) -> Result<()> {
    if !alpha.is_finite() || alpha <= 0. || alpha >= 2. {
        return Err(CraterError::InvalidParameter(format!(
            "Spiral expansion parameter alpha must lie in (0, 2), got {alpha}"
        )));
    }
    Ok(())
}

/// Concentric rings of points at radii `0, r_min, 2 r_min, ...` strictly below `r_max`.
///
/// Ring `k > 0` holds `6k` points, evenly spaced in angle. Ring 0 is the origin.
pub fn hexagonal_core(r_min: f64, r_max: f64) -> Result<Vec<DVec2>> {
    validate_radii(r_min, r_max)?;

    let mut points = vec![];
    for (ring, radius) in arange(0., r_max, r_min).into_iter().enumerate() {
        let num_angles = (6 * ring).max(1);
        let d_angle = 2. * PI / num_angles as f64;
        points.extend((0..num_angles).map(|j| {
            let angle = d_angle * j as f64;
            radius * DVec2::new(angle.cos(), angle.sin())
        }));
    }
    Ok(points)
}

/// Points along the logarithmic spiral `r(theta) = r_min exp(alpha theta)` around `center`.
///
/// The spiral is sampled at a fixed angular step of `2 pi alpha / (1 - alpha / 2)`,
/// for angles in `[0, ln(r_max / r_min) / alpha)`.
pub fn log_spiral_halo(r_min: f64, r_max: f64, alpha: f64, center: DVec2) -> Result<Vec<DVec2>> {
    validate_alpha(alpha)?;
    validate_radii(r_min, r_max)?;

    let theta_max = (r_max / r_min).ln() / alpha;
    let d_theta = 2. * PI * alpha / (1. - 0.5 * alpha);
    Ok(arange(0., theta_max, d_theta)
        .into_iter()
        .map(|theta| {
            let radius = r_min * (alpha * theta).exp();
            center + radius * DVec2::new(theta.cos(), theta.sin())
        })
        .collect())
}

/// Dense hexagonal core up to `r_inner`, followed by a logarithmic spiral out to `r_outer`.
///
/// The ring spacing of the core is `2 pi alpha r_inner`, which matches the spacing
/// of the spiral at `r_inner`. The core points come first in the result, the
/// points of both parts are not deduplicated.
///
/// The result must still be clipped to the simulation domain. For the clipped
/// distribution to cover the domain, `r_outer` must be at least the
/// circumscribed radius of that domain.
///
/// An `alpha` so large that the core spacing exceeds `r_inner` is reported as
/// [`CraterError::InvalidParameter`] naming `alpha`, rather than as the
/// [`CraterError::InvalidRange`] the core generator would give for it, since
/// the core would otherwise collapse to the origin alone.
pub fn complete_grid(r_inner: f64, r_outer: f64, alpha: f64) -> Result<Vec<DVec2>> {
    validate_alpha(alpha)?;
    validate_radii(r_inner, r_outer)?;
    let core_spacing = r_inner * alpha * 2. * PI;
    if core_spacing > r_inner {
        return Err(CraterError::InvalidParameter(format!(
            "alpha={alpha} gives a core ring spacing ({core_spacing}) larger than r_inner ({r_inner})"
        )));
    }

    let mut points = hexagonal_core(core_spacing, r_inner)?;
    points.extend(log_spiral_halo(r_inner, r_outer, alpha, DVec2::ZERO)?);
    Ok(points)
}
