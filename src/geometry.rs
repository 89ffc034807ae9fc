use glam::DVec2;

use crate::errors::{CraterError, Result};

/// Axis aligned rectangle, closed on all sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RightRectangle {
    lower_left: DVec2,
    upper_right: DVec2,
}

impl RightRectangle {
    pub fn new(lower_left: DVec2, upper_right: DVec2) -> Result<Self> {
        if !lower_left.is_finite() || !upper_right.is_finite() {
            return Err(CraterError::InvalidRange(format!(
                "Rectangle corners must be finite, got {lower_left} and {upper_right}"
            )));
        }
        if lower_left.cmpge(upper_right).any() {
            return Err(CraterError::InvalidRange(format!(
                "Lower left corner {lower_left} must lie strictly below and left of {upper_right}"
            )));
        }
        Ok(Self {
            lower_left,
            upper_right,
        })
    }

    /// Square of half width `half_width` centered at the origin.
    pub fn centered(half_width: f64) -> Result<Self> {
        Self::new(DVec2::splat(-half_width), DVec2::splat(half_width))
    }

    pub fn lower_left(&self) -> DVec2 {
        self.lower_left
    }

    pub fn upper_right(&self) -> DVec2 {
        self.upper_right
    }

    pub fn width(&self) -> f64 {
        self.upper_right.x - self.lower_left.x
    }

    pub fn height(&self) -> f64 {
        self.upper_right.y - self.lower_left.y
    }

    pub fn center(&self) -> DVec2 {
        0.5 * (self.lower_left + self.upper_right)
    }

    pub fn contains(&self, point: DVec2) -> bool {
        point.cmpge(self.lower_left).all() && point.cmple(self.upper_right).all()
    }

    /// Largest distance from the origin to any corner of this rectangle.
    ///
    /// A radial point distribution centered at the origin needs to extend at least
    /// this far to cover the whole rectangle.
    pub fn circumscribed_radius(&self) -> f64 {
        [
            self.lower_left,
            self.upper_right,
            DVec2::new(self.lower_left.x, self.upper_right.y),
            DVec2::new(self.upper_right.x, self.lower_left.y),
        ]
        .iter()
        .map(|corner| corner.length())
        .fold(0., f64::max)
    }
}

/// Restrict a point set to `rectangle`, keeping the relative order of the points.
pub fn clip_grid(rectangle: &RightRectangle, points: Vec<DVec2>) -> Vec<DVec2> {
    points
        .into_iter()
        .filter(|point| rectangle.contains(*point))
        .collect()
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;
    use glam::DVec2;

    use super::*;

    #[test]
    fn test_invalid_rectangle() {
        assert!(RightRectangle::new(DVec2::ONE, DVec2::ZERO).is_err());
        assert!(RightRectangle::new(DVec2::ZERO, DVec2::new(1., 0.)).is_err());
        assert!(RightRectangle::new(DVec2::ZERO, DVec2::new(f64::INFINITY, 1.)).is_err());
        assert!(RightRectangle::centered(-1.).is_err());
    }

    #[test]
    fn test_centered() {
        let rectangle = RightRectangle::centered(2.).unwrap();
        assert_approx_eq!(f64, rectangle.width(), 4.);
        assert_approx_eq!(f64, rectangle.height(), 4.);
        assert_eq!(rectangle.center(), DVec2::ZERO);
        assert_approx_eq!(f64, rectangle.circumscribed_radius(), 8f64.sqrt());
    }

    #[test]
    fn test_clip_grid() {
        let rectangle = RightRectangle::new(DVec2::new(-1., -1.), DVec2::new(1., 0.)).unwrap();
        let points = vec![
            DVec2::new(0., -0.5),
            DVec2::new(0., 0.5),
            DVec2::new(1., 0.),
            DVec2::new(-2., -0.5),
            DVec2::new(-1., -1.),
        ];
        let clipped = clip_grid(&rectangle, points);
        assert_eq!(
            clipped,
            vec![DVec2::new(0., -0.5), DVec2::new(1., 0.), DVec2::new(-1., -1.)]
        );
    }
}
