/// Half-open arithmetic sequence `start, start + step, ...` strictly below `stop`.
///
/// Every value is computed as `start + i * step`, so no rounding error accumulates
/// along the sequence. Returns an empty vector when `stop <= start`.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    debug_assert!(step > 0., "arange needs a positive step!");
    if !(stop > start) {
        return vec![];
    }
    let mut values = vec![];
    let mut i = 0;
    loop {
        let value = start + i as f64 * step;
        if value >= stop {
            break;
        }
        values.push(value);
        i += 1;
    }
    values
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_arange_half_open() {
        let values = arange(0., 3., 1.);
        assert_eq!(values, vec![0., 1., 2.]);
        assert!(arange(1., 1., 0.5).is_empty());
        assert!(arange(2., 1., 0.5).is_empty());
    }

    #[test]
    fn test_arange_no_drift() {
        let values = arange(0., 1., 0.1);
        assert_eq!(values.len(), 10);
        assert_approx_eq!(f64, values[9], 0.9);
    }
}
