/// Mean and population standard deviation of one ring's samples.
///
/// An empty ring yields `NaN` for both values.
pub fn mean_stddev(values: &[u8]) -> (f64, f64) {
    if values.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| f64::from(v)).sum::<f64>() / n;
    let var = values
        .iter()
        .map(|&v| {
            let d = f64::from(v) - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    (mean, var.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn population_stddev() {
        let (m, s) = mean_stddev(&[2, 4, 4, 4, 5, 5, 7, 9]);
        assert_relative_eq!(m, 5.0);
        assert_relative_eq!(s, 2.0);
    }

    #[test]
    fn constant_samples_have_zero_spread() {
        let (m, s) = mean_stddev(&[17; 360]);
        assert_relative_eq!(m, 17.0);
        assert_eq!(s, 0.0);
    }

    #[test]
    fn empty_ring_is_nan() {
        let (m, s) = mean_stddev(&[]);
        assert!(m.is_nan() && s.is_nan());
    }
}
