use nalgebra::DVector;

/// Returns the indices of the entries strictly greater than `threshold`, in increasing order.
pub fn indices_above(array: &DVector<f64>, threshold: f64) -> Vec<usize> {
    array
        .iter()
        .enumerate()
        .filter(|(_, &value)| value > threshold)
        .map(|(index, _)| index)
        .collect()
}

/// Builds a `{0, 1}` label vector of length `labels` from the indices of the present labels.
/// Out-of-range indices are ignored.
pub fn multi_hot(labels: usize, present: &[usize]) -> DVector<f64> {
    let mut res = DVector::zeros(labels);
    for &index in present {
        if index < labels {
            res[index] = 1.0;
        }
    }
    res
}

#[cfg(test)]
pub(crate) fn uniform_vector(length: usize, low: f64, high: f64) -> DVector<f64> {
    use rand::Rng;

    let mut rng = rand::thread_rng();
    DVector::from_fn(length, |_, _| -> f64 { rng.gen_range(low..high) })
}

#[cfg(test)]
#[macro_export]
macro_rules! assert_approx {
    ( $left:expr, $right:expr, $epsilon:expr ) => {
        let left = $left;
        let right = $right;
        if ((left - right) as f64).abs() >= $epsilon as f64 {
            panic!("Expected {} to be approximately equal to {}", left, right);
        }
    };
}
