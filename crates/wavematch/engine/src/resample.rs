//! Fixed-length resampling by linear interpolation

/// Resample `values` to `target_length` points.
///
/// Both the source and the target are laid out evenly over `[0, 1]` and the
/// target points are read off the piecewise-linear curve through the
/// source. Endpoints are preserved exactly, and `target_length ==
/// values.len()` returns the input unchanged. A single source value is
/// held constant.
pub fn resample(values: &[f64], target_length: usize) -> Vec<f64> {
    if values.is_empty() || target_length == 0 {
        return Vec::new();
    }
    let last = values.len() - 1;
    if last == 0 || target_length == 1 {
        return vec![values[0]; target_length];
    }

    let target_last = target_length - 1;
    (0..target_length)
        .map(|j| {
            // Position on the source index axis, computed from exact
            // integers so equal lengths land on whole indices.
            let position = (j * last) as f64 / target_last as f64;
            let index = position.floor() as usize;
            if index >= last {
                return values[last];
            }
            let frac = position - index as f64;
            if frac == 0.0 {
                values[index]
            } else {
                values[index] + (values[index + 1] - values[index]) * frac
            }
        })
        .collect()
}
