//! Z-score standardization

/// Floor added to the standard deviation so constant input stays finite
pub const STD_EPSILON: f64 = 1e-8;

/// Arithmetic mean; `NaN` for empty input
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by n); `NaN` for empty input
pub fn population_std(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Standardize to zero mean and (near) unit variance.
///
/// Divides by `std + STD_EPSILON`, so zero-variance input maps to all zeros
/// instead of failing.
pub fn standardize(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let m = mean(values);
    let denom = population_std(values) + STD_EPSILON;
    values.iter().map(|v| (v - m) / denom).collect()
}
