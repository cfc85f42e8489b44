//! Rescaling of a viewpoint profile to relative units.

/// Rescales a profile so that its values sum to one.
///
/// Every element is divided by the sum of the profile. An all-zero (or
/// otherwise zero-sum) profile produces non-finite values; that condition
/// is a data problem for the caller to detect upstream, not an error this
/// operation reports.
///
/// # Examples
///
/// ```
/// use virtual4c::viewpoint::normalize;
///
/// let relative = normalize(&[1.0, 3.0, 4.0]);
/// assert_eq!(relative, [0.125, 0.375, 0.5]);
/// ```
pub fn normalize(data: &[f64]) -> Vec<f64> {
    let sum = data.iter().sum::<f64>();
    data.iter().map(|value| value / sum).collect()
}
