//! Moving-average smoothing of a viewpoint profile.

/// An error related to smoothing.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The smoothing window is zero or at least as long as the profile.
    InvalidWindowSize {
        /// The requested window size.
        size: usize,

        /// The length of the profile.
        len: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidWindowSize { size, len } => write!(
                f,
                "invalid smoothing window size ({size}) for a profile of \
                 length {len}"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// Smooths a profile with a moving average of the given window size.
///
/// The window is asymmetric for even sizes: a window of size `w` reaches
/// `floor(w / 2)` positions downstream and `floor(w / 2)` (odd `w`) or
/// `floor(w / 2) - 1` (even `w`) positions upstream. Positions near the
/// borders average over the window clipped to the profile; the trailing
/// border mirrors the leading one, averaging over the last elements of the
/// *original* profile. The output has the same length as the input.
///
/// # Examples
///
/// ```
/// use virtual4c::viewpoint::smooth;
///
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0];
///
/// assert_eq!(smooth(&data, 1)?, data);
/// assert_eq!(smooth(&data, 3)?, [1.5, 2.0, 3.0, 4.0, 4.5]);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn smooth(data: &[f64], window_size: usize) -> Result<Vec<f64>, Error> {
    if window_size < 1 || window_size >= data.len() {
        return Err(Error::InvalidWindowSize {
            size: window_size,
            len: data.len(),
        });
    }

    let half = window_size / 2;
    let upstream = if window_size % 2 == 0 { half - 1 } else { half };

    let mut smoothed = vec![0.0; data.len()];

    for i in upstream..data.len() - half {
        smoothed[i] = mean(&data[i - upstream..i + half + 1]);
    }

    // Border positions average over the window clipped to the profile;
    // both ends are computed from the original data.
    for i in 0..half {
        let start = i.saturating_sub(upstream);
        let end = i + half + 1;

        smoothed[i] = mean(&data[start..end]);
        smoothed[data.len() - 1 - i] = mean(&data[data.len() - end..]);
    }

    Ok(smoothed)
}

/// Computes the arithmetic mean of a non-empty slice.
fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_of_one_is_the_identity() {
        let data = [4.0, 8.0, 15.0, 16.0, 23.0, 42.0];
        assert_eq!(smooth(&data, 1).unwrap(), data);
    }

    #[test]
    fn test_odd_window() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(smooth(&data, 3).unwrap(), [1.5, 2.0, 3.0, 4.0, 4.5]);
    }

    #[test]
    fn test_even_window_reaches_further_downstream() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(
            smooth(&data, 4).unwrap(),
            [2.0, 2.5, 3.5, 4.5, 4.5, 5.0]
        );
    }

    #[test]
    fn test_constant_data_is_unchanged() {
        let data = [2.0; 8];
        assert_eq!(smooth(&data, 5).unwrap(), data);
    }

    #[test]
    fn test_invalid_window_sizes() {
        let data = [1.0, 2.0, 3.0];

        let err = smooth(&data, 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid smoothing window size (0) for a profile of length 3"
        );

        assert_eq!(
            smooth(&data, 3).unwrap_err(),
            Error::InvalidWindowSize { size: 3, len: 3 }
        );
        assert!(smooth(&data, 2).is_ok());
    }
}
