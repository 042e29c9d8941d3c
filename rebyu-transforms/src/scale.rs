//! Mapping of polarity scores in `[-1, 1]` onto discrete classes

use crate::error::{Error, Result};

/// Default dead zone around zero for [`polarity_threshold_map`]
pub const DEFAULT_POLARITY_THRESHOLD: f64 = 0.05;

/// Class names for the indices returned by [`polarity_threshold_map`]
pub const POLARITY_LABELS: [&str; 3] = ["Negative", "Neutral", "Positive"];

/// Split `[-1, 1]` into `n` equal buckets and return the bucket of `value`
///
/// Values outside the range fall into the first or last bucket.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn linear_map(value: f64, n: usize) -> Result<usize> {
    if n == 0 {
        return Err(Error::InvalidArgument(
            "number of buckets must be at least 1".to_string(),
        ));
    }
    if value.is_nan() {
        return Err(Error::InvalidArgument("cannot map NaN to a bucket".to_string()));
    }

    let bucket = ((value + 1.0) / 2.0 * n as f64).floor().max(0.0) as usize;
    Ok(bucket.min(n - 1))
}

/// Classify a polarity as negative (0), neutral (1) or positive (2)
///
/// Values within `threshold` of zero, bounds included, are neutral.
pub fn polarity_threshold_map(value: f64, threshold: f64) -> usize {
    if value > threshold {
        2
    } else if value < -threshold {
        0
    } else {
        1
    }
}
