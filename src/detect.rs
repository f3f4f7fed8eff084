//! Statistical detection of LSB tampering.
//!
//! Natural media has least-significant bits close to uniform random, so the
//! mean of the LSB plane sits near 0.5. Embedding structured data (and the
//! zero-fill of unused capacity) skews that mean. This is a coarse global
//! heuristic with a single fixed threshold, not a steganalysis suite.

use crate::bits::LsbSample;

/// Maximum deviation of the LSB mean from 0.5 before a carrier is flagged.
pub const ANOMALY_THRESHOLD: f64 = 0.1;

/// Arithmetic mean of the samples' low-order bits.
///
/// An empty carrier reports the neutral baseline of 0.5.
pub fn lsb_mean<S: LsbSample>(samples: &[S]) -> f64 {
    if samples.is_empty() {
        return 0.5;
    }
    let ones: usize = samples.iter().map(|sample| sample.read_lsb() as usize).sum();
    ones as f64 / samples.len() as f64
}

/// True iff the LSB distribution deviates from the 50/50 baseline by more
/// than [`ANOMALY_THRESHOLD`].
pub fn is_anomalous<S: LsbSample>(samples: &[S]) -> bool {
    (lsb_mean(samples) - 0.5).abs() > ANOMALY_THRESHOLD
}
