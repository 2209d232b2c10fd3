//! Numerical check of the threshold theorem.
//!
//! For every state, E_N(r, n̄(T)) must be zero when r ≤ r_c(T) and strictly
//! positive when r > r_c(T). The check runs on the computed grid and on
//! random off-grid samples, with a tolerance band of width `tolerance`
//! around the threshold where either answer is accepted.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::DiagramConfig;
use crate::entanglement::{critical_squeezing, log_negativity};
use crate::error::{DiagramError, Result};
use crate::phase::PhaseDiagram;
use crate::thermal::bose_einstein;

/// Default tolerance band around r_c.
pub const THEOREM_TOLERANCE: f64 = 1e-9;

/// Outcome of a threshold check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdReport {
    /// Points examined
    pub checked: usize,
    /// E_N > tolerance although r ≤ r_c
    pub false_positives: usize,
    /// E_N == 0 although r > r_c + tolerance
    pub false_negatives: usize,
    /// E_N < 0 anywhere
    pub negative: usize,
    /// Largest E_N seen at or below the threshold
    pub max_below_threshold: f64,
}

impl ThresholdReport {
    fn record(&mut self, r: f64, r_c: f64, e_n: f64, tolerance: f64) {
        self.checked += 1;
        if e_n < 0.0 {
            self.negative += 1;
        }
        if r <= r_c {
            self.max_below_threshold = self.max_below_threshold.max(e_n);
            if e_n > tolerance {
                self.false_positives += 1;
            }
        } else if r > r_c + tolerance && e_n <= 0.0 {
            self.false_negatives += 1;
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.false_positives == 0 && self.false_negatives == 0 && self.negative == 0
    }

    pub fn into_result(self) -> Result<Self> {
        if self.is_consistent() {
            Ok(self)
        } else {
            Err(DiagramError::TheoremViolation {
                false_positives: self.false_positives,
                false_negatives: self.false_negatives,
                negative: self.negative,
            })
        }
    }
}

/// Check every grid point of a computed diagram against its threshold curve.
pub fn verify_grid(diagram: &PhaseDiagram, tolerance: f64) -> ThresholdReport {
    let mut report = ThresholdReport::default();
    let (rows, cols) = diagram.mesh.shape();
    for row in 0..rows {
        let r = diagram.squeezings()[row];
        let e_row = diagram.entanglement.row(row);
        for col in 0..cols {
            report.record(r, diagram.threshold[col], e_row[col], tolerance);
        }
    }
    debug!(
        "grid check: {} points, max E_N below threshold {:.3e}",
        report.checked, report.max_below_threshold
    );
    report
}

/// Check `samples` uniformly random (T, r) pairs inside the configured window.
///
/// The temperature range is widened down to T = 0 so the vacuum limit is
/// exercised as well.
pub fn verify_random(
    config: &DiagramConfig,
    samples: usize,
    seed: u64,
    tolerance: f64,
) -> ThresholdReport {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut report = ThresholdReport::default();
    for _ in 0..samples {
        let t = rng.gen_range(0.0..=config.t_max);
        let r = rng.gen_range(config.r_min..=config.r_max);
        let n_bar = bose_einstein(t, config.omega);
        let r_c = critical_squeezing(n_bar);
        report.record(r, r_c, log_negativity(r, n_bar), tolerance);
    }
    debug!("random check: {} samples (seed {})", samples, seed);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_satisfies_theorem() {
        let config = DiagramConfig::default().with_resolution(120);
        let pd = PhaseDiagram::compute(&config);
        let report = verify_grid(&pd, THEOREM_TOLERANCE);
        assert_eq!(report.checked, 120 * 120);
        assert!(report.is_consistent(), "{:?}", report);
        assert!(report.max_below_threshold <= THEOREM_TOLERANCE);
    }

    #[test]
    fn random_samples_satisfy_theorem() {
        let config = DiagramConfig::default();
        let report = verify_random(&config, 20_000, 42, THEOREM_TOLERANCE);
        assert_eq!(report.checked, 20_000);
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn random_check_is_reproducible() {
        let config = DiagramConfig::default();
        let a = verify_random(&config, 500, 7, THEOREM_TOLERANCE);
        let b = verify_random(&config, 500, 7, THEOREM_TOLERANCE);
        assert_eq!(a, b);
    }

    #[test]
    fn corrupted_field_is_reported() {
        let config = DiagramConfig::default().with_resolution(16);
        let mut pd = PhaseDiagram::compute(&config);
        // Claim entanglement everywhere in the bottom row (r = 0)
        let (rows, cols) = pd.entanglement.shape();
        let mut data = pd.entanglement.as_slice().to_vec();
        for v in data.iter_mut().take(cols) {
            *v = 1.0;
        }
        pd.entanglement = crate::grid::Field2D::from_vec(rows, cols, data);
        let report = verify_grid(&pd, THEOREM_TOLERANCE);
        assert_eq!(report.false_positives, cols);
        match report.into_result() {
            Err(DiagramError::TheoremViolation { false_positives, .. }) => {
                assert_eq!(false_positives, cols)
            }
            other => panic!("expected a violation, got {:?}", other),
        }
    }
}
