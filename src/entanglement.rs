//! Entanglement of a symmetric two-mode squeezed thermal state (TMST).
//!
//! # Covariance picture
//!
//! Two modes at the same temperature, each with occupation n̄, are squeezed
//! together with parameter r. After partial transposition the smallest
//! symplectic eigenvalue of the covariance matrix is
//!
//!   ν₋ = (n̄ + ½) · exp(−2r)
//!
//! and the logarithmic negativity is
//!
//!   E_N = max(0, −log₂(2ν₋))
//!
//! # Threshold
//!
//! E_N > 0 exactly when 2ν₋ < 1, i.e. when
//!
//!   r > r_c(T) = ½ · ln(2n̄(T) + 1)
//!
//! Below r_c thermal noise washes out all quantum correlations and the state
//! is separable. The phase diagram visualises this boundary.

use std::fmt;

use num_traits::Float;

use crate::thermal::bose_einstein;
use crate::units::{energy_to_temp, omega_to_energy};

/// Critical squeezing r_c = ½ ln(2n̄ + 1) for occupation `n_bar ≥ 0`.
pub fn critical_squeezing<F: Float>(n_bar: F) -> F {
    let two = F::one() + F::one();
    (two * n_bar).ln_1p() / two
}

/// Highest temperature at which squeezing `r` still leaves the state entangled.
///
/// Inverts `critical_squeezing(bose_einstein(T, omega)) = r`. Zero squeezing
/// entangles nothing at any T > 0, so the result is `0` for `r <= 0`.
pub fn critical_temperature(r: f64, omega: f64) -> f64 {
    if r <= 0.0 {
        return 0.0;
    }
    // n_c = (e^{2r} − 1)/2, then k_B·T = ℏω / ln(1 + 1/n_c)
    let n_c = (2.0 * r).exp_m1() / 2.0;
    energy_to_temp(omega_to_energy(omega) / (1.0 / n_c).ln_1p())
}

/// Smallest symplectic eigenvalue ν₋ of the partially transposed state.
pub fn symplectic_eigenvalue<F: Float>(r: F, n_bar: F) -> F {
    let two = F::one() + F::one();
    (n_bar + F::one() / two) * (-two * r).exp()
}

/// Logarithmic negativity E_N, floored at zero.
pub fn log_negativity<F: Float>(r: F, n_bar: F) -> F {
    let two = F::one() + F::one();
    let raw = -(two * symplectic_eigenvalue(r, n_bar)).log2();
    // Separable side, including the -0.0 produced exactly on the boundary
    if raw > F::zero() {
        raw
    } else {
        F::zero()
    }
}

/// Logarithmic negativity at a temperature rather than an occupation.
pub fn log_negativity_at(r: f64, temperature: f64, omega: f64) -> f64 {
    log_negativity(r, bose_einstein(temperature, omega))
}

/// Which side of the analytic threshold a state sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    /// r ≤ r_c: thermal noise dominates, the state is separable.
    NoiseDominated,
    /// r > r_c: squeezing wins, E_N > 0.
    EntanglementDominant,
}

impl Regime {
    pub fn classify(r: f64, n_bar: f64) -> Self {
        if r > critical_squeezing(n_bar) {
            Regime::EntanglementDominant
        } else {
            Regime::NoiseDominated
        }
    }

    /// Headline used for the plot annotation.
    pub fn headline(self) -> &'static str {
        match self {
            Regime::NoiseDominated => "NOISE DOMINATED",
            Regime::EntanglementDominant => "ENTANGLEMENT DOMINANT",
        }
    }

    /// Parenthetical shown under the headline.
    pub fn subtitle(self) -> &'static str {
        match self {
            Regime::NoiseDominated => "(Separable)",
            Regime::EntanglementDominant => "(Topological Channel Open)",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.headline(), self.subtitle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thermal::occupation;
    use crate::units::OMEGA;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn threshold_vanishes_at_zero_occupation() {
        assert_eq!(critical_squeezing(0.0), 0.0);
        assert_eq!(critical_squeezing(occupation(0.0)), 0.0);
    }

    #[test]
    fn threshold_at_unit_temperature() {
        let n = occupation(1.0);
        assert_relative_eq!(critical_squeezing(n), 0.385_968_4, epsilon = 1e-6);
    }

    #[test]
    fn threshold_is_monotone() {
        let mut prev = critical_squeezing(0.0);
        for i in 1..200 {
            let rc = critical_squeezing(i as f64 * 0.05);
            assert!(rc >= prev);
            assert!(rc >= 0.0);
            prev = rc;
        }
    }

    #[test]
    fn vacuum_squeezing_scenario() {
        let nu = symplectic_eigenvalue(1.0, 0.0);
        assert_relative_eq!(nu, 0.5 * (-2.0f64).exp(), epsilon = 1e-15);
        assert_relative_eq!(nu, 0.067_667_6, epsilon = 1e-6);
        // −log₂(e^{−2}) = 2/ln 2
        let expected = 2.0 / std::f64::consts::LN_2;
        assert_relative_eq!(log_negativity(1.0, 0.0), expected, epsilon = 1e-12);
        assert_relative_eq!(log_negativity(1.0, 0.0), 2.885_39, epsilon = 1e-5);
    }

    #[test]
    fn boundary_is_exactly_zero() {
        let e = log_negativity(0.0, 0.0);
        assert_eq!(e, 0.0);
        assert!(e.is_sign_positive());
    }

    #[test]
    fn separable_states_are_floored() {
        // Hot and barely squeezed: raw value would be negative
        let e = log_negativity(0.01, 3.0);
        assert_eq!(e, 0.0);
    }

    #[test]
    fn entanglement_grows_with_squeezing() {
        let n = occupation(0.5);
        let rc = critical_squeezing(n);
        let e1 = log_negativity(rc + 0.1, n);
        let e2 = log_negativity(rc + 0.5, n);
        assert!(e1 > 0.0);
        assert!(e2 > e1);
    }

    #[test]
    fn linear_above_threshold() {
        // E_N = (2r − 2r_c)/ln 2 above threshold
        let n = occupation(2.0);
        let rc = critical_squeezing(n);
        let r = rc + 0.3;
        let expected = 0.6 / std::f64::consts::LN_2;
        assert_relative_eq!(log_negativity(r, n), expected, epsilon = 1e-9);
    }

    #[test]
    fn critical_temperature_inverts_threshold() {
        for &r in &[0.05, 0.2, 0.5, 1.0, 1.8] {
            let t_c = critical_temperature(r, OMEGA);
            assert!(t_c > 0.0);
            assert_abs_diff_eq!(critical_squeezing(occupation(t_c)), r, epsilon = 1e-9);
        }
        assert_eq!(critical_temperature(0.0, OMEGA), 0.0);
    }

    #[test]
    fn log_negativity_at_matches_composition() {
        let direct = log_negativity(1.2, occupation(0.7));
        assert_eq!(log_negativity_at(1.2, 0.7, OMEGA), direct);
    }

    #[test]
    fn regime_classification() {
        let n = occupation(1.0);
        assert_eq!(Regime::classify(0.2, n), Regime::NoiseDominated);
        assert_eq!(Regime::classify(1.5, n), Regime::EntanglementDominant);
        assert_eq!(Regime::classify(0.0, 0.0), Regime::NoiseDominated);
        assert_eq!(
            Regime::NoiseDominated.to_string(),
            "NOISE DOMINATED (Separable)"
        );
    }

    #[test]
    fn generic_over_f32() {
        let e: f32 = log_negativity(1.0f32, 0.0f32);
        assert_relative_eq!(e, 2.885_39f32, epsilon = 1e-4);
        assert_eq!(critical_squeezing(0.0f32), 0.0);
    }
}
