//! Thermal occupation of a bosonic mode.
//!
//! In natural units (ℏ = k_B = 1) the mean number of thermal quanta in a mode
//! of frequency ω at temperature T is the Bose-Einstein occupation
//!
//!   n̄(T) = 1 / (exp(ω/T) − 1)
//!
//! The expression is singular at T = 0, where the physical limit is n̄ = 0
//! (the mode is in its vacuum state). That limit is returned explicitly.

use num_traits::Float;

use crate::grid::{Axis, Field2D, Mesh};
use crate::units::OMEGA;

/// Mean thermal occupation n̄ for a mode of frequency `omega` at `temperature`.
///
/// Returns exactly zero at `temperature == 0` and whenever `omega / temperature`
/// is large enough that the exponential overflows. For every positive
/// temperature the result is finite and non-negative.
pub fn bose_einstein<F: Float>(temperature: F, omega: F) -> F {
    if temperature == F::zero() {
        return F::zero();
    }
    // exp_m1 keeps precision in the classical limit ω/T → 0
    let denom = (omega / temperature).exp_m1();
    if !denom.is_finite() {
        return F::zero();
    }
    F::one() / denom
}

/// Occupation at the default mode frequency [`OMEGA`].
pub fn occupation(temperature: f64) -> f64 {
    bose_einstein(temperature, OMEGA)
}

/// Occupation for every temperature sample of an axis.
pub fn occupation_curve(temperature: &Axis, omega: f64) -> Vec<f64> {
    temperature
        .iter()
        .map(|t| bose_einstein(t, omega))
        .collect()
}

/// Occupation field over a mesh. Depends only on the temperature component.
pub fn occupation_field(mesh: &Mesh, omega: f64) -> Field2D {
    mesh.temperature.map(|t| bose_einstein(t, omega))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_temperature_is_vacuum() {
        let n = occupation(0.0);
        assert_eq!(n, 0.0);
        assert!(!n.is_nan());
    }

    #[test]
    fn unit_temperature_matches_closed_form() {
        // 1 / (e - 1)
        assert_relative_eq!(occupation(1.0), 0.581_976_706_869_326_4, epsilon = 1e-12);
    }

    #[test]
    fn tiny_temperature_underflows_to_zero() {
        // ω/T = 1e4 overflows exp
        let n = occupation(1e-4);
        assert_eq!(n, 0.0);
        assert!(occupation(0.01) >= 0.0);
    }

    #[test]
    fn occupation_increases_with_temperature() {
        let temps = [0.01, 0.1, 0.5, 1.0, 2.0, 5.0, 50.0];
        for w in temps.windows(2) {
            let lo = occupation(w[0]);
            let hi = occupation(w[1]);
            assert!(
                hi > lo,
                "n̄({}) = {} should exceed n̄({}) = {}",
                w[1], hi, w[0], lo
            );
            assert!(hi.is_finite());
        }
    }

    #[test]
    fn classical_limit_approaches_t_over_omega() {
        // n̄ ≈ T/ω − 1/2 for T ≫ ω
        let t = 1000.0;
        assert_relative_eq!(occupation(t), t - 0.5, epsilon = 1e-3);
    }

    #[test]
    fn generic_over_f32() {
        let n: f32 = bose_einstein(1.0f32, 1.0f32);
        assert_relative_eq!(n, 0.581_976_7f32, epsilon = 1e-6);
        assert_eq!(bose_einstein(0.0f32, 1.0f32), 0.0);
    }

    #[test]
    fn higher_frequency_means_fewer_quanta() {
        assert!(bose_einstein(1.0, 2.0) < bose_einstein(1.0, 1.0));
    }

    #[test]
    fn field_ignores_squeezing() {
        let mesh = Mesh::new(Axis::linspace(0.0, 2.0, 5), Axis::linspace(0.0, 1.0, 3));
        let field = occupation_field(&mesh, OMEGA);
        assert_eq!(field.shape(), (3, 5));
        for col in 0..5 {
            let first = field.get(0, col);
            for row in 1..3 {
                assert_eq!(field.get(row, col), first);
            }
        }
        // First temperature sample is exactly zero
        assert_eq!(field.get(0, 0), 0.0);
    }

    #[test]
    fn curve_has_one_value_per_sample() {
        let axis = Axis::linspace(0.01, 5.0, 17);
        let curve = occupation_curve(&axis, OMEGA);
        assert_eq!(curve.len(), 17);
        assert!(curve.iter().all(|n| n.is_finite() && *n > 0.0));
    }
}
