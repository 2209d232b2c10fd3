//! Natural units.
//!
//! Energies, temperatures and frequencies share one scale: ℏ = k_B = 1, so
//! a mode of frequency ω carries quantum ω and a temperature T is directly
//! the thermal energy T. The constants are kept explicit so the conversions
//! read like their SI counterparts.

/// Reduced Planck constant, ℏ = 1.
pub const HBAR: f64 = 1.0;

/// Boltzmann constant, k_B = 1.
pub const K_B: f64 = 1.0;

/// Mode frequency ω of both squeezed modes.
pub const OMEGA: f64 = 1.0;

/// Thermal energy k_B·T.
pub fn thermal_energy(temperature: f64) -> f64 {
    K_B * temperature
}

/// Temperature whose thermal energy is `energy`.
pub fn energy_to_temp(energy: f64) -> f64 {
    energy / K_B
}

/// Energy quantum ℏω of a mode.
pub fn omega_to_energy(omega: f64) -> f64 {
    HBAR * omega
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_units_are_identity() {
        for x in [0.0, 0.01, 1.0, 5.0, 1e6] {
            assert_eq!(thermal_energy(x), x);
            assert_eq!(energy_to_temp(x), x);
            assert_eq!(omega_to_energy(x), x);
        }
    }

    #[test]
    fn conversions_invert() {
        let t = 0.731;
        assert_eq!(energy_to_temp(thermal_energy(t)), t);
    }

    #[test]
    fn unit_mode_frequency() {
        assert_eq!(omega_to_energy(OMEGA), 1.0);
    }
}
