//! Field evaluation over the (temperature, squeezing) mesh.
//!
//! Builds the occupation field, the entanglement field and the analytic
//! threshold curve in a single pass. All three are pure element-wise maps,
//! so the optional `parallel` feature only changes how rows are scheduled,
//! never the numbers.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::DiagramConfig;
use crate::entanglement::{critical_squeezing, log_negativity};
use crate::grid::{Axis, Field2D, Mesh};
use crate::thermal::{occupation_curve, occupation_field};

/// Every array needed to draw the diagram. Read-only once computed.
#[derive(Debug, Clone)]
pub struct PhaseDiagram {
    pub omega: f64,
    pub mesh: Mesh,
    /// n̄ at each grid point
    pub occupation: Field2D,
    /// E_N at each grid point, never negative
    pub entanglement: Field2D,
    /// r_c for each temperature sample
    pub threshold: Vec<f64>,
}

impl PhaseDiagram {
    /// Sample the axes described by `config` and evaluate every field.
    pub fn compute(config: &DiagramConfig) -> Self {
        let temperature = Axis::linspace(config.t_min, config.t_max, config.t_samples);
        let squeezing = Axis::linspace(config.r_min, config.r_max, config.r_samples);
        Self::from_mesh(Mesh::new(temperature, squeezing), config.omega)
    }

    pub fn from_mesh(mesh: Mesh, omega: f64) -> Self {
        let occupation = occupation_field(&mesh, omega);
        let entanglement = entanglement_field(&mesh.squeezing, &occupation);
        let threshold = occupation_curve(&mesh.temperature_axis, omega)
            .into_iter()
            .map(critical_squeezing)
            .collect();
        Self {
            omega,
            mesh,
            occupation,
            entanglement,
            threshold,
        }
    }

    pub fn temperatures(&self) -> &[f64] {
        self.mesh.temperature_axis.values()
    }

    pub fn squeezings(&self) -> &[f64] {
        self.mesh.squeezing_axis.values()
    }

    /// (temperature, r_c) pairs, ready for a line plot.
    pub fn threshold_curve(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.temperatures()
            .iter()
            .copied()
            .zip(self.threshold.iter().copied())
    }

    pub fn max_entanglement(&self) -> f64 {
        self.entanglement.max()
    }

    /// Fraction of grid points with E_N > 0.
    pub fn entangled_fraction(&self) -> f64 {
        let entangled = self.entanglement.iter().filter(|&e| e > 0.0).count();
        entangled as f64 / self.entanglement.len() as f64
    }

    /// r_c at an arbitrary temperature, linearly interpolated on the curve.
    /// Clamped to the end values outside the sampled range. NaN in, NaN out.
    pub fn threshold_at(&self, temperature: f64) -> f64 {
        if temperature.is_nan() {
            return f64::NAN;
        }
        let t = self.temperatures();
        let rc = &self.threshold;
        if temperature <= t[0] {
            return rc[0];
        }
        if temperature >= t[t.len() - 1] {
            return rc[rc.len() - 1];
        }
        let idx = t.partition_point(|&x| x <= temperature);
        let (t0, t1) = (t[idx - 1], t[idx]);
        let frac = (temperature - t0) / (t1 - t0);
        rc[idx - 1] + frac * (rc[idx] - rc[idx - 1])
    }
}

/// E_N over co-shaped squeezing and occupation fields.
#[cfg(not(feature = "parallel"))]
pub fn entanglement_field(squeezing: &Field2D, occupation: &Field2D) -> Field2D {
    squeezing.zip_map(occupation, log_negativity)
}

/// E_N over co-shaped squeezing and occupation fields, one rayon task per row.
#[cfg(feature = "parallel")]
pub fn entanglement_field(squeezing: &Field2D, occupation: &Field2D) -> Field2D {
    assert_eq!(
        squeezing.shape(),
        occupation.shape(),
        "fields must share a shape"
    );
    let (rows, cols) = squeezing.shape();
    let mut data = vec![0.0; rows * cols];
    data.par_chunks_mut(cols)
        .enumerate()
        .for_each(|(row, out)| {
            let r = squeezing.row(row);
            let n = occupation.row(row);
            for (col, e) in out.iter_mut().enumerate() {
                *e = log_negativity(r[col], n[col]);
            }
        });
    Field2D::from_vec(rows, cols, data)
}
