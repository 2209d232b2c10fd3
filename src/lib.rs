//! # TMST Phase Diagram
//!
//! Entanglement dominance of a symmetric Two-Mode Squeezed Thermal State in
//! the zero-temperature limit. Three closed-form relations chain through a
//! single (temperature, squeezing) sweep:
//!
//! ```text
//! Bose-Einstein occupation   n̄(T) = 1 / (exp(ω/T) − 1)
//!   ↓ thermal noise
//! Critical squeezing         r_c(T) = ½ ln(2n̄ + 1)
//!   ↓ threshold
//! Logarithmic negativity     E_N = max(0, −log₂(2(n̄ + ½)e^{−2r}))
//! ```
//!
//! E_N is exactly zero at and below r_c and strictly positive above it. The
//! crate evaluates all three over a grid, checks that equivalence
//! numerically, and renders the resulting phase diagram as a PNG.
//!
//! ## Usage
//!
//! ```no_run
//! use tmst_phase::prelude::*;
//!
//! let config = DiagramConfig::default().with_resolution(200);
//! let diagram = PhaseDiagram::compute(&config);
//! verify_grid(&diagram, THEOREM_TOLERANCE).into_result()?;
//! render(&diagram, &config.style, &config.output)?;
//! # Ok::<(), tmst_phase::DiagramError>(())
//! ```
//!
//! ## References
//!
//! - Martín Alonso, J. M. (2026), "Entanglement Dominance in the
//!   Zero-Temperature Limit". <https://doi.org/10.5281/zenodo.18353640>
//! - Vidal, Werner (2002), "Computable measure of entanglement"
//! - Adesso, Illuminati (2007), "Entanglement in continuous-variable systems"

pub mod config;
pub mod entanglement;
pub mod error;
pub mod grid;
pub mod phase;
pub mod render;
pub mod thermal;
pub mod units;
pub mod verify;

pub use error::{DiagramError, Result};

pub mod prelude {
    pub use crate::config::*;
    pub use crate::entanglement::*;
    pub use crate::error::{DiagramError, Result};
    pub use crate::grid::*;
    pub use crate::phase::*;
    pub use crate::render::{render, show_image};
    pub use crate::thermal::*;
    pub use crate::units::*;
    pub use crate::verify::*;
}
