//! Run configuration.
//!
//! Everything is a compile-time constant gathered into [`DiagramConfig`] and
//! [`PlotStyle`]; there is no file or command-line parsing.

use std::path::PathBuf;

use crate::entanglement::Regime;
use crate::units::OMEGA;

/// Lowest sampled temperature. Kept above zero so the sweep never sits on
/// the Bose-Einstein singularity.
pub const T_MIN: f64 = 0.01;
/// Highest sampled temperature (units of ℏω/k_B)
pub const T_MAX: f64 = 5.0;
/// Squeezing sweep runs from 0 to this value
pub const R_MAX: f64 = 2.0;
/// Samples per axis
pub const RESOLUTION: usize = 500;
/// Output image
pub const OUTPUT_PATH: &str = "entanglement_phase_diagram.png";
/// Open the image in the system viewer after saving
pub const SHOW_IMAGE: bool = true;

/// RGB triple, 0–255 per channel.
pub type Rgb = (u8, u8, u8);

/// Separable (light grey) → strongly entangled (dark blue).
pub const COLORMAP_STOPS: [Rgb; 5] = [
    (0xf0, 0xf0, 0xf0),
    (0xd1, 0xe5, 0xf0),
    (0x43, 0x93, 0xc3),
    (0x21, 0x66, 0xac),
    (0x05, 0x30, 0x61),
];

/// Text label anchored in data coordinates, centred horizontally.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub lines: Vec<String>,
    /// Anchor temperature
    pub x: f64,
    /// Anchor squeezing
    pub y: f64,
    pub color: Rgb,
    pub font_pt: f64,
}

impl Annotation {
    /// Two-line regime label ("headline", "(subtitle)").
    pub fn regime(regime: Regime, x: f64, y: f64, color: Rgb) -> Self {
        Self {
            lines: vec![regime.headline().to_string(), regime.subtitle().to_string()],
            x,
            y,
            color,
            font_pt: 14.0,
        }
    }
}

/// Figure layout and decoration.
#[derive(Debug, Clone)]
pub struct PlotStyle {
    /// Figure width (inches)
    pub width_in: f64,
    /// Figure height (inches)
    pub height_in: f64,
    pub dpi: u32,
    /// Visible temperature window
    pub x_range: (f64, f64),
    /// Visible squeezing window
    pub y_range: (f64, f64),
    /// Number of filled contour levels
    pub levels: usize,
    pub colormap: Vec<Rgb>,
    /// Discrete colours the colormap is resampled to
    pub colormap_size: usize,
    pub title: Vec<String>,
    pub title_pt: f64,
    pub x_label: String,
    pub y_label: String,
    pub colorbar_label: String,
    pub label_pt: f64,
    pub threshold_label: String,
    pub threshold_color: Rgb,
    pub threshold_width_pt: f64,
    pub shade_color: Rgb,
    pub shade_alpha: f64,
    pub grid_alpha: f64,
    pub annotations: Vec<Annotation>,
}

impl PlotStyle {
    /// Figure size in pixels at the configured DPI.
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        (
            (self.width_in * dpi).round() as u32,
            (self.height_in * dpi).round() as u32,
        )
    }

    /// Convert a typographic size in points to pixels.
    pub fn pt_to_px(&self, pt: f64) -> u32 {
        (pt * self.dpi as f64 / 72.0).round().max(1.0) as u32
    }
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width_in: 10.0,
            height_in: 7.0,
            dpi: 300,
            x_range: (0.0, 3.0),
            y_range: (0.0, 2.0),
            levels: 50,
            colormap: COLORMAP_STOPS.to_vec(),
            colormap_size: 100,
            title: vec![
                "Phase Diagram: Entanglement Dominance in TMST".to_string(),
                "(Verification of Thesis Theorem 4.3.1)".to_string(),
            ],
            title_pt: 14.0,
            x_label: "Temperature (k_B T / ħω)".to_string(),
            y_label: "Squeezing Parameter r".to_string(),
            colorbar_label: "Log-Negativity E_N (Entanglement Bits)".to_string(),
            label_pt: 12.0,
            threshold_label: "Analytic Threshold r_c(T)".to_string(),
            threshold_color: (0xff, 0x00, 0x00),
            threshold_width_pt: 2.5,
            shade_color: (0x80, 0x80, 0x80),
            shade_alpha: 0.1,
            grid_alpha: 0.3,
            annotations: vec![
                Annotation::regime(Regime::NoiseDominated, 1.0, 0.2, (0x55, 0x55, 0x55)),
                Annotation::regime(Regime::EntanglementDominant, 1.5, 1.5, (0xff, 0xff, 0xff)),
            ],
        }
    }
}

/// Configuration for one phase-diagram run.
#[derive(Debug, Clone)]
pub struct DiagramConfig {
    /// Mode frequency ω
    pub omega: f64,
    pub t_min: f64,
    pub t_max: f64,
    pub r_min: f64,
    pub r_max: f64,
    /// Temperature samples
    pub t_samples: usize,
    /// Squeezing samples
    pub r_samples: usize,
    pub output: PathBuf,
    pub show: bool,
    pub style: PlotStyle,
}

impl DiagramConfig {
    /// Same bounds, `n` samples on both axes.
    pub fn with_resolution(mut self, n: usize) -> Self {
        self.t_samples = n;
        self.r_samples = n;
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            omega: OMEGA,
            t_min: T_MIN,
            t_max: T_MAX,
            r_min: 0.0,
            r_max: R_MAX,
            t_samples: RESOLUTION,
            r_samples: RESOLUTION,
            output: PathBuf::from(OUTPUT_PATH),
            show: SHOW_IMAGE,
            style: PlotStyle::default(),
        }
    }
}
