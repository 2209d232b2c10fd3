//! Sweep axes and 2-D fields over the (temperature, squeezing) plane.
//!
//! A [`Mesh`] follows the `meshgrid` "xy" convention: rows index the
//! squeezing samples and columns index the temperature samples, so a field
//! has shape `(squeezing.len(), temperature.len())`.

/// Uniformly spaced samples on a closed interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    values: Vec<f64>,
}

impl Axis {
    /// `samples` evenly spaced values from `min` to `max`, both endpoints included.
    ///
    /// Bounds and resolution are trusted constants; `samples >= 2` and
    /// `max > min` are only checked in debug builds.
    pub fn linspace(min: f64, max: f64, samples: usize) -> Self {
        debug_assert!(samples >= 2, "axis needs at least two samples");
        debug_assert!(max > min, "axis bounds are inverted");
        let step = (max - min) / (samples - 1) as f64;
        let values = (0..samples)
            .map(|i| {
                if i == samples - 1 {
                    max
                } else {
                    min + step * i as f64
                }
            })
            .collect();
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn min(&self) -> f64 {
        self.values[0]
    }

    pub fn max(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Spacing between neighbouring samples.
    pub fn step(&self) -> f64 {
        (self.max() - self.min()) / (self.len() - 1) as f64
    }
}

/// Dense row-major 2-D array of reals.
#[derive(Debug, Clone, PartialEq)]
pub struct Field2D {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Field2D {
    /// Build a field by evaluating `f(row, col)` at every index.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self { rows, cols, data }
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "buffer does not match {}×{}",
            rows, cols
        );
        Self { rows, cols, data }
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    /// Element-wise map into a new field of the same shape.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Element-wise combination of two co-shaped fields.
    pub fn zip_map(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        assert_eq!(self.shape(), other.shape(), "fields must share a shape");
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Cross product of a temperature axis and a squeezing axis.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub temperature_axis: Axis,
    pub squeezing_axis: Axis,
    /// Temperature at each grid point
    pub temperature: Field2D,
    /// Squeezing parameter at each grid point
    pub squeezing: Field2D,
}

impl Mesh {
    pub fn new(temperature_axis: Axis, squeezing_axis: Axis) -> Self {
        let rows = squeezing_axis.len();
        let cols = temperature_axis.len();
        let t = temperature_axis.values();
        let r = squeezing_axis.values();
        let temperature = Field2D::from_fn(rows, cols, |_, col| t[col]);
        let squeezing = Field2D::from_fn(rows, cols, |row, _| r[row]);
        Self {
            temperature_axis,
            squeezing_axis,
            temperature,
            squeezing,
        }
    }

    /// (rows, cols) shared by every field on this mesh.
    pub fn shape(&self) -> (usize, usize) {
        self.temperature.shape()
    }
}
