//! Dense convolution kernel with an odd-sized, centred origin

use crate::core::errors::CoreError;

/// Weights below this magnitude are treated as zero when dividing
const EPSILON: f32 = 1e-7;

/// Row-major `rows x cols` weight matrix.
///
/// Both dimensions are odd so that cell `(rows / 2, cols / 2)` is the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    rows: usize,
    cols: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// All-zero kernel
    pub fn new(rows: usize, cols: usize) -> Result<Self, CoreError> {
        Self::check_dims(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            weights: vec![0.0; rows * cols],
        })
    }

    /// Square kernel with weight 1 at the origin
    pub fn identity(size: usize) -> Result<Self, CoreError> {
        let mut kernel = Self::new(size, size)?;
        kernel.set(size / 2, size / 2, 1.0);
        Ok(kernel)
    }

    /// Build from rows as entered top-to-bottom
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self, CoreError> {
        let cols = rows.first().map_or(0, Vec::len);
        Self::check_dims(rows.len(), cols)?;
        if rows.iter().any(|row| row.len() != cols) {
            return Err(CoreError::InvalidKernel(
                "all kernel rows must have the same length".to_string(),
            ));
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            weights: rows.iter().flatten().copied().collect(),
        })
    }

    fn check_dims(rows: usize, cols: usize) -> Result<(), CoreError> {
        if rows == 0 || cols == 0 || rows % 2 == 0 || cols % 2 == 0 {
            return Err(CoreError::InvalidKernel(format!(
                "dimensions must be positive and odd, got {}x{}",
                rows, cols
            )));
        }
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Origin cell as (row, col)
    pub fn center(&self) -> (usize, usize) {
        (self.rows / 2, self.cols / 2)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.weights[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, weight: f32) {
        if row < self.rows && col < self.cols {
            self.weights[row * self.cols + col] = weight;
        }
    }

    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// Divide every weight by `divisor`; a divisor below 1e-7 (zero or
    /// negative) counts as 1
    pub fn scaled(&self, divisor: f32) -> Self {
        let divisor = if divisor < EPSILON { 1.0 } else { divisor };
        Self {
            weights: self.weights.iter().map(|w| w / divisor).collect(),
            ..self.clone()
        }
    }

    /// Weights divided by their sum, or unchanged when the sum is not positive
    pub fn normalized(&self) -> Self {
        let total = self.sum();
        if total > EPSILON {
            self.scaled(total)
        } else {
            self.clone()
        }
    }
}
