//! Dense row-major matrix used by every color transform.
//!
//! All operations are value-returning: operands are borrowed, never
//! mutated, and shapes are checked before any arithmetic happens.

use crate::error::CorrectionError;

/// A `rows × cols` grid of `f64` entries stored in row-major order.
///
/// Shape is validated at construction (`rows ≥ 1`, `cols ≥ 1`,
/// `data.len() == rows * cols`), so every live `Matrix` is well-formed.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Build a matrix from explicit dimensions and row-major data.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, CorrectionError> {
        if rows == 0 || cols == 0 || rows.checked_mul(cols) != Some(data.len()) {
            return Err(CorrectionError::InvalidShape {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a `1 × n` matrix from a single row of scalars.
    pub fn from_row(values: &[f64]) -> Result<Self, CorrectionError> {
        Self::new(1, values.len(), values.to_vec())
    }

    /// Build an `n × 1` matrix from a single column of scalars.
    pub fn from_column(values: &[f64]) -> Result<Self, CorrectionError> {
        Self::new(values.len(), 1, values.to_vec())
    }

    /// Build a matrix from a fixed-size nested array.
    ///
    /// Zero-sized dimensions are rejected at compile time, so this
    /// constructor cannot fail.
    pub fn from_rows<const R: usize, const C: usize>(rows: [[f64; C]; R]) -> Self {
        const { assert!(R > 0 && C > 0, "matrix dimensions must be non-zero") };
        Self {
            rows: R,
            cols: C,
            data: rows.iter().flatten().copied().collect(),
        }
    }

    /// The `n × n` identity matrix.
    pub fn identity(n: usize) -> Result<Self, CorrectionError> {
        let Some(len) = n.checked_mul(n) else {
            return Err(CorrectionError::InvalidShape {
                rows: n,
                cols: n,
                len: 0,
            });
        };
        let mut data = vec![0.0; len];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self::new(n, n, data)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Entry at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Row-major view of all entries.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Matrix product `self × rhs`.
    ///
    /// ```text
    /// C[i][j] = Σ_k A[i][k] · B[k][j]
    /// ```
    ///
    /// Requires `self.cols == rhs.rows`; the result is `self.rows × rhs.cols`.
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix, CorrectionError> {
        if self.cols != rhs.rows {
            return Err(self.mismatch("multiply", rhs));
        }

        let mut data = vec![0.0; self.rows * rhs.cols];
        for i in 0..self.rows {
            for j in 0..rhs.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.data[i * self.cols + k] * rhs.data[k * rhs.cols + j];
                }
                data[i * rhs.cols + j] = sum;
            }
        }

        Ok(Matrix {
            rows: self.rows,
            cols: rhs.cols,
            data,
        })
    }

    /// Element-wise sum. Shapes must match exactly.
    pub fn add(&self, rhs: &Matrix) -> Result<Matrix, CorrectionError> {
        self.zip_with("add", rhs, |a, b| a + b)
    }

    /// Element-wise difference `self − rhs`. Shapes must match exactly.
    pub fn subtract(&self, rhs: &Matrix) -> Result<Matrix, CorrectionError> {
        self.zip_with("subtract", rhs, |a, b| a - b)
    }

    /// Multiply every entry by `k`.
    pub fn scale(&self, k: f64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|v| v * k).collect(),
        }
    }

    pub fn transpose(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                data.push(self.data[row * self.cols + col]);
            }
        }
        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    fn zip_with(
        &self,
        op: &'static str,
        rhs: &Matrix,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Matrix, CorrectionError> {
        if self.shape() != rhs.shape() {
            return Err(self.mismatch(op, rhs));
        }
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&rhs.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    fn mismatch(&self, op: &'static str, rhs: &Matrix) -> CorrectionError {
        CorrectionError::DimensionMismatch {
            op,
            lhs: self.shape(),
            rhs: rhs.shape(),
        }
    }
}
