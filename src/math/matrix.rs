use rand::Rng;

use crate::error::NetError;

/// Dense row-major matrix of f64 cells.
///
/// Storage is a single flat buffer of length `rows * cols`; the cell at
/// `(r, c)` lives at index `r * cols + c`. Every arithmetic operation
/// validates operand shapes before touching any cell and returns a fresh
/// matrix; `randomize` is the one sanctioned in-place mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a `rows` x `cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Builds a matrix from explicit row data. All rows must be equally long.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Matrix {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |row| row.len());
        assert!(
            rows.iter().all(|row| row.len() == n_cols),
            "from_rows requires equally long rows"
        );

        Matrix {
            rows: n_rows,
            cols: n_cols,
            data: rows.into_iter().flatten().collect(),
        }
    }

    /// Lifts a plain vector into a `len` x 1 column matrix.
    pub fn from_column(values: &[f64]) -> Matrix {
        Matrix {
            rows: values.len(),
            cols: 1,
            data: values.to_vec(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major view of the underlying cells. For a column matrix this is
    /// exactly the plain-vector form of its values.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Reads the cell at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<f64, NetError> {
        self.check_index(row, col)?;
        Ok(self.data[row * self.cols + col])
    }

    /// Writes the cell at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), NetError> {
        self.check_index(row, col)?;
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    /// Overwrites every cell with an independent uniform sample in [-1, 1].
    ///
    /// Symmetry-breaking init: identical weights would keep receiving
    /// identical updates and the hidden units would never differentiate.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for cell in &mut self.data {
            *cell = rng.gen::<f64>() * 2.0 - 1.0;
        }
    }

    /// Returns the `cols` x `rows` transpose.
    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[j * res.cols + i] = self.data[i * self.cols + j];
            }
        }

        res
    }

    /// Returns a copy with every cell multiplied by `scalar`.
    pub fn scale(&self, scalar: f64) -> Matrix {
        self.map(|x| x * scalar)
    }

    /// Returns a copy with `functor` applied independently to every cell.
    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| functor(x)).collect(),
        }
    }

    /// Element-wise sum. Requires identical shapes.
    pub fn add(&self, rhs: &Matrix) -> Result<Matrix, NetError> {
        self.check_same_shape("add", rhs)?;
        Ok(self.zip_with(rhs, |a, b| a + b))
    }

    /// Element-wise difference. Requires identical shapes.
    pub fn subtract(&self, rhs: &Matrix) -> Result<Matrix, NetError> {
        self.check_same_shape("subtract", rhs)?;
        Ok(self.zip_with(rhs, |a, b| a - b))
    }

    /// Element-wise (Hadamard) product. Requires identical shapes.
    pub fn hadamard(&self, rhs: &Matrix) -> Result<Matrix, NetError> {
        self.check_same_shape("hadamard", rhs)?;
        Ok(self.zip_with(rhs, |a, b| a * b))
    }

    /// Standard matrix product. Requires `self.cols == rhs.rows`.
    ///
    /// O(rows * cols * rhs.cols) — the dominant cost of both the forward
    /// and the backward pass.
    pub fn matmul(&self, rhs: &Matrix) -> Result<Matrix, NetError> {
        if self.cols != rhs.rows {
            return Err(self.shape_mismatch("matmul", rhs));
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..self.rows {
            for j in 0..rhs.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i * self.cols + k] * rhs.data[k * rhs.cols + j];
                }

                res.data[i * res.cols + j] = sum;
            }
        }

        Ok(res)
    }

    fn zip_with<F>(&self, rhs: &Matrix, combine: F) -> Matrix
    where
        F: Fn(f64, f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(&a, &b)| combine(a, b))
                .collect(),
        }
    }

    fn check_index(&self, row: usize, col: usize) -> Result<(), NetError> {
        if row >= self.rows || col >= self.cols {
            return Err(NetError::IndexError {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    fn check_same_shape(&self, op: &'static str, rhs: &Matrix) -> Result<(), NetError> {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            return Err(self.shape_mismatch(op, rhs));
        }
        Ok(())
    }

    fn shape_mismatch(&self, op: &'static str, rhs: &Matrix) -> NetError {
        NetError::ShapeMismatch {
            op,
            lhs_rows: self.rows,
            lhs_cols: self.cols,
            rhs_rows: rhs.rows,
            rhs_cols: rhs.cols,
        }
    }
}
