use thiserror::Error;

/// Error type shared by the matrix engine and the perceptron.
///
/// Every variant is detected before any numeric work begins, so a failed
/// operation never leaves a half-written result or a half-updated network.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetError {
    /// Operand dimensions are incompatible for an algebraic matrix operation.
    #[error("{op}: shape mismatch ({lhs_rows}x{lhs_cols} vs {rhs_rows}x{rhs_cols})")]
    ShapeMismatch {
        op: &'static str,
        lhs_rows: usize,
        lhs_cols: usize,
        rhs_rows: usize,
        rhs_cols: usize,
    },

    /// A feature or target vector does not match the network's topology.
    #[error("{what}: expected {expected} values, got {got}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// Cell access outside the matrix bounds.
    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    IndexError {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}
