use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::activation::{dsigmoid, sigmoid};
use crate::error::NetError;
use crate::math::matrix::Matrix;

/// A 3-layer perceptron (input → hidden → output) trained by online
/// backpropagation with sigmoid activations.
///
/// The topology is fixed at construction. The network exclusively owns its
/// four parameter matrices; every other matrix flowing through a forward or
/// backward pass is a fresh temporary. One call to [`Perceptron::train`]
/// performs exactly one forward + backward + update for a single example
/// (batch size 1, no state carried between calls).
#[derive(Debug, Clone)]
pub struct Perceptron {
    input_size: usize,
    hidden_size: usize,
    output_size: usize,
    learning_rate: f64,
    weights_ih: Matrix,
    weights_ho: Matrix,
    bias_h: Matrix,
    bias_o: Matrix,
}

impl Perceptron {
    /// Builds a network with entropy-seeded random parameters and the
    /// default learning rate of 0.1. All sizes must be positive.
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize) -> Perceptron {
        Perceptron::from_rng(
            input_size,
            hidden_size,
            output_size,
            &mut StdRng::from_entropy(),
        )
    }

    /// Builds a network whose initial parameters are fully determined by
    /// `seed`. Two networks built with the same topology and seed start
    /// from identical weights, which makes training runs reproducible.
    pub fn with_seed(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        seed: u64,
    ) -> Perceptron {
        Perceptron::from_rng(
            input_size,
            hidden_size,
            output_size,
            &mut StdRng::seed_from_u64(seed),
        )
    }

    fn from_rng<R: Rng>(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        rng: &mut R,
    ) -> Perceptron {
        assert!(input_size > 0, "input_size must be at least 1");
        assert!(hidden_size > 0, "hidden_size must be at least 1");
        assert!(output_size > 0, "output_size must be at least 1");

        let mut weights_ih = Matrix::zeros(hidden_size, input_size);
        let mut weights_ho = Matrix::zeros(output_size, hidden_size);
        let mut bias_h = Matrix::zeros(hidden_size, 1);
        let mut bias_o = Matrix::zeros(output_size, 1);

        weights_ih.randomize(rng);
        weights_ho.randomize(rng);
        bias_h.randomize(rng);
        bias_o.randomize(rng);

        Perceptron {
            input_size,
            hidden_size,
            output_size,
            learning_rate: 0.1,
            weights_ih,
            weights_ho,
            bias_h,
            bias_o,
        }
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Sets the step size for subsequent training calls. Must be positive.
    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        assert!(learning_rate > 0.0, "learning_rate must be positive");
        self.learning_rate = learning_rate;
    }

    /// Runs the forward pass and returns the output activations as a plain
    /// vector of length `output_size`. Parameters are not modified.
    pub fn infer(&self, features: &[f64]) -> Result<Vec<f64>, NetError> {
        self.check_features(features)?;
        let (_, _, output) = self.forward(features)?;
        Ok(output.as_slice().to_vec())
    }

    /// Performs one online training step: forward pass, backpropagation,
    /// and an in-place update of all four parameter matrices.
    ///
    /// Validation happens before any numeric work, so a dimension error
    /// leaves every parameter exactly as it was.
    pub fn train(&mut self, features: &[f64], targets: &[f64]) -> Result<(), NetError> {
        self.check_features(features)?;
        if targets.len() != self.output_size {
            return Err(NetError::DimensionMismatch {
                what: "target labels",
                expected: self.output_size,
                got: targets.len(),
            });
        }

        let (inputs, hidden, output) = self.forward(features)?;

        // Error at the output: target minus prediction, positive when the
        // network under-predicts.
        let target = Matrix::from_column(targets);
        let output_error = target.subtract(&output)?;

        // The hidden layer has no target of its own; its error is the output
        // error pushed back through the outgoing weights.
        let hidden_error = self.weights_ho.transpose().matmul(&output_error)?;

        // Chain rule through the activation. `output` is already the
        // activated value, which is exactly what dsigmoid expects.
        let output_gradient = output
            .map(dsigmoid)
            .hadamard(&output_error)?
            .scale(self.learning_rate);

        self.weights_ho = self
            .weights_ho
            .add(&output_gradient.matmul(&hidden.transpose())?)?;
        self.bias_o = self.bias_o.add(&output_gradient)?;

        let hidden_gradient = hidden
            .map(dsigmoid)
            .hadamard(&hidden_error)?
            .scale(self.learning_rate);

        self.weights_ih = self
            .weights_ih
            .add(&hidden_gradient.matmul(&inputs.transpose())?)?;
        self.bias_h = self.bias_h.add(&hidden_gradient)?;

        Ok(())
    }

    /// Shared forward pass: `infer` and the forward half of `train` both go
    /// through here, so the two paths agree bit-for-bit on the same
    /// parameter state. Returns `(input_col, hidden, output)` — the
    /// intermediates the backward pass needs.
    fn forward(&self, features: &[f64]) -> Result<(Matrix, Matrix, Matrix), NetError> {
        let inputs = Matrix::from_column(features);

        let hidden = self
            .weights_ih
            .matmul(&inputs)?
            .add(&self.bias_h)?
            .map(sigmoid);

        let output = self
            .weights_ho
            .matmul(&hidden)?
            .add(&self.bias_o)?
            .map(sigmoid);

        Ok((inputs, hidden, output))
    }

    fn check_features(&self, features: &[f64]) -> Result<(), NetError> {
        if features.len() != self.input_size {
            return Err(NetError::DimensionMismatch {
                what: "input features",
                expected: self.input_size,
                got: features.len(),
            });
        }
        Ok(())
    }
}
