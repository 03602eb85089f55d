pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²). Reporting only — the
    /// backward pass derives its error signal directly from
    /// target - output, so no loss derivative is needed here.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted
            .iter()
            .zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            / n
    }
}

#[cfg(test)]
mod tests {
    use super::MseLoss;

    #[test]
    fn perfect_prediction_has_zero_loss() {
        assert_eq!(MseLoss::loss(&[0.5, 1.0], &[0.5, 1.0]), 0.0);
    }

    #[test]
    fn loss_is_the_mean_of_squared_differences() {
        // (0.5² + 1.0²) / 2 = 0.625
        assert!((MseLoss::loss(&[1.0, 0.0], &[0.5, 1.0]) - 0.625).abs() < 1e-12);
    }
}
