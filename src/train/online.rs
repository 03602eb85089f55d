use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::NetError;
use crate::loss::mse::MseLoss;
use crate::network::perceptron::Perceptron;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// Trains `network` for `config.epochs` epochs of fully online updates
/// (one parameter update per sample) and returns the per-epoch statistics.
///
/// # Arguments
/// - `network` — mutable reference to the perceptron; modified in place
/// - `inputs`  — training samples, each a `Vec<f64>` of length `input_size`
/// - `targets` — corresponding targets, same length as `inputs`
/// - `config`  — epoch count, shuffling, accuracy tracking
/// - `rng`     — drives the per-epoch shuffle; pass a seeded rng for
///               reproducible sample order
///
/// # Panics
/// Panics if `inputs` is empty or the two slices differ in length.
pub fn train_loop<R: Rng>(
    network: &mut Perceptron,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    config: &TrainConfig,
    rng: &mut R,
) -> Result<Vec<EpochStats>, NetError> {
    assert!(!inputs.is_empty(), "inputs must not be empty");
    assert_eq!(
        inputs.len(),
        targets.len(),
        "inputs and targets must have equal length"
    );

    let n = inputs.len();
    let mut history = Vec::with_capacity(config.epochs);
    let mut indices: Vec<usize> = (0..n).collect();

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        if config.shuffle {
            indices.shuffle(rng);
        }

        let mut total_loss = 0.0;
        for &idx in &indices {
            let output = network.infer(&inputs[idx])?;
            total_loss += MseLoss::loss(&output, &targets[idx]);
            network.train(&inputs[idx], &targets[idx])?;
        }

        let accuracy = if config.track_accuracy {
            Some(evaluate(network, inputs, targets)?)
        } else {
            None
        };

        history.push(EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss: total_loss / n as f64,
            accuracy,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        });
    }

    Ok(history)
}

/// Fraction of samples whose predicted class (argmax of the output vector)
/// matches the labeled class (argmax of the one-hot target).
pub fn evaluate(
    network: &Perceptron,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
) -> Result<f64, NetError> {
    if inputs.is_empty() {
        return Ok(0.0);
    }

    let mut correct = 0usize;
    for (input, target) in inputs.iter().zip(targets.iter()) {
        let output = network.infer(input)?;
        if argmax(&output) == argmax(target) {
            correct += 1;
        }
    }

    Ok(correct as f64 / inputs.len() as f64)
}

/// Index of the maximum element in a slice. Ties go to the earliest index.
pub fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn argmax_picks_the_largest_entry() {
        assert_eq!(argmax(&[0.1, 0.0, 0.8, 0.1]), 2);
        assert_eq!(argmax(&[0.9, 0.1]), 0);
    }

    #[test]
    fn argmax_ties_resolve_to_the_earliest_index() {
        assert_eq!(argmax(&[0.5, 0.5, 0.2]), 0);
    }

    #[test]
    fn train_loop_emits_one_stats_record_per_epoch() {
        let mut network = Perceptron::with_seed(2, 3, 2, 13);
        let inputs = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let targets = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let mut config = TrainConfig::new(5);
        config.track_accuracy = true;

        let history = train_loop(
            &mut network,
            &inputs,
            &targets,
            &config,
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();

        assert_eq!(history.len(), 5);
        for (i, stats) in history.iter().enumerate() {
            assert_eq!(stats.epoch, i + 1);
            assert_eq!(stats.total_epochs, 5);
            assert!(stats.train_loss.is_finite() && stats.train_loss >= 0.0);
            let accuracy = stats.accuracy.expect("accuracy tracking was on");
            assert!((0.0..=1.0).contains(&accuracy));
        }
    }

    #[test]
    fn train_loop_reduces_loss_on_a_separable_task() {
        let mut network = Perceptron::with_seed(2, 4, 2, 29);
        let inputs = vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
        ];
        // Class 0 when the first input is low, class 1 when it is high.
        let targets = vec![
            vec![1.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![0.0, 1.0],
        ];

        let history = train_loop(
            &mut network,
            &inputs,
            &targets,
            &TrainConfig::new(500),
            &mut StdRng::seed_from_u64(2),
        )
        .unwrap();

        let first = history.first().unwrap().train_loss;
        let last = history.last().unwrap().train_loss;
        assert!(last < first, "loss went from {first} to {last}");
    }

    #[test]
    fn evaluate_is_perfect_on_a_memorized_sample() {
        let mut network = Perceptron::with_seed(2, 4, 2, 3);
        let inputs = vec![vec![0.2, 0.9]];
        let targets = vec![vec![0.0, 1.0]];

        for _ in 0..2_000 {
            network.train(&inputs[0], &targets[0]).unwrap();
        }

        assert_eq!(evaluate(&network, &inputs, &targets).unwrap(), 1.0);
    }
}
