use serde::{Serialize, Deserialize};

/// Per-epoch training statistics emitted by `train_loop`.
///
/// One value is produced at the end of every completed epoch. Drivers use
/// the history for progress display or dump it as a JSON training report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean squared error over all samples in this epoch.
    pub train_loss: f64,
    /// Argmax accuracy over the training set as a fraction in [0, 1]; only
    /// set when `TrainConfig::track_accuracy` is on.
    pub accuracy: Option<f64>,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
