/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`         — total number of full passes over the training data
/// - `shuffle`        — visit samples in a fresh random order each epoch
/// - `track_accuracy` — compute argmax accuracy over the training set after
///                      each epoch (one extra forward pass per sample)
pub struct TrainConfig {
    pub epochs: usize,
    pub shuffle: bool,
    pub track_accuracy: bool,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with shuffling on and accuracy tracking off.
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            shuffle: true,
            track_accuracy: false,
        }
    }
}
