pub mod math;
pub mod activation;
pub mod network;
pub mod loss;
pub mod train;
pub mod dataset;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::{dsigmoid, sigmoid};
pub use network::perceptron::Perceptron;
pub use loss::mse::MseLoss;
pub use train::{argmax, evaluate, train_loop, EpochStats, TrainConfig};
pub use dataset::idx::{load_images, load_labels, DatasetError};
pub use error::NetError;
