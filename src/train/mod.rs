pub mod epoch_stats;
pub mod online;
pub mod train_config;

pub use epoch_stats::EpochStats;
pub use online::{argmax, evaluate, train_loop};
pub use train_config::TrainConfig;
