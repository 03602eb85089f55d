pub mod idx;

pub use idx::{load_images, load_labels, parse_images, parse_labels, DatasetError};
