use std::fs;
use std::path::Path;

use thiserror::Error;

/// IDX3 image file magic number (big-endian bytes 0-3: 0x00 0x00 0x08 0x03).
const IMAGE_MAGIC: u32 = 2051;
/// IDX1 label file magic number (big-endian bytes 0-3: 0x00 0x00 0x08 0x01).
const LABEL_MAGIC: u32 = 2049;

/// Error type for the IDX dataset reader.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Underlying file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file does not start with the expected IDX magic number.
    #[error("bad IDX magic number: expected {expected}, got {got}")]
    BadMagic { expected: u32, got: u32 },

    /// The header declares more payload than the file contains.
    #[error("IDX file truncated: need at least {needed} bytes, got {got}")]
    Truncated { needed: usize, got: usize },

    /// The header declares images with no pixels.
    #[error("IDX image file declares zero-sized images ({rows}x{cols})")]
    ZeroPixels { rows: usize, cols: usize },

    /// The declared item count and geometry overflow usize.
    #[error("IDX header geometry overflows ({0} x {1})")]
    HeaderOverflow(usize, usize),

    /// A label byte names a class outside `[0, classes)`.
    #[error("label {label} at index {index} out of range for {classes} classes")]
    LabelOutOfRange {
        label: u8,
        index: usize,
        classes: usize,
    },
}

/// Parses an IDX3 image buffer into per-image feature vectors.
///
/// Layout: 16-byte header (magic 2051, item count, rows, cols — all
/// big-endian u32) followed by `count * rows * cols` uint8 pixels in
/// row-major order. Each pixel is divided by 255.0, so every feature lies
/// in [0.0, 1.0].
pub fn parse_images(bytes: &[u8]) -> Result<Vec<Vec<f64>>, DatasetError> {
    let magic = read_be_u32(bytes, 0)?;
    if magic != IMAGE_MAGIC {
        return Err(DatasetError::BadMagic {
            expected: IMAGE_MAGIC,
            got: magic,
        });
    }

    let count = read_be_u32(bytes, 4)? as usize;
    let rows = read_be_u32(bytes, 8)? as usize;
    let cols = read_be_u32(bytes, 12)? as usize;

    let pixels = rows
        .checked_mul(cols)
        .ok_or(DatasetError::HeaderOverflow(rows, cols))?;
    if pixels == 0 {
        return Err(DatasetError::ZeroPixels { rows, cols });
    }

    let payload = count
        .checked_mul(pixels)
        .ok_or(DatasetError::HeaderOverflow(count, pixels))?;
    let needed = 16usize
        .checked_add(payload)
        .ok_or(DatasetError::HeaderOverflow(count, pixels))?;
    let data = bytes.get(16..needed).ok_or(DatasetError::Truncated {
        needed,
        got: bytes.len(),
    })?;

    Ok(data
        .chunks_exact(pixels)
        .map(|image| image.iter().map(|&px| px as f64 / 255.0).collect())
        .collect())
}

/// Parses an IDX1 label buffer into one-hot target vectors of length
/// `n_classes`.
///
/// Layout: 8-byte header (magic 2049, item count — big-endian u32)
/// followed by one uint8 class index per item. `n_classes` must be at
/// least 1; a label byte at or above it is rejected.
pub fn parse_labels(bytes: &[u8], n_classes: usize) -> Result<Vec<Vec<f64>>, DatasetError> {
    assert!(n_classes > 0, "n_classes must be at least 1");

    let magic = read_be_u32(bytes, 0)?;
    if magic != LABEL_MAGIC {
        return Err(DatasetError::BadMagic {
            expected: LABEL_MAGIC,
            got: magic,
        });
    }

    let count = read_be_u32(bytes, 4)? as usize;
    let needed = 8usize
        .checked_add(count)
        .ok_or(DatasetError::HeaderOverflow(8, count))?;
    let data = bytes.get(8..needed).ok_or(DatasetError::Truncated {
        needed,
        got: bytes.len(),
    })?;

    let mut labels = Vec::with_capacity(count);
    for (index, &label) in data.iter().enumerate() {
        let class = label as usize;
        if class >= n_classes {
            return Err(DatasetError::LabelOutOfRange {
                label,
                index,
                classes: n_classes,
            });
        }
        let mut one_hot = vec![0.0f64; n_classes];
        one_hot[class] = 1.0;
        labels.push(one_hot);
    }

    Ok(labels)
}

/// Reads and parses an IDX3 image file. See [`parse_images`].
pub fn load_images<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<f64>>, DatasetError> {
    parse_images(&fs::read(path)?)
}

/// Reads and parses an IDX1 label file. See [`parse_labels`].
pub fn load_labels<P: AsRef<Path>>(
    path: P,
    n_classes: usize,
) -> Result<Vec<Vec<f64>>, DatasetError> {
    parse_labels(&fs::read(path)?, n_classes)
}

fn read_be_u32(bytes: &[u8], offset: usize) -> Result<u32, DatasetError> {
    let end = offset + 4;
    let word = bytes.get(offset..end).ok_or(DatasetError::Truncated {
        needed: end,
        got: bytes.len(),
    })?;
    Ok(u32::from_be_bytes([word[0], word[1], word[2], word[3]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_bytes(count: u32, rows: u32, cols: u32, pixels: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&IMAGE_MAGIC.to_be_bytes());
        bytes.extend_from_slice(&count.to_be_bytes());
        bytes.extend_from_slice(&rows.to_be_bytes());
        bytes.extend_from_slice(&cols.to_be_bytes());
        bytes.extend_from_slice(pixels);
        bytes
    }

    fn label_bytes(labels: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&LABEL_MAGIC.to_be_bytes());
        bytes.extend_from_slice(&(labels.len() as u32).to_be_bytes());
        bytes.extend_from_slice(labels);
        bytes
    }

    #[test]
    fn images_are_split_and_normalized() {
        let bytes = image_bytes(2, 2, 2, &[0, 255, 51, 102, 255, 0, 153, 204]);
        let images = parse_images(&bytes).unwrap();

        assert_eq!(images.len(), 2);
        assert_eq!(images[0].len(), 4);
        assert_eq!(images[0][0], 0.0);
        assert_eq!(images[0][1], 1.0);
        assert!((images[0][2] - 51.0 / 255.0).abs() < 1e-12);
        assert_eq!(images[1][1], 0.0);
    }

    #[test]
    fn image_magic_is_checked_first() {
        let mut bytes = image_bytes(1, 1, 1, &[7]);
        bytes[3] = 0x01; // label magic in an image file
        match parse_images(&bytes) {
            Err(DatasetError::BadMagic { expected, got }) => {
                assert_eq!(expected, IMAGE_MAGIC);
                assert_eq!(got, LABEL_MAGIC);
            }
            other => panic!("expected BadMagic, got {:?}", other),
        }
    }

    #[test]
    fn short_image_payload_is_truncated() {
        // Header declares 2 images of 4 pixels but only 5 pixel bytes follow.
        let bytes = image_bytes(2, 2, 2, &[1, 2, 3, 4, 5]);
        match parse_images(&bytes) {
            Err(DatasetError::Truncated { needed, got }) => {
                assert_eq!(needed, 24);
                assert_eq!(got, 21);
            }
            other => panic!("expected Truncated, got {:?}", other),
        }
    }

    #[test]
    fn zero_pixel_geometry_is_rejected() {
        let bytes = image_bytes(1, 0, 28, &[]);
        assert!(matches!(
            parse_images(&bytes),
            Err(DatasetError::ZeroPixels { rows: 0, cols: 28 })
        ));
    }

    #[test]
    fn labels_become_one_hot_vectors() {
        let labels = parse_labels(&label_bytes(&[3, 0]), 4).unwrap();
        assert_eq!(labels, vec![
            vec![0.0, 0.0, 0.0, 1.0],
            vec![1.0, 0.0, 0.0, 0.0],
        ]);
    }

    #[test]
    fn out_of_range_label_is_rejected() {
        match parse_labels(&label_bytes(&[1, 9]), 4) {
            Err(DatasetError::LabelOutOfRange {
                label,
                index,
                classes,
            }) => {
                assert_eq!(label, 9);
                assert_eq!(index, 1);
                assert_eq!(classes, 4);
            }
            other => panic!("expected LabelOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn short_label_file_is_truncated() {
        let mut bytes = label_bytes(&[1, 2, 3]);
        bytes.truncate(9);
        assert!(matches!(
            parse_labels(&bytes, 10),
            Err(DatasetError::Truncated { needed: 11, got: 9 })
        ));
    }

    #[test]
    fn missing_file_surfaces_as_io_error() {
        assert!(matches!(
            load_images("no/such/file-idx3-ubyte"),
            Err(DatasetError::Io(_))
        ));
    }
}
