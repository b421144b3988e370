//! Perceptual fingerprint computation.
//!
//! Fingerprints are dHash values: the image is shrunk to a small grayscale
//! grid and each bit records whether a pixel is brighter than its right
//! neighbor. Visually identical images produce identical fingerprints, which
//! is all the duplicate detector compares; no distance thresholding happens
//! anywhere.

use image_hasher::{HashAlg, HasherConfig};
use std::path::Path;
use thiserror::Error;

/// Width and height of the dHash grid, in bits.
const HASH_SIZE: u32 = 8;

/// Errors that can occur while fingerprinting a single file.
///
/// These are per-file and recoverable: the pipeline reports them and moves
/// on, and the failed path is retried on the next run.
#[derive(Debug, Error)]
pub enum FingerprintError {
    /// Failed to open or decode the image.
    #[error("Failed to load image {path}: {source}")]
    Decode {
        /// Path of the file that failed
        path: String,
        /// The underlying decode or I/O error
        #[source]
        source: image::ImageError,
    },
}

/// Computes a fingerprint for one file.
///
/// Pure and stateless; safe to invoke concurrently on distinct paths. The
/// worker pool is generic over this trait so tests can substitute a stub.
pub trait Fingerprinter: Sync {
    /// Compute the fingerprint of the image at `path`.
    fn fingerprint(&self, path: &Path) -> Result<String, FingerprintError>;
}

/// dHash-based [`Fingerprinter`] producing lowercase hex strings.
pub struct DhashFingerprinter {
    hasher: image_hasher::Hasher,
}

impl DhashFingerprinter {
    /// Create a new dHash fingerprinter with the standard 8x8 grid.
    #[must_use]
    pub fn new() -> Self {
        let hasher = HasherConfig::new()
            .hash_alg(HashAlg::Gradient)
            .hash_size(HASH_SIZE, HASH_SIZE)
            .to_hasher();
        Self { hasher }
    }
}

impl Default for DhashFingerprinter {
    fn default() -> Self {
        Self::new()
    }
}

impl Fingerprinter for DhashFingerprinter {
    fn fingerprint(&self, path: &Path) -> Result<String, FingerprintError> {
        let img = image::open(path).map_err(|source| FingerprintError::Decode {
            path: path.display().to_string(),
            source,
        })?;
        Ok(hex::encode(self.hasher.hash_image(&img).as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_fingerprint_is_fixed_width_hex() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("img.png");
        image::RgbImage::new(16, 16).save(&path).unwrap();

        let fp = DhashFingerprinter::new().fingerprint(&path).unwrap();
        // 8x8 bits = 8 bytes = 16 hex characters
        assert_eq!(fp.len(), 16);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(fp, fp.to_lowercase());
    }

    #[test]
    fn test_identical_images_identical_fingerprints() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");

        let img = image::RgbImage::from_fn(32, 32, |x, _| image::Rgb([(x * 8) as u8, 0, 0]));
        img.save(&a).unwrap();
        img.save(&b).unwrap();

        let hasher = DhashFingerprinter::new();
        assert_eq!(
            hasher.fingerprint(&a).unwrap(),
            hasher.fingerprint(&b).unwrap()
        );
    }

    #[test]
    fn test_undecodable_file_is_decode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "not an image at all").unwrap();

        let err = DhashFingerprinter::new().fingerprint(&path).unwrap_err();
        let FingerprintError::Decode { path: p, .. } = err;
        assert!(p.contains("broken.jpg"));
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let dir = tempdir().unwrap();
        let result = DhashFingerprinter::new().fingerprint(&dir.path().join("absent.png"));
        assert!(result.is_err());
    }
}
