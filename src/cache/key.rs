//! Fingerprints for segmentation requests.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::segmenter::SegmentOptions;

/// Fixed-size fingerprint of a text and its normalized segmentation options
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey([u8; 32]);

impl CacheKey {
    /// Builds the key for `text` segmented with `options`.
    ///
    /// Options are hashed in canonical form: the paragraph flag is always
    /// present, an absent threshold has its own tag, and `-0.0` hashes like
    /// `0.0`. The text is length-prefixed so it cannot bleed into the option
    /// bytes.
    pub fn new(text: &str, options: &SegmentOptions) -> Self {
        let mut hasher = Sha256::new();

        hasher.update((text.len() as u64).to_le_bytes());
        hasher.update(text.as_bytes());

        hasher.update([u8::from(options.paragraph_segmentation)]);

        match options.threshold {
            Some(threshold) => {
                let threshold = if threshold == 0.0 { 0.0 } else { threshold };
                hasher.update([1]);
                hasher.update(threshold.to_bits().to_le_bytes());
            }
            None => hasher.update([0]),
        }

        Self(hasher.finalize().into())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short prefix is enough to tell keys apart in logs
        write!(f, "CacheKey({})", &self.to_string()[..12])
    }
}
