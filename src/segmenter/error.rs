//! Segmentation error types.

use thiserror::Error;

/// Errors surfaced by the segmentation service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentError {
    /// No model has been loaded, or it has already been released
    #[error("Model not loaded")]
    ModelUnavailable,

    /// The model was called and failed
    #[error("Segmentation failed: {0}")]
    SegmentationFailure(String),
}

impl SegmentError {
    /// Wraps a backend error, keeping its full context chain
    pub fn failure(err: anyhow::Error) -> Self {
        SegmentError::SegmentationFailure(format!("{:#}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_error_messages() {
        assert_eq!(SegmentError::ModelUnavailable.to_string(), "Model not loaded");

        let err = SegmentError::SegmentationFailure("bad input".to_string());
        assert!(err.to_string().contains("bad input"));
    }

    #[test]
    fn test_failure_keeps_context() {
        let source: anyhow::Result<()> = Err(anyhow::anyhow!("connection refused"));
        let err = SegmentError::failure(source.context("Remote split request failed").unwrap_err());

        let message = err.to_string();
        assert!(message.contains("Remote split request failed"));
        assert!(message.contains("connection refused"));
    }
}
