//! Client for a segmentation model served over HTTP.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::provider::{RawSegmentation, SegmentOptions, SentenceSegmenter};

/// Forwards split requests to `POST {base_url}/split`
pub struct RemoteSegmenter {
    client: Client,
    base_url: String,
    model_name: String,
}

impl RemoteSegmenter {
    pub fn new(base_url: impl Into<String>, model_name: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for remote segmenter")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model_name: model_name.into(),
        })
    }

    fn split_url(&self) -> String {
        format!("{}/split", self.base_url)
    }
}

#[derive(Debug, Serialize)]
struct RemoteSplitRequest<'a> {
    model: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    threshold: Option<f64>,
    do_paragraph_segmentation: bool,
}

#[derive(Debug, Deserialize)]
struct RemoteSplitResponse {
    sentences: RemoteSentences,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RemoteSentences {
    Flat(Vec<String>),
    Grouped(Vec<Vec<String>>),
}

impl From<RemoteSentences> for RawSegmentation {
    fn from(sentences: RemoteSentences) -> Self {
        match sentences {
            RemoteSentences::Flat(sentences) => RawSegmentation::Sentences(sentences),
            RemoteSentences::Grouped(paragraphs) => RawSegmentation::Paragraphs(paragraphs),
        }
    }
}

#[async_trait]
impl SentenceSegmenter for RemoteSegmenter {
    async fn split(&self, text: &str, options: &SegmentOptions) -> Result<RawSegmentation> {
        let start = Instant::now();
        let url = self.split_url();

        let request = RemoteSplitRequest {
            model: &self.model_name,
            text,
            threshold: options.threshold,
            do_paragraph_segmentation: options.paragraph_segmentation,
        };

        debug!("Sending split request to {}", url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Remote split request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Remote segmenter returned {}: {}", status, body);
            anyhow::bail!("Remote segmenter returned {}: {}", status, body);
        }

        let parsed: RemoteSplitResponse = response
            .json()
            .await
            .context("Failed to parse remote split response")?;

        debug!("Remote split finished in {}ms", start.elapsed().as_millis());

        Ok(parsed.sentences.into())
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn provider_name(&self) -> &str {
        "remote"
    }
}
