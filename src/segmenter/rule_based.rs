//! Punctuation-based segmenter that needs no model files.

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::provider::{RawSegmentation, SegmentOptions, SentenceSegmenter};

/// Splits on terminal punctuation and line breaks.
///
/// `threshold` is ignored: there is no boundary probability to compare it
/// against. In paragraph mode blank lines separate paragraphs.
pub struct RuleBasedSegmenter {
    model_name: String,
}

impl RuleBasedSegmenter {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
        }
    }

    /// Splits a single block of text into sentences
    pub fn split_sentences(text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((idx, ch)) = chars.next() {
            if ch == '\n' {
                sentences.push(text[start..idx].to_string());
                start = idx + ch.len_utf8();
                continue;
            }

            if !is_terminator(ch) {
                continue;
            }

            // Swallow runs like "?!" or "..." and closing quotes/brackets
            let mut end = idx + ch.len_utf8();
            while let Some(&(next_idx, next)) = chars.peek() {
                if is_terminator(next) || is_closing(next) {
                    end = next_idx + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }

            let at_boundary = match chars.peek() {
                None => true,
                Some(&(_, next)) => next.is_whitespace() || is_fullwidth_terminator(ch),
            };
            if !at_boundary {
                // "3.14", "example.com"
                continue;
            }

            sentences.push(text[start..end].to_string());
            start = end;
        }

        if start < text.len() {
            sentences.push(text[start..].to_string());
        }

        sentences
    }

    /// Splits text into blank-line separated paragraphs, each split into sentences
    pub fn split_paragraphs(text: &str) -> Vec<Vec<String>> {
        let mut paragraphs = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for line in text.split('\n') {
            if line.trim().is_empty() {
                if !current.is_empty() {
                    paragraphs.push(Self::split_sentences(&current.join("\n")));
                    current.clear();
                }
            } else {
                current.push(line);
            }
        }

        if !current.is_empty() {
            paragraphs.push(Self::split_sentences(&current.join("\n")));
        }

        paragraphs
    }
}

impl Default for RuleBasedSegmenter {
    fn default() -> Self {
        Self::new("rule-based")
    }
}

fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | '…') || is_fullwidth_terminator(ch)
}

fn is_fullwidth_terminator(ch: char) -> bool {
    matches!(ch, '。' | '！' | '？')
}

fn is_closing(ch: char) -> bool {
    matches!(ch, '"' | '\'' | ')' | ']' | '}' | '»' | '”' | '’' | '」' | '』' | '）')
}

#[async_trait]
impl SentenceSegmenter for RuleBasedSegmenter {
    async fn split(&self, text: &str, options: &SegmentOptions) -> Result<RawSegmentation> {
        debug!(
            "Rule-based split of {} bytes (paragraphs: {})",
            text.len(),
            options.paragraph_segmentation
        );

        if options.paragraph_segmentation {
            Ok(RawSegmentation::Paragraphs(Self::split_paragraphs(text)))
        } else {
            Ok(RawSegmentation::Sentences(Self::split_sentences(text)))
        }
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn provider_name(&self) -> &str {
        "rule-based"
    }
}
