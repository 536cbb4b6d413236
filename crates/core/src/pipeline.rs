//! End-to-end text processing.
//!
//! The [`Pipeline`] ties the summarizer and an optional translator together and
//! produces a [`SummaryRecord`]. It is synchronous and holds no mutable state,
//! so one instance can serve many requests.
//!
//! # Example
//!
//! ```rust
//! use tersa_core::{Pipeline, SourceText};
//!
//! let record = Pipeline::new().process(SourceText::new("This is great.")).unwrap();
//! assert_eq!(record.summary, "This is great.");
//! assert!(record.translation.unwrap().starts_with("یہ ہے بہترین"));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::record::SummaryRecord;
use crate::segment::word_count;
use crate::summarize::{Summarizer, SummarizerConfig, key_topics};
use crate::translate::{LexiconTranslator, Translate};
use crate::{Result, TersaError};

/// Number of key topics attached to each record.
pub const KEY_TOPIC_COUNT: usize = 5;

/// Input to the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceText {
    pub text: String,
    pub title: Option<String>,
    pub url: Option<String>,
}

impl SourceText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), title: None, url: None }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Summarize-then-translate pipeline.
#[derive(Clone)]
pub struct Pipeline {
    summarizer: Summarizer,
    translator: Option<Arc<dyn Translate>>,
}

impl Pipeline {
    /// Default summarizer with the built-in Urdu lexicon translator.
    pub fn new() -> Self {
        Self { summarizer: Summarizer::new(), translator: Some(Arc::new(LexiconTranslator::new())) }
    }

    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn summarizer(&self) -> &Summarizer {
        &self.summarizer
    }

    pub fn translator(&self) -> Option<&dyn Translate> {
        self.translator.as_deref()
    }

    /// Runs the pipeline over `input`.
    ///
    /// Blank text is rejected with [`TersaError::NoContent`]; any other input
    /// produces a record.
    pub fn process(&self, input: SourceText) -> Result<SummaryRecord> {
        if input.text.trim().is_empty() {
            return Err(TersaError::NoContent);
        }

        let selection = self.summarizer.select(&input.text);
        let summary = selection.render(&input.text);
        tracing::debug!(
            candidates = selection.candidate_count,
            short_circuited = selection.short_circuited,
            summary_len = summary.len(),
            "summarized source"
        );

        let (translation, translator) = match &self.translator {
            Some(t) => {
                let translated = t.translate(&summary);
                tracing::debug!(translator = t.name(), len = translated.len(), "translated summary");
                (Some(translated), Some(t.name().to_string()))
            }
            None => (None, None),
        };

        let key_topics = key_topics(&input.text, KEY_TOPIC_COUNT);
        let words = word_count(&input.text);
        let summary_words = word_count(&summary);

        Ok(SummaryRecord {
            source_text: input.text,
            title: input.title,
            source_url: input.url,
            summary,
            translation,
            translator,
            key_topics,
            word_count: words,
            summary_word_count: summary_words,
            sentence_count: selection.candidate_count,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("summarizer", &self.summarizer)
            .field("translator", &self.translator.as_ref().map(|t| t.name()))
            .finish()
    }
}

/// Builder for Pipeline.
///
/// # Example
///
/// ```rust
/// use tersa_core::{Pipeline, SourceText, SummarizerConfig};
///
/// let pipeline = Pipeline::builder()
///     .summarizer_config(SummarizerConfig::builder().max_sentences(3).build())
///     .no_translation()
///     .build();
///
/// let record = pipeline.process(SourceText::new("One line only.")).unwrap();
/// assert!(record.translation.is_none());
/// ```
pub struct PipelineBuilder {
    pipeline: Pipeline,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self { pipeline: Pipeline::new() }
    }

    pub fn summarizer_config(mut self, config: SummarizerConfig) -> Self {
        self.pipeline.summarizer = Summarizer::with_config(config);
        self
    }

    /// Uses a different translation strategy.
    pub fn translator(mut self, translator: Arc<dyn Translate>) -> Self {
        self.pipeline.translator = Some(translator);
        self
    }

    /// Skips translation; records carry `translation: None`.
    pub fn no_translation(mut self) -> Self {
        self.pipeline.translator = None;
        self
    }

    pub fn build(self) -> Pipeline {
        self.pipeline
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Shout;

    impl Translate for Shout {
        fn name(&self) -> &str {
            "shout"
        }

        fn translate(&self, text: &str) -> String {
            text.to_uppercase()
        }
    }

    fn article() -> String {
        [
            "Researchers published an important study about how small gardens improve city air quality today",
            "The team walked around the park",
            "Birds sang in the morning",
            "Some people stayed indoors all day",
            "The key finding shows that local research can significantly change public health policy",
        ]
        .join(". ")
            + "."
    }

    #[test]
    fn test_process_blank_is_no_content() {
        let pipeline = Pipeline::new();
        assert!(matches!(pipeline.process(SourceText::new("")), Err(TersaError::NoContent)));
        assert!(matches!(pipeline.process(SourceText::new("  \n\t ")), Err(TersaError::NoContent)));
    }

    #[test]
    fn test_process_short_text_is_verbatim() {
        let record = Pipeline::new().process(SourceText::new("This is great.")).unwrap();
        assert_eq!(record.summary, "This is great.");
        assert_eq!(record.word_count, 3);
        assert_eq!(record.summary_word_count, 3);
        assert_eq!(record.sentence_count, 0);
        assert_eq!(record.translator.as_deref(), Some("lexicon"));
        assert!(record.translation.unwrap().starts_with("یہ ہے بہترین۔"));
    }

    #[test]
    fn test_process_article() {
        let text = article();
        let record = Pipeline::new().process(SourceText::new(text.clone()).with_title("Gardens")).unwrap();

        assert_eq!(record.sentence_count, 5);
        assert!(record.summary.starts_with("Researchers published"));
        assert!(record.summary.ends_with("health policy."));
        assert!(record.summary_word_count < record.word_count);
        assert_eq!(record.title.as_deref(), Some("Gardens"));
        assert_eq!(record.source_text, text);
        assert!(record.key_topics.len() <= KEY_TOPIC_COUNT);
    }

    #[test]
    fn test_process_without_translation() {
        let pipeline = Pipeline::builder().no_translation().build();
        let record = pipeline.process(SourceText::new("Hello there.")).unwrap();
        assert!(record.translation.is_none());
        assert!(record.translator.is_none());
    }

    #[test]
    fn test_process_with_custom_translator() {
        let pipeline = Pipeline::builder().translator(Arc::new(Shout)).build();
        let record = pipeline.process(SourceText::new("quiet words.").with_url("https://example.com")).unwrap();
        assert_eq!(record.translation.as_deref(), Some("QUIET WORDS."));
        assert_eq!(record.translator.as_deref(), Some("shout"));
        assert_eq!(record.source_url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let pipeline = Pipeline::new();
        let a = pipeline.process(SourceText::new(article())).unwrap();
        let b = pipeline.process(SourceText::new(article())).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_debug_shows_translator_name() {
        let debug = format!("{:?}", Pipeline::new());
        assert!(debug.contains("lexicon"));
    }
}
