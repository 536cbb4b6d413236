pub mod error;
#[cfg(feature = "fetch")]
pub mod extract;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod lexicon;
pub mod morphology;
pub mod pipeline;
pub mod record;
pub mod segment;
pub mod summarize;
pub mod translate;

pub use error::{Result, TersaError};
#[cfg(feature = "fetch")]
pub use extract::{ExtractedText, extract_text};
#[cfg(feature = "fetch")]
pub use fetch::FetchConfig;
#[cfg(feature = "fetch")]
pub use fetch::{fetch_article, fetch_file, fetch_stdin, fetch_url};
pub use lexicon::{Lexicon, LexiconLoader, LexiconLoaderBuilder, LexiconSource};
#[doc(hidden)]
pub use morphology::{SuffixRule, URDU_SUFFIX_RULES};
pub use pipeline::{Pipeline, PipelineBuilder, SourceText};
pub use record::{OutputFormat, SummaryRecord};
pub use segment::{Sentence, split_sentences, word_count};
pub use summarize::{
    ScoredSentence, Selection, Summarizer, SummarizerConfig, SummarizerConfigBuilder, key_topics, summarize,
};
pub use translate::{LexiconTranslator, TargetProfile, Token, Translate, translate, translate_multi_sentence};
