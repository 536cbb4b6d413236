//! Pipeline output with format conversion.
//!
//! A [`SummaryRecord`] is the finished result of one pipeline run: the source
//! text, its summary, the translated summary and a few derived counts. It is
//! what persistence layers store and what the CLI prints.

use serde::{Deserialize, Serialize};

use crate::{Result, TersaError};

/// Output format options for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text with a heading per section.
    PlainText,
    /// Markdown with TOML frontmatter.
    Markdown,
    /// JSON (pretty printed).
    Json,
}

/// The complete result of summarizing and translating one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// The text that was summarized.
    pub source_text: String,

    /// Title reported by the fetcher, if any.
    pub title: Option<String>,

    /// Where the text came from, if known.
    pub source_url: Option<String>,

    /// Extractive summary of `source_text`.
    pub summary: String,

    /// Translated summary, `None` when translation is disabled.
    pub translation: Option<String>,

    /// Name of the translator that produced `translation`.
    pub translator: Option<String>,

    /// Most frequent long words of the source.
    pub key_topics: Vec<String>,

    /// Whitespace-delimited words in `source_text`.
    pub word_count: usize,

    /// Whitespace-delimited words in `summary`.
    pub summary_word_count: usize,

    /// Candidate sentences found in `source_text`.
    pub sentence_count: usize,
}

impl SummaryRecord {
    /// Converts the record to the specified format.
    pub fn to_format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::PlainText => Ok(self.to_text()),
            OutputFormat::Markdown => Ok(self.to_markdown()),
            OutputFormat::Json => serde_json::to_string_pretty(self).map_err(|e| TersaError::Serialization(e.to_string())),
        }
    }

    /// Gets the record as structured JSON.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| TersaError::Serialization(e.to_string()))
    }

    /// Gets the record as Markdown with TOML frontmatter.
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("+++\n");
        if let Some(title) = &self.title {
            out.push_str(&format!("title = {}\n", toml_string(title)));
        }
        if let Some(url) = &self.source_url {
            out.push_str(&format!("source = {}\n", toml_string(url)));
        }
        out.push_str(&format!("word_count = {}\n", self.word_count));
        out.push_str(&format!("summary_word_count = {}\n", self.summary_word_count));
        if !self.key_topics.is_empty() {
            let topics: Vec<String> = self.key_topics.iter().map(|t| toml_string(t)).collect();
            out.push_str(&format!("key_topics = [{}]\n", topics.join(", ")));
        }
        out.push_str("+++\n\n");

        if let Some(title) = &self.title {
            out.push_str(&format!("# {}\n\n", title));
        }
        out.push_str("## Summary\n\n");
        out.push_str(&self.summary);
        out.push_str("\n");

        if let Some(translation) = &self.translation {
            out.push_str("\n## Translation\n\n");
            out.push_str(translation);
            out.push_str("\n");
        }

        out
    }

    /// Gets the record as plain text.
    pub fn to_text(&self) -> String {
        let mut sections = Vec::new();

        if let Some(title) = &self.title {
            sections.push(format!("{}\n{}", title, "=".repeat(title.chars().count())));
        }
        sections.push(self.summary.trim().to_string());
        if let Some(translation) = &self.translation {
            sections.push(translation.trim().to_string());
        }
        if !self.key_topics.is_empty() {
            sections.push(format!("Key topics: {}", self.key_topics.join(", ")));
        }

        sections.join("\n\n")
    }
}

/// Quotes a value as a TOML basic string.
fn toml_string(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n");
    format!("\"{}\"", escaped)
}
