//! Sentence segmentation.
//!
//! Text is cut at every run of terminal punctuation (`.`, `!`, `?`). A run
//! such as `"?!"` or `"..."` counts as a single boundary. The summarizer keeps
//! only pieces long enough to be real sentences; the translator keeps every
//! non-empty piece.

use serde::Serialize;

/// Characters that end a sentence.
pub const TERMINALS: [char; 3] = ['.', '!', '?'];

/// A candidate sentence of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    /// Trimmed sentence text, without its terminal punctuation.
    pub text: String,
    /// Position among the retained candidates (0-based).
    pub index: usize,
}

impl Sentence {
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        Self { text: text.into(), index }
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Returns true for `.`, `!` and `?`.
pub fn is_terminal(c: char) -> bool {
    TERMINALS.contains(&c)
}

/// Splits text at terminal punctuation and yields the trimmed, non-empty pieces
/// in document order.
pub fn split_terminals(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_terminal).map(str::trim).filter(|piece| !piece.is_empty())
}

/// Splits text into candidate sentences.
///
/// Pieces whose trimmed length is `min_chars` characters or fewer are treated
/// as noise (headings, bylines, stray fragments) and dropped before indexing,
/// so `index` counts retained sentences only.
pub fn split_sentences(text: &str, min_chars: usize) -> Vec<Sentence> {
    split_terminals(text)
        .filter(|piece| piece.chars().count() > min_chars)
        .enumerate()
        .map(|(index, piece)| Sentence::new(piece, index))
        .collect()
}

/// Counts whitespace-delimited words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_terminals_collapses_runs() {
        let pieces: Vec<&str> = split_terminals("One... Two?! Three").collect();
        assert_eq!(pieces, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn test_split_terminals_empty() {
        assert_eq!(split_terminals("").count(), 0);
        assert_eq!(split_terminals("  ...  !? ").count(), 0);
    }

    #[test]
    fn test_split_sentences_discards_short_pieces() {
        let text = "Short one. This sentence is clearly long enough to keep. Tiny! Another sentence that passes the filter?";
        let sentences = split_sentences(text, 20);

        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "This sentence is clearly long enough to keep");
        assert_eq!(sentences[0].index, 0);
        assert_eq!(sentences[1].text, "Another sentence that passes the filter");
        assert_eq!(sentences[1].index, 1);
    }

    #[test]
    fn test_split_sentences_boundary_is_exclusive() {
        let exactly_twenty = "abcdefghij abcdefghi";
        assert_eq!(exactly_twenty.chars().count(), 20);
        assert!(split_sentences(exactly_twenty, 20).is_empty());

        let twenty_one = "abcdefghij abcdefghij";
        assert_eq!(split_sentences(twenty_one, 20).len(), 1);
    }

    #[test]
    fn test_split_sentences_trims_whitespace() {
        let sentences = split_sentences("   \n  Leading and trailing whitespace goes away  \t.", 20);
        assert_eq!(sentences[0].text, "Leading and trailing whitespace goes away");
    }

    #[test]
    fn test_char_len_counts_characters() {
        let sentence = Sentence::new("یہ ایک جملہ ہے", 0);
        assert_eq!(sentence.char_len(), 14);
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("hello   world\n again"), 3);
        assert_eq!(word_count(""), 0);
    }
}
