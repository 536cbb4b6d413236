//! Lexicon-based word-for-word translation.
//!
//! The translator is deliberately simple: every whitespace-delimited token is
//! looked up in a [`Lexicon`], a few suffix rules catch inflected forms, and
//! anything unknown passes through unchanged. It is deterministic, offline and
//! total, which makes it a safe fallback behind any higher-quality
//! [`Translate`] implementation.
//!
//! # Example
//!
//! ```rust
//! use tersa_core::{translate, translate_multi_sentence};
//!
//! assert_eq!(translate("This is great."), "یہ ہے بہترین۔");
//! assert!(translate_multi_sentence("Good ideas. Better results!").ends_with("ترجمہ ہے)"));
//! ```

use std::sync::Arc;

use crate::lexicon::Lexicon;
use crate::morphology::{SuffixRule, URDU_SUFFIX_RULES, inflect};
use crate::segment::split_terminals;

/// A text-to-text translation strategy.
///
/// Implementations must be total: when they cannot translate they return
/// something sensible (the input, a partial translation) instead of failing.
pub trait Translate: Send + Sync {
    /// Short identifier recorded alongside translations.
    fn name(&self) -> &str;

    /// Translates a possibly multi-sentence text.
    fn translate(&self, text: &str) -> String;
}

/// Glyphs and fixed phrases of a target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetProfile {
    /// Replaces `.` in translated text.
    pub terminal: char,
    /// Replaces `?` in translated text.
    pub question: char,
    /// Joins translated sentences.
    pub separator: String,
    /// Words that trigger the introductory phrase.
    pub intro_triggers: Vec<String>,
    /// Prepended when a trigger word appears in the output.
    pub intro: String,
    /// Appended to multi-sentence translations.
    pub note: String,
}

impl TargetProfile {
    pub fn urdu() -> Self {
        Self {
            terminal: '۔',
            question: '؟',
            separator: "۔ ".to_string(),
            intro_triggers: vec!["blog".to_string(), "بلاگ".to_string()],
            intro: "اس بلاگ پوسٹ میں ".to_string(),
            note: "\n\n(نوٹ: یہ بنیادی لغت پر مبنی ترجمہ ہے)".to_string(),
        }
    }

    /// Applies the terminal and question mark substitutions.
    pub fn remap_punctuation(&self, text: &str) -> String {
        text.chars()
            .map(|c| match c {
                '.' => self.terminal,
                '?' => self.question,
                other => other,
            })
            .collect()
    }
}

impl Default for TargetProfile {
    fn default() -> Self {
        Self::urdu()
    }
}

/// A whitespace-delimited token split into punctuation and core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// The token as it appeared in the lowercased input.
    pub raw: &'a str,
    /// Non-word characters before the core.
    pub leading: &'a str,
    /// Non-word characters after the core.
    pub trailing: &'a str,
    /// Lookup key: every word character of the token.
    pub key: String,
}

impl<'a> Token<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let key: String = raw.chars().filter(|c| is_word_char(*c)).collect();
        if key.is_empty() {
            return Self { raw, leading: "", trailing: "", key };
        }

        // word characters are ASCII, so byte offsets +1 stay on char boundaries
        let start = raw.find(is_word_char).unwrap_or(0);
        let end = raw.rfind(is_word_char).map_or(raw.len(), |i| i + 1);

        Self { raw, leading: &raw[..start], trailing: &raw[end..], key }
    }
}

/// `[A-Za-z0-9_]`
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Word-for-word translator backed by a [`Lexicon`].
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tersa_core::{Lexicon, LexiconTranslator};
///
/// let lexicon: Lexicon = [("help", "مدد کرنا")].into_iter().collect();
/// let translator = LexiconTranslator::with_lexicon(Arc::new(lexicon));
/// assert_eq!(translator.translate_single("helping"), "مدد کرنا رہا ہے");
/// assert_eq!(translator.translate_single("helped"), "مدد کرنا کیا");
/// ```
#[derive(Debug, Clone)]
pub struct LexiconTranslator {
    lexicon: Arc<Lexicon>,
    rules: Vec<SuffixRule>,
    profile: TargetProfile,
}

impl LexiconTranslator {
    /// English to Urdu translator over the embedded lexicon.
    pub fn new() -> Self {
        Self::with_lexicon(Lexicon::english_urdu_shared())
    }

    /// Urdu rules and glyphs over a caller-supplied lexicon.
    pub fn with_lexicon(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon, rules: URDU_SUFFIX_RULES.to_vec(), profile: TargetProfile::urdu() }
    }

    /// Replaces the suffix rules.
    pub fn rules(mut self, rules: Vec<SuffixRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Replaces the target profile.
    pub fn profile(mut self, profile: TargetProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn target(&self) -> &TargetProfile {
        &self.profile
    }

    /// Translates one lowercased token, or returns it unchanged.
    pub fn translate_token(&self, raw: &str) -> String {
        let token = Token::parse(raw);
        if token.key.is_empty() {
            return raw.to_string();
        }

        let translated = match self.lexicon.get(&token.key) {
            Some(hit) => Some(hit.to_string()),
            None => inflect(&token.key, &self.lexicon, &self.rules),
        };

        match translated {
            Some(core) => format!("{}{}{}", token.leading, core, token.trailing),
            None => raw.to_string(),
        }
    }

    /// Single-pass translation of `text`.
    ///
    /// The input is lowercased and translated token by token; the joined result
    /// has its punctuation remapped, and gets the introductory phrase when it
    /// mentions a blog.
    pub fn translate_single(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let joined = lowered
            .split_whitespace()
            .map(|raw| self.translate_token(raw))
            .collect::<Vec<_>>()
            .join(" ");

        let result = self.profile.remap_punctuation(&joined);

        if self.profile.intro_triggers.iter().any(|t| result.contains(t.as_str())) {
            format!("{}{}", self.profile.intro, result)
        } else {
            result
        }
    }

    /// Sentence-by-sentence translation with the disclosure note.
    ///
    /// Empty or punctuation-only input yields an empty string without the
    /// note.
    pub fn translate_multi_sentence(&self, text: &str) -> String {
        let sentences: Vec<String> = split_terminals(text).map(|s| self.translate_single(s)).collect();
        if sentences.is_empty() {
            return String::new();
        }

        let mut output = sentences.join(self.profile.separator.as_str());
        if !output.ends_with(self.profile.terminal) {
            output.push(self.profile.terminal);
        }
        output.push_str(&self.profile.note);
        output
    }
}

impl Default for LexiconTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translate for LexiconTranslator {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn translate(&self, text: &str) -> String {
        self.translate_multi_sentence(text)
    }
}

/// Single-pass English to Urdu translation with the embedded lexicon.
pub fn translate(text: &str) -> String {
    LexiconTranslator::new().translate_single(text)
}

/// Multi-sentence English to Urdu translation with the embedded lexicon.
pub fn translate_multi_sentence(text: &str) -> String {
    LexiconTranslator::new().translate_multi_sentence(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn help_translator() -> LexiconTranslator {
        let lexicon: Lexicon = [("help", "مدد کرنا"), ("blog", "بلاگ"), ("good", "اچھا")].into_iter().collect();
        LexiconTranslator::with_lexicon(Arc::new(lexicon))
    }

    #[test]
    fn test_token_parse() {
        let token = Token::parse("(hello),");
        assert_eq!(token.leading, "(");
        assert_eq!(token.trailing, "),");
        assert_eq!(token.key, "hello");

        let inner = Token::parse("don't");
        assert_eq!(inner.key, "dont");
        assert_eq!(inner.leading, "");
        assert_eq!(inner.trailing, "");

        let bare = Token::parse("--");
        assert_eq!(bare.key, "");
    }

    #[test]
    fn test_token_parse_non_ascii_edges() {
        let token = Token::parse("«café»");
        assert_eq!(token.key, "caf");
        assert_eq!(token.leading, "«");
        assert_eq!(token.trailing, "é»");
    }

    #[rstest]
    #[case("helping", "مدد کرنا رہا ہے")]
    #[case("helped", "مدد کرنا کیا")]
    #[case("helps", "مدد کرنا")]
    #[case("help", "مدد کرنا")]
    #[case("goodly", "اچھا سے")]
    fn test_suffix_fallback(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(help_translator().translate_single(input), expected);
    }

    #[test]
    fn test_exact_match_wins_over_suffix() {
        let lexicon: Lexicon = [("helped", "مدد کی"), ("help", "مدد کرنا")].into_iter().collect();
        let translator = LexiconTranslator::with_lexicon(Arc::new(lexicon));
        assert_eq!(translator.translate_single("helped"), "مدد کی");
    }

    #[test]
    fn test_unknown_words_pass_through_lowercased() {
        let translator = help_translator();
        assert_eq!(translator.translate_single("Zebra HELP"), "zebra مدد کرنا");
    }

    #[test]
    fn test_non_plural_s_passes_through() {
        let translator = LexiconTranslator::with_lexicon(Arc::new(Lexicon::default()));
        assert_eq!(translator.translate_single("this"), "this");
    }

    #[test]
    fn test_punctuation_remap() {
        assert_eq!(translate("This is great."), "یہ ہے بہترین۔");
        assert_eq!(translate("Is this good?"), "ہے یہ اچھا؟");
        assert!(translate("Wow!").ends_with('!'));
    }

    #[test]
    fn test_remap_applies_to_pass_through_tokens() {
        assert_eq!(translate("e.g. zzz?"), "e۔g۔ zzz؟");
    }

    #[test]
    fn test_blog_intro_phrase() {
        let translator = help_translator();
        let out = translator.translate_single("A good blog");
        assert_eq!(out, "اس بلاگ پوسٹ میں a اچھا بلاگ");

        let untranslated = LexiconTranslator::with_lexicon(Arc::new(Lexicon::default())).translate_single("my blogger");
        assert!(untranslated.starts_with("اس بلاگ پوسٹ میں "));
    }

    #[test]
    fn test_translate_empty() {
        assert_eq!(translate(""), "");
        assert_eq!(translate("   "), "");
        assert_eq!(translate_multi_sentence(""), "");
        assert_eq!(translate_multi_sentence(" ... "), "");
    }

    #[test]
    fn test_multi_sentence_structure() {
        let translator = help_translator();
        let out = translator.translate_multi_sentence("Good help. Helping good!");
        let note = &TargetProfile::urdu().note;

        assert!(out.ends_with(note.as_str()));
        let body = out.strip_suffix(note.as_str()).unwrap();
        assert_eq!(body, "اچھا مدد کرنا۔ مدد کرنا رہا ہے اچھا۔");
    }

    #[test]
    fn test_multi_sentence_body_ends_with_terminal() {
        let out = translate_multi_sentence("This is great.");
        let body = out.strip_suffix(TargetProfile::urdu().note.as_str()).unwrap();
        assert!(body.ends_with('۔'));
        assert!(!body.contains('.'));
    }

    #[test]
    fn test_token_count_never_shrinks() {
        let inputs = [
            "The quick brown fox, jumps over the lazy dog!",
            "research results show significant benefits",
            "a -- b ... c ?? d",
            "1234 5678 $$$ @@@",
        ];
        for input in inputs {
            let out = translate(input);
            assert!(out.split_whitespace().count() >= input.split_whitespace().count(), "{input}");
        }
    }

    #[test]
    fn test_trait_object() {
        let translator: Arc<dyn Translate> = Arc::new(LexiconTranslator::new());
        assert_eq!(translator.name(), "lexicon");
        assert!(translator.translate("Research is important.").starts_with("تحقیق ہے اہم۔"));
    }

    #[test]
    fn test_custom_profile() {
        let profile =
            TargetProfile { terminal: '|', separator: "| ".to_string(), note: String::new(), ..TargetProfile::urdu() };
        let translator = help_translator().profile(profile);
        assert_eq!(translator.translate_multi_sentence("help. good"), "مدد کرنا| اچھا|");
    }
}
