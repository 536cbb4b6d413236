//! Suffix fallback rules.
//!
//! When a word has no direct lexicon entry, the translator strips one
//! inflectional suffix and retries with the stem. A hit is emitted with a fixed
//! grammatical marker in the target language. Rules are tried in table order
//! and only the first rule whose suffix matches is attempted.

use crate::lexicon::Lexicon;

/// One suffix rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixRule {
    /// English suffix to strip.
    pub suffix: &'static str,
    /// Marker appended after the stem's translation, separated by a space.
    pub marker: Option<&'static str>,
    /// The word must be longer than this many characters for the rule to apply.
    pub min_len: usize,
}

impl SuffixRule {
    /// True when `word` ends with the suffix and is long enough.
    pub fn matches(&self, word: &str) -> bool {
        word.ends_with(self.suffix) && word.chars().count() > self.min_len
    }

    /// The word with the suffix removed.
    pub fn stem<'a>(&self, word: &'a str) -> &'a str {
        &word[..word.len() - self.suffix.len()]
    }

    /// Renders the stem's translation with this rule's marker.
    pub fn inflect(&self, stem_translation: &str) -> String {
        match self.marker {
            Some(marker) => format!("{} {}", stem_translation, marker),
            None => stem_translation.to_string(),
        }
    }
}

/// English to Urdu rules: present continuous, past, adverbial, naive plural.
pub const URDU_SUFFIX_RULES: &[SuffixRule] = &[
    SuffixRule { suffix: "ing", marker: Some("رہا ہے"), min_len: 0 },
    SuffixRule { suffix: "ed", marker: Some("کیا"), min_len: 0 },
    SuffixRule { suffix: "ly", marker: Some("سے"), min_len: 0 },
    SuffixRule { suffix: "s", marker: None, min_len: 3 },
];

/// Applies the first matching rule in `rules`.
///
/// Returns `None` when no rule matches or when the stem is not in the lexicon.
/// A later rule is never tried once an earlier one matched.
pub fn inflect(word: &str, lexicon: &Lexicon, rules: &[SuffixRule]) -> Option<String> {
    let rule = rules.iter().find(|rule| rule.matches(word))?;
    lexicon.get(rule.stem(word)).map(|base| rule.inflect(base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn lexicon() -> Lexicon {
        [("help", "مدد کرنا"), ("quick", "تیز"), ("idea", "خیال")].into_iter().collect()
    }

    #[rstest]
    #[case("helping", Some("مدد کرنا رہا ہے"))]
    #[case("helped", Some("مدد کرنا کیا"))]
    #[case("quickly", Some("تیز سے"))]
    #[case("ideas", Some("خیال"))]
    #[case("help", None)]
    #[case("jumping", None)]
    fn test_inflect(#[case] word: &str, #[case] expected: Option<&str>) {
        assert_eq!(inflect(word, &lexicon(), URDU_SUFFIX_RULES), expected.map(str::to_string));
    }

    #[test]
    fn test_plural_rule_requires_length() {
        let lexicon: Lexicon = [("ga", "گیس")].into_iter().collect();
        assert_eq!(inflect("gas", &lexicon, URDU_SUFFIX_RULES), None);
    }

    #[test]
    fn test_plural_rule_non_plural_falls_through() {
        assert_eq!(inflect("this", &lexicon(), URDU_SUFFIX_RULES), None);
    }

    #[test]
    fn test_plural_of_ing_noun() {
        let lexicon: Lexicon = [("thing", "چیز")].into_iter().collect();
        assert_eq!(inflect("things", &lexicon, URDU_SUFFIX_RULES), Some("چیز".to_string()));
        assert_eq!(inflect("thing", &lexicon, URDU_SUFFIX_RULES), None);
    }

    #[test]
    fn test_bare_suffix_has_empty_stem() {
        assert_eq!(inflect("ing", &lexicon(), URDU_SUFFIX_RULES), None);
        assert_eq!(inflect("ly", &lexicon(), URDU_SUFFIX_RULES), None);
    }

    #[test]
    fn test_stem_and_matches() {
        let rule = URDU_SUFFIX_RULES[0];
        assert!(rule.matches("helping"));
        assert_eq!(rule.stem("helping"), "help");
        assert!(!rule.matches("help"));
        assert_eq!(rule.stem("ing"), "");
    }
}
