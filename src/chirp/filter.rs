//! Whole-word profanity masking.

use std::collections::HashSet;

/// A set of forbidden lowercase words and the token that replaces them.
///
/// Text is split on the single ASCII space character only. Runs of spaces,
/// leading and trailing spaces all produce empty tokens, which pass through
/// untouched, so the output always has as many tokens as the input.
#[derive(Clone, Debug)]
pub struct WordFilter {
    forbidden: HashSet<String>,
    replacement: String,
}

impl WordFilter {
    /// `words` are expected to be lowercase already; duplicates collapse.
    pub fn new<I, S>(words: I, replacement: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            forbidden: words.into_iter().map(Into::into).collect(),
            replacement: replacement.into(),
        }
    }

    /// Whether `token`, lowercased, is a forbidden word.
    pub fn is_forbidden(&self, token: &str) -> bool {
        self.forbidden.contains(&token.to_lowercase())
    }

    /// Replaces every forbidden token in `text` with the replacement token,
    /// keeping the casing of every other token.
    pub fn apply(&self, text: &str) -> String {
        text.split(' ')
            .map(|token| if self.is_forbidden(token) { self.replacement.as_str() } else { token })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One-shot form of [`WordFilter::apply`].
pub fn filter(forbidden: &[&str], replacement: &str, text: &str) -> String {
    WordFilter::new(forbidden.iter().copied(), replacement).apply(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

    #[test]
    fn masks_whole_forbidden_words() {
        assert_eq!(
            filter(&WORDS, "****", "This is a kerfuffle opinion I need to share with the world"),
            "This is a **** opinion I need to share with the world",
        );
    }

    #[test]
    fn match_ignores_case() {
        assert_eq!(
            filter(&WORDS, "****", "I hear Mastodon is better than Chirpy. sharbert I need to migrate"),
            "I hear Mastodon is better than Chirpy. **** I need to migrate",
        );
        assert_eq!(filter(&WORDS, "****", "FORNAX Kerfuffle"), "**** ****");
    }

    #[test]
    fn punctuation_attached_to_a_word_prevents_a_match() {
        assert_eq!(filter(&WORDS, "****", "Sharbert! fornax."), "Sharbert! fornax.");
    }

    #[test]
    fn substrings_are_not_masked() {
        assert_eq!(filter(&WORDS, "****", "kerfuffles fornaxian"), "kerfuffles fornaxian");
    }

    #[test]
    fn repeated_spaces_are_preserved() {
        assert_eq!(filter(&WORDS, "*", "  fornax   x  "), "  *   x  ");
    }

    #[test]
    fn empty_text_stays_empty() {
        assert_eq!(filter(&WORDS, "****", ""), "");
    }

    #[test]
    fn duplicate_words_replace_once() {
        let f = WordFilter::new(["fornax", "fornax"], "[x]");
        assert_eq!(f.apply("fornax"), "[x]");
    }

    #[test]
    fn replacement_may_change_length() {
        assert_eq!(filter(&WORDS, "<censored>", "a fornax"), "a <censored>");
        assert_eq!(filter(&WORDS, "", "a fornax b"), "a  b");
    }
}
