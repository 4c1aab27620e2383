use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // whitespace plus . , ; : ! ? ( ) [ ] { } " '
    static ref DELIMITERS: Regex = Regex::new(r#"[\s.,;:!?()\[\]{}"']+"#).expect("valid regex");
}

/// Splits a bounded line of text into raw tokens.
///
/// Tokenizing does not consume or mutate the text: [`Tokenizer::tokens`]
/// can be called any number of times and yields the same sequence.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'a> {
    text: &'a str,
    truncated: bool,
}

impl<'a> Tokenizer<'a> {
    /// Input longer than `max_line_len` chars is cut to that length first.
    pub fn new(text: &'a str, max_line_len: usize) -> Self {
        let (text, truncated) = truncate_chars(text, max_line_len);
        Self { text, truncated }
    }

    pub fn was_truncated(&self) -> bool {
        self.truncated
    }

    /// The (possibly truncated) text being tokenized.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Runs of delimiters collapse, so no empty tokens are produced.
    pub fn tokens(&self) -> impl Iterator<Item = &'a str> + 'a {
        let re: &'static Regex = &DELIMITERS;
        re.split(self.text).filter(|t| !t.is_empty())
    }
}

/// Tokenize `text` without any length bound.
pub fn tokenize(text: &str) -> Vec<&str> {
    Tokenizer::new(text, usize::MAX).tokens().collect()
}

/// Longest prefix of `s` holding at most `max` chars.
pub(crate) fn truncate_chars(s: &str, max: usize) -> (&str, bool) {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => (&s[..byte_idx], true),
        None => (s, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("Hash tables, (postings) and; buckets!");
        assert_eq!(t, vec!["Hash", "tables", "postings", "and", "buckets"]);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("índice", 2), ("ín", true));
        assert_eq!(truncate_chars("abc", 3), ("abc", false));
        assert_eq!(truncate_chars("", 0), ("", false));
    }
}
