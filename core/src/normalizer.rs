/// Lowercase `token`, then keep its alphanumeric chars in order.
///
/// Filtering after lowercasing keeps the output alphanumeric-only even
/// when a lowercase mapping expands (`'İ'` lowercases to `i` plus a
/// combining dot), so `normalize(normalize(x)) == normalize(x)`.
///
/// Everything else is dropped rather than replaced, so `"Hash-Table!"`
/// becomes `"hashtable"`. The result may be empty; callers must check
/// before indexing it.
pub fn normalize(token: &str) -> String {
    token
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Like [`normalize`], but keeps at most `max_len` chars of the result.
/// The flag reports whether anything was cut off.
pub fn normalize_bounded(token: &str, max_len: usize) -> (String, bool) {
    let mut out = String::new();
    let mut kept = 0;
    for c in token.chars().flat_map(char::to_lowercase).filter(|c| c.is_alphanumeric()) {
        if kept == max_len {
            return (out, true);
        }
        out.push(c);
        kept += 1;
    }
    (out, false)
}
