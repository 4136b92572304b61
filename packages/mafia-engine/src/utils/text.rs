/// Key used for every name comparison: votes, saves, lookups.
pub fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Upper-cases the first letter of every whitespace-separated word and
/// lower-cases the rest, so `"mary ann"` becomes `"Mary Ann"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Renders names as a bracketed list literal: `['alice', 'bob']`.
pub fn sequence_literal<S: AsRef<str>>(names: &[S]) -> String {
    let quoted: Vec<String> = names
        .iter()
        .map(|n| format!("'{}'", n.as_ref()))
        .collect();
    format!("[{}]", quoted.join(", "))
}
