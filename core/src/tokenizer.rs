use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"(?u)\b\w\w+\b").expect("valid regex");
}

/// Tokenize text into lowercase bag-of-words terms: word-boundary tokens of
/// at least two word characters. Punctuation and single-character tokens are
/// dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_splits_on_word_boundaries() {
        let t = tokenize("Web Developer: Python, JavaScript!");
        assert_eq!(t, vec!["web", "developer", "python", "javascript"]);
    }

    #[test]
    fn drops_single_character_tokens() {
        let t = tokenize("C R SQL");
        assert_eq!(t, vec!["sql"]);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  , .;  ").is_empty());
    }
}
