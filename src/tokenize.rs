//! Word tokenization and head extraction for phrases.

/// Splits a phrase into word tokens.
///
/// Tokens are separated by whitespace; punctuation becomes its own token,
/// except apostrophes, which stay attached so contractions survive.
/// Tokenizing a single word returns that word unchanged.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_whitespace() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else if is_separator(ch) {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            tokens.push(ch.to_string());
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// The head word of a phrase, approximated as its last token.
///
/// Returns `None` for a phrase with no tokens; callers treat that like an
/// out-of-vocabulary word.
pub fn head(phrase: &str) -> Option<String> {
    tokenize(phrase).pop()
}

fn is_separator(c: char) -> bool {
    c.is_ascii_punctuation() && c != '\''
}
