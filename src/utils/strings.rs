/// Replaces typographic quotes, dashes and spaces with their ASCII forms so
/// text pasted from a word processor still matches lexicon lemmas.
pub fn clean_typography_symbols(text: &str) -> String {
    let mut output = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '“' | '”' | '„' => output.push('"'),
            '’' | '‘' | '᾽' | 'ʼ' => output.push('\''),

            '—' | '–' | '‐' => output.push('-'),

            '\u{00A0}' | '\u{2007}' | '\u{202F}' => output.push(' '),

            '…' => output.push_str("..."),

            _ => output.push(c),
        }
    }
    output
}

/// Letters only, lowercased. "One's" becomes "ones".
pub fn normalize_letters(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn has_uppercase(text: &str) -> bool {
    text.chars().any(char::is_uppercase)
}

/// First `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// The word under or just before `caret`, a character offset into `text`.
/// Empty when the caret sits in whitespace or punctuation.
pub fn word_at(text: &str, caret: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let caret = caret.min(chars.len());

    // caret right after a word still picks that word
    let anchor = if caret < chars.len() && is_word_char(chars[caret]) {
        caret
    } else if caret > 0 && is_word_char(chars[caret - 1]) {
        caret - 1
    } else {
        return String::new();
    };

    let mut start = anchor;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    let mut end = anchor + 1;
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }

    let word: String = chars[start..end].iter().collect();
    word.trim_matches(is_quote).to_string()
}

/// Byte offset of the `index`-th character, clamped to the end of `text`.
pub fn char_to_byte(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || is_quote(c)
}

fn is_quote(c: char) -> bool {
    matches!(c, '\'' | '’' | '‘' | 'ʼ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typography_is_flattened() {
        assert_eq!(clean_typography_symbols("one’s — “x”"), "one's - \"x\"");
    }

    #[test]
    fn normalize_keeps_letters() {
        assert_eq!(normalize_letters("One's"), "ones");
        assert_eq!(normalize_letters("D.C."), "dc");
        assert_eq!(normalize_letters("42"), "");
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("ab", 20), "ab");
    }

    #[test]
    fn caret_inside_word() {
        assert_eq!(word_at("go to the bank today", 12), "bank");
    }

    #[test]
    fn caret_after_word() {
        assert_eq!(word_at("the bank", 8), "bank");
        assert_eq!(word_at("the bank.", 8), "bank");
    }

    #[test]
    fn caret_in_gap_is_empty() {
        assert_eq!(word_at("a  b", 2), "");
        assert_eq!(word_at("", 5), "");
    }

    #[test]
    fn apostrophes_stay_inside_words() {
        assert_eq!(word_at("don't 'quote'", 2), "don't");
        assert_eq!(word_at("don't 'quote'", 8), "quote");
    }

    #[test]
    fn char_offsets_become_byte_offsets() {
        assert_eq!(char_to_byte("café au lait", 5), 6);
        assert_eq!(char_to_byte("café", 0), 0);
        assert_eq!(char_to_byte("café", 40), 5);
    }
}
