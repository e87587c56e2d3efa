//! Counters for the info table next to the lookup panel.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Limits {
    pub tweet_limit: i64,
    pub url_weight: usize,
    pub max_selection_chars: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            tweet_limit: 280,
            url_weight: 23,
            max_selection_chars: 20,
        }
    }
}

pub fn character_count(text: &str) -> usize {
    text.chars().count()
}

/// Pieces between line breaks and spaces that hold anything but whitespace.
pub fn word_count(text: &str) -> usize {
    text.split(['\r', '\n', ' '])
        .filter(|piece| !piece.trim().is_empty())
        .count()
}

/// Length as a tweet: links count `url_weight` however long they are.
pub fn tweet_length(text: &str, url_weight: usize) -> usize {
    // spaces are single-character tokens of their own
    let spaces = text.matches(' ').count();
    let tokens: usize = text
        .split(' ')
        .map(|token| {
            if token.starts_with("http://") || token.starts_with("https://") {
                url_weight
            } else {
                token.chars().count()
            }
        })
        .sum();
    tokens + spaces
}

pub fn tweet_remaining(text: &str, limits: &Limits) -> i64 {
    limits.tweet_limit - tweet_length(text, limits.url_weight) as i64
}

/// A negative number, shown in the danger color.
pub fn is_danger(value: &str) -> bool {
    value.starts_with('-') && is_numeric(value)
}

fn is_numeric(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    let (whole, fraction) = match digits.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (digits, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    all_digits(whole) && fraction.map_or(true, all_digits)
}

/// Rows of the info table: label and value.
pub fn info_rows(text: &str, limits: &Limits) -> Vec<(&'static str, String)> {
    vec![
        ("Characters", character_count(text).to_string()),
        ("Words", word_count(text).to_string()),
        (
            "Twitter Characters",
            tweet_length(text, limits.url_weight).to_string(),
        ),
        (
            "Twitter Characters Remaining",
            tweet_remaining(text, limits).to_string(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_split_on_spaces_and_line_breaks() {
        assert_eq!(word_count("one two\r\nthree\rfour\nfive"), 5);
        assert_eq!(word_count("  spaced   out  "), 2);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("\t"), 0);
    }

    #[test]
    fn characters_are_scalars() {
        assert_eq!(character_count("naïve"), 5);
    }

    #[test]
    fn links_have_fixed_weight() {
        let text = "read https://example.com/a/very/long/path/that/goes/on now";
        assert_eq!(tweet_length(text, 23), 4 + 1 + 23 + 1 + 3);
        assert_eq!(tweet_length("http://x", 23), 23);
        assert_eq!(tweet_length("ftp://x", 23), 7);
    }

    #[test]
    fn remaining_goes_negative() {
        let limits = Limits::default();
        assert_eq!(tweet_remaining("", &limits), 280);
        let long = "a".repeat(300);
        assert_eq!(tweet_remaining(&long, &limits), -20);
    }

    #[test]
    fn danger_is_negative_numbers_only() {
        assert!(is_danger("-20"));
        assert!(is_danger("-1.5"));
        assert!(!is_danger("20"));
        assert!(!is_danger("-"));
        assert!(!is_danger("-abc"));
        assert!(!is_danger("-1."));
    }

    #[test]
    fn info_rows_in_display_order() {
        let rows = info_rows("hi there", &Limits::default());
        let labels: Vec<&str> = rows.iter().map(|(l, _)| *l).collect();
        assert_eq!(
            labels,
            vec!["Characters", "Words", "Twitter Characters", "Twitter Characters Remaining"]
        );
        assert_eq!(rows[3].1, "272");
    }
}
