//! Text shaping helpers.
//!
//! All widths here are terminal display columns, not bytes or chars, so that
//! padded cells line up even with wide or combining characters.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

static HTML_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("Invalid HTML tag regex"));

/// Display width of a string in terminal columns.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Takes leading chars of `s` while they fit in `width` columns.
fn take_columns(s: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in s.char_indices() {
        let w = char_width(c);
        if used + w > width {
            return &s[..idx];
        }
        used += w;
    }
    s
}

/// Truncates a string with `marker` if it exceeds `max_width` columns.
///
/// When even the marker does not fit, as much of the marker as fits is
/// returned.
pub fn ellipsis<'a>(s: &'a str, max_width: usize, marker: &str) -> Cow<'a, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    Cow::Owned(cut_with_marker(s, max_width, marker))
}

/// Cuts `s` so that it plus `marker` fits in `max_width` columns and appends
/// the marker, whether or not `s` was too long.
///
/// Used when text was dropped after this line and the cut must show.
pub fn cut_with_marker(s: &str, max_width: usize, marker: &str) -> String {
    let marker_width = display_width(marker);
    if marker_width >= max_width {
        return take_columns(marker, max_width).to_string();
    }

    let kept = take_columns(s, max_width - marker_width).trim_end();
    format!("{}{}", kept, marker)
}

/// Left-aligns `s` in exactly `width` columns, cutting overlong input.
pub fn pad(s: &str, width: usize) -> String {
    let cut = take_columns(s, width);
    let fill = width - display_width(cut);
    format!("{}{}", cut, " ".repeat(fill))
}

/// Centers `s` in exactly `width` columns; extra space goes to the right.
pub fn center(s: &str, width: usize) -> String {
    let cut = take_columns(s, width);
    let fill = width - display_width(cut);
    let left = fill / 2;
    format!("{}{}{}", " ".repeat(left), cut, " ".repeat(fill - left))
}

/// Right-aligns `s` in exactly `width` columns.
pub fn right(s: &str, width: usize) -> String {
    let cut = take_columns(s, width);
    let fill = width - display_width(cut);
    format!("{}{}", " ".repeat(fill), cut)
}

/// Greedy word wrap into lines no wider than `width`.
///
/// Runs of whitespace collapse to a single space. A word wider than `width`
/// on its own is truncated with `marker`. Empty input yields no lines.
pub fn wrap(text: &str, width: usize, marker: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word = ellipsis(word, width, marker);
        if current.is_empty() {
            current.push_str(&word);
        } else if display_width(&current) + 1 + display_width(&word) <= width {
            current.push(' ');
            current.push_str(&word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(&word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Removes HTML tags, as found in schedule abstracts and descriptions.
pub fn strip_html(s: &str) -> Cow<'_, str> {
    HTML_TAG_REGEX.replace_all(s, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    mod ellipsis_tests {
        use super::*;

        #[test]
        fn short_string_unchanged() {
            assert_eq!(ellipsis("hello", 10, "..."), "hello");
        }

        #[test]
        fn exact_length_unchanged() {
            assert_eq!(ellipsis("hello", 5, "..."), "hello");
        }

        #[test]
        fn long_string_truncated() {
            assert_eq!(ellipsis("hello world", 8, "..."), "hello...");
            assert_eq!(ellipsis("hello world", 8, "…"), "hello w…");
        }

        #[test]
        fn trailing_space_is_trimmed_before_marker() {
            assert_eq!(ellipsis("hello world", 9, "..."), "hello...");
        }

        #[test]
        fn marker_wider_than_room() {
            assert_eq!(ellipsis("hello", 3, "..."), "...");
            assert_eq!(ellipsis("hello", 2, "..."), "..");
            assert_eq!(ellipsis("hello", 0, "..."), "");
        }

        #[test]
        fn forced_marker() {
            assert_eq!(cut_with_marker("short", 10, "..."), "short...");
            assert_eq!(cut_with_marker("exactly10!", 10, "..."), "exactly...");
            assert_eq!(cut_with_marker("ab", 2, "..."), "..");
        }

        #[test]
        fn wide_characters_count_double() {
            // each CJK char is two columns
            assert_eq!(ellipsis("漢字漢字", 5, "…"), "漢字…");
        }
    }

    mod alignment {
        use super::*;

        #[test]
        fn pad_fills_and_cuts() {
            assert_eq!(pad("ab", 4), "ab  ");
            assert_eq!(pad("abcdef", 4), "abcd");
            assert_eq!(display_width(&pad("漢字漢", 5)), 5);
        }

        #[test]
        fn center_puts_extra_space_right() {
            assert_eq!(center("ab", 5), " ab  ");
            assert_eq!(center("Saal 1", 6), "Saal 1");
        }

        #[test]
        fn right_aligns() {
            assert_eq!(right(":30", 5), "  :30");
            assert_eq!(right("", 5), "     ");
        }
    }

    mod wrapping {
        use super::*;

        #[test]
        fn greedy_lines() {
            assert_eq!(
                wrap("The Global Assassination Grid", 16, "..."),
                vec!["The Global", "Assassination", "Grid"]
            );
        }

        #[test]
        fn collapses_whitespace() {
            assert_eq!(wrap("a   b\n c", 10, "..."), vec!["a b c"]);
        }

        #[test]
        fn empty_input() {
            assert!(wrap("", 10, "...").is_empty());
            assert!(wrap("   ", 10, "...").is_empty());
        }

        #[test]
        fn overlong_word_is_truncated() {
            assert_eq!(
                wrap("see https://example.org/a/very/long/path", 12, "..."),
                vec!["see", "https://e..."]
            );
        }
    }

    #[test]
    fn strips_html_tags() {
        assert_eq!(
            strip_html("<p>Drones <b>kill</b> people.</p>"),
            "Drones kill people."
        );
        assert_eq!(strip_html("no tags"), "no tags");
    }
}
