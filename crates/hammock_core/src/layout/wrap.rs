//! Width normalization for single cells.
//!
//! `wrap_to_width` re-flows free text (project goals) on word boundaries.
//! `truncate_to_width` shortens single-line fields (names, headlines) with
//! a trailing ellipsis.
//!
//! Widths are terminal display columns, so wide glyphs count double.

use super::{positive_width, LayoutResult};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Wraps `text` so no line is wider than `width`, breaking only between words.
///
/// Existing line breaks are kept as hard breaks; each source line is wrapped
/// on its own. A single word wider than `width` is emitted whole on its own
/// line rather than split.
///
/// # Errors
/// - `LayoutError::InvalidArgument` when `width <= 0`.
pub fn wrap_to_width(text: &str, width: i64) -> LayoutResult<String> {
    let width = positive_width("width", width)?;
    if text.is_empty() {
        return Ok(String::new());
    }

    let lines = text
        .split('\n')
        .map(|line| wrap_line(line.trim_end_matches('\r'), width))
        .collect::<Vec<_>>();
    Ok(lines.join("\n"))
}

/// Returns `text` unchanged when it fits, else its head plus `...`.
///
/// An over-long result is exactly `width` display columns wide; a double-width
/// glyph that straddles the cut is replaced by spaces. Widths under four
/// leave no room for content, so only the ellipsis (cut to `width`) remains.
///
/// # Errors
/// - `LayoutError::InvalidArgument` when `width <= 0`.
pub fn truncate_to_width(text: &str, width: i64) -> LayoutResult<String> {
    let width = positive_width("width", width)?;
    if text.width() <= width {
        return Ok(text.to_string());
    }
    if width <= ELLIPSIS_WIDTH {
        return Ok(ELLIPSIS.chars().take(width).collect());
    }

    let budget = width - ELLIPSIS_WIDTH;
    let mut kept = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > budget {
            break;
        }
        kept.push(ch);
        used += ch_width;
    }
    // A wide glyph that does not fit leaves a one-column gap.
    kept.extend(std::iter::repeat(' ').take(budget - used));
    kept.push_str(ELLIPSIS);
    Ok(kept)
}

fn wrap_line(line: &str, width: usize) -> String {
    if line.width() <= width {
        return line.to_string();
    }

    let mut wrapped = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    for word in line.split_whitespace() {
        let word_width = word.width();
        if current_width > 0 && current_width + 1 + word_width > width {
            wrapped.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if current_width > 0 {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
    }
    if !current.is_empty() {
        wrapped.push(current);
    }
    wrapped.join("\n")
}

#[cfg(test)]
mod tests {
    use super::{truncate_to_width, wrap_to_width};
    use crate::layout::LayoutError;
    use unicode_width::UnicodeWidthStr;

    #[test]
    fn wrap_breaks_between_words() {
        assert_eq!(wrap_to_width("one two three", 7).unwrap(), "one two\nthree");
    }

    #[test]
    fn wrap_keeps_hard_breaks_and_wraps_each_line() {
        let wrapped = wrap_to_width("short\nalpha beta gamma delta", 11).unwrap();
        assert_eq!(wrapped, "short\nalpha beta\ngamma delta");
    }

    #[test]
    fn wrap_emits_overlong_word_whole() {
        let wrapped = wrap_to_width("a supercalifragilistic word", 6).unwrap();
        assert_eq!(wrapped, "a\nsupercalifragilistic\nword");
    }

    #[test]
    fn wrapped_lines_fit_unless_single_word() {
        let text = "the quick brown fox jumps over the extraordinarily lazy dog";
        for width in 1..=20 {
            let wrapped = wrap_to_width(text, width).unwrap();
            for line in wrapped.split('\n') {
                let fits = line.chars().count() <= width as usize;
                let single_word = !line.contains(' ');
                assert!(fits || single_word, "width {width}: `{line}`");
            }
        }
    }

    #[test]
    fn wrap_empty_text_is_empty() {
        assert_eq!(wrap_to_width("", 10).unwrap(), "");
    }

    #[test]
    fn non_positive_width_is_rejected() {
        assert!(matches!(
            wrap_to_width("text", 0),
            Err(LayoutError::InvalidArgument { name: "width", value: 0 })
        ));
        assert!(matches!(
            truncate_to_width("text", -2),
            Err(LayoutError::InvalidArgument { name: "width", value: -2 })
        ));
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate_to_width("abcdefgh", 5).unwrap(), "ab...");
    }

    #[test]
    fn truncate_leaves_fitting_text_alone() {
        for text in ["", "a", "abcd", "exactly-ten"] {
            let width = text.chars().count().max(1) as i64;
            assert_eq!(truncate_to_width(text, width).unwrap(), text);
            assert_eq!(truncate_to_width(text, width + 5).unwrap(), text);
        }
    }

    #[test]
    fn truncated_text_has_exact_width() {
        let text = "a project name that is far too long to fit";
        for width in 4..(text.len() as i64) {
            let truncated = truncate_to_width(text, width).unwrap();
            assert_eq!(truncated.chars().count() as i64, width);
            assert!(truncated.ends_with("..."));
        }
    }

    #[test]
    fn truncate_pads_when_wide_glyph_straddles_cut() {
        let truncated = truncate_to_width("日本語日本語", 6).unwrap();
        assert_eq!(truncated, "日 ...");
        assert_eq!(truncated.width(), 6);
        assert_eq!(truncate_to_width("日本語日本語", 7).unwrap(), "日本...");
    }

    #[test]
    fn truncate_below_ellipsis_width_keeps_marker_prefix() {
        assert_eq!(truncate_to_width("abcdef", 2).unwrap(), "..");
        assert_eq!(truncate_to_width("abcdef", 3).unwrap(), "...");
    }
}
