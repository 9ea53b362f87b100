use crate::config::LayoutConfig;

/// Rough rendered height of a text card: a fixed base plus one row per
/// wrapped line, assuming a fixed character width.
pub fn estimate_text_height(text: &str, width: i64, config: &LayoutConfig) -> i64 {
    let max_chars = (width / config.text_char_width.max(1)).max(1);
    let rows: i64 = split_lines(text)
        .map(|line| wrapped_rows(line, max_chars))
        .sum();
    config.text_base_height + rows * config.text_line_height
}

/// Characters that end a line, in addition to the `\r\n` pair.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Splits on every line break, treating `\r\n` as one. A trailing break
/// does not start an empty line, but "" still occupies one row.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = (!text.is_empty()).then_some(text);
    let empty = text.is_empty().then_some("");
    std::iter::from_fn(move || {
        let current = rest?;
        match current.find(LINE_BREAKS) {
            Some(pos) => {
                let skip = if current[pos..].starts_with("\r\n") {
                    2
                } else {
                    current[pos..].chars().next().map_or(1, char::len_utf8)
                };
                let tail = &current[pos + skip..];
                rest = (!tail.is_empty()).then_some(tail);
                Some(&current[..pos])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
    .chain(empty)
}

fn wrapped_rows(line: &str, max_chars: i64) -> i64 {
    let len = line.chars().count() as i64;
    ((len + max_chars - 1) / max_chars).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn height(text: &str, width: i64) -> i64 {
        estimate_text_height(text, width, &LayoutConfig::default())
    }

    #[test]
    fn short_line_is_one_row() {
        assert_eq!(height("0123456789", 250), 75);
    }

    #[test]
    fn empty_text_is_one_row() {
        assert_eq!(height("", 250), 75);
    }

    #[test]
    fn long_line_wraps_at_width_over_six() {
        // 250 / 6 = 41 chars per row
        assert_eq!(height(&"x".repeat(41), 250), 75);
        assert_eq!(height(&"x".repeat(42), 250), 100);
        assert_eq!(height(&"x".repeat(83), 250), 125);
    }

    #[test]
    fn blank_lines_count_as_rows() {
        assert_eq!(height("a\n\nb", 250), 125);
        assert_eq!(height("a\r\nb", 250), 100);
        assert_eq!(height("a\n", 250), 75);
    }

    #[test]
    fn every_line_separator_breaks_a_row() {
        assert_eq!(height("a\rb", 250), 100);
        assert_eq!(height("a\u{2028}b", 250), 100);
        assert_eq!(height("a\u{2029}b\x0cc", 250), 125);
        assert_eq!(height("a\u{85}\x0bb", 250), 125);
        assert_eq!(height("a\r\n\rb", 250), 125);
        assert_eq!(height("a\r", 250), 75);
    }

    #[test]
    fn narrow_width_still_fits_one_char() {
        assert_eq!(height("abc", 3), 50 + 3 * 25);
        assert_eq!(height("abc", 0), 50 + 3 * 25);
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 6 px per char at width 12 → 2 chars per row
        assert_eq!(height("éé", 12), 75);
        assert_eq!(height("ééé", 12), 100);
    }
}
