use unicode_width::UnicodeWidthStr;

pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Terminal column of a byte-offset cursor in a single-line input.
pub fn cursor_column(text: &str, cursor: usize) -> usize {
    let cursor = cursor.min(text.len());
    text.get(..cursor).map(UnicodeWidthStr::width).unwrap_or(0)
}

/// Horizontal scroll that keeps `column` inside a field `width` cells wide.
pub fn horizontal_scroll(column: usize, width: usize) -> usize {
    if width == 0 {
        0
    } else {
        column.saturating_sub(width - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_no_truncation() {
        assert_eq!(truncate_string("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_string_with_truncation() {
        assert_eq!(truncate_string("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_string_multibyte() {
        assert_eq!(truncate_string("größenwahnsinn", 7), "größ...");
        assert_eq!(truncate_string("größenwahnsinn", 6), "grö...");
    }

    #[test]
    fn test_truncate_string_empty() {
        assert_eq!(truncate_string("", 5), "");
    }

    #[test]
    fn test_cursor_column() {
        assert_eq!(cursor_column("", 0), 0);
        assert_eq!(cursor_column("paris", 3), 3);
        assert_eq!(cursor_column("paris", 99), 5);
        // Wide characters take two cells.
        assert_eq!(cursor_column("東京", 3), 2);
        assert_eq!(cursor_column("東京", 6), 4);
    }

    #[test]
    fn test_horizontal_scroll() {
        assert_eq!(horizontal_scroll(5, 10), 0);
        assert_eq!(horizontal_scroll(9, 10), 0);
        assert_eq!(horizontal_scroll(12, 10), 3);
        assert_eq!(horizontal_scroll(4, 0), 0);
    }
}
