//! Keeps user-supplied text (quest titles, profile names, notifications) on a
//! single log line.

/// Longest escaped preview written to the log, in characters.
pub const MAX_PREVIEW: usize = 200;

/// Escape newlines, tabs, backslashes and other control characters as
/// visible sequences and cut the result at [`MAX_PREVIEW`] characters.
pub fn escape_log(s: &str) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 4);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:x}}}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_line_titles_stay_on_one_line() {
        assert_eq!(escape_log("Read\n20 pages\t"), "Read\\n20 pages\\t");
        assert_eq!(escape_log("bell\u{7}"), "bell\\u{7}");
    }

    #[test]
    fn long_text_is_cut() {
        let escaped = escape_log(&"x".repeat(MAX_PREVIEW + 50));
        assert_eq!(escaped.chars().count(), MAX_PREVIEW + 1);
        assert!(escaped.ends_with('…'));
    }
}
