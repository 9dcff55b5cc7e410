/// Converts `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Whitespace for trimming: Unicode `White_Space` plus the information
/// separators U+001C..=U+001F.
fn is_trimmed(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Splits text into physical lines and trims each one.
///
/// Blank and whitespace-only lines become `""`. A trailing newline does not
/// produce an extra element, and empty text yields no lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim_matches(is_trimmed).to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("a\r\nb\rc\n".to_string()), "a\nb\nc\n");
        assert_eq!(normalize_newlines("plain\n".to_string()), "plain\n");
        assert_eq!(normalize_newlines("\r\r\n".to_string()), "\n\n");
    }

    #[test]
    fn test_split_lines_empty() {
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_split_lines_trailing_newline() {
        assert_eq!(split_lines("a\nb\n"), ["a", "b"]);
        assert_eq!(split_lines("a\nb"), ["a", "b"]);
    }

    #[test]
    fn test_split_lines_trims_each_line() {
        assert_eq!(
            split_lines("  padded  \n\t\n\nlast line \n"),
            ["padded", "", "", "last line"]
        );
    }

    #[test]
    fn test_split_lines_trims_separators_and_unicode_spaces() {
        assert_eq!(
            split_lines("\x1cgroup\x1f\n\u{3000}ideographic\u{00A0}\n\x0bvt\x0c\n"),
            ["group", "ideographic", "vt"]
        );
        assert_eq!(split_lines("keep\x1binside\x1b"), ["keep\x1binside\x1b"]);
    }

    #[test]
    fn test_split_lines_keeps_leading_blank_lines() {
        assert_eq!(split_lines("\n\nx\n"), ["", "", "x"]);
        assert_eq!(split_lines("\n"), [""]);
    }
}
