//! Splits a raw input line into the shell's argument vector.

/// Maximum length of an input line, in bytes. Longer lines are cut off.
pub const MAX_LINE: usize = 255;

/// Maximum number of tokens kept per line, command name included. Tokens
/// past the limit are silently discarded.
pub const MAX_ARGS: usize = 5;

/// Tokenize one input line.
///
/// The line is capped at [`MAX_LINE`] bytes, then split on runs of
/// whitespace; consecutive delimiters collapse, so no empty tokens are ever
/// produced. At most [`MAX_ARGS`] tokens are returned, each an owned copy
/// with no ties to the caller's buffer. A blank or whitespace-only line
/// yields an empty vector.
pub fn split_into_tokens(line: &str) -> Vec<String> {
    truncate_bytes(line, MAX_LINE)
        .split_whitespace()
        .take(MAX_ARGS)
        .map(str::to_owned)
        .collect()
}

// Byte-length cap that never splits a UTF-8 sequence.
fn truncate_bytes(s: &str, limit: usize) -> &str {
    if s.len() <= limit {
        return s;
    }
    let mut end = limit;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_yields_no_tokens() {
        assert!(split_into_tokens("").is_empty());
        assert!(split_into_tokens("   \t \n").is_empty());
    }

    #[test]
    fn runs_of_whitespace_collapse() {
        let tokens = split_into_tokens("ls   -a\t\t-l\n");
        assert_eq!(tokens, vec!["ls", "-a", "-l"]);
    }

    #[test]
    fn at_most_five_tokens_survive() {
        let tokens = split_into_tokens("a b c d e f g");
        assert_eq!(tokens, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn long_line_is_cut_at_the_byte_limit() {
        let line = "x".repeat(400);
        let tokens = split_into_tokens(&line);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].len(), MAX_LINE);
    }

    #[test]
    fn cut_never_splits_a_multibyte_char() {
        // Two-byte chars put the 255-byte mark inside a sequence.
        let line = "é".repeat(200);
        let tokens = split_into_tokens(&line);
        assert_eq!(tokens[0].len(), 254);
        assert_eq!(tokens[0].chars().count(), 127);
    }

    #[test]
    fn tokens_past_the_line_limit_are_lost() {
        let line = format!("{} y z", "x".repeat(254));
        let tokens = split_into_tokens(&line);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0], "x".repeat(254));
    }
}
