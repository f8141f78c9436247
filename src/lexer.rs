//! Splitting of a raw input line into words.

/// Characters separating words on a line.
pub const DELIMITERS: &[char] = &[' ', '\t'];

/// Lazy iterator over the words of a line.
///
/// Runs of delimiters are skipped, so no empty word is ever produced. At most
/// `limit` words are yielded; anything after that is silently dropped.
pub struct Tokens<'a> {
    rest: &'a str,
    delimiters: &'a [char],
    remaining: usize,
}

impl<'a> Tokens<'a> {
    fn new(line: &'a str, delimiters: &'a [char], limit: usize) -> Self {
        Tokens {
            rest: line,
            delimiters,
            remaining: limit,
        }
    }

    /// Returns `true` if words were left on the line after the limit was reached.
    pub fn truncated(&self) -> bool {
        self.remaining == 0 && !self.rest.trim_start_matches(self.delimiters).is_empty()
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let start = self.rest.trim_start_matches(self.delimiters);
        if start.is_empty() {
            self.rest = start;
            return None;
        }
        let end = start.find(self.delimiters).unwrap_or(start.len());
        let (word, rest) = start.split_at(end);
        self.rest = rest;
        self.remaining -= 1;
        Some(word)
    }
}

/// Splits `line` on `delimiters`, yielding at most `limit` non-empty words.
pub fn split_words<'a>(line: &'a str, delimiters: &'a [char], limit: usize) -> Tokens<'a> {
    Tokens::new(line, delimiters, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str, limit: usize) -> Vec<&str> {
        split_words(line, DELIMITERS, limit).collect()
    }

    #[test]
    fn test_splits_on_spaces_and_tabs() {
        assert_eq!(words("ls -l\t/tmp", 64), vec!["ls", "-l", "/tmp"]);
    }

    #[test]
    fn test_runs_of_delimiters_are_collapsed() {
        assert_eq!(
            words("  echo \t\t  hello    world  ", 64),
            vec!["echo", "hello", "world"]
        );
    }

    #[test]
    fn test_empty_and_blank_lines_have_no_words() {
        assert!(words("", 64).is_empty());
        assert!(words(" \t  ", 64).is_empty());
    }

    #[test]
    fn test_newline_is_not_a_delimiter() {
        // Line terminators are stripped by the command builder, not here.
        assert_eq!(words("a\nb", 64), vec!["a\nb"]);
    }

    #[test]
    fn test_words_beyond_limit_are_dropped() {
        let mut tokens = split_words("a b c d e", DELIMITERS, 3);
        let kept: Vec<&str> = tokens.by_ref().collect();
        assert_eq!(kept, vec!["a", "b", "c"]);
        assert!(tokens.truncated());
    }

    #[test]
    fn test_exact_limit_is_not_truncation() {
        let mut tokens = split_words("a b c  ", DELIMITERS, 3);
        assert_eq!(tokens.by_ref().count(), 3);
        assert!(!tokens.truncated());
    }

    #[test]
    fn test_input_is_left_untouched() {
        let line = String::from("  cmd arg");
        let first = split_words(&line, DELIMITERS, 64).next();
        assert_eq!(first, Some("cmd"));
        assert_eq!(line, "  cmd arg");
    }
}
