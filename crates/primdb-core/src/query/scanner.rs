//! Character scanner shared by the clause and command parsers.
//!
//! Tracks single/double quoted spans so separators and keywords inside
//! quoted values are never treated as syntax.

/// Cursor over the characters of a command.
pub struct Scanner {
    input: Vec<char>,
    position: usize,
}

impl Scanner {
    /// Create a new scanner from input text
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// True once only whitespace remains
    pub fn is_at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.position >= self.input.len()
    }

    /// Read the next whitespace-delimited word; also stops before `(`
    pub fn next_word(&mut self) -> Option<String> {
        self.skip_whitespace();
        let start = self.position;
        while self.position < self.input.len() {
            let ch = self.current_char();
            if ch.is_whitespace() || ch == '(' {
                break;
            }
            self.advance();
        }
        if self.position == start {
            None
        } else {
            Some(self.input[start..self.position].iter().collect())
        }
    }

    /// Consume the next word if it equals `keyword`, ignoring case
    pub fn eat_keyword(&mut self, keyword: &str) -> bool {
        let saved = self.position;
        match self.next_word() {
            Some(word) if word.eq_ignore_ascii_case(keyword) => true,
            _ => {
                self.position = saved;
                false
            }
        }
    }

    /// Everything not yet consumed, trimmed
    pub fn rest(&mut self) -> String {
        let rest: String = self.input[self.position..].iter().collect();
        self.position = self.input.len();
        rest.trim().to_string()
    }

    fn current_char(&self) -> char {
        self.input[self.position]
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while self.position < self.input.len() && self.current_char().is_whitespace() {
            self.advance();
        }
    }
}

/// Quote state while walking a string.
#[derive(Debug, Default)]
struct QuoteTracker {
    open: Option<char>,
}

impl QuoteTracker {
    /// Feed one character; returns true if it sits outside any quoted span
    /// and is not itself a quote.
    fn feed(&mut self, ch: char) -> bool {
        match self.open {
            Some(q) if ch == q => {
                self.open = None;
                false
            }
            Some(_) => false,
            None if ch == '"' || ch == '\'' => {
                self.open = Some(ch);
                false
            }
            None => true,
        }
    }
}

/// Splits `text` on `separator` occurrences outside quoted spans.
///
/// Segments are returned untrimmed. An empty input yields one empty segment.
pub fn split_unquoted(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut tracker = QuoteTracker::default();
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        if tracker.feed(ch) && ch == separator {
            parts.push(&text[start..idx]);
            start = idx + ch.len_utf8();
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Byte offset of the first standalone, unquoted occurrence of `keyword`
/// (case-insensitive, ASCII).
pub fn find_unquoted_keyword(text: &str, keyword: &str) -> Option<usize> {
    let mut tracker = QuoteTracker::default();
    let mut prev: Option<char> = None;
    for (idx, ch) in text.char_indices() {
        let outside = tracker.feed(ch);
        let at_boundary = prev.map_or(true, char::is_whitespace);
        prev = Some(ch);
        if !outside || !at_boundary {
            continue;
        }
        let tail = &text[idx..];
        if tail.len() < keyword.len() || !tail.is_char_boundary(keyword.len()) {
            continue;
        }
        let (candidate, after) = tail.split_at(keyword.len());
        if candidate.eq_ignore_ascii_case(keyword)
            && after.chars().next().map_or(true, char::is_whitespace)
        {
            return Some(idx);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_and_keywords() {
        let mut scanner = Scanner::new("  INSERT into users values(1, 2)");
        assert!(scanner.eat_keyword("insert"));
        assert!(!scanner.eat_keyword("from"));
        assert!(scanner.eat_keyword("INTO"));
        assert_eq!(scanner.next_word().as_deref(), Some("users"));
        assert!(scanner.eat_keyword("values"));
        assert_eq!(scanner.rest(), "(1, 2)");
        assert!(scanner.is_at_end());
        assert_eq!(scanner.next_word(), None);
    }

    #[test]
    fn test_split_respects_quotes() {
        assert_eq!(
            split_unquoted("age=26, name=\"Alice, Jr\"", ','),
            vec!["age=26", " name=\"Alice, Jr\""]
        );
        assert_eq!(split_unquoted("a='x,\"y', b=2", ','), vec!["a='x,\"y'", " b=2"]);
        assert_eq!(split_unquoted("", ','), vec![""]);
        assert_eq!(split_unquoted("a,", ','), vec!["a", ""]);
    }

    #[test]
    fn test_find_keyword_outside_quotes() {
        let text = "name='where now' WHERE ID=1";
        assert_eq!(find_unquoted_keyword(text, "where"), Some(17));
        assert_eq!(find_unquoted_keyword("nowhere=1", "where"), None);
        assert_eq!(find_unquoted_keyword("a=1 whereabouts", "where"), None);
        assert_eq!(find_unquoted_keyword("where x=1", "where"), Some(0));
    }
}
