use crate::regex::error::CompileError;
use crate::regex::matcher::match_here;
use crate::regex::parser;
use crate::regex::token::Token;

pub const MAX_CAPTURE_GROUPS: usize = 10;

/// A compiled pattern: an immutable token sequence plus a capture-slot
/// table that is reset and mutated on every top-level match attempt.
/// `Clone`-able so a caller needing concurrent use can hand each thread
/// its own copy; the capture table itself is not synchronized.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    tokens: Vec<Token>,
    captures: [Option<(usize, usize)>; MAX_CAPTURE_GROUPS],
}

impl CompiledPattern {
    pub fn compile(pattern: &str) -> Result<Self, CompileError> {
        let tokens = parser::compile(pattern)?;
        Ok(CompiledPattern {
            tokens,
            captures: [None; MAX_CAPTURE_GROUPS],
        })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Capture slot `g` (1-indexed) as recorded by the most recent match
    /// attempt, or `None` if group `g` never matched.
    pub fn capture(&self, g: usize) -> Option<(usize, usize)> {
        self.captures.get(g - 1).copied().flatten()
    }

    /// True if any substring of `subject` matches this pattern.
    pub fn match_any(&mut self, subject: &str) -> bool {
        self.search_from(subject, 0).is_some()
    }

    /// All non-overlapping matches, left to right, advancing past each
    /// match's end (or by one byte, to make progress, on a zero-length
    /// match).
    pub fn find_all(&mut self, subject: &str) -> Vec<(usize, usize)> {
        let mut matches = Vec::new();
        let mut start = 0usize;

        loop {
            match self.search_from(subject, start) {
                Some((match_start, match_end)) => {
                    matches.push((match_start, match_end));
                    start = if match_end > match_start {
                        match_end
                    } else {
                        match_end + 1
                    };
                    if start > subject.len() {
                        break;
                    }
                }
                None => break,
            }
        }

        matches
    }

    /// Walks candidate start byte offsets from `from_byte` upward,
    /// returning the first `(start, end)` that matches. If the pattern is
    /// anchored at `^`, only the very first candidate position is tried.
    /// The walk continues one position past `subject.len()` once, to
    /// permit a zero-length match at end of input.
    fn search_from(&mut self, subject: &str, from_byte: usize) -> Option<(usize, usize)> {
        let CompiledPattern { tokens, captures } = self;
        let anchored = matches!(tokens.first(), Some(Token::Start));

        let mut i = from_byte;
        loop {
            if i > subject.len() {
                return None;
            }
            *captures = [None; MAX_CAPTURE_GROUPS];
            if let Some(end) = match_here(subject, i, tokens, captures) {
                return Some((i, end));
            }
            if anchored || i == subject.len() {
                return None;
            }
            i = next_byte_index(subject, i);
        }
    }
}

/// One char-step past `i` (`i` is assumed `< subject.len()`).
fn next_byte_index(subject: &str, i: usize) -> usize {
    match subject[i..].chars().next() {
        Some(c) => i + c.len_utf8(),
        None => i + 1,
    }
}
