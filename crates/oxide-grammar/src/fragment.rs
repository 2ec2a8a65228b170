//! Ordered SQL text tokens awaiting assembly.

use std::collections::VecDeque;

/// A buffer of SQL text tokens joined with single spaces on assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments {
    tokens: VecDeque<String>,
}

impl Fragments {
    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tokens: VecDeque::new(),
        }
    }

    /// Appends a token.
    pub fn push(&mut self, token: impl Into<String>) -> &mut Self {
        self.tokens.push_back(token.into());
        self
    }

    /// Removes and returns the front token, or an empty string when the
    /// buffer is empty.
    pub fn pop(&mut self) -> String {
        self.tokens.pop_front().unwrap_or_default()
    }

    /// Joins every token with a single space.
    #[must_use]
    pub fn assemble(&self) -> String {
        self.tokens
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Drops every token.
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Number of buffered tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if no token is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
