//! Character cursor over a single input line.

/// Forward-only cursor over the characters of a command line.
#[derive(Debug, Clone)]
pub struct InputCursor {
    chars: Vec<char>,
    pos: usize,
}

impl InputCursor {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Move back to an earlier position, e.g. after a failed lookahead.
    pub fn rewind(&mut self, pos: usize) {
        self.pos = pos.min(self.chars.len());
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    /// Advance while `pred` holds, returning how many chars were skipped.
    pub fn skip_while<F>(&mut self, pred: F) -> usize
    where
        F: Fn(char) -> bool,
    {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        self.pos - start
    }

    pub fn skip_spaces(&mut self) {
        self.skip_while(|ch| ch == ' ');
    }

    /// Text between two positions.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }

    /// Remaining text from the cursor to the end.
    pub fn rest(&self) -> String {
        self.slice(self.pos, self.chars.len())
    }
}
