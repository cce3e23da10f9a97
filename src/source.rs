use crate::{Checkpoint, Position, Source};
use std::fmt::{Display, Formatter};

/// Positions render in the `character <column> line <line>` form that
/// diagnostics embed.
impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "character {} line {}", self.column, self.line)
    }
}

impl<'c> From<&'c str> for Source<'c> {
    fn from(value: &'c str) -> Self {
        Source::new(value)
    }
}

impl<'c> Source<'c> {
    pub fn new(value: &'c str) -> Self {
        Self {
            value,
            chars: value.chars(),
            offset: 0,
            line: 1,
            column: 1,
            replay: None,
            consumed: None,
        }
    }

    /// Read the next scalar, or `None` at end of input.
    ///
    /// `\r\n` and a lone `\r` are both delivered as `\n`; the offset still
    /// advances by the number of source scalars consumed.
    pub fn next(&mut self) -> Option<char> {
        let (ch, width) = match self.replay.take() {
            Some(pending) => pending,
            None => {
                let ch = self.chars.next()?;
                if ch == '\r' {
                    if self.chars.clone().next() == Some('\n') {
                        self.chars.next();
                        ('\n', 2)
                    } else {
                        ('\n', 1)
                    }
                } else {
                    (ch, 1)
                }
            }
        };
        self.consumed = Some(Checkpoint {
            ch,
            width,
            offset: self.offset,
            line: self.line,
            column: self.column,
        });
        self.offset += width;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Look at the next scalar without consuming it.
    pub fn peek(&self) -> Option<char> {
        if let Some((ch, _)) = self.replay {
            return Some(ch);
        }
        let ch = self.chars.clone().next()?;
        Some(if ch == '\r' { '\n' } else { ch })
    }

    /// Push the most recently returned scalar back so the next call to
    /// [next](Source::next) delivers it again. Only one level is kept.
    pub fn back(&mut self) {
        if let Some(checkpoint) = self.consumed.take() {
            self.offset = checkpoint.offset;
            self.line = checkpoint.line;
            self.column = checkpoint.column;
            self.replay = Some((checkpoint.ch, checkpoint.width));
        }
    }

    /// 0-based scalar offset of the next unread scalar.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 1-based line and column of the next unread scalar.
    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }
}
