use crate::{ArgumentError, ParseError, Position};
use std::fmt::{Display, Formatter};

impl ParseError {
    /// A diagnostic pinned to a point in the document. Every tokenizer and
    /// projection failure shares one message form, assembled here:
    /// `<what> at <offset> [character <column> line <line>]`.
    pub fn at(what: &str, offset: usize, position: Position) -> Self {
        Self {
            pointer: offset,
            message: format!("{} at {} [{}]", what, offset, position),
        }
    }

    /// The nesting-bound failure. The bound is a property of the whole
    /// document rather than of one construct, so the message carries no
    /// source position.
    pub fn depth_exceeded(limit: usize, pointer: usize) -> Self {
        Self {
            pointer,
            message: format!("Maximum nesting depth of {} reached", limit),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ArgumentError {
    /// Reject a configuration value, naming the option it was meant for.
    pub fn invalid_option(option: &str, message: &str) -> Self {
        Self {
            what: option.to_owned(),
            message: message.to_owned(),
        }
    }
}

impl Display for ArgumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {} option: {}", self.what, self.message)
    }
}
