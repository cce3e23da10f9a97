use std::fmt::{Display, Formatter};

use crate::{Log, Position, Token};

impl<T: Display> Display for Log<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Log::None => Ok(()),
            Log::Failures(label) | Log::Tokens(label) => write!(f, "{}", label),
        }
    }
}

impl<T: Display> Log<T> {
    /// Report one emitted token. Only the [Tokens](Log::Tokens) level prints,
    /// and only in debug builds.
    pub fn report_token(&self, _token: &Token, _at: Position) {
        #[cfg(debug_assertions)]
        if let Log::Tokens(label) = self {
            println!("[{}; Token]: {:?} at {}", label, _token, _at);
        }
    }

    /// Report a tokenization failure. Both reporting levels print, again only
    /// in debug builds.
    pub fn report_failure(&self, _what: &str, _at: Position) {
        #[cfg(debug_assertions)]
        match self {
            Log::None => {}
            Log::Failures(label) | Log::Tokens(label) => {
                println!("[{}; TokenError]: {} at {}", label, _what, _at);
            }
        }
    }
}
