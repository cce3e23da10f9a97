use crate::{entity, Log, ParseError, Position, ScanState, Source, Token, Tokenizer};
use once_cell::unsync::OnceCell;

fn is_name_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == ':'
}

fn is_name_part(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '-' | ':' | '.')
}

impl<'c> Tokenizer<'c> {
    pub fn new(text: &'c str) -> Self {
        Self {
            source: Source::new(text),
            state: ScanState::Content,
            debug: OnceCell::new(),
        }
    }

    /// Set a log label to debug the token stream.
    /// Based on the level of the [Log], the tokenizer will report each token.
    pub fn set_log(&self, log: Log<&'static str>) -> Result<(), String> {
        self.debug
            .set(log)
            .map_err(|err| format!("Log label {} is already assigned.", err))
    }

    /// 0-based scalar offset of the next unread scalar.
    pub fn offset(&self) -> usize {
        self.source.offset()
    }

    /// 1-based line and column of the next unread scalar.
    pub fn position(&self) -> Position {
        self.source.position()
    }

    /// Pull the next structural token. After [Token::Eof] every further pull
    /// returns [Token::Eof] again.
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        let token = loop {
            match self.state {
                ScanState::End => break Token::Eof,
                ScanState::Tag => {
                    self.state = ScanState::Content;
                    break self.tag()?;
                }
                ScanState::Content => {
                    if let Some(text) = self.content() {
                        break Token::Text(text);
                    }
                    // content() advanced the state; go round again.
                }
            }
        };
        if let Some(log) = self.debug.get() {
            log.report_token(&token, self.source.position());
        }
        Ok(token)
    }

    /// Accumulate character data up to the next `<` or the end of input.
    /// Returns `None` when the run trims to nothing.
    fn content(&mut self) -> Option<String> {
        let mut text = String::new();
        loop {
            match self.source.next() {
                None => {
                    self.state = ScanState::End;
                    break;
                }
                Some('<') => {
                    self.state = ScanState::Tag;
                    break;
                }
                Some('&') => {
                    let run = self.reference();
                    text.push_str(&run);
                }
                Some(ch) => text.push(ch),
            }
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        }
    }

    /// Resolve a character reference; the `&` is already consumed. Anything
    /// that does not form a decodable reference is kept literal.
    fn reference(&mut self) -> String {
        let mut body = String::new();
        loop {
            match self.source.peek() {
                Some(ch) if ch.is_ascii_alphanumeric() || ch == '#' => {
                    self.source.next();
                    body.push(ch);
                }
                Some(';') => {
                    self.source.next();
                    return entity::decode(&body).unwrap_or_else(|| format!("&{};", body));
                }
                _ => return format!("&{}", body),
            }
        }
    }

    /// Dispatch on the character after `<`.
    fn tag(&mut self) -> Result<Token, ParseError> {
        match self.source.peek() {
            None => Err(self.syntax_error("Misshaped element")),
            Some('/') => self.close_tag(),
            Some('?') => {
                self.source.next();
                self.skip_past("?>");
                Ok(Token::Ignored)
            }
            Some('!') => {
                self.source.next();
                self.meta()
            }
            Some(_) => self.open_tag(),
        }
    }

    fn open_tag(&mut self) -> Result<Token, ParseError> {
        let name = self.element_name()?;
        let mut attributes: Vec<(String, String)> = Vec::new();
        loop {
            self.skip_whitespace();
            let at = self.checkpoint();
            match self.source.next() {
                None => return Err(self.error_at("Misshaped element", at)),
                Some('>') => return Ok(Token::StartElement { name, attributes }),
                Some('/') => {
                    self.skip_whitespace();
                    return match self.source.next() {
                        Some('>') => Ok(Token::EmptyElement { name, attributes }),
                        _ => Err(self.error_at("Misshaped tag", at)),
                    };
                }
                Some('<') => return Err(self.error_at("Misplaced '<'", at)),
                Some(_) => {
                    self.source.back();
                    let key = self.word()?;
                    if key.is_empty() {
                        return Err(self.error_at("Misshaped tag", at));
                    }
                    self.skip_whitespace();
                    if self.source.peek() == Some('=') {
                        self.source.next();
                        self.skip_whitespace();
                        let value = self.attribute_value()?;
                        attributes.push((key, value));
                    } else {
                        // A bare attribute carries its own name as its value.
                        let value = key.clone();
                        attributes.push((key, value));
                    }
                }
            }
        }
    }

    fn close_tag(&mut self) -> Result<Token, ParseError> {
        self.source.next(); // the '/'
        let name = self.element_name()?;
        self.skip_whitespace();
        let at = self.checkpoint();
        match self.source.next() {
            Some('>') => Ok(Token::EndElement { name }),
            Some('<') => Err(self.error_at("Misplaced '<'", at)),
            _ => Err(self.error_at("Misshaped close tag", at)),
        }
    }

    /// Read and validate an element name: a letter, `_` or `:` first, then
    /// letters, digits, `_`, `-`, `:` or `.`.
    fn element_name(&mut self) -> Result<String, ParseError> {
        let mut name = String::new();
        loop {
            let at = self.checkpoint();
            match self.source.next() {
                None => break,
                Some(ch) if ch.is_whitespace() || matches!(ch, '>' | '/' | '=') => {
                    self.source.back();
                    break;
                }
                Some('<') => return Err(self.error_at("Misplaced '<'", at)),
                Some(ch) if name.is_empty() && is_name_start(ch) => name.push(ch),
                Some(ch) if !name.is_empty() && is_name_part(ch) => name.push(ch),
                Some(_) => return Err(self.error_at("Misshaped tag", at)),
            }
        }
        if name.is_empty() {
            return Err(self.syntax_error("Misshaped tag"));
        }
        Ok(name)
    }

    /// Read an attribute name or an unquoted attribute value, up to the next
    /// delimiter.
    fn word(&mut self) -> Result<String, ParseError> {
        let mut word = String::new();
        loop {
            let at = self.checkpoint();
            match self.source.next() {
                None => break,
                Some(ch) if ch.is_whitespace() || matches!(ch, '>' | '/' | '=') => {
                    self.source.back();
                    break;
                }
                Some('<') => return Err(self.error_at("Misplaced '<'", at)),
                Some('"') | Some('\'') => return Err(self.error_at("Misshaped tag", at)),
                Some(ch) => word.push(ch),
            }
        }
        Ok(word)
    }

    fn attribute_value(&mut self) -> Result<String, ParseError> {
        let at = self.checkpoint();
        match self.source.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.source.next();
                let mut value = String::new();
                loop {
                    match self.source.next() {
                        None => return Err(self.syntax_error("Unterminated string")),
                        Some(ch) if ch == quote => break,
                        Some('&') => {
                            let run = self.reference();
                            value.push_str(&run);
                        }
                        Some(ch) => value.push(ch),
                    }
                }
                Ok(value)
            }
            Some('<') => {
                self.source.next();
                Err(self.error_at("Misplaced '<'", at))
            }
            Some('>') | Some('/') | Some('=') | None => Err(self.error_at("Missing value", at)),
            Some(_) => {
                let word = self.word()?;
                if word.is_empty() {
                    Err(self.error_at("Missing value", at))
                } else {
                    Ok(word)
                }
            }
        }
    }

    /// Dispatch on the character after `<!`. Only comments, CDATA sections
    /// and doctype declarations are legal meta structures.
    fn meta(&mut self) -> Result<Token, ParseError> {
        let at = self.checkpoint();
        match self.source.peek() {
            None => Err(self.error_at("Misshaped meta tag", at)),
            Some('-') => {
                self.source.next();
                if self.source.peek() == Some('-') {
                    self.source.next();
                    self.skip_past("-->");
                    Ok(Token::Ignored)
                } else {
                    Err(self.error_at("Misshaped meta tag", at))
                }
            }
            Some('[') => {
                self.source.next();
                let body = self.checkpoint();
                for expected in "CDATA[".chars() {
                    if self.source.next() != Some(expected) {
                        return Err(self.error_at("Expected 'CDATA['", body));
                    }
                }
                self.cdata()
            }
            Some(_) => {
                let mut keyword = String::new();
                while let Some(ch) = self.source.peek() {
                    if !ch.is_ascii_alphabetic() {
                        break;
                    }
                    self.source.next();
                    keyword.push(ch);
                }
                if keyword == "DOCTYPE" {
                    self.doctype()?;
                    Ok(Token::Ignored)
                } else {
                    Err(self.error_at("Misshaped meta tag", at))
                }
            }
        }
    }

    /// Collect the raw interior of a CDATA section; `<` `>` `&` stay literal.
    fn cdata(&mut self) -> Result<Token, ParseError> {
        let mut body = String::new();
        loop {
            match self.source.next() {
                None => return Err(self.syntax_error("Unclosed CDATA")),
                Some(ch) => {
                    body.push(ch);
                    if body.ends_with("]]>") {
                        body.truncate(body.len() - 3);
                        return Ok(Token::CData(body));
                    }
                }
            }
        }
    }

    /// Consume a doctype declaration, balancing nested angle brackets.
    /// Quoted spans protect `<` and `>` from the balance count.
    fn doctype(&mut self) -> Result<(), ParseError> {
        let mut depth = 1usize;
        while depth > 0 {
            match self.source.next() {
                None => return Err(self.syntax_error("Misshaped meta tag")),
                Some('<') => depth += 1,
                Some('>') => depth -= 1,
                Some(quote @ ('"' | '\'')) => loop {
                    match self.source.next() {
                        None => return Err(self.syntax_error("Unterminated string")),
                        Some(ch) if ch == quote => break,
                        Some(_) => {}
                    }
                },
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Consume input until the closing sequence has been read. Reaching the
    /// end of input first simply ends the scan, as for an unterminated
    /// comment or processing instruction.
    fn skip_past(&mut self, closing: &str) {
        let mut window = String::with_capacity(closing.len());
        while let Some(ch) = self.source.next() {
            window.push(ch);
            if window.len() > closing.len() {
                window.remove(0);
            }
            if window == closing {
                return;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.source.peek(), Some(ch) if ch.is_whitespace()) {
            self.source.next();
        }
    }

    fn checkpoint(&self) -> (usize, Position) {
        (self.source.offset(), self.source.position())
    }

    fn error_at(&self, what: &str, at: (usize, Position)) -> ParseError {
        if let Some(log) = self.debug.get() {
            log.report_failure(what, at.1);
        }
        ParseError::at(what, at.0, at.1)
    }

    fn syntax_error(&self, what: &str) -> ParseError {
        self.error_at(what, self.checkpoint())
    }
}
