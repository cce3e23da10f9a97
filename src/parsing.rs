use crate::{coercion, Config, ParseError, Token, Tokenizer, XsiConverter};
use serde_json::{Map, Value};

/// Per-element state held while the element is open. The root frame is
/// synthetic and has no tag name.
struct Frame {
    name: Option<String>,
    object: Map<String, Value>,
    text: Vec<Value>,
    nil: bool,
    converter: Option<XsiConverter>,
}

impl Frame {
    fn root() -> Self {
        Frame {
            name: None,
            object: Map::new(),
            text: Vec::new(),
            nil: false,
            converter: None,
        }
    }

    fn open(name: String, attributes: Vec<(String, String)>, config: &Config) -> Self {
        let mut frame = Frame {
            name: Some(name),
            object: Map::new(),
            text: Vec::new(),
            nil: false,
            converter: None,
        };
        for (key, value) in attributes {
            if config.convert_nil_to_null() && key == "xsi:nil" && value == "true" {
                frame.nil = true;
                continue;
            }
            if key == "xsi:type" {
                if let Some(converter) = config.xsi_type_map().get(&value) {
                    frame.converter = Some(converter.clone());
                    continue;
                }
            }
            let staged = if config.keep_strings() {
                Value::String(value)
            } else {
                coercion::coerce(&value)
            };
            merge(&mut frame.object, &key, staged, false);
        }
        frame
    }

    /// Stage one run of element text. CDATA goes through
    /// [stage_cdata](Frame::stage_cdata) instead and is never coerced or
    /// converted.
    fn stage_text(&mut self, text: String, config: &Config) {
        let staged = match &self.converter {
            Some(converter) => converter(&text),
            None if config.keep_strings() => Value::String(text),
            None => coercion::coerce(&text),
        };
        self.text.push(staged);
    }

    fn stage_cdata(&mut self, data: String) {
        self.text.push(Value::String(data));
    }

    /// Compute the element's projected value. Staged text folds into the
    /// object under the synthetic key, and an object left holding nothing but
    /// that key collapses to the accumulated value.
    fn close(self, config: &Config) -> Value {
        if self.nil {
            return Value::Null;
        }
        let mut object = self.object;
        for segment in self.text {
            merge(&mut object, config.cdata_tag_name(), segment, false);
        }
        if object.is_empty() {
            return Value::String(String::new());
        }
        if object.len() == 1 {
            if let Some(lone) = object.shift_remove(config.cdata_tag_name()) {
                return lone;
            }
        }
        Value::Object(object)
    }
}

/// Fold a value into an emerging object the way repeated names project: the
/// first occurrence inserts, later occurrences promote to an array.
fn merge(object: &mut Map<String, Value>, key: &str, value: Value, force_list: bool) {
    match object.get_mut(key) {
        None => {
            if force_list {
                object.insert(key.to_owned(), Value::Array(vec![value]));
            } else {
                object.insert(key.to_owned(), value);
            }
        }
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let previous = existing.take();
            *existing = Value::Array(vec![previous, value]);
        }
    }
}

/// Close the top frame and merge its value into its parent.
fn settle_top(stack: &mut Vec<Frame>, config: &Config) {
    if let Some(frame) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            settle(frame, parent, config);
        }
    }
}

fn settle(frame: Frame, parent: &mut Frame, config: &Config) {
    let name = match frame.name.clone() {
        Some(name) => name,
        None => return,
    };
    let force_list = config.force_list().contains(&name);
    let value = frame.close(config);
    merge(&mut parent.object, &name, value, force_list);
}

fn guard_depth(stack: &[Frame], config: &Config, tokenizer: &Tokenizer) -> Result<(), ParseError> {
    if let Some(limit) = config.max_nesting_depth() {
        // The root frame is synthetic; stack.len() - 1 element frames are
        // open, and one more is about to be.
        if stack.len() > limit {
            return Err(ParseError::depth_exceeded(limit, tokenizer.offset()));
        }
    }
    Ok(())
}

/// Drive the tokenizer over one document and build the projected value.
pub(crate) fn project_document(text: &str, config: &Config) -> Result<Value, ParseError> {
    let mut tokenizer = Tokenizer::new(text);
    let mut stack: Vec<Frame> = vec![Frame::root()];
    loop {
        match tokenizer.next_token()? {
            Token::Eof => break,
            Token::Ignored => {}
            Token::StartElement { name, attributes } => {
                guard_depth(&stack, config, &tokenizer)?;
                stack.push(Frame::open(name, attributes, config));
            }
            Token::EmptyElement { name, attributes } => {
                guard_depth(&stack, config, &tokenizer)?;
                let frame = Frame::open(name, attributes, config);
                if let Some(parent) = stack.last_mut() {
                    settle(frame, parent, config);
                }
            }
            Token::EndElement { name } => {
                match stack.last().and_then(|frame| frame.name.as_deref()) {
                    None => {
                        return Err(ParseError::at(
                            &format!("Mismatched close tag {}", name),
                            tokenizer.offset(),
                            tokenizer.position(),
                        ));
                    }
                    Some(open) if open != name => {
                        return Err(ParseError::at(
                            &format!("Mismatched {} and {}", open, name),
                            tokenizer.offset(),
                            tokenizer.position(),
                        ));
                    }
                    Some(_) => {}
                }
                settle_top(&mut stack, config);
            }
            Token::Text(text) => {
                if stack.len() > 1 {
                    if let Some(frame) = stack.last_mut() {
                        frame.stage_text(text, config);
                    }
                }
                // Loose text between root elements is markup noise; drop it.
            }
            Token::CData(data) => {
                if stack.len() > 1 {
                    if let Some(frame) = stack.last_mut() {
                        frame.stage_cdata(data);
                    }
                } else if let Some(root) = stack.first_mut() {
                    merge(&mut root.object, config.cdata_tag_name(), Value::String(data), false);
                }
            }
        }
    }
    if let Some(open) = stack.last().and_then(|frame| frame.name.as_deref()) {
        return Err(ParseError::at(
            &format!("Unclosed tag {}", open),
            tokenizer.offset(),
            tokenizer.position(),
        ));
    }
    let object = match stack.pop() {
        Some(root) => root.object,
        None => Map::new(),
    };
    Ok(Value::Object(object))
}
