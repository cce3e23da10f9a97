use crate::{escaping, Config};
use serde_json::Value;

/// Write a value as XML text. `tag` wraps the whole value when present;
/// `indent` is the starting indentation width in spaces.
pub(crate) fn write_document(
    value: &Value,
    tag: Option<&str>,
    config: &Config,
    indent: usize,
) -> String {
    let mut out = String::new();
    write_value(&mut out, value, tag, config, indent);
    out
}

fn write_value(out: &mut String, value: &Value, tag: Option<&str>, config: &Config, indent: usize) {
    match value {
        Value::Object(map) => {
            let mut body_indent = indent;
            if let Some(tag) = tag {
                pad(out, indent);
                out.push('<');
                out.push_str(tag);
                out.push('>');
                if config.indent_factor() > 0 {
                    out.push('\n');
                    body_indent += config.indent_factor();
                }
            }
            for (key, child) in map {
                if key.as_str() == config.cdata_tag_name() {
                    // Accumulated text is emitted raw in the element body,
                    // array entries joined by newlines.
                    match child {
                        Value::Array(items) => {
                            for (index, item) in items.iter().enumerate() {
                                if index > 0 {
                                    out.push('\n');
                                }
                                out.push_str(&escaping::escape_text(&scalar_text(item)));
                            }
                        }
                        item => out.push_str(&escaping::escape_text(&scalar_text(item))),
                    }
                } else if let Value::Array(items) = child {
                    for item in items {
                        if let Value::Array(_) = item {
                            // XML has no anonymous sequence; the nested array
                            // keeps its structure under a synthetic wrapper.
                            out.push('<');
                            out.push_str(key);
                            out.push('>');
                            write_value(out, item, None, config, body_indent);
                            out.push_str("</");
                            out.push_str(key);
                            out.push('>');
                        } else {
                            write_value(out, item, Some(key.as_str()), config, body_indent);
                        }
                    }
                } else if is_empty_text(child) {
                    pad(out, body_indent);
                    write_empty_tag(out, key, config);
                    if config.indent_factor() > 0 {
                        out.push('\n');
                    }
                } else {
                    write_value(out, child, Some(key.as_str()), config, body_indent);
                }
            }
            if let Some(tag) = tag {
                pad(out, indent);
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
                if config.indent_factor() > 0 {
                    out.push('\n');
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                write_value(out, item, Some(tag.unwrap_or("array")), config, indent);
            }
        }
        scalar => {
            let text = escaping::escape_text(&scalar_text(scalar));
            pad(out, indent);
            match tag {
                None => {
                    out.push('"');
                    out.push_str(&text);
                    out.push('"');
                }
                Some(tag) if text.is_empty() => write_empty_tag(out, tag, config),
                Some(tag) => {
                    out.push('<');
                    out.push_str(tag);
                    out.push('>');
                    out.push_str(&text);
                    out.push_str("</");
                    out.push_str(tag);
                    out.push('>');
                }
            }
            if config.indent_factor() > 0 {
                out.push('\n');
            }
        }
    }
}

fn write_empty_tag(out: &mut String, tag: &str, config: &Config) {
    if config.close_empty_tag() {
        out.push('<');
        out.push_str(tag);
        out.push_str("></");
        out.push_str(tag);
        out.push('>');
    } else {
        out.push('<');
        out.push_str(tag);
        out.push_str("/>");
    }
}

/// The body text of a scalar. Containers only reach this under the synthetic
/// text key, where they are emitted as their compact JSON form.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        container => container.to_string(),
    }
}

fn is_empty_text(value: &Value) -> bool {
    matches!(value, Value::String(text) if text.is_empty())
}

fn pad(out: &mut String, width: usize) {
    for _ in 0..width {
        out.push(' ');
    }
}
