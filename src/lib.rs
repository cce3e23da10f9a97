//! [xml-json](crate) is a bidirectional codec between XML text and JSON values.
//!
//! # Overview
//! XML and JSON do not share a data model: XML interleaves elements, attributes,
//! text and CDATA sections, while JSON has maps, arrays and primitives.
//! This crate defines one precise projection between the two.
//! The [parse] operation drives a streaming [Tokenizer] over a character [Source]
//! and folds the structural tokens into a [serde_json::Value] tree:
//! attributes and child elements become map entries, repeated child names promote
//! to arrays, and mixed text accumulates under a synthetic key
//! (`"content"` unless reconfigured).
//! The [serialize] operation is the inverse projection, flattening arrays back
//! into repeated elements and escaping text for XML.
//!
//! The projection is intentionally lossy. Comments, processing instructions,
//! doctype declarations and ordering noise are discarded, and documents with
//! mixed content or repeated element names do not round-trip back to the same
//! XML. The projection is deterministic, however: two documents that differ
//! only in ignorable syntactic noise project to the same JSON value, and a
//! documented subset of JSON values survives `parse(serialize(value))` intact.
//!
//! # Design
//!
//! The codec is split into small single-purpose pieces. A [Source] reads one
//! Unicode scalar at a time with a single pushback slot and 1-based line and
//! column tracking. The [Tokenizer] recognizes the structural [Token]s of the
//! document grammar (open, close and empty tags, text runs, CDATA sections,
//! and the ignorable meta constructs). The projection engine folds tokens into
//! the value tree while enforcing the configured nesting-depth bound, and the
//! serializer walks a value tree back out to text. Both directions consume an
//! immutable [Config], so one configuration can be shared freely.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use xml_json::{parse, serialize, Config};
//!
//! let config = Config::default();
//!
//! let value = parse(
//!     "<menu date=\"2013-02-14\"><item>Copy</item><item>Paste</item></menu>",
//!     &config,
//! )
//! .unwrap();
//! assert_eq!(
//!     value,
//!     json!({ "menu": { "date": "2013-02-14", "item": ["Copy", "Paste"] } })
//! );
//!
//! let xml = serialize(&value, None, &config);
//! assert_eq!(
//!     xml,
//!     "<menu><date>2013-02-14</date><item>Copy</item><item>Paste</item></menu>"
//! );
//! ```
//!
//! Attribute values and element text run through a primitive coercer unless
//! [keep_strings](Config::with_keep_strings) is set: `"true"`, `"false"` and
//! `"null"` (case-insensitively) become the matching JSON primitives, canonical
//! integers promote to the smallest exact representation, and finite doubles
//! parse as numbers. Everything else stays a string, including padded literals
//! like `"01"`.
//!
//! # License
//! [xml-json](crate) is provided under the MIT license.

mod coercion;
mod config;
mod entity;
mod error;
mod escaping;
mod logger;
mod parsing;
mod serialization;
mod source;
mod tokenization;
mod tree;

#[cfg(test)]
mod __tests__;

use once_cell::unsync::OnceCell;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::str::Chars;

/// Parse an XML document into a JSON value.
///
/// The result is a map, typically with one key per root element name; an empty
/// input yields an empty map. Standalone CDATA sections outside any element
/// accumulate under the configured synthetic text key.
pub fn parse(text: &str, config: &Config) -> Result<Value, ParseError> {
    parsing::project_document(text, config)
}

/// Serialize a JSON value as XML text.
///
/// `root` names the wrapping tag; with `None`, a map spills its entries at the
/// top level and a scalar is emitted as a quoted literal.
pub fn serialize(value: &Value, root: Option<&str>, config: &Config) -> String {
    serialization::write_document(value, root, config, 0)
}

/// Serialize a JSON value as XML text starting at an existing indentation
/// depth, for embedding the output inside an already-indented document.
pub fn serialize_indented(
    value: &Value,
    root: Option<&str>,
    config: &Config,
    indent: usize,
) -> String {
    serialization::write_document(value, root, config, indent)
}

/// Escape text for inclusion in XML content: the five predefined entities plus
/// numeric references for every C0/C1 control character.
pub fn escape(text: &str) -> String {
    escaping::escape_text(text)
}

/// Replace XML character references with the characters they name.
///
/// Recognizes the five predefined entities (lowercase only) and decimal or
/// hexadecimal numeric references; any other reference is preserved verbatim,
/// ampersand and semicolon included.
pub fn unescape(text: &str) -> String {
    entity::unescape_text(text)
}

/// The converter applied to an element's text when its `xsi:type` attribute
/// names a registered type.
pub type XsiConverter = Rc<dyn Fn(&str) -> Value>;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
/// The line and column information at a code point.
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// A snapshot of the reading cursor, kept so one scalar can be pushed back.
#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    ch: char,
    width: usize,
    offset: usize,
    line: usize,
    column: usize,
}

/// A pull-based reader of Unicode scalars with position tracking.
///
/// The source counts each scalar as one offset unit regardless of its UTF-8
/// width, tracks the 1-based line and column of the next unread scalar, folds
/// `\r\n` and lone `\r` into `\n`, and supports pushback of exactly one
/// previously returned scalar via [back](Source::back).
pub struct Source<'c> {
    pub value: &'c str,
    chars: Chars<'c>,
    offset: usize,
    line: usize,
    column: usize,
    replay: Option<(char, usize)>,
    consumed: Option<Checkpoint>,
}

#[derive(Debug, Clone, PartialEq)]
/// A structural token produced by the [Tokenizer].
pub enum Token {
    /// `<name attr="value" …>`; attribute values are entity-decoded.
    StartElement {
        name: String,
        attributes: Vec<(String, String)>,
    },
    /// `</name>`.
    EndElement { name: String },
    /// `<name …/>`.
    EmptyElement {
        name: String,
        attributes: Vec<(String, String)>,
    },
    /// A run of character data, entity-decoded and trimmed; never empty.
    Text(String),
    /// The raw interior of a `<![CDATA[…]]>` section; may be empty.
    CData(String),
    /// A consumed comment, processing instruction or doctype declaration.
    Ignored,
    Eof,
}

/// Where the tokenizer resumes on its next pull.
#[derive(Debug, Clone, Copy)]
enum ScanState {
    /// Looking at character data or the start of markup.
    Content,
    /// One past the `<` of a structure.
    Tag,
    /// The source is exhausted.
    End,
}

/// A streaming tokenizer for the XML-like document grammar.
///
/// Pull tokens with [next_token](Tokenizer::next_token); the tokenizer holds
/// exclusive use of its [Source] for the duration of one document.
pub struct Tokenizer<'c> {
    source: Source<'c>,
    state: ScanState,
    debug: OnceCell<Log<&'static str>>,
}

#[derive(Debug)]
/// An error returned when the input text is not a well-formed document.
///
/// `pointer` is the scalar offset the error was raised at and `message` carries
/// the full positioned description, e.g.
/// `Misshaped tag at 5 [character 6 line 1]`.
pub struct ParseError {
    pub pointer: usize,
    pub message: String,
}

#[derive(Debug)]
/// An error returned due to failed validation of configuration values.
pub struct ArgumentError {
    message: String,
    what: String,
}

#[derive(Clone)]
/// The immutable options record consumed by both codec directions.
///
/// Build one with wither-style methods and share it freely; every option keeps
/// the conservative default documented on its method.
pub struct Config {
    keep_strings: bool,
    cdata_tag_name: String,
    convert_nil_to_null: bool,
    xsi_type_map: HashMap<String, XsiConverter>,
    force_list: HashSet<String>,
    max_nesting_depth: Option<usize>,
    close_empty_tag: bool,
    indent_factor: usize,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("keep_strings", &self.keep_strings)
            .field("cdata_tag_name", &self.cdata_tag_name)
            .field("convert_nil_to_null", &self.convert_nil_to_null)
            .field("xsi_type_map", &self.xsi_type_map.keys().collect::<Vec<_>>())
            .field("force_list", &self.force_list)
            .field("max_nesting_depth", &self.max_nesting_depth)
            .field("close_empty_tag", &self.close_empty_tag)
            .field("indent_factor", &self.indent_factor)
            .finish()
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Debug reporting for the tokenizer, assigned once via
/// [set_log](Tokenizer::set_log); the label prefixes every report.
pub enum Log<T> {
    /// Nothing is reported.
    None,
    /// Report tokenization failures only.
    Failures(T),
    /// Report every emitted token as well as failures.
    Tokens(T),
}

#[derive(Clone)]
/// A borrowing adapter that renders a projected JSON value as a tree, for
/// diagnosing projection results.
pub struct ValueTree<'v> {
    label: String,
    value: &'v Value,
}
