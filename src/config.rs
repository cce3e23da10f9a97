use crate::{ArgumentError, Config, XsiConverter};
use std::collections::{HashMap, HashSet};

impl Default for Config {
    fn default() -> Self {
        Self {
            keep_strings: false,
            cdata_tag_name: String::from("content"),
            convert_nil_to_null: false,
            xsi_type_map: HashMap::new(),
            force_list: HashSet::new(),
            max_nesting_depth: Some(512),
            close_empty_tag: false,
            indent_factor: 0,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable primitive coercion so every leaf stays a string.
    /// Defaults to `false`.
    pub fn with_keep_strings(mut self, keep_strings: bool) -> Self {
        self.keep_strings = keep_strings;
        self
    }

    /// Rename the synthetic key used for mixed text and standalone CDATA
    /// accumulation. Defaults to `"content"`; the name must not be empty.
    pub fn with_cdata_tag_name<S: Into<String>>(mut self, name: S) -> Result<Self, ArgumentError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ArgumentError::invalid_option(
                "cdata_tag_name",
                "the synthetic text key must not be empty",
            ));
        }
        self.cdata_tag_name = name;
        Ok(self)
    }

    /// Project an element carrying `xsi:nil="true"` as JSON null and drop the
    /// attribute. Defaults to `false`.
    pub fn with_convert_nil_to_null(mut self, convert_nil_to_null: bool) -> Self {
        self.convert_nil_to_null = convert_nil_to_null;
        self
    }

    /// Register converters for recognized `xsi:type` values. The map is copied
    /// on construction; the view returned by
    /// [xsi_type_map](Config::xsi_type_map) is read only.
    pub fn with_xsi_type_map(mut self, map: &HashMap<String, XsiConverter>) -> Self {
        self.xsi_type_map = map.clone();
        self
    }

    /// Element names which always project as arrays, even when they occur
    /// once. Defaults to the empty set.
    pub fn with_force_list<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.force_list = names.into_iter().map(|name| name.into()).collect();
        self
    }

    /// Bound the number of simultaneously open element frames during
    /// projection. Defaults to 512.
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = Some(depth);
        self
    }

    /// Remove the nesting-depth bound entirely.
    pub fn without_nesting_depth_limit(mut self) -> Self {
        self.max_nesting_depth = None;
        self
    }

    /// Serialize empty string children as `<t></t>` instead of `<t/>`.
    /// Defaults to `false`.
    pub fn with_close_empty_tag(mut self, close_empty_tag: bool) -> Self {
        self.close_empty_tag = close_empty_tag;
        self
    }

    /// Spaces added per nesting level during serialization; 0 keeps the
    /// output on one line with no trailing newlines. Defaults to 0.
    pub fn with_indent_factor(mut self, indent_factor: usize) -> Self {
        self.indent_factor = indent_factor;
        self
    }

    pub fn keep_strings(&self) -> bool {
        self.keep_strings
    }

    pub fn cdata_tag_name(&self) -> &str {
        &self.cdata_tag_name
    }

    pub fn convert_nil_to_null(&self) -> bool {
        self.convert_nil_to_null
    }

    pub fn xsi_type_map(&self) -> &HashMap<String, XsiConverter> {
        &self.xsi_type_map
    }

    pub fn force_list(&self) -> &HashSet<String> {
        &self.force_list
    }

    pub fn max_nesting_depth(&self) -> Option<usize> {
        self.max_nesting_depth
    }

    pub fn close_empty_tag(&self) -> bool {
        self.close_empty_tag
    }

    pub fn indent_factor(&self) -> usize {
        self.indent_factor
    }
}
