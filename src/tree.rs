use crate::ValueTree;
use ptree::TreeItem;
use serde_json::Value;
use std::borrow::Cow;

impl<'v> ValueTree<'v> {
    pub fn new(value: &'v Value) -> Self {
        ValueTree {
            label: String::from("$"),
            value,
        }
    }

    fn labeled(label: String, value: &'v Value) -> Self {
        ValueTree { label, value }
    }

    /// Render the value as a tree on standard output.
    pub fn print(&self) -> Result<(), std::io::Error> {
        ptree::print_tree(self)
    }
}

impl<'v> TreeItem for ValueTree<'v> {
    type Child = Self;

    fn write_self<W: std::io::Write>(&self, f: &mut W, _: &ptree::Style) -> std::io::Result<()> {
        match self.value {
            Value::Object(_) => write!(f, "{}", self.label),
            Value::Array(_) => write!(f, "{} []", self.label),
            leaf => write!(f, "{} # {}", self.label, leaf),
        }
    }

    fn children(&self) -> Cow<[Self::Child]> {
        match self.value {
            Value::Object(map) => Cow::from(
                map.iter()
                    .map(|(key, value)| ValueTree::labeled(key.clone(), value))
                    .collect::<Vec<_>>(),
            ),
            Value::Array(items) => Cow::from(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, value)| ValueTree::labeled(index.to_string(), value))
                    .collect::<Vec<_>>(),
            ),
            _ => Cow::from(Vec::new()),
        }
    }
}
