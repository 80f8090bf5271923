use std::collections::BTreeSet;

use serde_json::Value;

/// Typed rendering of a debug server detail object: a leaf value or an ordered mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyTree {
    /// Scalar value shown as text.
    Leaf(String),
    /// Ordered key/value pairs. Arrays use their indices as keys.
    Map(Vec<(String, PropertyTree)>),
}

impl PropertyTree {
    /// Convert a JSON value, preserving key order.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Leaf("null".to_string()),
            Value::Bool(b) => Self::Leaf(b.to_string()),
            Value::Number(n) => Self::Leaf(n.to_string()),
            Value::String(s) => Self::Leaf(s.clone()),
            Value::Array(items) => Self::Map(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), Self::from_json(v)))
                    .collect(),
            ),
            Value::Object(map) => Self::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Child entries of a mapping; empty for leaves.
    pub fn entries(&self) -> &[(String, PropertyTree)] {
        match self {
            Self::Leaf(_) => &[],
            Self::Map(entries) => entries,
        }
    }

    /// Look up a direct child by key.
    pub fn get(&self, key: &str) -> Option<&PropertyTree> {
        self.entries()
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Follow a key path from this node.
    pub fn at_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&PropertyTree> {
        path.iter()
            .try_fold(self, |node, key| node.get(key.as_ref()))
    }

    /// Leaf text, if this node is a leaf.
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(s) => Some(s),
            Self::Map(_) => None,
        }
    }
}

/// A property tree with per-mapping collapse state.
#[derive(Clone, Debug)]
pub struct PropertyView {
    tree: PropertyTree,
    collapsed: BTreeSet<Vec<String>>,
}

impl PropertyView {
    /// Wrap a tree with every mapping expanded.
    pub fn new(tree: PropertyTree) -> Self {
        Self {
            tree,
            collapsed: BTreeSet::new(),
        }
    }

    /// Build directly from a JSON detail object.
    pub fn from_json(value: &Value) -> Self {
        Self::new(PropertyTree::from_json(value))
    }

    /// Underlying tree.
    pub fn tree(&self) -> &PropertyTree {
        &self.tree
    }

    /// Flip the collapse state of the mapping at `path`.
    ///
    /// Returns the new collapsed state, or `None` when `path` does not name a nested mapping.
    pub fn toggle<S: AsRef<str>>(&mut self, path: &[S]) -> Option<bool> {
        if path.is_empty() {
            return None;
        }
        match self.tree.at_path(path)? {
            PropertyTree::Leaf(_) => None,
            PropertyTree::Map(_) => {
                let key: Vec<String> = path.iter().map(|s| s.as_ref().to_string()).collect();
                if self.collapsed.remove(&key) {
                    Some(false)
                } else {
                    self.collapsed.insert(key);
                    Some(true)
                }
            }
        }
    }

    /// Whether the mapping at `path` is collapsed.
    pub fn is_collapsed<S: AsRef<str>>(&self, path: &[S]) -> bool {
        let key: Vec<String> = path.iter().map(|s| s.as_ref().to_string()).collect();
        self.collapsed.contains(&key)
    }

    /// One `key : value` line per visible entry; nested mappings are indented two spaces.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let mut path = Vec::new();
        self.render_entries(self.tree.entries(), 0, &mut path, &mut out);
        if let PropertyTree::Leaf(s) = &self.tree {
            out.push_str(s);
            out.push('\n');
        }
        out
    }

    fn render_entries(
        &self,
        entries: &[(String, PropertyTree)],
        depth: usize,
        path: &mut Vec<String>,
        out: &mut String,
    ) {
        for (key, value) in entries {
            let indent = "  ".repeat(depth);
            path.push(key.clone());
            match value {
                PropertyTree::Leaf(s) => {
                    out.push_str(&format!("{indent}{key} : {s}\n"));
                }
                PropertyTree::Map(_) if self.collapsed.contains(&*path) => {
                    out.push_str(&format!("{indent}{key} : {{…}}\n"));
                }
                PropertyTree::Map(children) => {
                    out.push_str(&format!("{indent}{key} :\n"));
                    self.render_entries(children, depth + 1, path, out);
                }
            }
            path.pop();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/inspect/props.rs"]
mod tests;
