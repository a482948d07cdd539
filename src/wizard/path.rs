//! Dot-path expansion between the flat edit buffer and the nested record
//! shape. Editing always works on flat keys; expansion happens once, at
//! commit.

use std::collections::BTreeMap;

use super::buffer::{EditBuffer, FieldValue};

pub const PATH_SEPARATOR: char = '.';

/// Tagged node of the expanded record tree.
#[derive(Debug, Clone, PartialEq)]
pub enum PathNode {
    Leaf(FieldValue),
    Branch(BTreeMap<String, PathNode>),
}

/// Splits every key containing the separator into nested levels and merges
/// the result, last write per leaf winning. Keys without a separator become
/// top-level leaves.
pub fn expand(buffer: &EditBuffer) -> BTreeMap<String, PathNode> {
    let mut root = BTreeMap::new();
    for (key, value) in buffer.iter() {
        insert_path(&mut root, key, value.clone());
    }
    root
}

/// Inverse of [`expand`]: collapses a node tree back into flat dot-path keys.
pub fn flatten(nodes: &BTreeMap<String, PathNode>) -> EditBuffer {
    let mut entries = BTreeMap::new();
    flatten_into(&mut entries, "", nodes);
    EditBuffer::from(entries)
}

/// Child map of the branch stored at `key`, if any.
pub fn branch<'a>(
    nodes: &'a BTreeMap<String, PathNode>,
    key: &str,
) -> Option<&'a BTreeMap<String, PathNode>> {
    match nodes.get(key) {
        Some(PathNode::Branch(children)) => Some(children),
        _ => None,
    }
}

/// Leaf value stored at `key`, if any.
pub fn leaf<'a>(nodes: &'a BTreeMap<String, PathNode>, key: &str) -> Option<&'a FieldValue> {
    match nodes.get(key) {
        Some(PathNode::Leaf(value)) => Some(value),
        _ => None,
    }
}

fn insert_path(nodes: &mut BTreeMap<String, PathNode>, path: &str, value: FieldValue) {
    match path.split_once(PATH_SEPARATOR) {
        None => {
            nodes.insert(path.to_string(), PathNode::Leaf(value));
        }
        Some((head, rest)) => {
            let node = nodes
                .entry(head.to_string())
                .or_insert_with(|| PathNode::Branch(BTreeMap::new()));
            // A dotted path claims the slot even when an earlier plain key
            // left a leaf there.
            if matches!(node, PathNode::Leaf(_)) {
                *node = PathNode::Branch(BTreeMap::new());
            }
            if let PathNode::Branch(children) = node {
                insert_path(children, rest, value);
            }
        }
    }
}

fn flatten_into(
    entries: &mut BTreeMap<String, FieldValue>,
    prefix: &str,
    nodes: &BTreeMap<String, PathNode>,
) {
    for (key, node) in nodes {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}{PATH_SEPARATOR}{key}")
        };
        match node {
            PathNode::Leaf(value) => {
                entries.insert(path, value.clone());
            }
            PathNode::Branch(children) => flatten_into(entries, &path, children),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_buffer() -> EditBuffer {
        EditBuffer::new()
            .with_value("name", FieldValue::text("Casa Azul"))
            .with_value("surface", FieldValue::Number(85.0))
            .with_value("furnished", FieldValue::Flag(true))
            .with_value("keys.total", FieldValue::Number(6.0))
            .with_value("keys.available", FieldValue::Number(4.0))
            .with_value("keys.lockSystem", FieldValue::text("smart lock"))
            .with_value(
                "keys.keyImages",
                FieldValue::list(["preview://a", "preview://b"]),
            )
    }

    #[test]
    fn expand_nests_dotted_keys_under_one_branch() {
        let tree = expand(&sample_buffer());

        let keys = branch(&tree, "keys").expect("keys branch");
        assert_eq!(keys.len(), 4);
        assert_eq!(
            leaf(keys, "total").and_then(FieldValue::as_number),
            Some(6.0)
        );
        assert_eq!(
            leaf(&tree, "name").and_then(|v| v.as_text()),
            Some("Casa Azul")
        );
    }

    #[test]
    fn flatten_after_expand_is_identity() {
        let buffer = sample_buffer();
        let round_tripped = flatten(&expand(&buffer));
        assert_eq!(round_tripped, buffer);
    }

    #[test]
    fn dotted_key_replaces_plain_leaf_at_same_slot() {
        let buffer = EditBuffer::new()
            .with_value("keys", FieldValue::text("stale"))
            .with_value("keys.total", FieldValue::Number(2.0));
        let tree = expand(&buffer);

        let keys = branch(&tree, "keys").expect("keys becomes a branch");
        assert_eq!(
            leaf(keys, "total").and_then(FieldValue::as_number),
            Some(2.0)
        );
    }

    #[test]
    fn keys_without_separator_stay_top_level() {
        let buffer = EditBuffer::new().with_value("door", FieldValue::text("3B"));
        let tree = expand(&buffer);
        assert_eq!(leaf(&tree, "door").and_then(|v| v.as_text()), Some("3B"));
        assert!(branch(&tree, "door").is_none());
    }
}
