//! Collection of marker-bearing materials from the material pool

use crate::aliases::{lookup_array, MARKER_LISTS};
use serde_json::Value;
use std::collections::HashMap;

/// Materials that carry a marker list, keyed by material id.
///
/// Iteration follows the order in which ids were first seen. A later object
/// with an already seen id replaces the earlier one in place.
#[derive(Debug, Default)]
pub struct MaterialPool<'a> {
    entries: Vec<(&'a str, &'a Value)>,
    index: HashMap<&'a str, usize>,
}

impl<'a> MaterialPool<'a> {
    /// Inserts or replaces a material
    pub fn insert(&mut self, id: &'a str, material: &'a Value) {
        match self.index.get(id) {
            Some(&slot) => self.entries[slot].1 = material,
            None => {
                self.index.insert(id, self.entries.len());
                self.entries.push((id, material));
            }
        }
    }

    /// Gets a material by id
    pub fn get(&self, id: &str) -> Option<&'a Value> {
        self.index.get(id).map(|&slot| self.entries[slot].1)
    }

    /// Iterates over `(id, material)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Walks an arbitrarily nested subtree and gathers every object that has a
/// non-empty string `id` and a marker list under one of the known aliases.
///
/// The walk uses an explicit stack and visits nodes in depth-first pre-order,
/// so deeply nested input cannot exhaust the call stack.
pub fn collect_materials(subtree: &Value) -> MaterialPool<'_> {
    let mut pool = MaterialPool::default();
    let mut stack = vec![subtree];

    while let Some(node) = stack.pop() {
        match node {
            Value::Object(object) => {
                if let Some(id) = object.get("id").and_then(Value::as_str) {
                    if !id.is_empty() && lookup_array(node, MARKER_LISTS).is_some() {
                        pool.insert(id, node);
                    }
                }
                stack.extend(object.values().rev());
            }
            Value::Array(items) => stack.extend(items.iter().rev()),
            _ => {}
        }
    }

    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collects_nested_materials() {
        let materials = json!({
            "videos": [
                { "id": "v1", "mark_items": [{ "title": "a" }] },
                { "id": "v2" }
            ],
            "audios": {
                "deep": [[{ "id": "a1", "time_marks": [{ "title": "b" }] }]]
            },
            "count": 3
        });

        let pool = collect_materials(&materials);

        assert_eq!(pool.len(), 2);
        assert!(pool.get("v1").is_some());
        assert!(pool.get("a1").is_some());
        assert!(pool.get("v2").is_none());
    }

    #[test]
    fn test_requires_non_empty_id() {
        let materials = json!([
            { "id": "", "mark_items": [{}] },
            { "mark_items": [{}] },
            { "id": 7, "mark_items": [{}] }
        ]);

        assert!(collect_materials(&materials).is_empty());
    }

    #[test]
    fn test_requires_list_under_alias() {
        let materials = json!([
            { "id": "x", "mark_items": {} },
            { "id": "y", "markItems": "nope" },
            { "id": "z", "mark_items": [] }
        ]);

        assert!(collect_materials(&materials).is_empty());
    }

    #[test]
    fn test_duplicate_id_keeps_first_position() {
        let materials = json!([
            { "id": "a", "mark_items": [1] },
            { "id": "b", "mark_items": [2] },
            { "id": "a", "mark_items": [3] }
        ]);

        let pool = collect_materials(&materials);
        let order: Vec<_> = pool.iter().map(|(id, _)| id).collect();

        assert_eq!(order, vec!["a", "b"]);
        assert_eq!(pool.get("a").unwrap()["mark_items"], json!([3]));
    }

    #[test]
    fn test_pre_order_traversal() {
        let materials = json!([
            { "id": "outer", "mark_items": [1], "children": [{ "id": "inner", "mark_items": [2] }] },
            { "id": "last", "mark_items": [3] }
        ]);

        let pool = collect_materials(&materials);
        let order: Vec<_> = pool.iter().map(|(id, _)| id).collect();

        assert_eq!(order, vec!["outer", "inner", "last"]);
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let mut value = json!({ "id": "bottom", "mark_items": [1] });
        for _ in 0..5_000 {
            value = json!([value]);
        }

        let pool = collect_materials(&value);
        assert_eq!(pool.len(), 1);

        // Dropping a deeply nested Value recurses; unwind it iteratively.
        let mut current = value;
        while let Value::Array(mut items) = current {
            current = items.pop().unwrap_or(Value::Null);
        }
    }
}
