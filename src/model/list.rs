use serde::{Deserialize, Serialize};

use super::item::TodoItem;

/// Name given to lists created without one.
pub const DEFAULT_LIST_NAME: &str = "Untitled List";

/// A named, ordered outline of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: String,
    pub name: String,
    /// Items in outline order
    #[serde(rename = "todos", alias = "items", default)]
    pub items: Vec<TodoItem>,
}

impl TodoList {
    pub fn new(id: String, name: impl Into<String>) -> Self {
        TodoList {
            id,
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Index of the item with this exact id
    pub fn position(&self, item_id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == item_id)
    }

    pub fn item(&self, item_id: &str) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut TodoItem> {
        self.items.iter_mut().find(|item| item.id == item_id)
    }

    /// Resolve a user-typed item reference: an exact id, or a prefix that matches
    /// exactly one item id.
    pub fn resolve_item(&self, query: &str) -> Option<&TodoItem> {
        if let Some(item) = self.item(query) {
            return Some(item);
        }
        if query.is_empty() {
            return None;
        }
        let mut matches = self.items.iter().filter(|item| item.id.starts_with(query));
        let first = matches.next()?;
        if matches.next().is_some() {
            return None;
        }
        Some(first)
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }

    /// Outline parent of every item, by index.
    ///
    /// An item's parent is the nearest preceding item with a smaller level. Items
    /// indented more than one step past their predecessor still resolve to that
    /// nearest shallower item; items with no shallower predecessor have no parent.
    pub fn outline_parents(&self) -> Vec<Option<usize>> {
        let mut parents = Vec::with_capacity(self.items.len());
        // Stack of (level, index) for the current ancestor chain
        let mut chain: Vec<(usize, usize)> = Vec::new();
        for (idx, item) in self.items.iter().enumerate() {
            while chain.last().is_some_and(|&(level, _)| level >= item.level) {
                chain.pop();
            }
            parents.push(chain.last().map(|&(_, parent_idx)| parent_idx));
            chain.push((item.level, idx));
        }
        parents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(id: &str, level: usize) -> TodoItem {
        let mut item = TodoItem::blank(id.into(), level);
        item.title = id.to_uppercase();
        item.is_empty = false;
        item
    }

    fn make_list(levels: &[(&str, usize)]) -> TodoList {
        let mut list = TodoList::new("L1".into(), "Test");
        list.items = levels.iter().map(|(id, lvl)| item(id, *lvl)).collect();
        list
    }

    #[test]
    fn outline_parents_follow_levels() {
        let list = make_list(&[("a", 0), ("b", 1), ("c", 2), ("d", 1), ("e", 0)]);
        assert_eq!(
            list.outline_parents(),
            vec![None, Some(0), Some(1), Some(0), None]
        );
    }

    #[test]
    fn outline_parents_tolerate_level_jumps() {
        // "b" sits three levels below "a" with nothing in between
        let list = make_list(&[("a", 0), ("b", 3), ("c", 1)]);
        assert_eq!(list.outline_parents(), vec![None, Some(0), Some(0)]);

        // Leading indented item has no parent
        let list = make_list(&[("x", 2), ("y", 0)]);
        assert_eq!(list.outline_parents(), vec![None, None]);
    }

    #[test]
    fn resolve_item_by_exact_id_or_unique_prefix() {
        let list = make_list(&[("abc1", 0), ("abd2", 0), ("xyz", 0)]);
        assert_eq!(list.resolve_item("abc1").map(|i| i.id.as_str()), Some("abc1"));
        assert_eq!(list.resolve_item("x").map(|i| i.id.as_str()), Some("xyz"));
        // Ambiguous
        assert!(list.resolve_item("ab").is_none());
        assert!(list.resolve_item("").is_none());
        assert!(list.resolve_item("nope").is_none());
    }

    #[test]
    fn items_serialize_under_todos_and_read_from_either_key() {
        let list = make_list(&[("a", 0)]);
        let json = serde_json::to_value(&list).unwrap();
        assert!(json.get("todos").is_some());
        assert!(json.get("items").is_none());

        let from_items: TodoList =
            serde_json::from_str(r#"{"id":"L","name":"N","items":[{"id":"q"}]}"#).unwrap();
        assert_eq!(from_items.items.len(), 1);

        let missing: TodoList = serde_json::from_str(r#"{"id":"L","name":"N"}"#).unwrap();
        assert!(missing.items.is_empty());
    }
}
