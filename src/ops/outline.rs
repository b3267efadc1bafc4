use log::{debug, info};
use uuid::Uuid;

use crate::model::item::{ItemPatch, TodoItem};
use crate::model::list::{DEFAULT_LIST_NAME, TodoList};

/// Direction for [`Outline::change_level`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelChange {
    /// One level deeper
    Indent,
    /// One level shallower, never below 0
    Outdent,
}

/// The in-memory collection of lists plus the active-list selection.
///
/// Every item operation targets the active list. A missing list or item id is
/// never an error: the operation leaves the outline untouched and reports that
/// nothing changed (`false` / `None`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline {
    lists: Vec<TodoList>,
    active_list_id: Option<String>,
    default_name: String,
}

impl Default for Outline {
    fn default() -> Self {
        Outline::new(Vec::new(), None)
    }
}

impl Outline {
    pub fn new(lists: Vec<TodoList>, active_list_id: Option<String>) -> Self {
        Outline {
            lists,
            active_list_id,
            default_name: DEFAULT_LIST_NAME.to_string(),
        }
    }

    /// Override the name given to lists from [`Outline::create_list`].
    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        self.default_name = name.into();
        self
    }

    pub fn lists(&self) -> &[TodoList] {
        &self.lists
    }

    pub fn active_list_id(&self) -> Option<&str> {
        self.active_list_id.as_deref()
    }

    /// The active list, if the selection points at a list that exists
    pub fn active_list(&self) -> Option<&TodoList> {
        let id = self.active_list_id.as_deref()?;
        self.lists.iter().find(|list| list.id == id)
    }

    fn active_list_mut(&mut self) -> Option<&mut TodoList> {
        let id = self.active_list_id.as_deref()?;
        self.lists.iter_mut().find(|list| list.id == id)
    }

    pub fn list(&self, list_id: &str) -> Option<&TodoList> {
        self.lists.iter().find(|list| list.id == list_id)
    }

    /// Resolve a user-typed list reference: exact id, then a unique id prefix,
    /// then an exact name.
    pub fn find_list(&self, query: &str) -> Option<&TodoList> {
        if let Some(list) = self.list(query) {
            return Some(list);
        }
        if !query.is_empty() {
            let mut by_prefix = self.lists.iter().filter(|l| l.id.starts_with(query));
            if let Some(first) = by_prefix.next()
                && by_prefix.next().is_none()
            {
                return Some(first);
            }
        }
        self.lists.iter().find(|list| list.name == query)
    }

    /// Consume the outline, returning the stored parts.
    pub fn into_parts(self) -> (Vec<TodoList>, Option<String>) {
        (self.lists, self.active_list_id)
    }

    // -----------------------------------------------------------------------
    // List operations
    // -----------------------------------------------------------------------

    /// Append an empty list with the default name and make it active.
    /// Returns the new list id.
    pub fn create_list(&mut self) -> String {
        let id = self.fresh_id();
        self.lists
            .push(TodoList::new(id.clone(), self.default_name.clone()));
        self.active_list_id = Some(id.clone());
        info!("event=list_create list_id={}", id);
        id
    }

    /// Rename the active list. Returns false when no list is active.
    pub fn rename_active_list(&mut self, new_name: &str) -> bool {
        match self.active_list_mut() {
            Some(list) => {
                list.name = new_name.to_string();
                debug!("event=list_rename list_id={}", list.id);
                true
            }
            None => {
                debug!("event=list_rename status=miss");
                false
            }
        }
    }

    /// Make `list_id` the active list. An unknown id clears the selection so the
    /// outline never points at a list that does not exist; returns whether the
    /// id was found.
    pub fn select_list(&mut self, list_id: &str) -> bool {
        if self.list(list_id).is_some() {
            self.active_list_id = Some(list_id.to_string());
            debug!("event=list_select list_id={}", list_id);
            true
        } else {
            self.active_list_id = None;
            debug!("event=list_select status=miss list_id={}", list_id);
            false
        }
    }

    // -----------------------------------------------------------------------
    // Item operations (active list)
    // -----------------------------------------------------------------------

    /// Merge `patch` into the item. Returns false on a miss.
    pub fn update_item(&mut self, item_id: &str, patch: ItemPatch) -> bool {
        let Some(item) = self
            .active_list_mut()
            .and_then(|list| list.item_mut(item_id))
        else {
            debug!("event=item_update status=miss item_id={}", item_id);
            return false;
        };
        item.apply(patch);
        true
    }

    /// Insert a blank item at `level` directly after `anchor`.
    ///
    /// `None` as the anchor appends to the end of the list; this is how the
    /// first item of an empty list is created. Returns the new item id, or
    /// `None` if there is no active list or the anchor is missing.
    pub fn insert_item_after(&mut self, anchor: Option<&str>, level: usize) -> Option<String> {
        let id = self.fresh_id();
        let Some(list) = self.active_list_mut() else {
            debug!("event=item_insert status=miss reason=no_active_list");
            return None;
        };
        let index = match anchor {
            Some(anchor_id) => match list.position(anchor_id) {
                Some(pos) => pos + 1,
                None => {
                    debug!("event=item_insert status=miss anchor={}", anchor_id);
                    return None;
                }
            },
            None => list.items.len(),
        };
        list.items.insert(index, TodoItem::blank(id.clone(), level));
        debug!(
            "event=item_insert list_id={} item_id={} index={} level={}",
            list.id, id, index, level
        );
        Some(id)
    }

    /// Copy the item (fresh id, same fields) and place the copy right after it.
    pub fn duplicate_item(&mut self, item_id: &str) -> Option<String> {
        let id = self.fresh_id();
        let Some(list) = self.active_list_mut() else {
            debug!("event=item_duplicate status=miss reason=no_active_list");
            return None;
        };
        let Some(pos) = list.position(item_id) else {
            debug!("event=item_duplicate status=miss item_id={}", item_id);
            return None;
        };
        let mut copy = list.items[pos].clone();
        copy.id = id.clone();
        copy.is_empty = false;
        list.items.insert(pos + 1, copy);
        debug!("event=item_duplicate source={} item_id={}", item_id, id);
        Some(id)
    }

    /// Remove exactly this item. Deeper items that followed it keep their level.
    pub fn delete_item(&mut self, item_id: &str) -> bool {
        let Some(list) = self.active_list_mut() else {
            debug!("event=item_delete status=miss reason=no_active_list");
            return false;
        };
        let Some(pos) = list.position(item_id) else {
            debug!("event=item_delete status=miss item_id={}", item_id);
            return false;
        };
        list.items.remove(pos);
        debug!("event=item_delete item_id={}", item_id);
        true
    }

    /// Indent or outdent one step. Outdenting at level 0 is a successful no-op.
    /// The predecessor's level is not consulted.
    pub fn change_level(&mut self, item_id: &str, direction: LevelChange) -> bool {
        let Some(item) = self
            .active_list_mut()
            .and_then(|list| list.item_mut(item_id))
        else {
            debug!("event=item_level status=miss item_id={}", item_id);
            return false;
        };
        item.level = match direction {
            LevelChange::Indent => item.level + 1,
            LevelChange::Outdent => item.level.saturating_sub(1),
        };
        true
    }

    // -----------------------------------------------------------------------
    // Ids
    // -----------------------------------------------------------------------

    fn id_in_use(&self, id: &str) -> bool {
        self.lists
            .iter()
            .any(|list| list.id == id || list.items.iter().any(|item| item.id == id))
    }

    /// A random id not used by any live list or item.
    ///
    /// Deleted ids are not tracked. A v4 UUID carries 122 random bits, so
    /// issuing a retired id again is not a practical concern.
    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().simple().to_string();
            if !self.id_in_use(&id) {
                return id;
            }
        }
    }
}
