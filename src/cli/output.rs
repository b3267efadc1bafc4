use serde::Serialize;

use crate::model::item::{Priority, TodoItem};
use crate::model::list::TodoList;
use crate::ops::schedule;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ListInfoJson {
    pub id: String,
    pub name: String,
    pub active: bool,
    pub items: usize,
    pub completed: usize,
}

#[derive(Serialize)]
pub struct ItemJson {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub level: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

#[derive(Serialize)]
pub struct ListJson {
    pub id: String,
    pub name: String,
    pub items: Vec<ItemJson>,
}

#[derive(Serialize)]
pub struct WhoamiJson {
    pub signed_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn list_info_to_json(list: &TodoList, active: bool) -> ListInfoJson {
    ListInfoJson {
        id: list.id.clone(),
        name: list.name.clone(),
        active,
        items: list.items.len(),
        completed: list.completed_count(),
    }
}

pub fn list_to_json(list: &TodoList) -> ListJson {
    let parents = list.outline_parents();
    let items = list
        .items
        .iter()
        .zip(parents)
        .map(|(item, parent)| ItemJson {
            id: item.id.clone(),
            title: item.title.clone(),
            completed: item.completed,
            level: item.level,
            parent: parent.map(|p| list.items[p].id.clone()),
            due_date: item.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
            due_time: item.due_time.clone(),
            priority: item.priority,
        })
        .collect();
    ListJson {
        id: list.id.clone(),
        name: list.name.clone(),
        items,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn checkbox(item: &TodoItem) -> char {
    if item.completed { 'x' } else { ' ' }
}

/// Format a single item as a one-line summary, without indentation
pub fn format_item_line(item: &TodoItem) -> String {
    let title = if item.title.is_empty() {
        "(untitled)"
    } else {
        item.title.as_str()
    };
    let mut extras = Vec::new();
    if let Some(label) = schedule::due_label(item) {
        extras.push(format!("due {}", label));
    }
    if let Some(p) = item.priority {
        extras.push(format!("!{}", p));
    }
    let extras = if extras.is_empty() {
        String::new()
    } else {
        format!("  ({})", extras.join(", "))
    };
    format!("[{}] {} {}{}", checkbox(item), item.id, title, extras)
}

/// Format a list as an indented outline under a header line
pub fn format_list_outline(list: &TodoList, indent_width: usize) -> Vec<String> {
    let mut lines = vec![format!("== {} ({}) ==", list.name, list.id)];
    if list.items.is_empty() {
        lines.push("(no items)".to_string());
        return lines;
    }
    for item in &list.items {
        let prefix = " ".repeat(item.level * indent_width);
        lines.push(format!("{}{}", prefix, format_item_line(item)));
    }
    lines
}

/// Format one entry of the `lists` listing
pub fn format_list_info(list: &TodoList, active: bool) -> String {
    let marker = if active { '*' } else { ' ' };
    format!(
        "{} {} ({})  {}/{} done",
        marker,
        list.name,
        list.id,
        list.completed_count(),
        list.items.len()
    )
}
