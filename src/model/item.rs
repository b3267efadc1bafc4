use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Item priority. Absence (`None` on the item) means "no priority".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Parse a priority name. `"none"` parses to `Some(None)` (explicitly cleared);
    /// anything unrecognised is `None`.
    pub fn parse(s: &str) -> Option<Option<Priority>> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "h" => Some(Some(Priority::High)),
            "medium" | "med" | "m" => Some(Some(Priority::Medium)),
            "low" | "l" => Some(Some(Priority::Low)),
            "none" | "" => Some(None),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single outline entry.
///
/// Hierarchy is not stored: an item's parent is implied by its position in the
/// list and its `level` relative to the items before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    /// Indentation depth (0 = top level)
    #[serde(default)]
    pub level: usize,
    /// Set only on items created blank by an insert
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_empty: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_due_date"
    )]
    pub due_date: Option<NaiveDate>,
    /// Free-form `HH:MM`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_time: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_priority"
    )]
    pub priority: Option<Priority>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Accepts plain `YYYY-MM-DD` as well as full timestamps (only the date part is kept).
/// Unparseable values are dropped rather than failing the whole list.
fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        let date_part = s.get(..10).unwrap_or(s.as_str());
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }))
}

/// `"none"` and unknown values read as no priority.
fn deserialize_priority<'de, D>(deserializer: D) -> Result<Option<Priority>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| Priority::parse(&s).flatten()))
}

impl TodoItem {
    /// A blank item as produced by an insert: empty title, not completed.
    pub fn blank(id: String, level: usize) -> Self {
        TodoItem {
            id,
            title: String::new(),
            completed: false,
            level,
            is_empty: true,
            due_date: None,
            due_time: None,
            priority: None,
        }
    }

    /// Whether the presentation should give this item's title input focus when it
    /// appears. Derived from the title on every render, never stored.
    pub fn wants_focus(&self) -> bool {
        self.title.is_empty()
    }

    /// Merge the supplied fields; everything absent from the patch is left alone.
    pub fn apply(&mut self, patch: ItemPatch) {
        let ItemPatch {
            title,
            completed,
            level,
            due_date,
            due_time,
            priority,
        } = patch;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(completed) = completed {
            self.completed = completed;
        }
        if let Some(level) = level {
            self.level = level;
        }
        if let Some(due_date) = due_date {
            self.due_date = due_date;
        }
        if let Some(due_time) = due_time {
            self.due_time = due_time;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
    }

    /// True when the item is unfinished and its due date is before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.is_some_and(|d| d < today)
    }
}

/// A partial update for [`TodoItem`]. Each `Some` field overwrites; `None` leaves
/// the field untouched. Optional item fields use a nested `Option` so they can be
/// cleared (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub level: Option<usize>,
    pub due_date: Option<Option<NaiveDate>>,
    pub due_time: Option<Option<String>>,
    pub priority: Option<Option<Priority>>,
}

impl ItemPatch {
    pub fn title(title: impl Into<String>) -> Self {
        ItemPatch {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn completed(completed: bool) -> Self {
        ItemPatch {
            completed: Some(completed),
            ..Default::default()
        }
    }

    pub fn level(level: usize) -> Self {
        ItemPatch {
            level: Some(level),
            ..Default::default()
        }
    }

    pub fn due_date(date: Option<NaiveDate>) -> Self {
        ItemPatch {
            due_date: Some(date),
            ..Default::default()
        }
    }

    pub fn due_time(time: Option<String>) -> Self {
        ItemPatch {
            due_time: Some(time),
            ..Default::default()
        }
    }

    pub fn priority(priority: Option<Priority>) -> Self {
        ItemPatch {
            priority: Some(priority),
            ..Default::default()
        }
    }

    /// Clear both due date and due time.
    pub fn clear_schedule() -> Self {
        ItemPatch {
            due_date: Some(None),
            due_time: Some(None),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ItemPatch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> TodoItem {
        TodoItem {
            id: "a1".into(),
            title: "Buy milk".into(),
            completed: false,
            level: 2,
            is_empty: false,
            due_date: NaiveDate::from_ymd_opt(2025, 5, 1),
            due_time: Some("09:30".into()),
            priority: Some(Priority::High),
        }
    }

    #[test]
    fn patch_overwrites_only_supplied_fields() {
        let mut item = sample();
        item.apply(ItemPatch::priority(Some(Priority::Low)));
        assert_eq!(item.priority, Some(Priority::Low));
        assert_eq!(item.title, "Buy milk");
        assert_eq!(item.level, 2);
        assert_eq!(item.due_time.as_deref(), Some("09:30"));
    }

    #[test]
    fn patch_can_clear_optional_fields() {
        let mut item = sample();
        item.apply(ItemPatch::clear_schedule());
        assert!(item.due_date.is_none());
        assert!(item.due_time.is_none());
        assert_eq!(item.priority, Some(Priority::High));
    }

    #[test]
    fn empty_patch_is_noop() {
        let mut item = sample();
        let patch = ItemPatch::default();
        assert!(patch.is_empty());
        item.apply(patch);
        assert_eq!(item, sample());
    }

    #[test]
    fn wants_focus_follows_title() {
        let mut item = TodoItem::blank("x".into(), 0);
        assert!(item.wants_focus());
        item.title = "typed".into();
        assert!(!item.wants_focus());
        item.title.clear();
        assert!(item.wants_focus());
    }

    #[test]
    fn serializes_camel_case_and_skips_absent_fields() {
        let item = TodoItem::blank("x".into(), 1);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "x",
                "title": "",
                "completed": false,
                "level": 1,
                "isEmpty": true
            })
        );

        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["dueDate"], "2025-05-01");
        assert_eq!(json["dueTime"], "09:30");
        assert_eq!(json["priority"], "high");
        assert!(json.get("isEmpty").is_none());
    }

    #[test]
    fn deserializes_timestamps_and_none_priority() {
        let item: TodoItem = serde_json::from_str(
            r#"{"id":"b","title":"t","completed":true,"level":0,
                "dueDate":"2024-11-03T00:00:00.000Z","priority":"none"}"#,
        )
        .unwrap();
        assert_eq!(item.due_date, NaiveDate::from_ymd_opt(2024, 11, 3));
        assert_eq!(item.priority, None);
        assert!(item.completed);
        assert!(!item.is_empty);
    }

    #[test]
    fn unparseable_date_is_dropped() {
        let item: TodoItem =
            serde_json::from_str(r#"{"id":"b","dueDate":"someday"}"#).unwrap();
        assert_eq!(item.due_date, None);
        assert_eq!(item.title, "");
        assert_eq!(item.level, 0);
    }

    #[test]
    fn priority_parse() {
        assert_eq!(Priority::parse("HIGH"), Some(Some(Priority::High)));
        assert_eq!(Priority::parse("m"), Some(Some(Priority::Medium)));
        assert_eq!(Priority::parse("none"), Some(None));
        assert_eq!(Priority::parse("urgent"), None);
    }

    #[test]
    fn overdue_only_when_open_and_past() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 2).unwrap();
        let mut item = sample();
        assert!(item.is_overdue(today));
        item.completed = true;
        assert!(!item.is_overdue(today));
        item.completed = false;
        item.due_date = NaiveDate::from_ymd_opt(2025, 5, 2);
        assert!(!item.is_overdue(today));
    }
}
