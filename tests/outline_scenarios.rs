//! End-to-end outline behavior through the public library API: ordering,
//! level clamping, duplication, partial updates, deletion, and the keyboard
//! policy.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tack::model::item::{ItemPatch, Priority};
use tack::ops::keys::{KeyOutcome, OutlineKey, apply_key};
use tack::ops::outline::{LevelChange, Outline};

fn outline_with_list() -> Outline {
    let mut outline = Outline::default();
    outline.create_list();
    outline
}

fn ids(outline: &Outline) -> Vec<String> {
    outline
        .active_list()
        .unwrap()
        .items
        .iter()
        .map(|i| i.id.clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Insertion order
// ---------------------------------------------------------------------------

#[test]
fn inserts_land_directly_after_their_anchor() {
    let mut outline = outline_with_list();
    let a = outline.insert_item_after(None, 0).unwrap();
    let c = outline.insert_item_after(Some(&a), 0).unwrap();
    let b = outline.insert_item_after(Some(&a), 0).unwrap();
    let d = outline.insert_item_after(Some(&c), 0).unwrap();
    let a2 = outline.insert_item_after(Some(&a), 0).unwrap();

    assert_eq!(ids(&outline), vec![a, a2, b, c, d]);
}

#[test]
fn insert_after_missing_anchor_is_a_noop() {
    let mut outline = outline_with_list();
    let a = outline.insert_item_after(None, 0).unwrap();
    outline.delete_item(&a);
    assert_eq!(outline.insert_item_after(Some(&a), 0), None);
    assert!(outline.active_list().unwrap().items.is_empty());
}

#[test]
fn insert_without_active_list_is_a_noop() {
    let mut outline = Outline::default();
    assert_eq!(outline.insert_item_after(None, 0), None);
    assert!(outline.lists().is_empty());
}

// ---------------------------------------------------------------------------
// Levels
// ---------------------------------------------------------------------------

#[test]
fn outdent_at_zero_stays_at_zero() {
    let mut outline = outline_with_list();
    let a = outline.insert_item_after(None, 0).unwrap();
    for _ in 0..3 {
        assert!(outline.change_level(&a, LevelChange::Outdent));
    }
    assert_eq!(outline.active_list().unwrap().items[0].level, 0);
}

#[test]
fn indent_ignores_the_previous_item() {
    let mut outline = outline_with_list();
    let a = outline.insert_item_after(None, 0).unwrap();
    let b = outline.insert_item_after(Some(&a), 0).unwrap();
    outline.change_level(&b, LevelChange::Indent);
    outline.change_level(&b, LevelChange::Indent);
    outline.change_level(&b, LevelChange::Indent);
    assert_eq!(outline.active_list().unwrap().items[1].level, 3);
}

// ---------------------------------------------------------------------------
// Duplicate / update / delete
// ---------------------------------------------------------------------------

#[test]
fn duplicating_twice_yields_three_matching_items() {
    let mut outline = outline_with_list();
    let a = outline.insert_item_after(None, 2).unwrap();
    outline.update_item(
        &a,
        ItemPatch {
            title: Some("Pay rent".into()),
            completed: Some(true),
            due_date: Some(NaiveDate::from_ymd_opt(2025, 2, 1)),
            due_time: Some(Some("08:00".into())),
            priority: Some(Some(Priority::High)),
            ..ItemPatch::default()
        },
    );

    let first_copy = outline.duplicate_item(&a).unwrap();
    outline.duplicate_item(&a).unwrap();

    let items = &outline.active_list().unwrap().items;
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].id, a);
    assert_eq!(items[2].id, first_copy);
    for item in items {
        assert_eq!(item.title, "Pay rent");
        assert!(item.completed);
        assert_eq!(item.level, 2);
        assert_eq!(item.due_date, NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(item.due_time.as_deref(), Some("08:00"));
        assert_eq!(item.priority, Some(Priority::High));
    }
    assert_ne!(items[0].id, items[1].id);
    assert_ne!(items[1].id, items[2].id);
    assert_ne!(items[0].id, items[2].id);
}

#[test]
fn update_touches_only_supplied_fields() {
    let mut outline = outline_with_list();
    let a = outline.insert_item_after(None, 1).unwrap();
    outline.update_item(&a, ItemPatch::title("Bread"));
    outline.update_item(&a, ItemPatch::priority(Some(Priority::Low)));

    let item = &outline.active_list().unwrap().items[0];
    assert_eq!(item.id, a);
    assert_eq!(item.title, "Bread");
    assert_eq!(item.level, 1);
    assert_eq!(item.priority, Some(Priority::Low));
    assert!(!item.completed);
}

#[test]
fn delete_removes_exactly_one_item() {
    let mut outline = outline_with_list();
    let a = outline.insert_item_after(None, 0).unwrap();
    let b = outline.insert_item_after(Some(&a), 1).unwrap();
    let c = outline.insert_item_after(Some(&b), 2).unwrap();

    assert!(outline.delete_item(&b));
    assert_eq!(ids(&outline), vec![a.clone(), c.clone()]);
    // Orphaned deeper item keeps its level
    assert_eq!(outline.active_list().unwrap().items[1].level, 2);

    assert!(!outline.delete_item(&b));
    assert_eq!(ids(&outline), vec![a, c]);
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn add_to_empty_list_creates_focus_target() {
    let mut outline = outline_with_list();
    let id = outline.insert_item_after(None, 0).unwrap();

    let list = outline.active_list().unwrap();
    assert_eq!(list.items.len(), 1);
    let item = &list.items[0];
    assert_eq!(item.id, id);
    assert_eq!(item.level, 0);
    assert_eq!(item.title, "");
    assert!(item.is_empty);
    assert!(item.wants_focus());
}

#[test]
fn enter_then_tab_then_shift_tab_twice() {
    let mut outline = outline_with_list();
    let a = outline.insert_item_after(None, 0).unwrap();
    outline.update_item(&a, ItemPatch::title("Buy milk"));
    assert!(!outline.active_list().unwrap().items[0].wants_focus());

    let KeyOutcome::Inserted(b) = apply_key(&mut outline, &a, OutlineKey::Enter) else {
        panic!("enter should insert a sibling");
    };
    assert_eq!(ids(&outline), vec![a.clone(), b.clone()]);
    let list = outline.active_list().unwrap();
    assert_eq!(list.items[0].title, "Buy milk");
    assert_eq!(list.items[1].title, "");
    assert_eq!(list.items[1].level, 0);

    assert_eq!(
        apply_key(&mut outline, &b, OutlineKey::Tab),
        KeyOutcome::LevelChanged
    );
    assert_eq!(outline.active_list().unwrap().items[1].level, 1);

    apply_key(&mut outline, &b, OutlineKey::BackTab);
    apply_key(&mut outline, &b, OutlineKey::BackTab);
    assert_eq!(outline.active_list().unwrap().items[1].level, 0);
}

#[test]
fn rename_changes_only_the_active_list() {
    let mut outline = Outline::default();
    let first = outline.create_list();
    let second = outline.create_list();
    assert!(outline.rename_active_list("Groceries"));

    assert_eq!(outline.list(&second).unwrap().name, "Groceries");
    assert_eq!(outline.list(&first).unwrap().name, "Untitled List");
}

#[test]
fn stale_item_ids_are_ignored_everywhere() {
    let mut outline = outline_with_list();
    let a = outline.insert_item_after(None, 0).unwrap();
    outline.delete_item(&a);
    let before = outline.clone();

    assert!(!outline.update_item(&a, ItemPatch::title("x")));
    assert!(!outline.change_level(&a, LevelChange::Indent));
    assert_eq!(outline.duplicate_item(&a), None);
    assert_eq!(apply_key(&mut outline, &a, OutlineKey::Enter), KeyOutcome::Missed);
    assert_eq!(outline, before);
}

#[test]
fn item_ops_only_reach_the_active_list() {
    let mut outline = Outline::default();
    let first = outline.create_list();
    let a = outline.insert_item_after(None, 0).unwrap();
    outline.create_list();

    // `a` lives in the first list, which is no longer active
    assert!(!outline.update_item(&a, ItemPatch::title("x")));
    assert_eq!(outline.list(&first).unwrap().items[0].title, "");

    outline.select_list(&first);
    assert!(outline.update_item(&a, ItemPatch::title("x")));
}
