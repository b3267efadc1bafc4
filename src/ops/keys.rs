use crate::ops::outline::{LevelChange, Outline};

/// Keys with outline meaning inside an item's title input. All three are
/// consumed by the policy: none of them ever reaches the title text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineKey {
    Enter,
    Tab,
    /// Shift+Tab
    BackTab,
}

/// What [`apply_key`] did to the outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Enter created this sibling item
    Inserted(String),
    /// Tab / Shift+Tab ran; level may be unchanged when outdenting at 0
    LevelChanged,
    /// The current item is gone; nothing happened
    Missed,
}

/// Apply the outline keystroke policy to `item_id` in the active list.
///
/// - Enter inserts an empty sibling directly below, at the current item's level.
///   The title is never split at the cursor.
/// - Tab indents, Shift+Tab outdents (clamped at 0).
pub fn apply_key(outline: &mut Outline, item_id: &str, key: OutlineKey) -> KeyOutcome {
    match key {
        OutlineKey::Enter => {
            let Some(level) = outline
                .active_list()
                .and_then(|list| list.item(item_id))
                .map(|item| item.level)
            else {
                return KeyOutcome::Missed;
            };
            match outline.insert_item_after(Some(item_id), level) {
                Some(id) => KeyOutcome::Inserted(id),
                None => KeyOutcome::Missed,
            }
        }
        OutlineKey::Tab => level_outcome(outline.change_level(item_id, LevelChange::Indent)),
        OutlineKey::BackTab => level_outcome(outline.change_level(item_id, LevelChange::Outdent)),
    }
}

fn level_outcome(changed: bool) -> KeyOutcome {
    if changed {
        KeyOutcome::LevelChanged
    } else {
        KeyOutcome::Missed
    }
}
