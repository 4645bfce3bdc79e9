//! Bill titles generated from items and participants.
//!
//! Used when a bill is saved without a title. The format is
//! `"{items} - {participants}"`, e.g. `"Pizza, Beer - Alice, Bob"`.

use chrono::{DateTime, Utc};

use crate::types::Item;

/// Items listed by name before switching to "& N more".
const MAX_LISTED_ITEMS: usize = 3;

/// Participants listed by name before switching to "& N others".
const MAX_LISTED_PARTICIPANTS: usize = 3;

/// Builds a title like `"Pizza, Beer & 2 more - Alice, Bob & 3 others"`.
///
/// ## Fallbacks
/// - no items → `"Split with Alice, Bob"`
/// - no items and nobody → `"Bill - Mar 5, 2025"` (from `created_at`)
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use splitwiser_core::title::generate_title;
/// use splitwiser_core::types::Item;
///
/// let items = vec![Item::new("Pizza", 20.0, ["Alice", "Bob"])];
/// let people = vec!["Alice".to_string(), "Bob".to_string()];
/// assert_eq!(generate_title(&items, &people, Utc::now()), "Pizza - Alice, Bob");
/// ```
pub fn generate_title(items: &[Item], participants: &[String], created_at: DateTime<Utc>) -> String {
    let items_part = describe_items(items);
    let people_part = describe_participants(participants);

    match (items_part.is_empty(), people_part.is_empty()) {
        (false, false) => format!("{items_part} - {people_part}"),
        (false, true) => items_part,
        (true, false) => format!("Split with {people_part}"),
        (true, true) => format!("Bill - {}", created_at.format("%b %-d, %Y")),
    }
}

fn describe_items(items: &[Item]) -> String {
    if items.len() <= MAX_LISTED_ITEMS {
        return items
            .iter()
            .map(|item| item.description.as_str())
            .collect::<Vec<_>>()
            .join(", ");
    }

    format!(
        "{}, {} & {} more",
        items[0].description,
        items[1].description,
        items.len() - 2
    )
}

fn describe_participants(participants: &[String]) -> String {
    if participants.len() <= MAX_LISTED_PARTICIPANTS {
        return participants.join(", ");
    }

    format!(
        "{}, {} & {} others",
        participants[0],
        participants[1],
        participants.len() - 2
    )
}
