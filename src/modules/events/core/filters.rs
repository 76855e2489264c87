// Read-side selections used by the calendar grid and the event lists.

use chrono::NaiveDate;

use crate::modules::events::core::category::Category;
use crate::modules::events::core::event::Event;

/// Events of one category, or all of them when `category` is `None`.
pub fn in_category(events: &[Event], category: Option<Category>) -> Vec<Event> {
    events
        .iter()
        .filter(|e| category.is_none_or(|c| e.category == c))
        .cloned()
        .collect()
}

/// Events occurring on `day`, multi-day ranges included. Keeps collection order.
pub fn events_on(events: &[Event], day: NaiveDate) -> Vec<Event> {
    events.iter().filter(|e| e.occurs_on(day)).cloned().collect()
}

/// Events starting on or after `today`, ordered by start date.
pub fn upcoming(events: &[Event], today: NaiveDate) -> Vec<Event> {
    let mut items: Vec<Event> = events.iter().filter(|e| e.date >= today).cloned().collect();
    items.sort_by_key(|e| e.date);
    items
}
