use chrono::{NaiveDate, NaiveTime};

use crate::modules::events::core::category::Category;
use crate::modules::events::core::event::Event;

/// Partial update of an event. `None` leaves a field untouched; for nullable fields
/// `Some(None)` clears the value. The id is never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub end_date: Option<Option<NaiveDate>>,
    pub start_time: Option<Option<NaiveTime>>,
    pub end_time: Option<Option<NaiveTime>>,
    pub location: Option<Option<String>>,
    pub map_link: Option<Option<String>>,
    pub category: Option<Category>,
    pub description: Option<Option<String>>,
    pub is_multi_day: Option<bool>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns a copy of `event` with every set field replaced.
    pub fn merged_into(&self, event: &Event) -> Event {
        let mut merged = event.clone();
        if let Some(title) = &self.title {
            merged.title = title.clone();
        }
        if let Some(date) = self.date {
            merged.date = date;
        }
        if let Some(end_date) = self.end_date {
            merged.end_date = end_date;
        }
        if let Some(start_time) = self.start_time {
            merged.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            merged.end_time = end_time;
        }
        if let Some(location) = &self.location {
            merged.location = location.clone();
        }
        if let Some(map_link) = &self.map_link {
            merged.map_link = map_link.clone();
        }
        if let Some(category) = self.category {
            merged.category = category;
        }
        if let Some(description) = &self.description {
            merged.description = description.clone();
        }
        if let Some(is_multi_day) = self.is_multi_day {
            merged.is_multi_day = is_multi_day;
        }
        merged
    }
}
