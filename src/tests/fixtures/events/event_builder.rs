// Shared test fixture for calendar events.
// The canonical event lives in src/tests/fixtures/json/event.json; setters override single fields.

use crate::modules::events::core::category::Category;
use crate::modules::events::core::event::{Event, EventDraft};
use chrono::{NaiveDate, NaiveTime};
use std::fs;

pub struct EventBuilder {
    inner: Event,
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl EventBuilder {
    pub fn new() -> Self {
        let json_str = fs::read_to_string("./src/tests/fixtures/json/event.json").unwrap();
        Self {
            inner: serde_json::from_str(&json_str).unwrap(),
        }
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = v.into();
        self
    }

    pub fn title(mut self, v: impl Into<String>) -> Self {
        self.inner.title = v.into();
        self
    }

    pub fn date(mut self, v: NaiveDate) -> Self {
        self.inner.date = v;
        self
    }

    pub fn multi_day_until(mut self, v: NaiveDate) -> Self {
        self.inner.is_multi_day = true;
        self.inner.end_date = Some(v);
        self
    }

    pub fn start_time(mut self, v: Option<NaiveTime>) -> Self {
        self.inner.start_time = v;
        self
    }

    pub fn location(mut self, v: impl Into<String>) -> Self {
        self.inner.location = Some(v.into());
        self
    }

    pub fn map_link(mut self, v: impl Into<String>) -> Self {
        self.inner.map_link = Some(v.into());
        self
    }

    pub fn category(mut self, v: Category) -> Self {
        self.inner.category = v;
        self
    }

    pub fn description(mut self, v: Option<String>) -> Self {
        self.inner.description = v;
        self
    }

    pub fn build(self) -> Event {
        self.inner
    }

    /// The same fields as a creation payload without an id.
    pub fn build_draft(self) -> EventDraft {
        let event = self.inner;
        EventDraft {
            id: None,
            title: event.title,
            date: event.date,
            end_date: event.end_date,
            start_time: event.start_time,
            end_time: event.end_time,
            location: event.location,
            map_link: event.map_link,
            category: event.category,
            description: event.description,
            is_multi_day: Some(event.is_multi_day),
        }
    }
}

/// Convenience constructor for a single-day event with a fixed id.
pub fn make_event(id: &str, title: &str, date: &str) -> Event {
    EventBuilder::new()
        .id(id)
        .title(title)
        .date(date.parse().unwrap())
        .build()
}

#[cfg(test)]
mod event_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = EventBuilder::default().build();
        assert_eq!(built.id, "evt-fixed-0001");
        assert_eq!(built.title, "Health Camp");
        assert_eq!(built.date, NaiveDate::from_ymd_opt(2025, 7, 10).unwrap());
        assert_eq!(built.category, Category::Awareness);
        assert_eq!(built.start_time, NaiveTime::from_hms_opt(9, 0, 0));
        assert!(!built.is_multi_day);
    }

    #[rstest]
    fn setters_override_fields_and_build_returns_inner() {
        let end = NaiveDate::from_ymd_opt(2025, 7, 12).unwrap();
        let custom = EventBuilder::new()
            .id("evt-2")
            .title("Fun run")
            .category(Category::Fundraising)
            .multi_day_until(end)
            .build();
        assert_eq!(custom.id, "evt-2");
        assert_eq!(custom.title, "Fun run");
        assert_eq!(custom.category, Category::Fundraising);
        assert_eq!(custom.end_date, Some(end));
        assert!(custom.is_multi_day);
    }
}
