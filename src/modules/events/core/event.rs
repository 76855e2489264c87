// Calendar event record and its creation payload.
//
// Purpose
// - Describe one calendar entry exactly as it travels between the store, the API and the backends.
//
// Responsibilities
// - Enforce the record invariants: non-empty id and title, and an end date present only
//   for multi-day events and never before the start date.
// - Answer date membership for the calendar views.
// - Never perform input or output.

use chrono::{NaiveDate, NaiveTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::modules::events::core::category::Category;
use crate::modules::events::core::time_of_day;

const MAP_SEARCH_URL: &str = "https://www.google.com/maps/search/";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title is required")]
    EmptyTitle,

    #[error("event id is required")]
    EmptyId,

    #[error("end date is required for multi-day events")]
    MissingEndDate,

    #[error("end date must not be before the start date")]
    EndDateBeforeStart,

    #[error("end date is only allowed on multi-day events")]
    EndDateWithoutMultiDay,

    #[error("duplicate event id: {0}")]
    DuplicateId(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default, with = "time_of_day")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "time_of_day")]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub map_link: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_multi_day: bool,
}

impl Event {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        match (self.is_multi_day, self.end_date) {
            (true, None) => Err(ValidationError::MissingEndDate),
            (true, Some(end)) if end < self.date => Err(ValidationError::EndDateBeforeStart),
            (false, Some(_)) => Err(ValidationError::EndDateWithoutMultiDay),
            _ => Ok(()),
        }
    }

    /// Last day the event covers.
    pub fn last_day(&self) -> NaiveDate {
        match (self.is_multi_day, self.end_date) {
            (true, Some(end)) => end,
            _ => self.date,
        }
    }

    pub fn occurs_on(&self, day: NaiveDate) -> bool {
        self.date <= day && day <= self.last_day()
    }

    /// The explicit map link, or a map search for the location.
    pub fn map_url(&self) -> Option<String> {
        if let Some(link) = self.map_link.as_deref().filter(|l| !l.trim().is_empty()) {
            return Some(link.to_string());
        }
        let location = self.location.as_deref().filter(|l| !l.trim().is_empty())?;
        Url::parse_with_params(MAP_SEARCH_URL, &[("api", "1"), ("query", location)])
            .ok()
            .map(String::from)
    }
}

/// Unique, time-ordered identifier: a millisecond timestamp followed by random bits.
pub fn new_event_id() -> String {
    Uuid::now_v7().simple().to_string()
}

/// Event fields as entered in the admin form; `id` is optional and assigned on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default, with = "time_of_day")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "time_of_day")]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub map_link: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_multi_day: Option<bool>,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, date: NaiveDate, category: Category) -> Self {
        Self {
            id: None,
            title: title.into(),
            date,
            end_date: None,
            start_time: None,
            end_time: None,
            location: None,
            map_link: None,
            category,
            description: None,
            is_multi_day: None,
        }
    }

    /// Builds the record, keeping a supplied id or synthesizing a new one.
    pub fn into_event(self) -> Result<Event, ValidationError> {
        let id = match self.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => new_event_id(),
        };
        let event = Event {
            id,
            title: self.title.trim().to_string(),
            date: self.date,
            end_date: self.end_date,
            start_time: self.start_time,
            end_time: self.end_time,
            location: non_blank(self.location),
            map_link: non_blank(self.map_link),
            category: self.category,
            description: non_blank(self.description),
            is_multi_day: self.is_multi_day.unwrap_or(false),
        };
        event.validate()?;
        Ok(event)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Today's calendar date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
