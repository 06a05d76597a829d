//! Calendar event types.
//!
//! These are pure data: the store enforces no content rules (non-empty
//! titles, end after start, and so on are the caller's contract), and the
//! `recurring` field is stored verbatim, never expanded into instances.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single calendar entry.
///
/// Serialized with camelCase field names so the stored JSON matches what
/// the app has always persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Opaque unique id, assigned at creation, immutable.
    pub id: String,
    pub title: String,
    /// Start date. Date-based queries match this field only.
    pub date: NaiveDate,
    /// End date, >= `date` (caller's contract).
    pub end_date: NaiveDate,
    /// Local time of day, fixed-width `HH:mm`, so ordering is plain
    /// string comparison.
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Display name of the responsible person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    /// Whether the creating user is also a participant.
    pub assign_to_me: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Reminder-offset labels, e.g. "5 minutes before". Order and
    /// duplicates carry no meaning.
    #[serde(default)]
    pub reminders: Vec<String>,
    #[serde(default)]
    pub recurring: Recurrence,
    /// Participant display names. Uniqueness is not enforced.
    #[serde(default)]
    pub included_members: Vec<String>,
    #[serde(default)]
    pub color: EventColor,
    /// Set once at creation, immutable.
    pub created_at: DateTime<Utc>,
}

/// Recurrence cadence. Stored as-is; this crate never expands recurring
/// events into additional instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Annually,
}

/// Display color for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    Red,
    #[default]
    Purple,
    Blue,
    Green,
}

/// Caller-supplied attributes for a new event: everything except the
/// store-assigned `id` and `createdAt`.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub title: String,
    pub date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub location: Option<String>,
    pub assigned_to: Option<String>,
    pub assign_to_me: bool,
    pub note: Option<String>,
    pub reminders: Vec<String>,
    pub recurring: Recurrence,
    pub included_members: Vec<String>,
    pub color: EventColor,
}

impl EventDraft {
    pub(crate) fn into_event(self, id: String, created_at: DateTime<Utc>) -> CalendarEvent {
        CalendarEvent {
            id,
            title: self.title,
            date: self.date,
            end_date: self.end_date,
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location,
            assigned_to: self.assigned_to,
            assign_to_me: self.assign_to_me,
            note: self.note,
            reminders: self.reminders,
            recurring: self.recurring,
            included_members: self.included_members,
            color: self.color,
            created_at,
        }
    }
}

/// A partial update, merged field-by-field over an existing event.
///
/// `None` leaves a field untouched. The nullable text fields are doubly
/// wrapped so a patch can also clear them: `Some(None)` unsets,
/// `Some(Some(v))` replaces. `id` and `createdAt` cannot be patched.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<Option<String>>,
    pub assigned_to: Option<Option<String>>,
    pub assign_to_me: Option<bool>,
    pub note: Option<Option<String>>,
    pub reminders: Option<Vec<String>>,
    pub recurring: Option<Recurrence>,
    pub included_members: Option<Vec<String>>,
    pub color: Option<EventColor>,
}

impl EventPatch {
    /// Merge this patch into `event`, leaving unset fields as they were.
    pub fn apply(&self, event: &mut CalendarEvent) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(end_date) = self.end_date {
            event.end_date = end_date;
        }
        if let Some(start_time) = &self.start_time {
            event.start_time = start_time.clone();
        }
        if let Some(end_time) = &self.end_time {
            event.end_time = end_time.clone();
        }
        if let Some(location) = &self.location {
            event.location = location.clone();
        }
        if let Some(assigned_to) = &self.assigned_to {
            event.assigned_to = assigned_to.clone();
        }
        if let Some(assign_to_me) = self.assign_to_me {
            event.assign_to_me = assign_to_me;
        }
        if let Some(note) = &self.note {
            event.note = note.clone();
        }
        if let Some(reminders) = &self.reminders {
            event.reminders = reminders.clone();
        }
        if let Some(recurring) = self.recurring {
            event.recurring = recurring;
        }
        if let Some(included_members) = &self.included_members {
            event.included_members = included_members.clone();
        }
        if let Some(color) = self.color {
            event.color = color;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
