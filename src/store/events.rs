//! The calendar event store.
//!
//! Owns the canonical in-memory event collection and keeps a serialized
//! mirror under [`EVENTS_KEY`]. Mutations update memory first, then write
//! the full snapshot; a failed write is logged and swallowed, so the
//! in-memory state remains the source of truth for the session.

use crate::error::StoreResult;
use crate::event::{CalendarEvent, EventDraft, EventPatch};
use crate::storage::{KeyValueStore, EVENTS_KEY};
use chrono::{Datelike, NaiveDate, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Store for the device's calendar events.
///
/// Construct once at app start, call [`load`](Self::load), then share with
/// whatever renders calendars. Mutations take `&mut self`: one logical
/// writer, so a read after a write always sees the write even while the
/// snapshot is still in flight.
pub struct EventStore {
    storage: Arc<dyn KeyValueStore>,
    events: Vec<CalendarEvent>,
    loaded: bool,
}

impl EventStore {
    /// Create an empty, not-yet-loaded store backed by `storage`.
    ///
    /// Queries before [`load`](Self::load) see an empty collection;
    /// callers that care should gate on [`is_loaded`](Self::is_loaded).
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        EventStore {
            storage,
            events: Vec::new(),
            loaded: false,
        }
    }

    /// Load the persisted collection.
    ///
    /// Always reaches the loaded state: a missing key, a failed read, or
    /// a value that no longer deserializes all fall back to an empty
    /// collection rather than an error.
    pub async fn load(&mut self) {
        self.events = match self.storage.get(EVENTS_KEY).await {
            Ok(Some(stored)) => match serde_json::from_str(&stored) {
                Ok(events) => events,
                Err(e) => {
                    warn!(key = EVENTS_KEY, error = %e, "stored events unreadable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = EVENTS_KEY, error = %e, "failed to load events, starting empty");
                Vec::new()
            }
        };
        self.loaded = true;
    }

    /// Whether [`load`](Self::load) has completed.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// All events, in insertion order.
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    /// Create a new event from the caller's draft.
    ///
    /// Assigns a fresh id (random, so two events created in the same
    /// millisecond still differ) and the creation timestamp, appends, and
    /// persists. The draft's content is taken as-is: validation is the
    /// caller's job.
    pub async fn create(&mut self, draft: EventDraft) -> CalendarEvent {
        let id = format!("event-{}", Uuid::new_v4());
        let event = draft.into_event(id, Utc::now());

        self.events.push(event.clone());
        self.persist().await;
        event
    }

    /// Merge `patch` into the event with the given id.
    ///
    /// A silent no-op when no event has that id. `id` and `createdAt` are
    /// never touched.
    pub async fn update(&mut self, id: &str, patch: &EventPatch) {
        if let Some(event) = self.events.iter_mut().find(|e| e.id == id) {
            patch.apply(event);
        }
        self.persist().await;
    }

    /// Remove the event with the given id, if present. Deletion is
    /// immediate and permanent; there is no soft delete.
    pub async fn delete(&mut self, id: &str) {
        self.events.retain(|e| e.id != id);
        self.persist().await;
    }

    /// Events starting on `date`, ascending by start time.
    ///
    /// Matches the start date only: a multi-day event is returned for its
    /// start date, not for the days it spans. Calendar views have always
    /// relied on that, so it stays.
    pub fn events_by_date(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        let mut matches: Vec<&CalendarEvent> =
            self.events.iter().filter(|e| e.date == date).collect();
        // HH:mm is fixed width, string order is chronological order
        matches.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        matches
    }

    /// Events whose start date falls in the given year and month
    /// (1-based), in insertion order.
    pub fn events_by_month(&self, year: i32, month: u32) -> Vec<&CalendarEvent> {
        self.events
            .iter()
            .filter(|e| e.date.year() == year && e.date.month() == month)
            .collect()
    }

    /// The distinct start dates with at least one event in the given
    /// month. Month grids use this to draw per-day indicators without
    /// scanning the collection per cell.
    pub fn dates_with_events(&self, year: i32, month: u32) -> HashSet<NaiveDate> {
        self.events
            .iter()
            .filter(|e| e.date.year() == year && e.date.month() == month)
            .map(|e| e.date)
            .collect()
    }

    /// Write the full collection snapshot.
    ///
    /// Snapshot-per-mutation is fine at household scale; it would become
    /// the bottleneck if the collection grew to thousands of events.
    /// Failures are logged and swallowed: memory stays authoritative and
    /// the next successful write heals the divergence.
    async fn persist(&self) {
        if let Err(e) = self.try_persist().await {
            warn!(key = EVENTS_KEY, error = %e, "failed to persist events, keeping in-memory state");
        }
    }

    async fn try_persist(&self) -> StoreResult<()> {
        let snapshot = serde_json::to_string(&self.events)?;
        self.storage.set(EVENTS_KEY, &snapshot).await
    }
}

// =============================================================================
// Tests
// =============================================================================
