mod inmemory;
mod postgres;

use crate::repos::shared::query_structs::EventSearch;
use chrono::{DateTime, Utc};
use eventease_domain::{Event, UserId, ID};
pub use inmemory::InMemoryEventRepo;
pub use postgres::PostgresEventRepo;

#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    /// Persists the event together with its allow-list rows
    async fn insert(&self, e: &Event) -> anyhow::Result<()>;
    /// Saves the event and replaces its allow-list rows wholesale
    async fn save(&self, e: &Event) -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> Option<Event>;
    async fn delete(&self, event_id: &ID) -> Option<Event>;
    async fn find_by_owner(&self, owner_id: &UserId) -> anyhow::Result<Vec<Event>>;
    /// Events visible to `viewer` matching `search`, ordered by start time
    async fn search(
        &self,
        viewer: Option<&UserId>,
        search: &EventSearch,
    ) -> anyhow::Result<Vec<Event>>;
    /// The next upcoming public event, preferring owner-featured ones
    async fn find_featured(&self, now: DateTime<Utc>) -> Option<Event>;
    /// Events starting inside the window that no sweep has claimed yet
    async fn find_unreminded_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Event>>;
    /// Atomically claims the reminder for an event. Returns false when
    /// another sweep already claimed it, so a reminder goes out at most
    /// once per event.
    async fn mark_reminder_sent(&self, event_id: &ID) -> anyhow::Result<bool>;
}
