mod inmemory;
mod postgres;

use eventease_domain::{EventDateOption, ID};
pub use inmemory::InMemoryDateOptionRepo;
pub use postgres::PostgresDateOptionRepo;

#[async_trait::async_trait]
pub trait IDateOptionRepo: Send + Sync {
    async fn insert_many(&self, options: &[EventDateOption]) -> anyhow::Result<()>;
    async fn find(&self, date_option_id: &ID) -> Option<EventDateOption>;
    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<EventDateOption>>;
    /// Marks `option` as the final date for its event: clears `is_final`
    /// on every sibling first, so at most one option per event is final.
    async fn set_final(&self, option: &EventDateOption) -> anyhow::Result<()>;
    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<()>;
}
