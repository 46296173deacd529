mod inmemory;
mod postgres;

use eventease_domain::{EventSignup, UserId, ID};
pub use inmemory::InMemorySignupRepo;
pub use postgres::PostgresSignupRepo;

/// Outcome of the guarded signup insert. Duplicate prevention and the
/// capacity cap are enforced by the write itself, not by a separate
/// read, so two racing signups cannot both get in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupInsert {
    Inserted,
    Duplicate,
    CapacityExceeded,
}

#[async_trait::async_trait]
pub trait ISignupRepo: Send + Sync {
    async fn try_insert(
        &self,
        signup: &EventSignup,
        max_signups: Option<i32>,
    ) -> anyhow::Result<SignupInsert>;
    async fn find(&self, signup_id: &ID) -> Option<EventSignup>;
    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<EventSignup>>;
    async fn find_by_user(&self, user_id: &UserId) -> anyhow::Result<Vec<EventSignup>>;
    async fn find_by_event_and_user(&self, event_id: &ID, user_id: &UserId)
        -> Option<EventSignup>;
    async fn find_by_event_and_email(&self, event_id: &ID, email: &str) -> Option<EventSignup>;
    async fn delete(&self, signup_id: &ID) -> Option<EventSignup>;
    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<()>;
    async fn delete_by_user(&self, user_id: &UserId) -> anyhow::Result<()>;
}
