mod inmemory;
mod postgres;

use eventease_domain::{DateVote, UserId, ID};
pub use inmemory::InMemoryDateVoteRepo;
pub use postgres::PostgresDateVoteRepo;

#[async_trait::async_trait]
pub trait IDateVoteRepo: Send + Sync {
    /// Conditionally inserts the vote. Returns false when the voter
    /// already has a vote for the option, without racing a concurrent
    /// insert of the same pair.
    async fn try_insert(&self, vote: &DateVote) -> anyhow::Result<bool>;
    async fn delete_by_option_and_user(
        &self,
        date_option_id: &ID,
        user_id: &UserId,
    ) -> Option<DateVote>;
    async fn find_by_options(&self, date_option_ids: &[ID]) -> anyhow::Result<Vec<DateVote>>;
    async fn delete_by_options(&self, date_option_ids: &[ID]) -> anyhow::Result<()>;
    async fn delete_by_user(&self, user_id: &UserId) -> anyhow::Result<()>;
}
