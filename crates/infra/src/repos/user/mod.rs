mod inmemory;
mod postgres;

use eventease_domain::{User, UserId};
pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn save(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &UserId) -> Option<User>;
    async fn find_many(&self, user_ids: &[UserId]) -> anyhow::Result<Vec<User>>;
    async fn delete(&self, user_id: &UserId) -> Option<User>;
    /// Name or surname substring search for the public user search
    async fn search(&self, query: &str) -> anyhow::Result<Vec<User>>;
}
