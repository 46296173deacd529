mod date_option;
mod date_vote;
mod event;
mod shared;
mod signup;
mod user;

use date_option::{IDateOptionRepo, InMemoryDateOptionRepo, PostgresDateOptionRepo};
use date_vote::{IDateVoteRepo, InMemoryDateVoteRepo, PostgresDateVoteRepo};
use event::{IEventRepo, InMemoryEventRepo, PostgresEventRepo};
use signup::{ISignupRepo, InMemorySignupRepo, PostgresSignupRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use user::{IUserRepo, InMemoryUserRepo, PostgresUserRepo};

pub use shared::query_structs::*;
pub use signup::SignupInsert;

#[derive(Clone)]
pub struct Repos {
    pub event_repo: Arc<dyn IEventRepo>,
    pub date_option_repo: Arc<dyn IDateOptionRepo>,
    pub date_vote_repo: Arc<dyn IDateVoteRepo>,
    pub signup_repo: Arc<dyn ISignupRepo>,
    pub user_repo: Arc<dyn IUserRepo>,
}

impl Repos {
    pub async fn create_postgres(
        connection_string: &str,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            event_repo: Arc::new(PostgresEventRepo::new(pool.clone())),
            date_option_repo: Arc::new(PostgresDateOptionRepo::new(pool.clone())),
            date_vote_repo: Arc::new(PostgresDateVoteRepo::new(pool.clone())),
            signup_repo: Arc::new(PostgresSignupRepo::new(pool.clone())),
            user_repo: Arc::new(PostgresUserRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            event_repo: Arc::new(InMemoryEventRepo::new()),
            date_option_repo: Arc::new(InMemoryDateOptionRepo::new()),
            date_vote_repo: Arc::new(InMemoryDateVoteRepo::new()),
            signup_repo: Arc::new(InMemorySignupRepo::new()),
            user_repo: Arc::new(InMemoryUserRepo::new()),
        }
    }
}
