use super::IDateVoteRepo;
use crate::repos::shared::inmemory_repo::*;
use eventease_domain::{DateVote, UserId, ID};

pub struct InMemoryDateVoteRepo {
    votes: std::sync::Mutex<Vec<DateVote>>,
}

impl InMemoryDateVoteRepo {
    pub fn new() -> Self {
        Self {
            votes: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IDateVoteRepo for InMemoryDateVoteRepo {
    async fn try_insert(&self, vote: &DateVote) -> anyhow::Result<bool> {
        // Check and insert under one lock, like the unique index does
        let mut votes = self.votes.lock().unwrap();
        let duplicate = votes
            .iter()
            .any(|v| v.date_option_id == vote.date_option_id && v.user_id == vote.user_id);
        if duplicate {
            return Ok(false);
        }
        votes.push(vote.clone());
        Ok(true)
    }

    async fn delete_by_option_and_user(
        &self,
        date_option_id: &ID,
        user_id: &UserId,
    ) -> Option<DateVote> {
        delete_by(&self.votes, |v| {
            v.date_option_id == *date_option_id && v.user_id == *user_id
        })
        .into_iter()
        .next()
    }

    async fn find_by_options(&self, date_option_ids: &[ID]) -> anyhow::Result<Vec<DateVote>> {
        Ok(find_by(&self.votes, |v| {
            date_option_ids.contains(&v.date_option_id)
        }))
    }

    async fn delete_by_options(&self, date_option_ids: &[ID]) -> anyhow::Result<()> {
        delete_by(&self.votes, |v| date_option_ids.contains(&v.date_option_id));
        Ok(())
    }

    async fn delete_by_user(&self, user_id: &UserId) -> anyhow::Result<()> {
        delete_by(&self.votes, |v| v.user_id == *user_id);
        Ok(())
    }
}
