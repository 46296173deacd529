use crate::shared::{entity::Entity, entity::ID, user_id::UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Candidate date for an event with multi-date voting. Starts out
/// proposed and can be finalized by the owner exactly once per event:
/// finalizing clears `is_final` on every sibling first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDateOption {
    pub id: ID,
    pub event_id: ID,
    pub date: DateTime<Utc>,
    pub is_final: bool,
}

impl EventDateOption {
    pub fn new(event_id: ID, date: DateTime<Utc>) -> Self {
        Self {
            id: Default::default(),
            event_id,
            date,
            is_final: false,
        }
    }
}

impl Entity<ID> for EventDateOption {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

/// One vote by one account for one candidate date. The (voter, option)
/// pair is unique, which the persistence layer enforces with a
/// conditional insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateVote {
    pub id: ID,
    pub date_option_id: ID,
    pub user_id: UserId,
}

impl DateVote {
    pub fn new(date_option_id: ID, user_id: UserId) -> Self {
        Self {
            id: Default::default(),
            date_option_id,
            user_id,
        }
    }
}

impl Entity<ID> for DateVote {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
