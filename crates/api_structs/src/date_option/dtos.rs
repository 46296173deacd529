use chrono::{DateTime, Utc};
use eventease_domain::{DateVote, EventDateOption, UserId, ID};
use serde::{Deserialize, Serialize};

/// A candidate date together with who voted for it, so clients can
/// tally votes without an extra round trip.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DateOptionDTO {
    pub id: ID,
    pub event_id: ID,
    pub date: DateTime<Utc>,
    pub is_final: bool,
    pub voters: Vec<UserId>,
}

impl DateOptionDTO {
    pub fn new(option: EventDateOption, votes: &[DateVote]) -> Self {
        let voters = votes
            .iter()
            .filter(|v| v.date_option_id == option.id)
            .map(|v| v.user_id.clone())
            .collect();
        Self {
            id: option.id,
            event_id: option.event_id,
            date: option.date,
            is_final: option.is_final,
            voters,
        }
    }
}
