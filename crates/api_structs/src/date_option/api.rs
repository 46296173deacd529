use crate::dtos::{DateOptionDTO, EventDTO};
use chrono::{DateTime, Utc};
use eventease_domain::{DateVote, Event, EventDateOption, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateOptionResponse {
    pub date_option: DateOptionDTO,
}

impl DateOptionResponse {
    pub fn new(option: EventDateOption, votes: &[DateVote]) -> Self {
        Self {
            date_option: DateOptionDTO::new(option, votes),
        }
    }
}

pub mod add_date_options {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    pub struct RequestBody {
        pub dates: Vec<DateTime<Utc>>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub date_options: Vec<DateOptionDTO>,
    }

    impl APIResponse {
        pub fn new(options: Vec<EventDateOption>) -> Self {
            Self {
                date_options: options
                    .into_iter()
                    .map(|o| DateOptionDTO::new(o, &[]))
                    .collect(),
            }
        }
    }
}

pub mod vote_date_option {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub date_option_id: ID,
    }

    pub type APIResponse = DateOptionResponse;
}

pub mod remove_vote {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub date_option_id: ID,
    }

    pub type APIResponse = DateOptionResponse;
}

pub mod finalize_date_option {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub date_option_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub event: EventDTO,
        pub date_option: DateOptionDTO,
    }

    impl APIResponse {
        pub fn new(event: Event, option: EventDateOption, votes: &[DateVote]) -> Self {
            Self {
                event: EventDTO::new(event),
                date_option: DateOptionDTO::new(option, votes),
            }
        }
    }
}
