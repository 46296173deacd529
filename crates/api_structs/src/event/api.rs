use crate::dtos::{DateOptionDTO, EventDTO, PublicUserDTO};
use chrono::{DateTime, NaiveDate, Utc};
use eventease_domain::{DateVote, Event, EventDateOption, EventVisibility, User, UserId, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub event: EventDTO,
}

impl EventResponse {
    pub fn new(event: Event) -> Self {
        Self {
            event: EventDTO::new(event),
        }
    }
}

pub mod create_event {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        pub description: Option<String>,
        pub start_time: DateTime<Utc>,
        pub location: Option<String>,
        pub image_url: Option<String>,
        #[serde(default)]
        pub allow_signup: bool,
        pub max_signups: Option<i32>,
        #[serde(default)]
        pub visibility: EventVisibility,
        #[serde(default)]
        pub allow_list: Vec<UserId>,
        pub signup_deadline: Option<DateTime<Utc>>,
        #[serde(default)]
        pub is_featured: bool,
        /// Candidate dates inserted together with the event
        #[serde(default)]
        pub date_options: Vec<DateTime<Utc>>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub event: EventDTO,
        pub date_options: Vec<DateOptionDTO>,
    }

    impl APIResponse {
        pub fn new(event: Event, options: Vec<EventDateOption>) -> Self {
            Self {
                event: EventDTO::new(event),
                date_options: options
                    .into_iter()
                    .map(|o| DateOptionDTO::new(o, &[]))
                    .collect(),
            }
        }
    }
}

pub mod get_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub event: EventDTO,
        pub organizer: Option<PublicUserDTO>,
        pub date_options: Vec<DateOptionDTO>,
    }

    impl APIResponse {
        pub fn new(
            event: Event,
            organizer: Option<User>,
            options: Vec<EventDateOption>,
            votes: &[DateVote],
        ) -> Self {
            Self {
                event: EventDTO::new(event),
                organizer: organizer.map(PublicUserDTO::new),
                date_options: options
                    .into_iter()
                    .map(|o| DateOptionDTO::new(o, votes))
                    .collect(),
            }
        }
    }
}

pub mod get_events {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        /// Title or description substring
        pub text: Option<String>,
        pub location: Option<String>,
        /// Restrict to events starting on this calendar day (UTC)
        pub day: Option<NaiveDate>,
        /// Organizer name substring
        pub organizer: Option<String>,
        #[serde(default)]
        pub only_mine: bool,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub events: Vec<EventDTO>,
    }

    impl APIResponse {
        pub fn new(events: Vec<Event>) -> Self {
            Self {
                events: events.into_iter().map(EventDTO::new).collect(),
            }
        }
    }
}

pub mod get_featured_event {
    use super::*;

    pub type APIResponse = EventResponse;
}

pub mod update_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        pub description: Option<String>,
        pub start_time: DateTime<Utc>,
        pub location: Option<String>,
        pub image_url: Option<String>,
        #[serde(default)]
        pub allow_signup: bool,
        pub max_signups: Option<i32>,
        #[serde(default)]
        pub visibility: EventVisibility,
        #[serde(default)]
        pub allow_list: Vec<UserId>,
        pub signup_deadline: Option<DateTime<Utc>>,
        #[serde(default)]
        pub is_featured: bool,
    }

    pub type APIResponse = EventResponse;
}

pub mod delete_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = EventResponse;
}
