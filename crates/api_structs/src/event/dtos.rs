use chrono::{DateTime, Utc};
use eventease_domain::{Event, EventVisibility, UserId, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EventDTO {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub owner_id: UserId,
    pub allow_signup: bool,
    pub max_signups: Option<i32>,
    pub visibility: EventVisibility,
    pub allow_list: Vec<UserId>,
    pub signup_deadline: Option<DateTime<Utc>>,
    pub is_featured: bool,
}

impl EventDTO {
    pub fn new(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            start_time: event.start_time,
            location: event.location,
            image_url: event.image_url,
            owner_id: event.owner_id,
            allow_signup: event.allow_signup,
            max_signups: event.max_signups,
            visibility: event.visibility,
            allow_list: event.allow_list,
            signup_deadline: event.signup_deadline,
            is_featured: event.is_featured,
        }
    }
}
