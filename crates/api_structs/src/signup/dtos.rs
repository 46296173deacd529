use eventease_domain::{EventSignup, UserId, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SignupDTO {
    pub id: ID,
    pub event_id: ID,
    /// Present for account-bound signups, absent for anonymous ones
    pub user_id: Option<UserId>,
    pub name: String,
    pub surname: Option<String>,
    pub age: Option<i32>,
    pub email: String,
}

impl SignupDTO {
    pub fn new(signup: EventSignup) -> Self {
        Self {
            id: signup.id,
            event_id: signup.event_id,
            user_id: signup.attendee.user_id().cloned(),
            name: signup.name,
            surname: signup.surname,
            age: signup.age,
            email: signup.email,
        }
    }
}
