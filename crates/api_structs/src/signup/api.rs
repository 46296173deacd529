use crate::dtos::SignupDTO;
use eventease_domain::{EventSignup, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub signup: SignupDTO,
}

impl SignupResponse {
    pub fn new(signup: EventSignup) -> Self {
        Self {
            signup: SignupDTO::new(signup),
        }
    }
}

pub mod create_signup {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// Defaults to the caller's profile name for account signups
        pub name: Option<String>,
        pub surname: Option<String>,
        pub age: Option<i32>,
        /// Contact address. Falls back to the caller's account email.
        pub email: Option<String>,
    }

    pub type APIResponse = SignupResponse;
}

pub mod cancel_signup {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = SignupResponse;
}

pub mod remove_signup {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
        pub signup_id: ID,
    }

    pub type APIResponse = SignupResponse;
}

pub mod get_event_signups {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub signups: Vec<SignupDTO>,
    }

    impl APIResponse {
        pub fn new(signups: Vec<EventSignup>) -> Self {
            Self {
                signups: signups.into_iter().map(SignupDTO::new).collect(),
            }
        }
    }
}

pub mod get_user_signups {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub event_ids: Vec<ID>,
    }

    impl APIResponse {
        pub fn new(signups: Vec<EventSignup>) -> Self {
            Self {
                event_ids: signups.into_iter().map(|s| s.event_id).collect(),
            }
        }
    }
}
