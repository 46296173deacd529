use crate::dtos::{PublicUserDTO, UserDTO};
use eventease_domain::{User, UserId};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user: UserDTO,
}

impl UserResponse {
    pub fn new(user: User) -> Self {
        Self {
            user: UserDTO::new(user),
        }
    }
}

pub mod get_me {
    use super::*;

    pub type APIResponse = UserResponse;
}

pub mod update_me {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: Option<String>,
        pub surname: Option<String>,
        pub picture: Option<String>,
        pub description: Option<String>,
        pub wants_notifications: Option<bool>,
    }

    pub type APIResponse = UserResponse;
}

pub mod delete_me {
    use super::*;

    pub type APIResponse = UserResponse;
}

pub mod get_user {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub user_id: UserId,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub user: PublicUserDTO,
    }

    impl APIResponse {
        pub fn new(user: User) -> Self {
            Self {
                user: PublicUserDTO::new(user),
            }
        }
    }
}

pub mod search_users {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct QueryParams {
        pub query: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub users: Vec<PublicUserDTO>,
    }

    impl APIResponse {
        pub fn new(users: Vec<User>) -> Self {
            Self {
                users: users.into_iter().map(PublicUserDTO::new).collect(),
            }
        }
    }
}

pub mod upload_image {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub url: String,
    }
}
