use eventease_domain::{User, UserId};
use serde::{Deserialize, Serialize};

/// The caller's own profile
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: UserId,
    pub name: String,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
    pub description: Option<String>,
    pub wants_notifications: bool,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            surname: user.surname,
            email: user.email,
            picture: user.picture,
            description: user.description,
            wants_notifications: user.wants_notifications,
        }
    }
}

/// Profile as seen by other users. No email exposure.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserDTO {
    pub id: UserId,
    pub name: String,
    pub surname: Option<String>,
    pub picture: Option<String>,
    pub description: Option<String>,
}

impl PublicUserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            surname: user.surname,
            picture: user.picture,
            description: user.description,
        }
    }
}
