use crate::shared::{entity::Entity, entity::ID, user_id::UserId};
use serde::{Deserialize, Serialize};

/// Who is attending. A signup is either bound to an account or
/// anonymous; the duplicate-prevention rule follows the variant:
/// account signups are unique per (event, user), anonymous signups per
/// (event, email).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Attendee {
    Account { user_id: UserId },
    Anonymous,
}

impl Attendee {
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Attendee::Account { user_id } => Some(user_id),
            Attendee::Anonymous => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSignup {
    pub id: ID,
    pub event_id: ID,
    pub attendee: Attendee,
    pub name: String,
    pub surname: Option<String>,
    pub age: Option<i32>,
    /// Always resolved before the signup is persisted: the explicit
    /// input, else the account's email. Confirmation delivery depends
    /// on it even for anonymous attendees.
    pub email: String,
}

impl EventSignup {
    pub fn new(event_id: ID, attendee: Attendee, name: String, email: String) -> Self {
        Self {
            id: Default::default(),
            event_id,
            attendee,
            name,
            surname: None,
            age: None,
            email,
        }
    }
}

impl Entity<ID> for EventSignup {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
