use super::{ISignupRepo, SignupInsert};
use crate::repos::shared::inmemory_repo::*;
use eventease_domain::{EventSignup, UserId, ID};

pub struct InMemorySignupRepo {
    signups: std::sync::Mutex<Vec<EventSignup>>,
}

impl InMemorySignupRepo {
    pub fn new() -> Self {
        Self {
            signups: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ISignupRepo for InMemorySignupRepo {
    async fn try_insert(
        &self,
        signup: &EventSignup,
        max_signups: Option<i32>,
    ) -> anyhow::Result<SignupInsert> {
        // Duplicate check, capacity check and insert under one lock
        let mut signups = self.signups.lock().unwrap();
        let duplicate = signups.iter().any(|s| {
            s.event_id == signup.event_id
                && match signup.attendee.user_id() {
                    Some(user_id) => s.attendee.user_id() == Some(user_id),
                    None => s.attendee.user_id().is_none() && s.email == signup.email,
                }
        });
        if duplicate {
            return Ok(SignupInsert::Duplicate);
        }
        if let Some(max) = max_signups {
            let count = signups
                .iter()
                .filter(|s| s.event_id == signup.event_id)
                .count();
            if count >= max as usize {
                return Ok(SignupInsert::CapacityExceeded);
            }
        }
        signups.push(signup.clone());
        Ok(SignupInsert::Inserted)
    }

    async fn find(&self, signup_id: &ID) -> Option<EventSignup> {
        find(signup_id, &self.signups)
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<EventSignup>> {
        Ok(find_by(&self.signups, |s| s.event_id == *event_id))
    }

    async fn find_by_user(&self, user_id: &UserId) -> anyhow::Result<Vec<EventSignup>> {
        Ok(find_by(&self.signups, |s| {
            s.attendee.user_id() == Some(user_id)
        }))
    }

    async fn find_by_event_and_user(
        &self,
        event_id: &ID,
        user_id: &UserId,
    ) -> Option<EventSignup> {
        find_by(&self.signups, |s| {
            s.event_id == *event_id && s.attendee.user_id() == Some(user_id)
        })
        .into_iter()
        .next()
    }

    async fn find_by_event_and_email(&self, event_id: &ID, email: &str) -> Option<EventSignup> {
        find_by(&self.signups, |s| {
            s.event_id == *event_id && s.attendee.user_id().is_none() && s.email == email
        })
        .into_iter()
        .next()
    }

    async fn delete(&self, signup_id: &ID) -> Option<EventSignup> {
        delete(signup_id, &self.signups)
    }

    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<()> {
        delete_by(&self.signups, |s| s.event_id == *event_id);
        Ok(())
    }

    async fn delete_by_user(&self, user_id: &UserId) -> anyhow::Result<()> {
        delete_by(&self.signups, |s| s.attendee.user_id() == Some(user_id));
        Ok(())
    }
}
