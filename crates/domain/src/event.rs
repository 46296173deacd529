use crate::shared::{entity::Entity, entity::ID, user_id::UserId};
use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventVisibility {
    Public,
    Private,
    Selected,
}

impl Default for EventVisibility {
    fn default() -> Self {
        Self::Public
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
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
    /// Viewers allowed to see the event when `visibility` is `Selected`.
    /// Empty for any other visibility.
    pub allow_list: Vec<UserId>,
    pub signup_deadline: Option<DateTime<Utc>>,
    pub is_featured: bool,
    /// Monotonic: flips to true once the reminder sweep has claimed the
    /// event, and is never reset.
    pub reminder_sent: bool,
}

impl Event {
    pub fn new(owner_id: UserId, title: String, start_time: DateTime<Utc>) -> Self {
        Self {
            id: Default::default(),
            title,
            description: None,
            start_time,
            location: None,
            image_url: None,
            owner_id,
            allow_signup: false,
            max_signups: None,
            visibility: EventVisibility::Public,
            allow_list: Vec::new(),
            signup_deadline: None,
            is_featured: false,
            reminder_sent: false,
        }
    }

    pub fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id == *user_id
    }

    /// The visibility rule: public events are visible to everyone,
    /// private events only to their owner, selected events to the owner
    /// and the allow-listed viewers. Anonymous viewers only ever see
    /// public events.
    pub fn is_visible_to(&self, viewer: Option<&UserId>) -> bool {
        match self.visibility {
            EventVisibility::Public => true,
            EventVisibility::Private => viewer.map(|v| self.is_owner(v)).unwrap_or(false),
            EventVisibility::Selected => viewer
                .map(|v| self.is_owner(v) || self.allow_list.contains(v))
                .unwrap_or(false),
        }
    }

    /// Replaces the allow-list wholesale. Duplicates are dropped and the
    /// list is cleared when the event is not `Selected`.
    pub fn set_allow_list(&mut self, viewers: Vec<UserId>) {
        self.allow_list = match self.visibility {
            EventVisibility::Selected => viewers.into_iter().unique().collect(),
            _ => Vec::new(),
        };
    }

    pub fn signup_open(&self, now: DateTime<Utc>) -> bool {
        if !self.allow_signup {
            return false;
        }
        match self.signup_deadline {
            Some(deadline) => now <= deadline,
            None => true,
        }
    }
}

impl Entity<ID> for Event {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Duration;

    fn event_with_visibility(visibility: EventVisibility) -> Event {
        let mut e = Event::new(
            UserId::new("auth0|owner"),
            "Picnic".into(),
            Utc::now() + Duration::days(7),
        );
        e.visibility = visibility;
        e
    }

    #[test]
    fn public_event_is_visible_to_everyone() {
        let e = event_with_visibility(EventVisibility::Public);
        assert!(e.is_visible_to(None));
        assert!(e.is_visible_to(Some(&UserId::new("auth0|owner"))));
        assert!(e.is_visible_to(Some(&UserId::new("auth0|stranger"))));
    }

    #[test]
    fn private_event_is_visible_only_to_owner() {
        let e = event_with_visibility(EventVisibility::Private);
        assert!(e.is_visible_to(Some(&UserId::new("auth0|owner"))));
        assert!(!e.is_visible_to(Some(&UserId::new("auth0|stranger"))));
        assert!(!e.is_visible_to(None));
    }

    #[test]
    fn selected_event_is_visible_to_owner_and_allow_list() {
        let mut e = event_with_visibility(EventVisibility::Selected);
        e.set_allow_list(vec![UserId::new("auth0|u1"), UserId::new("auth0|u2")]);

        assert!(e.is_visible_to(Some(&UserId::new("auth0|owner"))));
        assert!(e.is_visible_to(Some(&UserId::new("auth0|u1"))));
        assert!(e.is_visible_to(Some(&UserId::new("auth0|u2"))));
        assert!(!e.is_visible_to(Some(&UserId::new("auth0|u3"))));
        assert!(!e.is_visible_to(None));
    }

    #[test]
    fn allow_list_is_deduplicated() {
        let mut e = event_with_visibility(EventVisibility::Selected);
        e.set_allow_list(vec![
            UserId::new("auth0|u1"),
            UserId::new("auth0|u1"),
            UserId::new("auth0|u2"),
        ]);
        assert_eq!(e.allow_list.len(), 2);
    }

    #[test]
    fn allow_list_is_cleared_for_non_selected_visibility() {
        let mut e = event_with_visibility(EventVisibility::Public);
        e.set_allow_list(vec![UserId::new("auth0|u1")]);
        assert!(e.allow_list.is_empty());
    }

    #[test]
    fn signup_window_respects_deadline() {
        let now = Utc::now();
        let mut e = event_with_visibility(EventVisibility::Public);
        assert!(!e.signup_open(now));

        e.allow_signup = true;
        assert!(e.signup_open(now));

        e.signup_deadline = Some(now - Duration::hours(1));
        assert!(!e.signup_open(now));

        e.signup_deadline = Some(now + Duration::hours(1));
        assert!(e.signup_open(now));
    }
}
