use chrono::{DateTime, Utc};
use eventease_domain::UserId;

/// Free-text filters for the event listing. Every present filter is
/// AND-combined with the visibility predicate, which is always applied.
#[derive(Debug, Default, Clone)]
pub struct EventSearch {
    /// Substring match against title or description
    pub text: Option<String>,
    /// Substring match against location
    pub location: Option<String>,
    /// Owner ids matching an organizer-name search, resolved by the
    /// caller against the user repo. `Some(vec![])` matches nothing.
    pub organizers: Option<Vec<UserId>>,
    /// Half-open window on the event start time, used for exact-day filtering
    pub starts_between: Option<(DateTime<Utc>, DateTime<Utc>)>,
    /// Restrict to events owned by this user ("only my events")
    pub owner_id: Option<UserId>,
}
