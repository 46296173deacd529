use super::IEventRepo;
use crate::repos::shared::{inmemory_repo::*, query_structs::EventSearch};
use chrono::{DateTime, Utc};
use eventease_domain::{Event, EventVisibility, UserId, ID};

pub struct InMemoryEventRepo {
    events: std::sync::Mutex<Vec<Event>>,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }
}

fn matches_text(haystack: &Option<String>, needle: &str) -> bool {
    haystack
        .as_ref()
        .map(|h| h.to_lowercase().contains(needle))
        .unwrap_or(false)
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn insert(&self, e: &Event) -> anyhow::Result<()> {
        insert(e, &self.events);
        Ok(())
    }

    async fn save(&self, e: &Event) -> anyhow::Result<()> {
        save(e, &self.events);
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> Option<Event> {
        find(event_id, &self.events)
    }

    async fn delete(&self, event_id: &ID) -> Option<Event> {
        delete(event_id, &self.events)
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> anyhow::Result<Vec<Event>> {
        Ok(find_by(&self.events, |e| e.owner_id == *owner_id))
    }

    async fn search(
        &self,
        viewer: Option<&UserId>,
        search: &EventSearch,
    ) -> anyhow::Result<Vec<Event>> {
        let text = search.text.as_ref().map(|t| t.to_lowercase());
        let location = search.location.as_ref().map(|l| l.to_lowercase());

        let mut events = find_by(&self.events, |e| {
            if !e.is_visible_to(viewer) {
                return false;
            }
            if let Some(text) = &text {
                if !e.title.to_lowercase().contains(text) && !matches_text(&e.description, text) {
                    return false;
                }
            }
            if let Some(location) = &location {
                if !matches_text(&e.location, location) {
                    return false;
                }
            }
            if let Some(organizers) = &search.organizers {
                if !organizers.contains(&e.owner_id) {
                    return false;
                }
            }
            if let Some((from, until)) = &search.starts_between {
                if e.start_time < *from || e.start_time >= *until {
                    return false;
                }
            }
            if let Some(owner_id) = &search.owner_id {
                if e.owner_id != *owner_id {
                    return false;
                }
            }
            true
        });
        events.sort_by_key(|e| e.start_time);

        Ok(events)
    }

    async fn find_featured(&self, now: DateTime<Utc>) -> Option<Event> {
        let mut upcoming = find_by(&self.events, |e| {
            e.visibility == EventVisibility::Public && e.start_time >= now
        });
        upcoming.sort_by_key(|e| (!e.is_featured, e.start_time));
        upcoming.into_iter().next()
    }

    async fn find_unreminded_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Event>> {
        Ok(find_by(&self.events, |e| {
            !e.reminder_sent && e.start_time >= from && e.start_time <= to
        }))
    }

    async fn mark_reminder_sent(&self, event_id: &ID) -> anyhow::Result<bool> {
        let mut events = self.events.lock().unwrap();
        match events
            .iter_mut()
            .find(|e| e.id == *event_id && !e.reminder_sent)
        {
            Some(event) => {
                event.reminder_sent = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
