use super::IDateOptionRepo;
use crate::repos::shared::inmemory_repo::*;
use eventease_domain::{EventDateOption, ID};

pub struct InMemoryDateOptionRepo {
    options: std::sync::Mutex<Vec<EventDateOption>>,
}

impl InMemoryDateOptionRepo {
    pub fn new() -> Self {
        Self {
            options: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IDateOptionRepo for InMemoryDateOptionRepo {
    async fn insert_many(&self, options: &[EventDateOption]) -> anyhow::Result<()> {
        for option in options {
            insert(option, &self.options);
        }
        Ok(())
    }

    async fn find(&self, date_option_id: &ID) -> Option<EventDateOption> {
        find(date_option_id, &self.options)
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<EventDateOption>> {
        let mut options = find_by(&self.options, |o| o.event_id == *event_id);
        options.sort_by_key(|o| o.date);
        Ok(options)
    }

    async fn set_final(&self, option: &EventDateOption) -> anyhow::Result<()> {
        let mut options = self.options.lock().unwrap();
        for o in options.iter_mut() {
            if o.event_id == option.event_id {
                o.is_final = o.id == option.id;
            }
        }
        Ok(())
    }

    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<()> {
        delete_by(&self.options, |o| o.event_id == *event_id);
        Ok(())
    }
}
