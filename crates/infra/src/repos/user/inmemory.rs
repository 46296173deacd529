use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use eventease_domain::{User, UserId};

pub struct InMemoryUserRepo {
    users: std::sync::Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        insert(user, &self.users);
        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        save(user, &self.users);
        Ok(())
    }

    async fn find(&self, user_id: &UserId) -> Option<User> {
        find(user_id, &self.users)
    }

    async fn find_many(&self, user_ids: &[UserId]) -> anyhow::Result<Vec<User>> {
        Ok(find_by(&self.users, |u| user_ids.contains(&u.id)))
    }

    async fn delete(&self, user_id: &UserId) -> Option<User> {
        delete(user_id, &self.users)
    }

    async fn search(&self, query: &str) -> anyhow::Result<Vec<User>> {
        let query = query.to_lowercase();
        Ok(find_by(&self.users, |u| {
            u.name.to_lowercase().contains(&query)
                || u.surname
                    .as_ref()
                    .map(|s| s.to_lowercase().contains(&query))
                    .unwrap_or(false)
        }))
    }
}
