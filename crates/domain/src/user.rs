use crate::shared::{entity::Entity, user_id::UserId};
use serde::{Deserialize, Serialize};

/// Account holder, created lazily the first time an authenticated
/// request carries an unknown subject. The email can be absent until a
/// token (or the identity provider's profile endpoint) supplies one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
    pub description: Option<String>,
    pub wants_notifications: bool,
}

impl User {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            name: String::new(),
            surname: None,
            email: None,
            picture: None,
            description: None,
            wants_notifications: true,
        }
    }
}

impl Entity<UserId> for User {
    fn id(&self) -> UserId {
        self.id.clone()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Best-effort display name from an email local-part, used when the
/// token carries no name claim. "ana.novak@x.si" becomes ("Ana", Some("Novak")).
pub fn parse_name_from_email(email: &str) -> (String, Option<String>) {
    let local = email.split('@').next().unwrap_or_default();
    let mut parts = local.splitn(2, |c| c == '.' || c == '_' || c == '-');
    let name = parts.next().unwrap_or_default();
    match parts.next() {
        Some(surname) if !surname.is_empty() => (capitalize(name), Some(capitalize(surname))),
        _ => (capitalize(local), None),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn splits_local_part_on_separators() {
        assert_eq!(
            parse_name_from_email("ana.novak@example.com"),
            ("Ana".to_string(), Some("Novak".to_string()))
        );
        assert_eq!(
            parse_name_from_email("bor_kovac@example.com"),
            ("Bor".to_string(), Some("Kovac".to_string()))
        );
    }

    #[test]
    fn falls_back_to_whole_local_part() {
        assert_eq!(
            parse_name_from_email("ana@example.com"),
            ("Ana".to_string(), None)
        );
    }

    #[test]
    fn handles_empty_email() {
        assert_eq!(parse_name_from_email(""), (String::new(), None));
    }
}
