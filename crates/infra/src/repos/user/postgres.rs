use super::IUserRepo;
use eventease_domain::{User, UserId};
use sqlx::{FromRow, PgPool};
use tracing::error;

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_id: String,
    name: String,
    surname: Option<String>,
    email: Option<String>,
    picture: Option<String>,
    description: Option<String>,
    wants_notifications: bool,
}

impl From<UserRaw> for User {
    fn from(raw: UserRaw) -> Self {
        Self {
            id: UserId::new(raw.user_id),
            name: raw.name,
            surname: raw.surname,
            email: raw.email,
            picture: raw.picture,
            description: raw.description,
            wants_notifications: raw.wants_notifications,
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users(user_id, name, surname, email, picture, description, wants_notifications)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id.as_str())
        .bind(&user.name)
        .bind(&user.surname)
        .bind(&user.email)
        .bind(&user.picture)
        .bind(&user.description)
        .bind(user.wants_notifications)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                surname = $3,
                email = $4,
                picture = $5,
                description = $6,
                wants_notifications = $7
            WHERE user_id = $1
            "#,
        )
        .bind(user.id.as_str())
        .bind(&user.name)
        .bind(&user.surname)
        .bind(&user.email)
        .bind(&user.picture)
        .bind(&user.description)
        .bind(user.wants_notifications)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, user_id: &UserId) -> Option<User> {
        let res: Result<Option<UserRaw>, _> = sqlx::query_as(
            r#"
            SELECT * FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await;

        match res {
            Ok(raw) => raw.map(User::from),
            Err(e) => {
                error!("Find user with id: {} failed with error: {:?}", user_id, e);
                None
            }
        }
    }

    async fn find_many(&self, user_ids: &[UserId]) -> anyhow::Result<Vec<User>> {
        let ids: Vec<String> = user_ids.iter().map(|id| id.as_str().to_string()).collect();
        let users: Vec<UserRaw> = sqlx::query_as(
            r#"
            SELECT * FROM users
            WHERE user_id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(users.into_iter().map(User::from).collect())
    }

    async fn delete(&self, user_id: &UserId) -> Option<User> {
        let res: Result<Option<UserRaw>, _> = sqlx::query_as(
            r#"
            DELETE FROM users
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await;

        match res {
            Ok(raw) => raw.map(User::from),
            Err(e) => {
                error!(
                    "Delete user with id: {} failed with error: {:?}",
                    user_id, e
                );
                None
            }
        }
    }

    async fn search(&self, query: &str) -> anyhow::Result<Vec<User>> {
        let users: Vec<UserRaw> = sqlx::query_as(
            r#"
            SELECT * FROM users
            WHERE name ILIKE '%' || $1 || '%' OR surname ILIKE '%' || $1 || '%'
            ORDER BY name ASC
            "#,
        )
        .bind(query)
        .fetch_all(&self.pool)
        .await?;

        Ok(users.into_iter().map(User::from).collect())
    }
}
