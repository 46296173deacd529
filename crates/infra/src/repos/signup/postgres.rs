use super::{ISignupRepo, SignupInsert};
use eventease_domain::{Attendee, EventSignup, UserId, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresSignupRepo {
    pool: PgPool,
}

impl PostgresSignupRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SignupRaw {
    signup_uid: Uuid,
    event_uid: Uuid,
    user_id: Option<String>,
    name: String,
    surname: Option<String>,
    age: Option<i32>,
    email: String,
}

impl From<SignupRaw> for EventSignup {
    fn from(raw: SignupRaw) -> Self {
        Self {
            id: raw.signup_uid.into(),
            event_id: raw.event_uid.into(),
            attendee: match raw.user_id {
                Some(user_id) => Attendee::Account {
                    user_id: UserId::new(user_id),
                },
                None => Attendee::Anonymous,
            },
            name: raw.name,
            surname: raw.surname,
            age: raw.age,
            email: raw.email,
        }
    }
}

#[async_trait::async_trait]
impl ISignupRepo for PostgresSignupRepo {
    async fn try_insert(
        &self,
        signup: &EventSignup,
        max_signups: Option<i32>,
    ) -> anyhow::Result<SignupInsert> {
        // Signups for one event serialize on its events row. The count
        // subquery alone is not enough under READ COMMITTED: two racing
        // inserts for the last seat would both count before either row
        // is visible. Holding the row lock while counting closes that
        // window; the unique indexes still arbitrate duplicates.
        let mut tx = self.pool.begin().await?;
        sqlx::query("SELECT event_uid FROM events WHERE event_uid = $1 FOR UPDATE")
            .bind(signup.event_id.inner_ref())
            .execute(&mut *tx)
            .await?;

        let res = sqlx::query(
            r#"
            INSERT INTO event_signups(signup_uid, event_uid, user_id, name, surname, age, email)
            SELECT $1, $2, $3, $4, $5, $6, $7
            WHERE $8::int IS NULL
               OR (SELECT COUNT(*) FROM event_signups WHERE event_uid = $2) < $8
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(signup.id.inner_ref())
        .bind(signup.event_id.inner_ref())
        .bind(signup.attendee.user_id().map(|u| u.as_str().to_string()))
        .bind(&signup.name)
        .bind(&signup.surname)
        .bind(signup.age)
        .bind(&signup.email)
        .bind(max_signups)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        if res.rows_affected() > 0 {
            return Ok(SignupInsert::Inserted);
        }

        // Rejected insert: a unique-index conflict means a duplicate,
        // otherwise the guard filtered the row out.
        let duplicate = match signup.attendee.user_id() {
            Some(user_id) => self
                .find_by_event_and_user(&signup.event_id, user_id)
                .await
                .is_some(),
            None => self
                .find_by_event_and_email(&signup.event_id, &signup.email)
                .await
                .is_some(),
        };
        if duplicate {
            Ok(SignupInsert::Duplicate)
        } else {
            Ok(SignupInsert::CapacityExceeded)
        }
    }

    async fn find(&self, signup_id: &ID) -> Option<EventSignup> {
        let res: Result<Option<SignupRaw>, _> =
            sqlx::query_as("SELECT * FROM event_signups WHERE signup_uid = $1")
                .bind(signup_id.inner_ref())
                .fetch_optional(&self.pool)
                .await;

        match res {
            Ok(raw) => raw.map(EventSignup::from),
            Err(e) => {
                error!(
                    "Find signup with id: {} failed with error: {:?}",
                    signup_id, e
                );
                None
            }
        }
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<EventSignup>> {
        let signups: Vec<SignupRaw> =
            sqlx::query_as("SELECT * FROM event_signups WHERE event_uid = $1")
                .bind(event_id.inner_ref())
                .fetch_all(&self.pool)
                .await?;

        Ok(signups.into_iter().map(EventSignup::from).collect())
    }

    async fn find_by_user(&self, user_id: &UserId) -> anyhow::Result<Vec<EventSignup>> {
        let signups: Vec<SignupRaw> =
            sqlx::query_as("SELECT * FROM event_signups WHERE user_id = $1")
                .bind(user_id.as_str())
                .fetch_all(&self.pool)
                .await?;

        Ok(signups.into_iter().map(EventSignup::from).collect())
    }

    async fn find_by_event_and_user(
        &self,
        event_id: &ID,
        user_id: &UserId,
    ) -> Option<EventSignup> {
        let res: Result<Option<SignupRaw>, _> =
            sqlx::query_as("SELECT * FROM event_signups WHERE event_uid = $1 AND user_id = $2")
                .bind(event_id.inner_ref())
                .bind(user_id.as_str())
                .fetch_optional(&self.pool)
                .await;

        match res {
            Ok(raw) => raw.map(EventSignup::from),
            Err(e) => {
                error!(
                    "Find signup for event: {} and user: {} failed with error: {:?}",
                    event_id, user_id, e
                );
                None
            }
        }
    }

    async fn find_by_event_and_email(&self, event_id: &ID, email: &str) -> Option<EventSignup> {
        let res: Result<Option<SignupRaw>, _> = sqlx::query_as(
            r#"
            SELECT * FROM event_signups
            WHERE event_uid = $1 AND user_id IS NULL AND email = $2
            "#,
        )
        .bind(event_id.inner_ref())
        .bind(email)
        .fetch_optional(&self.pool)
        .await;

        match res {
            Ok(raw) => raw.map(EventSignup::from),
            Err(e) => {
                error!(
                    "Find anonymous signup for event: {} failed with error: {:?}",
                    event_id, e
                );
                None
            }
        }
    }

    async fn delete(&self, signup_id: &ID) -> Option<EventSignup> {
        let res: Result<Option<SignupRaw>, _> =
            sqlx::query_as("DELETE FROM event_signups WHERE signup_uid = $1 RETURNING *")
                .bind(signup_id.inner_ref())
                .fetch_optional(&self.pool)
                .await;

        match res {
            Ok(raw) => raw.map(EventSignup::from),
            Err(e) => {
                error!(
                    "Delete signup with id: {} failed with error: {:?}",
                    signup_id, e
                );
                None
            }
        }
    }

    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM event_signups WHERE event_uid = $1")
            .bind(event_id.inner_ref())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_by_user(&self, user_id: &UserId) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM event_signups WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
