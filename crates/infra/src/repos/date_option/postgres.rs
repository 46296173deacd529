use super::IDateOptionRepo;
use chrono::{DateTime, Utc};
use eventease_domain::{EventDateOption, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresDateOptionRepo {
    pool: PgPool,
}

impl PostgresDateOptionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DateOptionRaw {
    date_option_uid: Uuid,
    event_uid: Uuid,
    date_option: DateTime<Utc>,
    is_final: bool,
}

impl From<DateOptionRaw> for EventDateOption {
    fn from(raw: DateOptionRaw) -> Self {
        Self {
            id: raw.date_option_uid.into(),
            event_id: raw.event_uid.into(),
            date: raw.date_option,
            is_final: raw.is_final,
        }
    }
}

#[async_trait::async_trait]
impl IDateOptionRepo for PostgresDateOptionRepo {
    async fn insert_many(&self, options: &[EventDateOption]) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        for option in options {
            sqlx::query(
                r#"
                INSERT INTO event_date_options(date_option_uid, event_uid, date_option, is_final)
                VALUES($1, $2, $3, $4)
                "#,
            )
            .bind(option.id.inner_ref())
            .bind(option.event_id.inner_ref())
            .bind(option.date)
            .bind(option.is_final)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(())
    }

    async fn find(&self, date_option_id: &ID) -> Option<EventDateOption> {
        let res: Result<Option<DateOptionRaw>, _> = sqlx::query_as(
            r#"
            SELECT * FROM event_date_options
            WHERE date_option_uid = $1
            "#,
        )
        .bind(date_option_id.inner_ref())
        .fetch_optional(&self.pool)
        .await;

        match res {
            Ok(raw) => raw.map(EventDateOption::from),
            Err(e) => {
                error!(
                    "Find date option with id: {} failed with error: {:?}",
                    date_option_id, e
                );
                None
            }
        }
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<EventDateOption>> {
        let options: Vec<DateOptionRaw> = sqlx::query_as(
            r#"
            SELECT * FROM event_date_options
            WHERE event_uid = $1
            ORDER BY date_option ASC
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(options.into_iter().map(EventDateOption::from).collect())
    }

    async fn set_final(&self, option: &EventDateOption) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
            UPDATE event_date_options SET is_final = FALSE
            WHERE event_uid = $1 AND is_final = TRUE
            "#,
        )
        .bind(option.event_id.inner_ref())
        .execute(&mut *tx)
        .await?;
        sqlx::query(
            r#"
            UPDATE event_date_options SET is_final = TRUE
            WHERE date_option_uid = $1
            "#,
        )
        .bind(option.id.inner_ref())
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(())
    }

    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM event_date_options WHERE event_uid = $1")
            .bind(event_id.inner_ref())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
