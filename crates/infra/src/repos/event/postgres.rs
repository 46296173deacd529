use super::IEventRepo;
use crate::repos::shared::query_structs::EventSearch;
use chrono::{DateTime, Utc};
use eventease_domain::{Event, EventVisibility, UserId, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const EVENT_SELECT: &str = r#"
    SELECT e.*, array_remove(array_agg(v.user_id), NULL) AS allow_list
    FROM events e
    LEFT JOIN event_visibilities v ON v.event_uid = e.event_uid
"#;

#[derive(Debug, FromRow)]
struct EventRaw {
    event_uid: Uuid,
    title: String,
    description: Option<String>,
    start_time: DateTime<Utc>,
    location: Option<String>,
    image_url: Option<String>,
    owner_id: String,
    allow_signup: bool,
    max_signups: Option<i32>,
    visibility: String,
    signup_deadline: Option<DateTime<Utc>>,
    is_featured: bool,
    reminder_sent: bool,
    allow_list: Vec<String>,
}

fn visibility_to_str(visibility: EventVisibility) -> &'static str {
    match visibility {
        EventVisibility::Public => "public",
        EventVisibility::Private => "private",
        EventVisibility::Selected => "selected",
    }
}

fn visibility_from_str(value: &str) -> EventVisibility {
    match value {
        "private" => EventVisibility::Private,
        "selected" => EventVisibility::Selected,
        _ => EventVisibility::Public,
    }
}

impl From<EventRaw> for Event {
    fn from(raw: EventRaw) -> Self {
        Self {
            id: raw.event_uid.into(),
            title: raw.title,
            description: raw.description,
            start_time: raw.start_time,
            location: raw.location,
            image_url: raw.image_url,
            owner_id: UserId::new(raw.owner_id),
            allow_signup: raw.allow_signup,
            max_signups: raw.max_signups,
            visibility: visibility_from_str(&raw.visibility),
            allow_list: raw.allow_list.into_iter().map(UserId::new).collect(),
            signup_deadline: raw.signup_deadline,
            is_featured: raw.is_featured,
            reminder_sent: raw.reminder_sent,
        }
    }
}

impl PostgresEventRepo {
    async fn replace_allow_list(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        e: &Event,
    ) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM event_visibilities WHERE event_uid = $1")
            .bind(e.id.inner_ref())
            .execute(&mut **tx)
            .await?;
        for viewer in &e.allow_list {
            sqlx::query("INSERT INTO event_visibilities(event_uid, user_id) VALUES($1, $2)")
                .bind(e.id.inner_ref())
                .bind(viewer.as_str())
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl IEventRepo for PostgresEventRepo {
    async fn insert(&self, e: &Event) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO events(
                event_uid,
                title,
                description,
                start_time,
                location,
                image_url,
                owner_id,
                allow_signup,
                max_signups,
                visibility,
                signup_deadline,
                is_featured,
                reminder_sent
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(e.id.inner_ref())
        .bind(&e.title)
        .bind(&e.description)
        .bind(e.start_time)
        .bind(&e.location)
        .bind(&e.image_url)
        .bind(e.owner_id.as_str())
        .bind(e.allow_signup)
        .bind(e.max_signups)
        .bind(visibility_to_str(e.visibility))
        .bind(e.signup_deadline)
        .bind(e.is_featured)
        .bind(e.reminder_sent)
        .execute(&mut *tx)
        .await?;

        self.replace_allow_list(&mut tx, e).await?;
        tx.commit().await?;

        Ok(())
    }

    async fn save(&self, e: &Event) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
            UPDATE events SET
                title = $2,
                description = $3,
                start_time = $4,
                location = $5,
                image_url = $6,
                allow_signup = $7,
                max_signups = $8,
                visibility = $9,
                signup_deadline = $10,
                is_featured = $11,
                reminder_sent = $12
            WHERE event_uid = $1
            "#,
        )
        .bind(e.id.inner_ref())
        .bind(&e.title)
        .bind(&e.description)
        .bind(e.start_time)
        .bind(&e.location)
        .bind(&e.image_url)
        .bind(e.allow_signup)
        .bind(e.max_signups)
        .bind(visibility_to_str(e.visibility))
        .bind(e.signup_deadline)
        .bind(e.is_featured)
        .bind(e.reminder_sent)
        .execute(&mut *tx)
        .await?;

        self.replace_allow_list(&mut tx, e).await?;
        tx.commit().await?;

        Ok(())
    }

    async fn find(&self, event_id: &ID) -> Option<Event> {
        let query = format!("{} WHERE e.event_uid = $1 GROUP BY e.event_uid", EVENT_SELECT);
        let res: Result<Option<EventRaw>, _> = sqlx::query_as(&query)
            .bind(event_id.inner_ref())
            .fetch_optional(&self.pool)
            .await;

        match res {
            Ok(raw) => raw.map(Event::from),
            Err(e) => {
                error!("Find event with id: {} failed with error: {:?}", event_id, e);
                None
            }
        }
    }

    async fn delete(&self, event_id: &ID) -> Option<Event> {
        let event = self.find(event_id).await?;
        let res = sqlx::query("DELETE FROM events WHERE event_uid = $1")
            .bind(event_id.inner_ref())
            .execute(&self.pool)
            .await;

        match res {
            Ok(_) => Some(event),
            Err(e) => {
                error!(
                    "Delete event with id: {} failed with error: {:?}",
                    event_id, e
                );
                None
            }
        }
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> anyhow::Result<Vec<Event>> {
        let query = format!(
            "{} WHERE e.owner_id = $1 GROUP BY e.event_uid ORDER BY e.start_time ASC",
            EVENT_SELECT
        );
        let events: Vec<EventRaw> = sqlx::query_as(&query)
            .bind(owner_id.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(events.into_iter().map(Event::from).collect())
    }

    async fn search(
        &self,
        viewer: Option<&UserId>,
        search: &EventSearch,
    ) -> anyhow::Result<Vec<Event>> {
        let query = format!(
            r#"{}
            WHERE
                (e.visibility = 'public'
                    OR ($1::text IS NOT NULL AND (e.owner_id = $1
                        OR (e.visibility = 'selected' AND EXISTS (
                            SELECT 1 FROM event_visibilities av
                            WHERE av.event_uid = e.event_uid AND av.user_id = $1
                        )))))
                AND ($2::text IS NULL
                    OR e.title ILIKE '%' || $2 || '%'
                    OR e.description ILIKE '%' || $2 || '%')
                AND ($3::text IS NULL OR e.location ILIKE '%' || $3 || '%')
                AND ($4::text[] IS NULL OR e.owner_id = ANY($4))
                AND ($5::timestamptz IS NULL OR e.start_time >= $5)
                AND ($6::timestamptz IS NULL OR e.start_time < $6)
                AND ($7::text IS NULL OR e.owner_id = $7)
            GROUP BY e.event_uid
            ORDER BY e.start_time ASC
            "#,
            EVENT_SELECT
        );

        let organizers: Option<Vec<String>> = search
            .organizers
            .as_ref()
            .map(|ids| ids.iter().map(|id| id.as_str().to_string()).collect());
        let (starts_from, starts_until) = match search.starts_between {
            Some((from, until)) => (Some(from), Some(until)),
            None => (None, None),
        };

        let events: Vec<EventRaw> = sqlx::query_as(&query)
            .bind(viewer.map(|v| v.as_str().to_string()))
            .bind(&search.text)
            .bind(&search.location)
            .bind(organizers)
            .bind(starts_from)
            .bind(starts_until)
            .bind(search.owner_id.as_ref().map(|o| o.as_str().to_string()))
            .fetch_all(&self.pool)
            .await?;

        Ok(events.into_iter().map(Event::from).collect())
    }

    async fn find_featured(&self, now: DateTime<Utc>) -> Option<Event> {
        let query = format!(
            r#"{}
            WHERE e.visibility = 'public' AND e.start_time >= $1
            GROUP BY e.event_uid
            ORDER BY e.is_featured DESC, e.start_time ASC
            LIMIT 1
            "#,
            EVENT_SELECT
        );
        let res: Result<Option<EventRaw>, _> = sqlx::query_as(&query)
            .bind(now)
            .fetch_optional(&self.pool)
            .await;

        match res {
            Ok(raw) => raw.map(Event::from),
            Err(e) => {
                error!("Find featured event failed with error: {:?}", e);
                None
            }
        }
    }

    async fn find_unreminded_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Event>> {
        let query = format!(
            r#"{}
            WHERE e.start_time BETWEEN $1 AND $2 AND e.reminder_sent = FALSE
            GROUP BY e.event_uid
            "#,
            EVENT_SELECT
        );
        let events: Vec<EventRaw> = sqlx::query_as(&query)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;

        Ok(events.into_iter().map(Event::from).collect())
    }

    async fn mark_reminder_sent(&self, event_id: &ID) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE events SET reminder_sent = TRUE
            WHERE event_uid = $1 AND reminder_sent = FALSE
            "#,
        )
        .bind(event_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() > 0)
    }
}
