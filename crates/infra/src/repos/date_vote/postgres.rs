use super::IDateVoteRepo;
use eventease_domain::{DateVote, UserId, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresDateVoteRepo {
    pool: PgPool,
}

impl PostgresDateVoteRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DateVoteRaw {
    vote_uid: Uuid,
    date_option_uid: Uuid,
    user_id: String,
}

impl From<DateVoteRaw> for DateVote {
    fn from(raw: DateVoteRaw) -> Self {
        Self {
            id: raw.vote_uid.into(),
            date_option_id: raw.date_option_uid.into(),
            user_id: UserId::new(raw.user_id),
        }
    }
}

#[async_trait::async_trait]
impl IDateVoteRepo for PostgresDateVoteRepo {
    async fn try_insert(&self, vote: &DateVote) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO date_votes(vote_uid, date_option_uid, user_id)
            VALUES($1, $2, $3)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(vote.id.inner_ref())
        .bind(vote.date_option_id.inner_ref())
        .bind(vote.user_id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() > 0)
    }

    async fn delete_by_option_and_user(
        &self,
        date_option_id: &ID,
        user_id: &UserId,
    ) -> Option<DateVote> {
        let res: Result<Option<DateVoteRaw>, _> = sqlx::query_as(
            r#"
            DELETE FROM date_votes
            WHERE date_option_uid = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(date_option_id.inner_ref())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await;

        match res {
            Ok(raw) => raw.map(DateVote::from),
            Err(e) => {
                error!(
                    "Delete vote for option: {} and user: {} failed with error: {:?}",
                    date_option_id, user_id, e
                );
                None
            }
        }
    }

    async fn find_by_options(&self, date_option_ids: &[ID]) -> anyhow::Result<Vec<DateVote>> {
        let ids: Vec<Uuid> = date_option_ids.iter().map(|id| *id.inner_ref()).collect();
        let votes: Vec<DateVoteRaw> = sqlx::query_as(
            r#"
            SELECT * FROM date_votes
            WHERE date_option_uid = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(votes.into_iter().map(DateVote::from).collect())
    }

    async fn delete_by_options(&self, date_option_ids: &[ID]) -> anyhow::Result<()> {
        let ids: Vec<Uuid> = date_option_ids.iter().map(|id| *id.inner_ref()).collect();
        sqlx::query("DELETE FROM date_votes WHERE date_option_uid = ANY($1)")
            .bind(&ids)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_by_user(&self, user_id: &UserId) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM date_votes WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
