use crate::error::AppError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventease_api_structs::remove_vote::*;
use eventease_domain::{DateVote, EventDateOption, UserId, ID};
use eventease_infra::AppContext;

pub async fn remove_vote_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AppError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = RemoveVoteUseCase {
        date_option_id: path_params.date_option_id.clone(),
        voter_id: user.id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.option, &res.votes)))
        .map_err(AppError::from)
}

#[derive(Debug)]
pub struct RemoveVoteUseCase {
    pub date_option_id: ID,
    pub voter_id: UserId,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub option: EventDateOption,
    pub votes: Vec<DateVote>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    VotingClosed,
    VoteNotFound,
    StorageError,
}

impl From<UseCaseError> for AppError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(date_option_id) => Self::NotFound(format!(
                "The date option with id: {}, was not found.",
                date_option_id
            )),
            UseCaseError::VotingClosed => {
                Self::Conflict("The event already has a final date".into())
            }
            UseCaseError::VoteNotFound => {
                Self::NotFound("You have no vote for this date".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RemoveVoteUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "RemoveVote";

    async fn execute(&mut self, ctx: &AppContext) -> Result<Self::Response, Self::Error> {
        let option = match ctx.repos.date_option_repo.find(&self.date_option_id).await {
            Some(option) => option,
            None => return Err(UseCaseError::NotFound(self.date_option_id.clone())),
        };

        // The event behind the option must exist and be visible to the
        // voter, otherwise the option does not exist for them either.
        let visible = ctx
            .repos
            .event_repo
            .find(&option.event_id)
            .await
            .map(|event| event.is_visible_to(Some(&self.voter_id)))
            .unwrap_or(false);
        if !visible {
            return Err(UseCaseError::NotFound(self.date_option_id.clone()));
        }

        // A final date freezes the ballot, retracting votes included
        let siblings = ctx
            .repos
            .date_option_repo
            .find_by_event(&option.event_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if siblings.iter().any(|o| o.is_final) {
            return Err(UseCaseError::VotingClosed);
        }

        let removed = ctx
            .repos
            .date_vote_repo
            .delete_by_option_and_user(&option.id, &self.voter_id)
            .await;
        if removed.is_none() {
            return Err(UseCaseError::VoteNotFound);
        }

        let votes = ctx
            .repos
            .date_vote_repo
            .find_by_options(&[option.id.clone()])
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes { option, votes })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, Utc};
    use eventease_domain::{Event, EventVisibility};

    #[actix_web::main]
    #[test]
    async fn removes_only_the_callers_vote() {
        let ctx = AppContext::create_inmemory();
        let event = Event::new(
            UserId::new("auth0|owner"),
            "Retro".into(),
            Utc::now() + Duration::days(4),
        );
        ctx.repos.event_repo.insert(&event).await.unwrap();
        let option = EventDateOption::new(event.id.clone(), event.start_time);
        ctx.repos
            .date_option_repo
            .insert_many(&[option.clone()])
            .await
            .unwrap();
        for voter in ["auth0|u1", "auth0|u2"] {
            let vote = DateVote::new(option.id.clone(), UserId::new(voter));
            ctx.repos.date_vote_repo.try_insert(&vote).await.unwrap();
        }

        let mut usecase = RemoveVoteUseCase {
            date_option_id: option.id.clone(),
            voter_id: UserId::new("auth0|u1"),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.votes.len(), 1);
        assert_eq!(res.votes[0].user_id, UserId::new("auth0|u2"));
    }

    #[actix_web::main]
    #[test]
    async fn missing_vote_is_not_found() {
        let ctx = AppContext::create_inmemory();
        let event = Event::new(
            UserId::new("auth0|owner"),
            "Retro".into(),
            Utc::now() + Duration::days(4),
        );
        ctx.repos.event_repo.insert(&event).await.unwrap();
        let option = EventDateOption::new(event.id.clone(), event.start_time);
        ctx.repos
            .date_option_repo
            .insert_many(&[option.clone()])
            .await
            .unwrap();

        let mut usecase = RemoveVoteUseCase {
            date_option_id: option.id.clone(),
            voter_id: UserId::new("auth0|u1"),
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::VoteNotFound
        );
    }

    #[actix_web::main]
    #[test]
    async fn votes_are_frozen_after_finalization() {
        let ctx = AppContext::create_inmemory();
        let event = Event::new(
            UserId::new("auth0|owner"),
            "Retro".into(),
            Utc::now() + Duration::days(4),
        );
        ctx.repos.event_repo.insert(&event).await.unwrap();
        let option = EventDateOption::new(event.id.clone(), event.start_time);
        let other = EventDateOption::new(event.id.clone(), event.start_time + Duration::days(1));
        ctx.repos
            .date_option_repo
            .insert_many(&[option.clone(), other.clone()])
            .await
            .unwrap();
        let vote = DateVote::new(option.id.clone(), UserId::new("auth0|u1"));
        ctx.repos.date_vote_repo.try_insert(&vote).await.unwrap();

        let mut finalized = other.clone();
        finalized.is_final = true;
        ctx.repos.date_option_repo.set_final(&finalized).await.unwrap();

        let mut usecase = RemoveVoteUseCase {
            date_option_id: option.id.clone(),
            voter_id: UserId::new("auth0|u1"),
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::VotingClosed
        );
        // The vote is still there
        let votes = ctx
            .repos
            .date_vote_repo
            .find_by_options(&[option.id.clone()])
            .await
            .unwrap();
        assert_eq!(votes.len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn invisible_event_hides_the_option() {
        let ctx = AppContext::create_inmemory();
        let mut event = Event::new(
            UserId::new("auth0|owner"),
            "Retro".into(),
            Utc::now() + Duration::days(4),
        );
        event.visibility = EventVisibility::Private;
        ctx.repos.event_repo.insert(&event).await.unwrap();
        let option = EventDateOption::new(event.id.clone(), event.start_time);
        ctx.repos
            .date_option_repo
            .insert_many(&[option.clone()])
            .await
            .unwrap();

        let mut usecase = RemoveVoteUseCase {
            date_option_id: option.id.clone(),
            voter_id: UserId::new("auth0|stranger"),
        };
        assert!(matches!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(_)
        ));
    }
}
