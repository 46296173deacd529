use crate::error::AppError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventease_api_structs::delete_event::*;
use eventease_domain::{Event, UserId, ID};
use eventease_infra::AppContext;

pub async fn delete_event_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AppError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteEventUseCase {
        event_id: path_params.event_id.clone(),
        caller_id: user.id,
    };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Ok().json(APIResponse::new(event)))
        .map_err(AppError::from)
}

#[derive(Debug)]
pub struct DeleteEventUseCase {
    pub event_id: ID,
    pub caller_id: UserId,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    NotOwner,
    StorageError,
}

impl From<UseCaseError> for AppError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => {
                Self::NotFound(format!("The event with id: {}, was not found.", event_id))
            }
            UseCaseError::NotOwner => {
                Self::Forbidden("Only the event owner can delete the event".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

/// Deletes the event together with its date options, votes, allow-list
/// rows and signups.
pub async fn delete_event_with_children(event_id: &ID, ctx: &AppContext) -> anyhow::Result<()> {
    let options = ctx.repos.date_option_repo.find_by_event(event_id).await?;
    let option_ids: Vec<ID> = options.iter().map(|o| o.id.clone()).collect();
    ctx.repos.date_vote_repo.delete_by_options(&option_ids).await?;
    ctx.repos.date_option_repo.delete_by_event(event_id).await?;
    ctx.repos.signup_repo.delete_by_event(event_id).await?;
    ctx.repos.event_repo.delete(event_id).await;
    Ok(())
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteEventUseCase {
    type Response = Event;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteEvent";

    async fn execute(&mut self, ctx: &AppContext) -> Result<Self::Response, Self::Error> {
        let event = match ctx.repos.event_repo.find(&self.event_id).await {
            Some(event) => event,
            None => return Err(UseCaseError::NotFound(self.event_id.clone())),
        };
        if !event.is_owner(&self.caller_id) {
            return Err(UseCaseError::NotOwner);
        }

        delete_event_with_children(&self.event_id, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(event)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, Utc};
    use eventease_domain::{Attendee, DateVote, EventDateOption, EventSignup};

    #[actix_web::main]
    #[test]
    async fn only_owner_can_delete() {
        let ctx = AppContext::create_inmemory();
        let event = Event::new(
            UserId::new("auth0|owner"),
            "Cleanup day".into(),
            Utc::now() + Duration::days(1),
        );
        ctx.repos.event_repo.insert(&event).await.unwrap();

        let mut usecase = DeleteEventUseCase {
            event_id: event.id.clone(),
            caller_id: UserId::new("auth0|intruder"),
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotOwner
        );
    }

    #[actix_web::main]
    #[test]
    async fn delete_cascades_to_children() {
        let ctx = AppContext::create_inmemory();
        let owner = UserId::new("auth0|owner");
        let event = Event::new(
            owner.clone(),
            "Cleanup day".into(),
            Utc::now() + Duration::days(1),
        );
        ctx.repos.event_repo.insert(&event).await.unwrap();

        let option = EventDateOption::new(event.id.clone(), event.start_time);
        ctx.repos
            .date_option_repo
            .insert_many(&[option.clone()])
            .await
            .unwrap();
        let vote = DateVote::new(option.id.clone(), UserId::new("auth0|u1"));
        ctx.repos.date_vote_repo.try_insert(&vote).await.unwrap();
        let signup = EventSignup::new(
            event.id.clone(),
            Attendee::Anonymous,
            "Ana".into(),
            "ana@example.com".into(),
        );
        ctx.repos.signup_repo.try_insert(&signup, None).await.unwrap();

        let mut usecase = DeleteEventUseCase {
            event_id: event.id.clone(),
            caller_id: owner,
        };
        usecase.execute(&ctx).await.unwrap();

        assert!(ctx.repos.event_repo.find(&event.id).await.is_none());
        assert!(ctx
            .repos
            .date_option_repo
            .find_by_event(&event.id)
            .await
            .unwrap()
            .is_empty());
        assert!(ctx
            .repos
            .date_vote_repo
            .find_by_options(&[option.id.clone()])
            .await
            .unwrap()
            .is_empty());
        assert!(ctx
            .repos
            .signup_repo
            .find_by_event(&event.id)
            .await
            .unwrap()
            .is_empty());
    }
}
