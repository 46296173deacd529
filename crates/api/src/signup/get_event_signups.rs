use crate::error::AppError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventease_api_structs::get_event_signups::*;
use eventease_domain::{EventSignup, UserId, ID};
use eventease_infra::AppContext;

pub async fn get_event_signups_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AppError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = GetEventSignupsUseCase {
        event_id: path_params.event_id.clone(),
        caller_id: user.id,
    };

    execute(usecase, &ctx)
        .await
        .map(|signups| HttpResponse::Ok().json(APIResponse::new(signups)))
        .map_err(AppError::from)
}

/// The attendee list contains emails, so it is reserved for the event
/// owner.
#[derive(Debug)]
pub struct GetEventSignupsUseCase {
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
                Self::Forbidden("Only the event owner can list signups".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventSignupsUseCase {
    type Response = Vec<EventSignup>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEventSignups";

    async fn execute(&mut self, ctx: &AppContext) -> Result<Self::Response, Self::Error> {
        let event = match ctx.repos.event_repo.find(&self.event_id).await {
            Some(event) => event,
            None => return Err(UseCaseError::NotFound(self.event_id.clone())),
        };
        if !event.is_owner(&self.caller_id) {
            return Err(UseCaseError::NotOwner);
        }

        ctx.repos
            .signup_repo
            .find_by_event(&event.id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, Utc};
    use eventease_domain::{Attendee, Event};

    #[actix_web::main]
    #[test]
    async fn owner_sees_all_signups_others_are_rejected() {
        let ctx = AppContext::create_inmemory();
        let event = Event::new(
            UserId::new("auth0|owner"),
            "Concert".into(),
            Utc::now() + Duration::days(3),
        );
        ctx.repos.event_repo.insert(&event).await.unwrap();
        for email in ["a@example.com", "b@example.com"] {
            let signup = EventSignup::new(
                event.id.clone(),
                Attendee::Anonymous,
                "Guest".into(),
                email.into(),
            );
            ctx.repos.signup_repo.try_insert(&signup, None).await.unwrap();
        }

        let mut as_owner = GetEventSignupsUseCase {
            event_id: event.id.clone(),
            caller_id: event.owner_id.clone(),
        };
        assert_eq!(as_owner.execute(&ctx).await.unwrap().len(), 2);

        let mut as_guest = GetEventSignupsUseCase {
            event_id: event.id.clone(),
            caller_id: UserId::new("auth0|guest"),
        };
        assert_eq!(
            as_guest.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotOwner
        );
    }
}
