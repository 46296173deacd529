use crate::error::AppError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventease_api_structs::cancel_signup::*;
use eventease_domain::{Event, EventSignup, UserId, ID};
use eventease_infra::{messages, AppContext};
use tracing::warn;

pub async fn cancel_signup_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AppError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = CancelSignupUseCase {
        event_id: path_params.event_id.clone(),
        caller_id: user.id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.signup)))
        .map_err(AppError::from)
}

#[derive(Debug)]
pub struct CancelSignupUseCase {
    pub event_id: ID,
    pub caller_id: UserId,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub signup: EventSignup,
    pub event: Event,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    SignupNotFound,
    StorageError,
}

impl From<UseCaseError> for AppError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => {
                Self::NotFound(format!("The event with id: {}, was not found.", event_id))
            }
            UseCaseError::SignupNotFound => {
                Self::NotFound("You are not signed up for this event".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CancelSignupUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CancelSignup";

    async fn execute(&mut self, ctx: &AppContext) -> Result<Self::Response, Self::Error> {
        let event = match ctx.repos.event_repo.find(&self.event_id).await {
            Some(event) => event,
            None => return Err(UseCaseError::NotFound(self.event_id.clone())),
        };

        let signup = ctx
            .repos
            .signup_repo
            .find_by_event_and_user(&event.id, &self.caller_id)
            .await
            .ok_or(UseCaseError::SignupNotFound)?;

        ctx.repos
            .signup_repo
            .delete(&signup.id)
            .await
            .ok_or(UseCaseError::StorageError)?;

        Ok(UseCaseRes { signup, event })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SendCancellationConfirmation)]
    }
}

pub struct SendCancellationConfirmation;

#[async_trait::async_trait(?Send)]
impl Subscriber<CancelSignupUseCase> for SendCancellationConfirmation {
    async fn notify(&self, res: &UseCaseRes, ctx: &AppContext) {
        if let Some(user_id) = res.signup.attendee.user_id() {
            let wants = ctx
                .repos
                .user_repo
                .find(user_id)
                .await
                .map(|u| u.wants_notifications)
                .unwrap_or(false);
            if !wants {
                return;
            }
        }
        let mail = messages::signup_cancelled(
            &res.signup.email,
            &res.event,
            &ctx.config.frontend_base_url,
        );
        if let Err(e) = ctx.services.email.send(mail).await {
            warn!(
                "Failed to send cancellation confirmation to {}: {:?}",
                res.signup.email, e
            );
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, Utc};
    use eventease_domain::Attendee;

    #[actix_web::main]
    #[test]
    async fn cancels_the_callers_signup() {
        let ctx = AppContext::create_inmemory();
        let event = Event::new(
            UserId::new("auth0|owner"),
            "Yoga class".into(),
            Utc::now() + Duration::days(2),
        );
        ctx.repos.event_repo.insert(&event).await.unwrap();
        let signup = EventSignup::new(
            event.id.clone(),
            Attendee::Account {
                user_id: UserId::new("auth0|ana"),
            },
            "Ana".into(),
            "ana@example.com".into(),
        );
        ctx.repos.signup_repo.try_insert(&signup, None).await.unwrap();

        let mut usecase = CancelSignupUseCase {
            event_id: event.id.clone(),
            caller_id: UserId::new("auth0|ana"),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.signup.id, signup.id);
        assert!(ctx.repos.signup_repo.find(&signup.id).await.is_none());
    }

    #[actix_web::main]
    #[test]
    async fn missing_signup_is_not_found() {
        let ctx = AppContext::create_inmemory();
        let event = Event::new(
            UserId::new("auth0|owner"),
            "Yoga class".into(),
            Utc::now() + Duration::days(2),
        );
        ctx.repos.event_repo.insert(&event).await.unwrap();

        let mut usecase = CancelSignupUseCase {
            event_id: event.id.clone(),
            caller_id: UserId::new("auth0|ana"),
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::SignupNotFound
        );
    }
}
