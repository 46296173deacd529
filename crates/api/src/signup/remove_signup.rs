use crate::error::AppError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventease_api_structs::remove_signup::*;
use eventease_domain::{EventSignup, UserId, ID};
use eventease_infra::AppContext;

pub async fn remove_signup_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AppError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = RemoveSignupUseCase {
        event_id: path_params.event_id.clone(),
        signup_id: path_params.signup_id.clone(),
        caller_id: user.id,
    };

    execute(usecase, &ctx)
        .await
        .map(|signup| HttpResponse::Ok().json(APIResponse::new(signup)))
        .map_err(AppError::from)
}

/// Owner-side removal of any signup, including anonymous attendees who
/// cannot cancel through an account.
#[derive(Debug)]
pub struct RemoveSignupUseCase {
    pub event_id: ID,
    pub signup_id: ID,
    pub caller_id: UserId,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    SignupNotFound(ID),
    NotOwner,
    StorageError,
}

impl From<UseCaseError> for AppError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => {
                Self::NotFound(format!("The event with id: {}, was not found.", event_id))
            }
            UseCaseError::SignupNotFound(signup_id) => {
                Self::NotFound(format!("The signup with id: {}, was not found.", signup_id))
            }
            UseCaseError::NotOwner => {
                Self::Forbidden("Only the event owner can remove signups".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RemoveSignupUseCase {
    type Response = EventSignup;

    type Error = UseCaseError;

    const NAME: &'static str = "RemoveSignup";

    async fn execute(&mut self, ctx: &AppContext) -> Result<Self::Response, Self::Error> {
        let event = match ctx.repos.event_repo.find(&self.event_id).await {
            Some(event) => event,
            None => return Err(UseCaseError::NotFound(self.event_id.clone())),
        };
        if !event.is_owner(&self.caller_id) {
            return Err(UseCaseError::NotOwner);
        }

        let signup = ctx
            .repos
            .signup_repo
            .find(&self.signup_id)
            .await
            .filter(|signup| signup.event_id == event.id)
            .ok_or_else(|| UseCaseError::SignupNotFound(self.signup_id.clone()))?;

        ctx.repos
            .signup_repo
            .delete(&signup.id)
            .await
            .ok_or(UseCaseError::StorageError)?;

        Ok(signup)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, Utc};
    use eventease_domain::{Attendee, Event};

    struct TestContext {
        ctx: AppContext,
        event: Event,
        signup: EventSignup,
    }

    async fn setup() -> TestContext {
        let ctx = AppContext::create_inmemory();
        let mut event = Event::new(
            UserId::new("auth0|owner"),
            "Marathon".into(),
            Utc::now() + Duration::days(30),
        );
        event.allow_signup = true;
        ctx.repos.event_repo.insert(&event).await.unwrap();
        let signup = EventSignup::new(
            event.id.clone(),
            Attendee::Anonymous,
            "Guest".into(),
            "guest@example.com".into(),
        );
        ctx.repos.signup_repo.try_insert(&signup, None).await.unwrap();

        TestContext { ctx, event, signup }
    }

    #[actix_web::main]
    #[test]
    async fn owner_can_remove_anonymous_signup() {
        let TestContext { ctx, event, signup } = setup().await;

        let mut usecase = RemoveSignupUseCase {
            event_id: event.id.clone(),
            signup_id: signup.id.clone(),
            caller_id: event.owner_id.clone(),
        };
        usecase.execute(&ctx).await.unwrap();
        assert!(ctx.repos.signup_repo.find(&signup.id).await.is_none());
    }

    #[actix_web::main]
    #[test]
    async fn non_owner_cannot_remove_signups() {
        let TestContext { ctx, event, signup } = setup().await;

        let mut usecase = RemoveSignupUseCase {
            event_id: event.id.clone(),
            signup_id: signup.id.clone(),
            caller_id: UserId::new("auth0|guest"),
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotOwner
        );
    }
}
