use crate::error::AppError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventease_api_structs::get_user_signups::*;
use eventease_domain::{EventSignup, UserId};
use eventease_infra::AppContext;

pub async fn get_user_signups_controller(
    http_req: HttpRequest,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AppError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = GetUserSignupsUseCase { user_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|signups| HttpResponse::Ok().json(APIResponse::new(signups)))
        .map_err(AppError::from)
}

#[derive(Debug)]
pub struct GetUserSignupsUseCase {
    pub user_id: UserId,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for AppError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUserSignupsUseCase {
    type Response = Vec<EventSignup>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUserSignups";

    async fn execute(&mut self, ctx: &AppContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .signup_repo
            .find_by_user(&self.user_id)
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
    async fn lists_only_the_callers_signups() {
        let ctx = AppContext::create_inmemory();
        let event = Event::new(
            UserId::new("auth0|owner"),
            "Quiz night".into(),
            Utc::now() + Duration::days(1),
        );
        ctx.repos.event_repo.insert(&event).await.unwrap();

        let mine = EventSignup::new(
            event.id.clone(),
            Attendee::Account {
                user_id: UserId::new("auth0|me"),
            },
            "Me".into(),
            "me@example.com".into(),
        );
        let other = EventSignup::new(
            event.id.clone(),
            Attendee::Account {
                user_id: UserId::new("auth0|other"),
            },
            "Other".into(),
            "other@example.com".into(),
        );
        ctx.repos.signup_repo.try_insert(&mine, None).await.unwrap();
        ctx.repos.signup_repo.try_insert(&other, None).await.unwrap();

        let mut usecase = GetUserSignupsUseCase {
            user_id: UserId::new("auth0|me"),
        };
        let signups = usecase.execute(&ctx).await.unwrap();
        assert_eq!(signups.len(), 1);
        assert_eq!(signups[0].event_id, event.id);
    }
}
