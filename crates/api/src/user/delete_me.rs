use crate::error::AppError;
use crate::event::delete_event_with_children;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventease_api_structs::delete_me::*;
use eventease_domain::User;
use eventease_infra::AppContext;

pub async fn delete_me_controller(
    http_req: HttpRequest,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AppError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteMeUseCase { user };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Ok().json(APIResponse::new(user)))
        .map_err(AppError::from)
}

/// Account removal takes the user's whole footprint with it: owned
/// events (and their children), account-bound signups and votes.
#[derive(Debug)]
pub struct DeleteMeUseCase {
    pub user: User,
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
impl UseCase for DeleteMeUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteMe";

    async fn execute(&mut self, ctx: &AppContext) -> Result<Self::Response, Self::Error> {
        let owned = ctx
            .repos
            .event_repo
            .find_by_owner(&self.user.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        for event in owned {
            delete_event_with_children(&event.id, ctx)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        ctx.repos
            .signup_repo
            .delete_by_user(&self.user.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        ctx.repos
            .date_vote_repo
            .delete_by_user(&self.user.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        ctx.repos
            .user_repo
            .delete(&self.user.id)
            .await
            .ok_or(UseCaseError::StorageError)?;

        Ok(self.user.clone())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, Utc};
    use eventease_domain::{Attendee, Event, EventSignup, UserId};

    #[actix_web::main]
    #[test]
    async fn removes_owned_events_and_signups() {
        let ctx = AppContext::create_inmemory();
        let ana = User::new(UserId::new("auth0|ana"));
        ctx.repos.user_repo.insert(&ana).await.unwrap();

        let owned = Event::new(
            ana.id.clone(),
            "Ana's party".into(),
            Utc::now() + Duration::days(1),
        );
        ctx.repos.event_repo.insert(&owned).await.unwrap();

        let other = Event::new(
            UserId::new("auth0|bor"),
            "Bor's hike".into(),
            Utc::now() + Duration::days(2),
        );
        ctx.repos.event_repo.insert(&other).await.unwrap();
        let signup = EventSignup::new(
            other.id.clone(),
            Attendee::Account {
                user_id: ana.id.clone(),
            },
            "Ana".into(),
            "ana@example.com".into(),
        );
        ctx.repos.signup_repo.try_insert(&signup, None).await.unwrap();

        let mut usecase = DeleteMeUseCase { user: ana.clone() };
        usecase.execute(&ctx).await.unwrap();

        assert!(ctx.repos.user_repo.find(&ana.id).await.is_none());
        assert!(ctx.repos.event_repo.find(&owned.id).await.is_none());
        // The foreign event survives, only Ana's signup is gone
        assert!(ctx.repos.event_repo.find(&other.id).await.is_some());
        assert!(ctx
            .repos
            .signup_repo
            .find_by_event(&other.id)
            .await
            .unwrap()
            .is_empty());
    }
}
