use crate::error::AppError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use eventease_api_structs::get_featured_event::*;
use eventease_domain::Event;
use eventease_infra::AppContext;

pub async fn get_featured_event_controller(
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AppError> {
    execute(GetFeaturedEventUseCase {}, &ctx)
        .await
        .map(|event| HttpResponse::Ok().json(APIResponse::new(event)))
        .map_err(AppError::from)
}

#[derive(Debug)]
pub struct GetFeaturedEventUseCase {}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NoUpcomingEvents,
}

impl From<UseCaseError> for AppError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NoUpcomingEvents => {
                Self::NotFound("There are no upcoming public events.".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetFeaturedEventUseCase {
    type Response = Event;

    type Error = UseCaseError;

    const NAME: &'static str = "GetFeaturedEvent";

    async fn execute(&mut self, ctx: &AppContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .event_repo
            .find_featured(ctx.sys.now())
            .await
            .ok_or(UseCaseError::NoUpcomingEvents)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, Utc};
    use eventease_domain::{EventVisibility, UserId};

    #[actix_web::main]
    #[test]
    async fn prefers_flagged_event_over_sooner_unflagged_one() {
        let ctx = AppContext::create_inmemory();

        let soon = Event::new(
            UserId::new("auth0|a"),
            "Soon but plain".into(),
            Utc::now() + Duration::days(1),
        );
        ctx.repos.event_repo.insert(&soon).await.unwrap();

        let mut flagged = Event::new(
            UserId::new("auth0|a"),
            "Featured gala".into(),
            Utc::now() + Duration::days(5),
        );
        flagged.is_featured = true;
        ctx.repos.event_repo.insert(&flagged).await.unwrap();

        let res = GetFeaturedEventUseCase {}.execute(&ctx).await.unwrap();
        assert_eq!(res.id, flagged.id);
    }

    #[actix_web::main]
    #[test]
    async fn ignores_private_and_past_events() {
        let ctx = AppContext::create_inmemory();

        let mut private = Event::new(
            UserId::new("auth0|a"),
            "Private".into(),
            Utc::now() + Duration::days(1),
        );
        private.visibility = EventVisibility::Private;
        ctx.repos.event_repo.insert(&private).await.unwrap();

        let past = Event::new(
            UserId::new("auth0|a"),
            "Past".into(),
            Utc::now() - Duration::days(1),
        );
        ctx.repos.event_repo.insert(&past).await.unwrap();

        let res = GetFeaturedEventUseCase {}.execute(&ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::NoUpcomingEvents);
    }
}
