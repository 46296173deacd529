use crate::error::AppError;
use crate::shared::{
    auth::optional_identity,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{NaiveDate, TimeZone, Utc};
use eventease_api_structs::get_events::*;
use eventease_domain::{Event, UserId};
use eventease_infra::{AppContext, EventSearch};

pub async fn get_events_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AppError> {
    let identity = optional_identity(&http_req, &ctx).await;

    let query = query_params.0;
    let usecase = GetEventsUseCase {
        viewer: identity.map(|(user, _)| user.id),
        text: query.text,
        location: query.location,
        day: query.day,
        organizer: query.organizer,
        only_mine: query.only_mine,
    };

    execute(usecase, &ctx)
        .await
        .map(|events| HttpResponse::Ok().json(APIResponse::new(events)))
        .map_err(AppError::from)
}

#[derive(Debug)]
pub struct GetEventsUseCase {
    pub viewer: Option<UserId>,
    pub text: Option<String>,
    pub location: Option<String>,
    pub day: Option<NaiveDate>,
    pub organizer: Option<String>,
    pub only_mine: bool,
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
impl UseCase for GetEventsUseCase {
    type Response = Vec<Event>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEvents";

    async fn execute(&mut self, ctx: &AppContext) -> Result<Self::Response, Self::Error> {
        let owner_id = match (self.only_mine, &self.viewer) {
            (true, Some(viewer)) => Some(viewer.clone()),
            // An anonymous caller owns nothing
            (true, None) => return Ok(Vec::new()),
            (false, _) => None,
        };

        // The organizer filter matches by name, so resolve the matching
        // accounts first. A name that matches nobody matches no events.
        let organizers = match &self.organizer {
            Some(organizer) => {
                let users = ctx
                    .repos
                    .user_repo
                    .search(organizer)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
                Some(users.into_iter().map(|u| u.id).collect::<Vec<_>>())
            }
            None => None,
        };

        let starts_between = self.day.map(|day| {
            let start = Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0).unwrap());
            (start, start + chrono::Duration::days(1))
        });

        let search = EventSearch {
            text: self.text.clone(),
            location: self.location.clone(),
            organizers,
            starts_between,
            owner_id,
        };

        ctx.repos
            .event_repo
            .search(self.viewer.as_ref(), &search)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Duration;
    use eventease_domain::{EventVisibility, User};

    async fn insert_event(
        ctx: &AppContext,
        owner: &str,
        title: &str,
        visibility: EventVisibility,
    ) -> Event {
        let mut event = Event::new(
            UserId::new(owner),
            title.into(),
            Utc::now() + Duration::days(1),
        );
        event.visibility = visibility;
        ctx.repos.event_repo.insert(&event).await.unwrap();
        event
    }

    #[actix_web::main]
    #[test]
    async fn anonymous_caller_sees_only_public_events() {
        let ctx = AppContext::create_inmemory();
        insert_event(&ctx, "auth0|a", "Open day", EventVisibility::Public).await;
        insert_event(&ctx, "auth0|a", "Board meeting", EventVisibility::Private).await;

        let mut usecase = GetEventsUseCase {
            viewer: None,
            text: None,
            location: None,
            day: None,
            organizer: None,
            only_mine: false,
        };
        let events = usecase.execute(&ctx).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Open day");
    }

    #[actix_web::main]
    #[test]
    async fn only_mine_is_empty_for_anonymous_callers() {
        let ctx = AppContext::create_inmemory();
        insert_event(&ctx, "auth0|a", "Open day", EventVisibility::Public).await;

        let mut usecase = GetEventsUseCase {
            viewer: None,
            text: None,
            location: None,
            day: None,
            organizer: None,
            only_mine: true,
        };
        let events = usecase.execute(&ctx).await.unwrap();
        assert!(events.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn text_filter_matches_title_substring() {
        let ctx = AppContext::create_inmemory();
        insert_event(&ctx, "auth0|a", "Jazz concert", EventVisibility::Public).await;
        insert_event(&ctx, "auth0|a", "Flea market", EventVisibility::Public).await;

        let mut usecase = GetEventsUseCase {
            viewer: None,
            text: Some("jazz".into()),
            location: None,
            day: None,
            organizer: None,
            only_mine: false,
        };
        let events = usecase.execute(&ctx).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Jazz concert");
    }

    #[actix_web::main]
    #[test]
    async fn organizer_filter_resolves_names_to_owners() {
        let ctx = AppContext::create_inmemory();
        let mut ana = User::new(UserId::new("auth0|ana"));
        ana.name = "Ana".into();
        ctx.repos.user_repo.insert(&ana).await.unwrap();

        insert_event(&ctx, "auth0|ana", "Ana's picnic", EventVisibility::Public).await;
        insert_event(&ctx, "auth0|bor", "Bor's hike", EventVisibility::Public).await;

        let mut usecase = GetEventsUseCase {
            viewer: None,
            text: None,
            location: None,
            day: None,
            organizer: Some("ana".into()),
            only_mine: false,
        };
        let events = usecase.execute(&ctx).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Ana's picnic");
    }
}
