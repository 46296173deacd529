use crate::error::AppError;
use crate::shared::{
    auth::optional_identity,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventease_api_structs::get_event::*;
use eventease_domain::{DateVote, Event, EventDateOption, User, UserId, ID};
use eventease_infra::AppContext;

pub async fn get_event_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AppError> {
    let identity = optional_identity(&http_req, &ctx).await;

    let usecase = GetEventUseCase {
        event_id: path_params.event_id.clone(),
        viewer: identity.map(|(user, _)| user.id),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse::new(
                res.event,
                res.organizer,
                res.date_options,
                &res.votes,
            ))
        })
        .map_err(AppError::from)
}

#[derive(Debug)]
pub struct GetEventUseCase {
    pub event_id: ID,
    pub viewer: Option<UserId>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub event: Event,
    pub organizer: Option<User>,
    pub date_options: Vec<EventDateOption>,
    pub votes: Vec<DateVote>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for AppError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => {
                Self::NotFound(format!("The event with id: {}, was not found.", event_id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEvent";

    async fn execute(&mut self, ctx: &AppContext) -> Result<Self::Response, Self::Error> {
        // An event the viewer may not see behaves exactly like a
        // nonexistent one.
        let event = match ctx.repos.event_repo.find(&self.event_id).await {
            Some(event) if event.is_visible_to(self.viewer.as_ref()) => event,
            _ => return Err(UseCaseError::NotFound(self.event_id.clone())),
        };

        let organizer = ctx.repos.user_repo.find(&event.owner_id).await;
        let date_options = ctx
            .repos
            .date_option_repo
            .find_by_event(&event.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let option_ids: Vec<ID> = date_options.iter().map(|o| o.id.clone()).collect();
        let votes = ctx
            .repos
            .date_vote_repo
            .find_by_options(&option_ids)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes {
            event,
            organizer,
            date_options,
            votes,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, Utc};
    use eventease_domain::EventVisibility;

    async fn insert_selected_event(ctx: &AppContext, viewers: Vec<UserId>) -> Event {
        let mut event = Event::new(
            UserId::new("auth0|owner"),
            "Wine tasting".into(),
            Utc::now() + Duration::days(2),
        );
        event.visibility = EventVisibility::Selected;
        event.set_allow_list(viewers);
        ctx.repos.event_repo.insert(&event).await.unwrap();
        event
    }

    #[actix_web::main]
    #[test]
    async fn allow_listed_viewer_can_fetch_selected_event() {
        let ctx = AppContext::create_inmemory();
        let event = insert_selected_event(&ctx, vec![UserId::new("auth0|u1")]).await;

        let mut usecase = GetEventUseCase {
            event_id: event.id.clone(),
            viewer: Some(UserId::new("auth0|u1")),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.event.id, event.id);
    }

    #[actix_web::main]
    #[test]
    async fn outsider_gets_not_found_for_selected_event() {
        let ctx = AppContext::create_inmemory();
        let event = insert_selected_event(&ctx, vec![UserId::new("auth0|u1")]).await;

        let mut usecase = GetEventUseCase {
            event_id: event.id.clone(),
            viewer: Some(UserId::new("auth0|u3")),
        };
        let res = usecase.execute(&ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::NotFound(event.id));

        let mut anonymous = GetEventUseCase {
            event_id: usecase.event_id.clone(),
            viewer: None,
        };
        assert!(anonymous.execute(&ctx).await.is_err());
    }

    #[actix_web::main]
    #[test]
    async fn returns_date_options_with_votes() {
        let ctx = AppContext::create_inmemory();
        let event = Event::new(
            UserId::new("auth0|owner"),
            "Picnic".into(),
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
        assert!(ctx.repos.date_vote_repo.try_insert(&vote).await.unwrap());

        let mut usecase = GetEventUseCase {
            event_id: event.id.clone(),
            viewer: None,
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.date_options.len(), 1);
        assert_eq!(res.votes.len(), 1);
        assert_eq!(res.votes[0].user_id, UserId::new("auth0|u1"));
    }
}
