use crate::error::AppError;
use crate::event::subscribers::SendInvitesOnAllowListExtended;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use eventease_api_structs::update_event::*;
use eventease_domain::{Event, EventVisibility, UserId, ID};
use eventease_infra::AppContext;

pub async fn update_event_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AppError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateEventUseCase {
        event_id: path_params.event_id.clone(),
        caller_id: user.id,
        title: body.title,
        description: body.description,
        start_time: body.start_time,
        location: body.location,
        image_url: body.image_url,
        allow_signup: body.allow_signup,
        max_signups: body.max_signups,
        visibility: body.visibility,
        allow_list: body.allow_list,
        signup_deadline: body.signup_deadline,
        is_featured: body.is_featured,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.event)))
        .map_err(AppError::from)
}

#[derive(Debug)]
pub struct UpdateEventUseCase {
    pub event_id: ID,
    pub caller_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub allow_signup: bool,
    pub max_signups: Option<i32>,
    pub visibility: EventVisibility,
    pub allow_list: Vec<UserId>,
    pub signup_deadline: Option<DateTime<Utc>>,
    pub is_featured: bool,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub event: Event,
    /// Viewers present in the new allow-list but not the old one
    pub added_viewers: Vec<UserId>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    NotOwner,
    EmptyTitle,
    StorageError,
}

impl From<UseCaseError> for AppError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => {
                Self::NotFound(format!("The event with id: {}, was not found.", event_id))
            }
            UseCaseError::NotOwner => {
                Self::Forbidden("Only the event owner can update the event".into())
            }
            UseCaseError::EmptyTitle => Self::BadClientData("The event title is required".into()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateEventUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateEvent";

    async fn execute(&mut self, ctx: &AppContext) -> Result<Self::Response, Self::Error> {
        let mut event = match ctx.repos.event_repo.find(&self.event_id).await {
            Some(event) => event,
            None => return Err(UseCaseError::NotFound(self.event_id.clone())),
        };
        if !event.is_owner(&self.caller_id) {
            return Err(UseCaseError::NotOwner);
        }
        if self.title.trim().is_empty() {
            return Err(UseCaseError::EmptyTitle);
        }

        let old_allow_list = event.allow_list.clone();

        event.title = self.title.clone();
        event.description = self.description.clone();
        event.start_time = self.start_time;
        event.location = self.location.clone();
        event.image_url = self.image_url.clone();
        event.allow_signup = self.allow_signup;
        event.max_signups = self.max_signups;
        event.visibility = self.visibility;
        event.signup_deadline = self.signup_deadline;
        event.is_featured = self.is_featured;
        event.set_allow_list(self.allow_list.clone());

        let added_viewers: Vec<UserId> = event
            .allow_list
            .iter()
            .filter(|viewer| !old_allow_list.contains(viewer))
            .cloned()
            .collect();

        ctx.repos
            .event_repo
            .save(&event)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes {
            event,
            added_viewers,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SendInvitesOnAllowListExtended)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Duration;
    use eventease_domain::User;
    use eventease_infra::InMemoryEmailService;
    use std::sync::Arc;

    async fn insert_user(ctx: &AppContext, subject: &str, email: &str) -> User {
        let mut user = User::new(UserId::new(subject));
        user.name = subject.trim_start_matches("auth0|").to_string();
        user.email = Some(email.to_string());
        ctx.repos.user_repo.insert(&user).await.unwrap();
        user
    }

    async fn insert_selected_event(ctx: &AppContext, owner: &User, viewers: Vec<UserId>) -> Event {
        let mut event = Event::new(
            owner.id.clone(),
            "Game night".into(),
            Utc::now() + Duration::days(3),
        );
        event.visibility = EventVisibility::Selected;
        event.set_allow_list(viewers);
        ctx.repos.event_repo.insert(&event).await.unwrap();
        event
    }

    fn update_usecase_for(event: &Event, caller_id: UserId, allow_list: Vec<UserId>) -> UpdateEventUseCase {
        UpdateEventUseCase {
            event_id: event.id.clone(),
            caller_id,
            title: event.title.clone(),
            description: None,
            start_time: event.start_time,
            location: None,
            image_url: None,
            allow_signup: false,
            max_signups: None,
            visibility: EventVisibility::Selected,
            allow_list,
            signup_deadline: None,
            is_featured: false,
        }
    }

    #[actix_web::main]
    #[test]
    async fn only_owner_can_update() {
        let ctx = AppContext::create_inmemory();
        let owner = insert_user(&ctx, "auth0|owner", "owner@example.com").await;
        let event = insert_selected_event(&ctx, &owner, Vec::new()).await;

        let mut usecase = update_usecase_for(&event, UserId::new("auth0|intruder"), Vec::new());
        let res = usecase.execute(&ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::NotOwner);
    }

    #[actix_web::main]
    #[test]
    async fn allow_list_replacement_reports_only_added_viewers() {
        let ctx = AppContext::create_inmemory();
        let owner = insert_user(&ctx, "auth0|owner", "owner@example.com").await;
        let u1 = insert_user(&ctx, "auth0|u1", "u1@example.com").await;
        let u2 = insert_user(&ctx, "auth0|u2", "u2@example.com").await;
        let u3 = insert_user(&ctx, "auth0|u3", "u3@example.com").await;
        let event =
            insert_selected_event(&ctx, &owner, vec![u1.id.clone(), u2.id.clone()]).await;

        let mut usecase = update_usecase_for(
            &event,
            owner.id.clone(),
            vec![u1.id.clone(), u3.id.clone()],
        );
        let res = usecase.execute(&ctx).await.unwrap();

        assert_eq!(res.added_viewers, vec![u3.id.clone()]);
        let stored = ctx.repos.event_repo.find(&event.id).await.unwrap();
        assert_eq!(stored.allow_list, vec![u1.id.clone(), u3.id.clone()]);
        // u2 was dropped by the wholesale replacement
        assert!(!stored.allow_list.contains(&u2.id));
    }

    #[actix_web::main]
    #[test]
    async fn invites_only_newly_added_viewers() {
        let mut ctx = AppContext::create_inmemory();
        let outbox = Arc::new(InMemoryEmailService::new());
        ctx.services.email = outbox.clone();

        let owner = insert_user(&ctx, "auth0|owner", "owner@example.com").await;
        let u1 = insert_user(&ctx, "auth0|u1", "u1@example.com").await;
        let u3 = insert_user(&ctx, "auth0|u3", "u3@example.com").await;
        let event = insert_selected_event(&ctx, &owner, vec![u1.id.clone()]).await;

        let usecase = update_usecase_for(
            &event,
            owner.id.clone(),
            vec![u1.id.clone(), u3.id.clone()],
        );
        execute(usecase, &ctx).await.unwrap();

        let sent = outbox.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "u3@example.com");
    }

    #[actix_web::main]
    #[test]
    async fn leaving_selected_visibility_clears_allow_list() {
        let ctx = AppContext::create_inmemory();
        let owner = insert_user(&ctx, "auth0|owner", "owner@example.com").await;
        let u1 = insert_user(&ctx, "auth0|u1", "u1@example.com").await;
        let event = insert_selected_event(&ctx, &owner, vec![u1.id.clone()]).await;

        let mut usecase = update_usecase_for(&event, owner.id.clone(), vec![u1.id.clone()]);
        usecase.visibility = EventVisibility::Public;
        let res = usecase.execute(&ctx).await.unwrap();

        assert!(res.event.allow_list.is_empty());
        assert!(res.added_viewers.is_empty());
    }
}
