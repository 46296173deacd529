use crate::error::AppError;
use crate::event::subscribers::SendEmailsOnEventCreated;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use eventease_api_structs::create_event::*;
use eventease_domain::{Event, EventDateOption, EventVisibility, User, UserId};
use eventease_infra::AppContext;

pub async fn create_event_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AppError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateEventUseCase {
        owner: user,
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
        date_options: body.date_options,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.event, res.date_options)))
        .map_err(AppError::from)
}

#[derive(Debug)]
pub struct CreateEventUseCase {
    pub owner: User,
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
    pub date_options: Vec<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub event: Event,
    pub date_options: Vec<EventDateOption>,
    pub owner: User,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyTitle,
    StorageError,
}

impl From<UseCaseError> for AppError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyTitle => Self::BadClientData("The event title is required".into()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateEventUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateEvent";

    async fn execute(&mut self, ctx: &AppContext) -> Result<Self::Response, Self::Error> {
        if self.title.trim().is_empty() {
            return Err(UseCaseError::EmptyTitle);
        }

        let mut event = Event::new(
            self.owner.id.clone(),
            self.title.clone(),
            self.start_time,
        );
        event.description = self.description.clone();
        event.location = self.location.clone();
        event.image_url = self.image_url.clone();
        event.allow_signup = self.allow_signup;
        event.max_signups = self.max_signups;
        event.visibility = self.visibility;
        event.signup_deadline = self.signup_deadline;
        event.is_featured = self.is_featured;
        event.set_allow_list(self.allow_list.clone());

        // The event and its candidate dates are persisted as one unit,
        // no follow-up call needed to attach the options.
        let date_options: Vec<EventDateOption> = self
            .date_options
            .iter()
            .map(|date| EventDateOption::new(event.id.clone(), *date))
            .collect();

        ctx.repos
            .event_repo
            .insert(&event)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        ctx.repos
            .date_option_repo
            .insert_many(&date_options)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes {
            event,
            date_options,
            owner: self.owner.clone(),
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SendEmailsOnEventCreated)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Duration;

    fn owner() -> User {
        let mut user = User::new(UserId::new("auth0|owner"));
        user.name = "Maja".into();
        user.email = Some("maja@example.com".into());
        user
    }

    #[actix_web::main]
    #[test]
    async fn creates_event_with_date_options_in_one_unit() {
        let ctx = AppContext::create_inmemory();
        let owner = owner();
        ctx.repos.user_repo.insert(&owner).await.unwrap();

        let start = Utc::now() + Duration::days(7);
        let mut usecase = CreateEventUseCase {
            owner,
            title: "Team offsite".into(),
            description: None,
            start_time: start,
            location: None,
            image_url: None,
            allow_signup: true,
            max_signups: None,
            visibility: EventVisibility::Public,
            allow_list: Vec::new(),
            signup_deadline: None,
            is_featured: false,
            date_options: vec![start, start + Duration::days(1)],
        };

        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.date_options.len(), 2);

        let stored = ctx.repos.event_repo.find(&res.event.id).await.unwrap();
        assert_eq!(stored.title, "Team offsite");
        let stored_options = ctx
            .repos
            .date_option_repo
            .find_by_event(&res.event.id)
            .await
            .unwrap();
        assert_eq!(stored_options.len(), 2);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_empty_title() {
        let ctx = AppContext::create_inmemory();
        let mut usecase = CreateEventUseCase {
            owner: owner(),
            title: "  ".into(),
            description: None,
            start_time: Utc::now(),
            location: None,
            image_url: None,
            allow_signup: false,
            max_signups: None,
            visibility: EventVisibility::Public,
            allow_list: Vec::new(),
            signup_deadline: None,
            is_featured: false,
            date_options: Vec::new(),
        };

        let res = usecase.execute(&ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::EmptyTitle);
    }

    #[actix_web::main]
    #[test]
    async fn allow_list_only_kept_for_selected_visibility() {
        let ctx = AppContext::create_inmemory();
        let mut usecase = CreateEventUseCase {
            owner: owner(),
            title: "Private party".into(),
            description: None,
            start_time: Utc::now(),
            location: None,
            image_url: None,
            allow_signup: false,
            max_signups: None,
            visibility: EventVisibility::Private,
            allow_list: vec![UserId::new("auth0|friend")],
            signup_deadline: None,
            is_featured: false,
            date_options: Vec::new(),
        };

        let res = usecase.execute(&ctx).await.unwrap();
        assert!(res.event.allow_list.is_empty());
    }
}
