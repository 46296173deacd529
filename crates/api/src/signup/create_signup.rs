use crate::error::AppError;
use crate::shared::{
    auth::optional_identity,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventease_api_structs::create_signup::*;
use eventease_domain::{parse_name_from_email, Attendee, Event, EventSignup, User, ID};
use eventease_infra::{messages, AppContext, SignupInsert};
use tracing::warn;

pub async fn create_signup_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AppError> {
    let identity = optional_identity(&http_req, &ctx).await;

    let body = body.0;
    let usecase = CreateSignupUseCase {
        event_id: path_params.event_id.clone(),
        caller: identity.map(|(user, _)| user),
        name: body.name,
        surname: body.surname,
        age: body.age,
        email: body.email,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.signup)))
        .map_err(AppError::from)
}

#[derive(Debug)]
pub struct CreateSignupUseCase {
    pub event_id: ID,
    pub caller: Option<User>,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub age: Option<i32>,
    pub email: Option<String>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub signup: EventSignup,
    pub event: Event,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    SignupsClosed,
    EmailRequired,
    Duplicate,
    CapacityExceeded,
    StorageError,
}

impl From<UseCaseError> for AppError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => {
                Self::NotFound(format!("The event with id: {}, was not found.", event_id))
            }
            UseCaseError::SignupsClosed => {
                Self::Forbidden("Signups are not open for this event".into())
            }
            UseCaseError::EmailRequired => {
                Self::BadClientData("A contact email is required to sign up".into())
            }
            UseCaseError::Duplicate => {
                Self::Conflict("You are already signed up for this event".into())
            }
            UseCaseError::CapacityExceeded => {
                Self::CapacityExceeded("The event has reached its signup limit".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateSignupUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateSignup";

    async fn execute(&mut self, ctx: &AppContext) -> Result<Self::Response, Self::Error> {
        let viewer = self.caller.as_ref().map(|user| user.id.clone());
        let event = match ctx.repos.event_repo.find(&self.event_id).await {
            Some(event) if event.is_visible_to(viewer.as_ref()) => event,
            _ => return Err(UseCaseError::NotFound(self.event_id.clone())),
        };
        if !event.signup_open(ctx.sys.now()) {
            return Err(UseCaseError::SignupsClosed);
        }

        // Contact email: explicit input wins, else the caller's account
        // email. Without either there is nothing to confirm to.
        let email = self
            .email
            .clone()
            .or_else(|| self.caller.as_ref().and_then(|user| user.email.clone()))
            .ok_or(UseCaseError::EmailRequired)?;

        let name = self
            .name
            .clone()
            .or_else(|| self.caller.as_ref().map(|user| user.name.clone()))
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| parse_name_from_email(&email).0);

        let attendee = match &self.caller {
            Some(user) => Attendee::Account {
                user_id: user.id.clone(),
            },
            None => Attendee::Anonymous,
        };
        let mut signup = EventSignup::new(event.id.clone(), attendee, name, email);
        signup.surname = self
            .surname
            .clone()
            .or_else(|| self.caller.as_ref().and_then(|user| user.surname.clone()));
        signup.age = self.age;

        // One guarded write enforces both the per-attendee uniqueness
        // rule and the capacity cap.
        let inserted = ctx
            .repos
            .signup_repo
            .try_insert(&signup, event.max_signups)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        match inserted {
            SignupInsert::Inserted => Ok(UseCaseRes { signup, event }),
            SignupInsert::Duplicate => Err(UseCaseError::Duplicate),
            SignupInsert::CapacityExceeded => Err(UseCaseError::CapacityExceeded),
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SendConfirmationOnSignup)]
    }
}

pub struct SendConfirmationOnSignup;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateSignupUseCase> for SendConfirmationOnSignup {
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
        let options = ctx
            .repos
            .date_option_repo
            .find_by_event(&res.event.id)
            .await
            .unwrap_or_default();
        let mail = messages::signup_confirmation(
            &res.signup.email,
            &res.event,
            &options,
            &ctx.config.frontend_base_url,
        );
        if let Err(e) = ctx.services.email.send(mail).await {
            warn!(
                "Failed to send signup confirmation to {}: {:?}",
                res.signup.email, e
            );
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, Utc};
    use eventease_domain::UserId;

    fn account(subject: &str, email: &str) -> User {
        let mut user = User::new(UserId::new(subject));
        user.name = "Ana".into();
        user.email = Some(email.into());
        user
    }

    async fn insert_open_event(ctx: &AppContext, max_signups: Option<i32>) -> Event {
        let mut event = Event::new(
            UserId::new("auth0|owner"),
            "City run".into(),
            Utc::now() + Duration::days(5),
        );
        event.allow_signup = true;
        event.max_signups = max_signups;
        ctx.repos.event_repo.insert(&event).await.unwrap();
        event
    }

    fn signup_for(event: &Event, caller: Option<User>, email: Option<&str>) -> CreateSignupUseCase {
        CreateSignupUseCase {
            event_id: event.id.clone(),
            caller,
            name: None,
            surname: None,
            age: None,
            email: email.map(String::from),
        }
    }

    #[actix_web::main]
    #[test]
    async fn account_signup_falls_back_to_account_email() {
        let ctx = AppContext::create_inmemory();
        let event = insert_open_event(&ctx, None).await;
        let ana = account("auth0|ana", "ana@example.com");
        ctx.repos.user_repo.insert(&ana).await.unwrap();

        let mut usecase = signup_for(&event, Some(ana), None);
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.signup.email, "ana@example.com");
        assert_eq!(
            res.signup.attendee.user_id(),
            Some(&UserId::new("auth0|ana"))
        );
    }

    #[actix_web::main]
    #[test]
    async fn anonymous_signup_requires_email() {
        let ctx = AppContext::create_inmemory();
        let event = insert_open_event(&ctx, None).await;

        let mut usecase = signup_for(&event, None, None);
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::EmailRequired
        );
    }

    #[actix_web::main]
    #[test]
    async fn duplicate_account_signup_conflicts() {
        let ctx = AppContext::create_inmemory();
        let event = insert_open_event(&ctx, None).await;
        let ana = account("auth0|ana", "ana@example.com");
        ctx.repos.user_repo.insert(&ana).await.unwrap();

        signup_for(&event, Some(ana.clone()), None)
            .execute(&ctx)
            .await
            .unwrap();
        let res = signup_for(&event, Some(ana), None).execute(&ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::Duplicate);
    }

    #[actix_web::main]
    #[test]
    async fn capacity_is_enforced() {
        let ctx = AppContext::create_inmemory();
        let event = insert_open_event(&ctx, Some(1)).await;
        let ana = account("auth0|ana", "ana@example.com");
        let bor = account("auth0|bor", "bor@example.com");
        ctx.repos.user_repo.insert(&ana).await.unwrap();
        ctx.repos.user_repo.insert(&bor).await.unwrap();

        // Ana takes the only seat, Bor is turned away
        signup_for(&event, Some(ana), None)
            .execute(&ctx)
            .await
            .unwrap();
        let res = signup_for(&event, Some(bor), None).execute(&ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::CapacityExceeded);
    }

    #[actix_web::main]
    #[test]
    async fn cap_admits_exactly_the_limit() {
        let ctx = AppContext::create_inmemory();
        let event = insert_open_event(&ctx, Some(3)).await;

        // Five contenders, three seats
        let mut admitted = 0;
        for i in 0..5 {
            let email = format!("guest{}@example.com", i);
            let res = signup_for(&event, None, Some(email.as_str()))
                .execute(&ctx)
                .await;
            match res {
                Ok(_) => admitted += 1,
                Err(e) => assert_eq!(e, UseCaseError::CapacityExceeded),
            }
        }
        assert_eq!(admitted, 3);
        let stored = ctx.repos.signup_repo.find_by_event(&event.id).await.unwrap();
        assert_eq!(stored.len(), 3);
    }

    #[actix_web::main]
    #[test]
    async fn anonymous_duplicate_is_keyed_by_email() {
        let ctx = AppContext::create_inmemory();
        let event = insert_open_event(&ctx, None).await;

        signup_for(&event, None, Some("guest@example.com"))
            .execute(&ctx)
            .await
            .unwrap();
        let res = signup_for(&event, None, Some("guest@example.com"))
            .execute(&ctx)
            .await;
        assert_eq!(res.unwrap_err(), UseCaseError::Duplicate);

        // A different email is a different anonymous attendee
        assert!(signup_for(&event, None, Some("other@example.com"))
            .execute(&ctx)
            .await
            .is_ok());
    }

    #[actix_web::main]
    #[test]
    async fn deadline_closes_signups() {
        let ctx = AppContext::create_inmemory();
        let mut event = Event::new(
            UserId::new("auth0|owner"),
            "City run".into(),
            Utc::now() + Duration::days(5),
        );
        event.allow_signup = true;
        event.signup_deadline = Some(Utc::now() - Duration::hours(1));
        ctx.repos.event_repo.insert(&event).await.unwrap();

        let res = signup_for(&event, None, Some("late@example.com"))
            .execute(&ctx)
            .await;
        assert_eq!(res.unwrap_err(), UseCaseError::SignupsClosed);
    }
}
