use crate::error::AppError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventease_api_structs::finalize_date_option::*;
use eventease_domain::{Event, EventDateOption, UserId, ID};
use eventease_infra::{messages, AppContext};
use tracing::warn;

pub async fn finalize_date_option_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<AppContext>,
) -> Result<HttpResponse, AppError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = FinalizeDateOptionUseCase {
        date_option_id: path_params.date_option_id.clone(),
        caller_id: user.id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.event, res.option, &[])))
        .map_err(AppError::from)
}

#[derive(Debug)]
pub struct FinalizeDateOptionUseCase {
    pub date_option_id: ID,
    pub caller_id: UserId,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub event: Event,
    pub option: EventDateOption,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    NotOwner,
    StorageError,
}

impl From<UseCaseError> for AppError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(date_option_id) => Self::NotFound(format!(
                "The date option with id: {}, was not found.",
                date_option_id
            )),
            UseCaseError::NotOwner => {
                Self::Forbidden("Only the event owner can finalize a date".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for FinalizeDateOptionUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "FinalizeDateOption";

    async fn execute(&mut self, ctx: &AppContext) -> Result<Self::Response, Self::Error> {
        let mut option = match ctx.repos.date_option_repo.find(&self.date_option_id).await {
            Some(option) => option,
            None => return Err(UseCaseError::NotFound(self.date_option_id.clone())),
        };
        let mut event = match ctx.repos.event_repo.find(&option.event_id).await {
            Some(event) => event,
            None => return Err(UseCaseError::NotFound(self.date_option_id.clone())),
        };
        if !event.is_owner(&self.caller_id) {
            return Err(UseCaseError::NotOwner);
        }

        // Clears is_final on every sibling, so re-finalizing a different
        // option simply moves the flag.
        option.is_final = true;
        ctx.repos
            .date_option_repo
            .set_final(&option)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        // The chosen date becomes the event's start time
        event.start_time = option.date;
        ctx.repos
            .event_repo
            .save(&event)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes { event, option })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(NotifyAttendeesOnFinalDate)]
    }
}

/// Final-date mails to everyone signed up. Account attendees are only
/// contacted when their account has notifications enabled; anonymous
/// attendees gave their email for exactly this purpose.
pub struct NotifyAttendeesOnFinalDate;

#[async_trait::async_trait(?Send)]
impl Subscriber<FinalizeDateOptionUseCase> for NotifyAttendeesOnFinalDate {
    async fn notify(&self, res: &UseCaseRes, ctx: &AppContext) {
        let signups = match ctx.repos.signup_repo.find_by_event(&res.event.id).await {
            Ok(signups) => signups,
            Err(e) => {
                warn!("Failed to load signups for final-date mail: {:?}", e);
                return;
            }
        };

        for signup in signups {
            if let Some(user_id) = signup.attendee.user_id() {
                let wants = ctx
                    .repos
                    .user_repo
                    .find(user_id)
                    .await
                    .map(|u| u.wants_notifications)
                    .unwrap_or(false);
                if !wants {
                    continue;
                }
            }
            let mail = messages::final_date(
                &signup.email,
                &res.event,
                &res.option.date,
                &ctx.config.frontend_base_url,
            );
            if let Err(e) = ctx.services.email.send(mail).await {
                warn!("Failed to send final-date mail to {}: {:?}", signup.email, e);
            }
        }
    }
}
