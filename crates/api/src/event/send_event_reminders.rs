use crate::error::AppError;
use crate::shared::usecase::UseCase;
use chrono::Duration;
use eventease_domain::Event;
use eventease_infra::{messages, AppContext};
use tracing::warn;

/// Sweeps for events whose start time falls inside the reminder window
/// and mails their attendees. Each event is claimed with a conditional
/// update before any mail goes out, so overlapping sweeps (or multiple
/// server instances) never remind twice.
#[derive(Debug)]
pub struct SendEventRemindersUseCase;

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
impl UseCase for SendEventRemindersUseCase {
    type Response = Vec<Event>;

    type Error = UseCaseError;

    const NAME: &'static str = "SendEventReminders";

    async fn execute(&mut self, ctx: &AppContext) -> Result<Self::Response, Self::Error> {
        let target = ctx.sys.now() + Duration::milliseconds(ctx.config.reminder_lead_time_millis);
        let tolerance = Duration::milliseconds(ctx.config.reminder_tolerance_millis);

        let due = ctx
            .repos
            .event_repo
            .find_unreminded_between(target - tolerance, target + tolerance)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut reminded = Vec::new();
        for event in due {
            let claimed = ctx
                .repos
                .event_repo
                .mark_reminder_sent(&event.id)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            if !claimed {
                continue;
            }

            remind_attendees(&event, ctx).await;
            reminded.push(event);
        }

        Ok(reminded)
    }
}

async fn remind_attendees(event: &Event, ctx: &AppContext) {
    let signups = match ctx.repos.signup_repo.find_by_event(&event.id).await {
        Ok(signups) => signups,
        Err(e) => {
            warn!("Failed to load signups for event {}: {:?}", event.id, e);
            return;
        }
    };

    for signup in signups {
        // Anonymous signups never opted in to account mail
        let user_id = match signup.attendee.user_id() {
            Some(user_id) => user_id,
            None => continue,
        };
        let user = match ctx.repos.user_repo.find(user_id).await {
            Some(user) => user,
            None => continue,
        };
        if !user.wants_notifications {
            continue;
        }
        // An account without a stored email still left a contact
        // address on the signup itself
        let email = user.email.as_deref().unwrap_or(&signup.email);

        let mail = messages::event_reminder(email, event, &ctx.config.frontend_base_url);
        if let Err(e) = ctx.services.email.send(mail).await {
            warn!("Failed to send reminder to {}: {:?}", user.id, e);
        }
    }
}
