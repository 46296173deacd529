use crate::event::send_event_reminders::SendEventRemindersUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::time::interval;
use eventease_infra::AppContext;
use std::time::Duration;
use tracing::error;

/// Runs the reminder sweep once a minute. The sweep itself claims each
/// due event with a conditional update, so a crashed or overlapping run
/// is harmless.
pub fn start_send_reminders_job(ctx: AppContext) {
    actix_web::rt::spawn(async move {
        let mut minutely_interval = interval(Duration::from_secs(60));
        loop {
            minutely_interval.tick().await;

            if let Err(e) = execute(SendEventRemindersUseCase, &ctx).await {
                error!("Reminder sweep failed: {:?}", e);
            }
        }
    });
}
