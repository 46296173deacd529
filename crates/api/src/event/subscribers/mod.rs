use super::{create_event, create_event::CreateEventUseCase};
use super::{update_event, update_event::UpdateEventUseCase};
use crate::shared::usecase::Subscriber;
use eventease_domain::UserId;
use eventease_infra::{messages, AppContext};
use tracing::warn;

/// Invitation mails to allow-listed users. Only accounts with a known
/// email and notifications enabled are contacted; the owner never
/// invites themselves.
async fn send_invitations(viewers: &[UserId], owner_id: &UserId, event_id: &eventease_domain::ID, ctx: &AppContext) {
    let event = match ctx.repos.event_repo.find(event_id).await {
        Some(event) => event,
        None => return,
    };
    let users = match ctx.repos.user_repo.find_many(viewers).await {
        Ok(users) => users,
        Err(e) => {
            warn!("Failed to load invited users: {:?}", e);
            return;
        }
    };
    for user in users {
        if user.id == *owner_id || !user.wants_notifications {
            continue;
        }
        let email = match &user.email {
            Some(email) => email,
            None => continue,
        };
        let mail =
            messages::event_invitation(email, &user.name, &event, &ctx.config.frontend_base_url);
        if let Err(e) = ctx.services.email.send(mail).await {
            warn!("Failed to send invitation to {}: {:?}", user.id, e);
        }
    }
}

pub struct SendEmailsOnEventCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateEventUseCase> for SendEmailsOnEventCreated {
    async fn notify(&self, res: &create_event::UseCaseRes, ctx: &AppContext) {
        if res.owner.wants_notifications {
            if let Some(email) = &res.owner.email {
                let mail = messages::event_created(
                    email,
                    &res.event,
                    &res.date_options,
                    &ctx.config.frontend_base_url,
                );
                if let Err(e) = ctx.services.email.send(mail).await {
                    warn!("Failed to send creation confirmation: {:?}", e);
                }
            }
        }

        send_invitations(&res.event.allow_list, &res.event.owner_id, &res.event.id, ctx).await;
    }
}

pub struct SendInvitesOnAllowListExtended;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateEventUseCase> for SendInvitesOnAllowListExtended {
    async fn notify(&self, res: &update_event::UseCaseRes, ctx: &AppContext) {
        // Only viewers added by this update get an invitation, not the
        // whole replaced allow-list.
        send_invitations(&res.added_viewers, &res.event.owner_id, &res.event.id, ctx).await;
    }
}
