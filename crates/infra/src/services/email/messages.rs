//! Mail builders. Everything here is a pure function from event data to a
//! rendered [`Email`], so the dispatching code and the tests share the
//! exact same output.

use super::Email;
use chrono::{DateTime, Utc};
use eventease_domain::{Event, EventDateOption};

fn fmt_date(date: &DateTime<Utc>) -> String {
    date.format("%A, %B %-d %Y at %H:%M UTC").to_string()
}

fn event_link(frontend_base_url: &str, event: &Event) -> String {
    format!(
        r#"<p style="margin-top: 20px;"><a href="{}/events/{}">View event</a></p>"#,
        frontend_base_url,
        event.id.as_string()
    )
}

fn wrap(title: &str, content: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; color: #333; padding: 20px;">
  <h2 style="color: #2b7a78;">{}</h2>
  <div style="padding: 10px 20px; border: 1px solid #ccc; border-radius: 10px;">
    {}
  </div>
  <p style="font-size: 12px; color: #999; margin-top: 20px;">This message was sent by EventEase.</p>
</div>"#,
        title, content
    )
}

/// The date line of a mail: the final date when one is decided, the event
/// start time when there is nothing to vote on, and "to be decided" while
/// a vote with several options is still open.
fn date_line(event: &Event, options: &[EventDateOption]) -> String {
    let final_option = options.iter().find(|o| o.is_final);
    match final_option {
        Some(option) => format!("<p><strong>Date:</strong> {}</p>", fmt_date(&option.date)),
        None if options.len() > 1 => "<p><strong>Date:</strong> to be decided by vote</p>".into(),
        None => format!("<p><strong>Date:</strong> {}</p>", fmt_date(&event.start_time)),
    }
}

fn location_line(event: &Event) -> String {
    format!(
        "<p><strong>Location:</strong> {}</p>",
        event.location.as_deref().unwrap_or("No location given.")
    )
}

fn description_line(event: &Event) -> String {
    format!(
        "<p><strong>Description:</strong><br>{}</p>",
        event.description.as_deref().unwrap_or("No description.")
    )
}

fn deadline_line(event: &Event) -> String {
    match &event.signup_deadline {
        Some(deadline) => format!(
            "<p><strong>Signup deadline:</strong> {}</p>",
            fmt_date(deadline)
        ),
        None => String::new(),
    }
}

pub fn event_created(
    to: &str,
    event: &Event,
    options: &[EventDateOption],
    frontend_base_url: &str,
) -> Email {
    let content = format!(
        "{}{}{}{}",
        date_line(event, options),
        location_line(event),
        description_line(event),
        event_link(frontend_base_url, event)
    );
    Email {
        to: to.to_string(),
        subject: format!("Your event was created: {}", event.title),
        html: wrap("Event created", &content),
    }
}

pub fn event_invitation(
    to: &str,
    recipient_name: &str,
    event: &Event,
    frontend_base_url: &str,
) -> Email {
    let content = format!(
        "<p>Hi {},</p><p>You have been invited to <strong>{}</strong>.</p>{}{}{}{}",
        recipient_name,
        event.title,
        format_args!(
            "<p><strong>Date:</strong> {}</p>",
            fmt_date(&event.start_time)
        ),
        location_line(event),
        description_line(event),
        event_link(frontend_base_url, event)
    );
    Email {
        to: to.to_string(),
        subject: format!("You are invited: {}", event.title),
        html: wrap("Event invitation", &content),
    }
}

pub fn signup_confirmation(
    to: &str,
    event: &Event,
    options: &[EventDateOption],
    frontend_base_url: &str,
) -> Email {
    let content = format!(
        "<p>You signed up for <strong>{}</strong>.</p>{}{}{}{}{}",
        event.title,
        date_line(event, options),
        location_line(event),
        description_line(event),
        deadline_line(event),
        event_link(frontend_base_url, event)
    );
    Email {
        to: to.to_string(),
        subject: format!("Signup confirmed: {}", event.title),
        html: wrap("Signup confirmed", &content),
    }
}

pub fn signup_cancelled(to: &str, event: &Event, frontend_base_url: &str) -> Email {
    let content = format!(
        "<p>You cancelled your signup for <strong>{}</strong>.</p>{}{}{}",
        event.title,
        location_line(event),
        description_line(event),
        event_link(frontend_base_url, event)
    );
    Email {
        to: to.to_string(),
        subject: format!("Signup cancelled: {}", event.title),
        html: wrap("Signup cancelled", &content),
    }
}

pub fn final_date(
    to: &str,
    event: &Event,
    final_date: &DateTime<Utc>,
    frontend_base_url: &str,
) -> Email {
    let content = format!(
        "<p>The organizer picked the final date for <strong>{}</strong>.</p>\
         <p><strong>Chosen date:</strong> {}</p>{}{}{}{}",
        event.title,
        fmt_date(final_date),
        location_line(event),
        description_line(event),
        deadline_line(event),
        event_link(frontend_base_url, event)
    );
    Email {
        to: to.to_string(),
        subject: format!("Final date picked: {}", event.title),
        html: wrap("Final date picked", &content),
    }
}

pub fn event_reminder(to: &str, event: &Event, frontend_base_url: &str) -> Email {
    let content = format!(
        "<p><strong>Date:</strong> {}</p>{}{}{}",
        fmt_date(&event.start_time),
        location_line(event),
        description_line(event),
        event_link(frontend_base_url, event)
    );
    Email {
        to: to.to_string(),
        subject: format!("Reminder: {} is coming up", event.title),
        html: wrap("Event reminder", &content),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;
    use eventease_domain::UserId;

    fn test_event() -> Event {
        let mut event = Event::new(
            UserId::new("auth0|alice"),
            "Board games night".into(),
            Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap(),
        );
        event.location = Some("Community hall".into());
        event
    }

    #[test]
    fn date_line_prefers_the_final_option() {
        let event = test_event();
        let mut options = vec![
            EventDateOption::new(
                event.id.clone(),
                Utc.with_ymd_and_hms(2024, 6, 2, 18, 0, 0).unwrap(),
            ),
            EventDateOption::new(
                event.id.clone(),
                Utc.with_ymd_and_hms(2024, 6, 3, 18, 0, 0).unwrap(),
            ),
        ];
        assert!(date_line(&event, &options).contains("to be decided"));

        options[1].is_final = true;
        assert!(date_line(&event, &options).contains("June 3"));
    }

    #[test]
    fn single_option_falls_back_to_the_event_start() {
        let event = test_event();
        let options = vec![EventDateOption::new(event.id.clone(), event.start_time)];
        assert!(date_line(&event, &options).contains("June 1"));
    }

    #[test]
    fn invitation_addresses_the_recipient() {
        let event = test_event();
        let email = event_invitation("bob@mail.com", "Bob", &event, "http://localhost:3000");
        assert_eq!(email.to, "bob@mail.com");
        assert!(email.subject.contains("Board games night"));
        assert!(email.html.contains("Hi Bob,"));
        assert!(email
            .html
            .contains(&format!("/events/{}", event.id.as_string())));
    }
}
