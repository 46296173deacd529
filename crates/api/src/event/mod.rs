mod create_event;
mod delete_event;
mod get_event;
mod get_events;
mod get_featured_event;
pub mod send_event_reminders;
mod subscribers;
mod update_event;

pub use delete_event::delete_event_with_children;

use actix_web::web;
use create_event::create_event_controller;
use delete_event::delete_event_controller;
use get_event::get_event_controller;
use get_events::get_events_controller;
use get_featured_event::get_featured_event_controller;
use update_event::update_event_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/events", web::post().to(create_event_controller));
    cfg.route("/events", web::get().to(get_events_controller));
    cfg.route(
        "/events/featured",
        web::get().to(get_featured_event_controller),
    );
    cfg.route("/events/{event_id}", web::get().to(get_event_controller));
    cfg.route("/events/{event_id}", web::put().to(update_event_controller));
    cfg.route(
        "/events/{event_id}",
        web::delete().to(delete_event_controller),
    );
}
