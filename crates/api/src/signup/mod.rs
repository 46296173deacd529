mod cancel_signup;
mod create_signup;
mod get_event_signups;
mod get_user_signups;
mod remove_signup;

use actix_web::web;
use cancel_signup::cancel_signup_controller;
use create_signup::create_signup_controller;
use get_event_signups::get_event_signups_controller;
use get_user_signups::get_user_signups_controller;
use remove_signup::remove_signup_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/events/{event_id}/signups",
        web::post().to(create_signup_controller),
    );
    cfg.route(
        "/events/{event_id}/signups",
        web::get().to(get_event_signups_controller),
    );
    cfg.route(
        "/events/{event_id}/signups",
        web::delete().to(cancel_signup_controller),
    );
    cfg.route(
        "/events/{event_id}/signups/{signup_id}",
        web::delete().to(remove_signup_controller),
    );
    cfg.route("/me/signups", web::get().to(get_user_signups_controller));
}
