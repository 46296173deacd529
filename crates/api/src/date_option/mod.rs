mod add_date_options;
mod finalize_date_option;
mod remove_vote;
mod vote_date_option;

use actix_web::web;
use add_date_options::add_date_options_controller;
use finalize_date_option::finalize_date_option_controller;
use remove_vote::remove_vote_controller;
use vote_date_option::vote_date_option_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/events/{event_id}/date_options",
        web::post().to(add_date_options_controller),
    );
    cfg.route(
        "/date_options/{date_option_id}/votes",
        web::post().to(vote_date_option_controller),
    );
    cfg.route(
        "/date_options/{date_option_id}/votes",
        web::delete().to(remove_vote_controller),
    );
    cfg.route(
        "/date_options/{date_option_id}/finalize",
        web::post().to(finalize_date_option_controller),
    );
}
