mod delete_me;
mod get_me;
mod get_user;
mod search_users;
mod update_me;
mod upload_image;

use actix_web::web;

use delete_me::delete_me_controller;
use get_me::get_me_controller;
use get_user::get_user_controller;
use search_users::search_users_controller;
use update_me::update_me_controller;
use upload_image::upload_image_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/me", web::get().to(get_me_controller));
    cfg.route("/me", web::patch().to(update_me_controller));
    cfg.route("/me", web::delete().to(delete_me_controller));

    // Literal segments before the `{user_id}` catch-all
    cfg.route("/users/search", web::get().to(search_users_controller));
    cfg.route("/users/upload_image", web::post().to(upload_image_controller));
    cfg.route("/users/{user_id}", web::get().to(get_user_controller));
}
