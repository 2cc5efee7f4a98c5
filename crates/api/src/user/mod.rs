mod create_user;
mod delete_user;
mod get_user;
mod subscribers;
mod update_user;

use actix_web::web;
use agenda_domain::{is_valid_email, User, MAX_USER_NAME_LENGTH};
use create_user::create_user_controller;
use delete_user::delete_user_controller;
use get_user::get_user_controller;
use update_user::update_user_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/user", web::post().to(create_user_controller));
    cfg.route("/user/{user_id}", web::get().to(get_user_controller));
    cfg.route("/user/{user_id}", web::put().to(update_user_controller));
    cfg.route("/user/{user_id}", web::delete().to(delete_user_controller));
}

fn validate_user(user: &User) -> Result<(), String> {
    if user.name.is_empty() {
        return Err("The name is required".into());
    }
    if user.name.chars().count() > MAX_USER_NAME_LENGTH {
        return Err(format!(
            "The name may not be greater than {} characters",
            MAX_USER_NAME_LENGTH
        ));
    }
    if !is_valid_email(&user.email) {
        return Err(format!("Invalid email address: {}", user.email));
    }
    Ok(())
}
