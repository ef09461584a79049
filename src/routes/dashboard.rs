use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dates::today_in;
use crate::domain::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{ACCESS_DENIED, base_context, redirect, render_template};
use crate::services::{ServiceError, dashboard as dashboard_service, seed as seed_service};

#[get("/")]
pub async fn show_dashboard(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let today = today_in(server_config.timezone);

    match dashboard_service::load_dashboard(repo.get_ref(), &user, today) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "dashboard",
                &server_config.auth_service_url,
            );
            context.insert("today", &data.today);
            context.insert("dashboard", &data.dashboard);
            context.insert("error", &data.error);
            context.insert(
                "can_seed",
                &seed_service::can_seed(repo.get_ref(), &user, server_config.demo_mode),
            );

            render_template(&tera, "dashboard/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(ACCESS_DENIED).send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to load the dashboard: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
