use actix_web::{HttpResponse, Responder, post, web};
use actix_web_flash_messages::FlashMessage;

use crate::dates::today_in;
use crate::domain::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{ACCESS_DENIED, redirect};
use crate::services::seed::SeedOutcome;
use crate::services::{ServiceError, seed as seed_service};

/// Loads the demo dataset. Outside demo mode the route does not exist, for
/// signed-in and anonymous visitors alike.
#[post("/seed")]
pub async fn seed_demo(
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    if !server_config.demo_mode {
        return HttpResponse::NotFound().finish();
    }
    let Some(user) = user else {
        return HttpResponse::Unauthorized().finish();
    };
    let today = today_in(server_config.timezone);

    match seed_service::seed_demo_data(repo.get_ref(), &user, server_config.demo_mode, today) {
        Ok(SeedOutcome::Seeded(counts)) => {
            FlashMessage::success(format!(
                "Données de démonstration chargées : {} clients, {} tâches.",
                counts.clients, counts.tasks
            ))
            .send();
            redirect("/")
        }
        Ok(SeedOutcome::AlreadySeeded) => {
            FlashMessage::info("Les données de démonstration sont déjà chargées.").send();
            redirect("/")
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(ACCESS_DENIED).send();
            redirect("/na")
        }
        Err(_) => {
            FlashMessage::error("Erreur lors du chargement des données de démonstration.").send();
            redirect("/")
        }
    }
}
