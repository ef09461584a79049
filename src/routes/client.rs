use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dates::today_in;
use crate::domain::auth::AuthenticatedUser;
use crate::forms::tasks::{AddTaskForm, TaskIdForm, ToggleTaskForm};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{ACCESS_DENIED, base_context, redirect, render_template};
use crate::services::{ServiceError, client as client_service};

#[get("/client/{client_id}")]
pub async fn show_client(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let today = today_in(server_config.timezone);

    match client_service::load_client_page(repo.get_ref(), &user, client_id.into_inner(), today) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "clients",
                &server_config.auth_service_url,
            );
            context.insert("client", &data.client);
            context.insert("tasks", &data.tasks);
            context.insert("statuses", &data.statuses);
            context.insert("today", &data.today);
            context.insert("error", &data.error);

            render_template(&tera, "client/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(ACCESS_DENIED).send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to load the client page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/client/{client_id}/tasks/add")]
pub async fn add_task(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddTaskForm>,
) -> impl Responder {
    let client_id = client_id.into_inner();
    let back = format!("/client/{client_id}");

    match client_service::add_task(repo.get_ref(), &user, client_id, form) {
        Ok(_) => {
            FlashMessage::success("Tâche ajoutée.").send();
            redirect(&back)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(ACCESS_DENIED).send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&back)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Client introuvable.").send();
            redirect("/clients")
        }
        Err(_) => {
            FlashMessage::error("Erreur lors de l'ajout de la tâche.").send();
            redirect(&back)
        }
    }
}

#[post("/client/{client_id}/tasks/toggle")]
pub async fn toggle_task(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ToggleTaskForm>,
) -> impl Responder {
    let client_id = client_id.into_inner();
    let back = format!("/client/{client_id}");

    match client_service::toggle_task(repo.get_ref(), &user, client_id, &form) {
        Ok(task) if task.done => {
            FlashMessage::success("Tâche terminée.").send();
            redirect(&back)
        }
        Ok(_) => {
            FlashMessage::info("Tâche rouverte.").send();
            redirect(&back)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(ACCESS_DENIED).send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Tâche introuvable.").send();
            redirect(&back)
        }
        Err(_) => {
            FlashMessage::error("Erreur lors de la mise à jour de la tâche.").send();
            redirect(&back)
        }
    }
}

#[post("/client/{client_id}/tasks/delete")]
pub async fn delete_task(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<TaskIdForm>,
) -> impl Responder {
    let client_id = client_id.into_inner();
    let back = format!("/client/{client_id}");

    match client_service::delete_task(repo.get_ref(), &user, client_id, &form) {
        Ok(()) => {
            FlashMessage::success("Tâche supprimée.").send();
            redirect(&back)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(ACCESS_DENIED).send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Tâche introuvable.").send();
            redirect(&back)
        }
        Err(_) => {
            FlashMessage::error("Erreur lors de la suppression de la tâche.").send();
            redirect(&back)
        }
    }
}
