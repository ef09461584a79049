use actix_web::http::header;
use actix_web::{HttpResponse, Responder, get, post, route, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dates::today_in;
use crate::domain::auth::AuthenticatedUser;
use crate::dto::clients::ClientsQuery;
use crate::export::CSV_CONTENT_TYPE;
use crate::forms::clients::{ClientForm, StatusForm};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{ACCESS_DENIED, base_context, redirect, render_template};
use crate::services::{ServiceError, clients as clients_service};

#[get("/clients")]
pub async fn show_clients(
    query: web::Query<ClientsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match clients_service::load_clients_page(repo.get_ref(), &user, &query) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "clients",
                &server_config.auth_service_url,
            );
            context.insert("clients", &data.clients);
            context.insert("search", &data.search);
            context.insert("status", &data.status);
            context.insert("statuses", &data.statuses);
            context.insert("error", &data.error);

            render_template(&tera, "clients/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(ACCESS_DENIED).send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list clients: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/clients/add")]
pub async fn add_client(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ClientForm>,
) -> impl Responder {
    match clients_service::create_client(repo.get_ref(), &user, form) {
        Ok(client) => {
            FlashMessage::success(format!("Client « {} » ajouté.", client.name)).send();
            redirect("/clients")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(ACCESS_DENIED).send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/clients")
        }
        Err(_) => {
            FlashMessage::error("Erreur lors de l'ajout du client.").send();
            redirect("/clients")
        }
    }
}

#[post("/client/{client_id}/update")]
pub async fn update_client(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ClientForm>,
) -> impl Responder {
    let client_id = client_id.into_inner();
    let back = format!("/client/{client_id}");

    match clients_service::update_client(repo.get_ref(), &user, client_id, form) {
        Ok(_) => {
            FlashMessage::success("Client mis à jour.").send();
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
            FlashMessage::error("Erreur lors de la mise à jour du client.").send();
            redirect(&back)
        }
    }
}

#[post("/client/{client_id}/status")]
pub async fn change_status(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<StatusForm>,
) -> impl Responder {
    match clients_service::change_status(repo.get_ref(), &user, client_id.into_inner(), &form) {
        Ok(client) => {
            FlashMessage::success(format!("Statut : {}.", client.status)).send();
            redirect("/clients")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(ACCESS_DENIED).send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Client introuvable.").send();
            redirect("/clients")
        }
        Err(_) => {
            FlashMessage::error("Erreur lors du changement de statut.").send();
            redirect("/clients")
        }
    }
}

#[post("/client/{client_id}/delete")]
pub async fn delete_client(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match clients_service::delete_client(repo.get_ref(), &user, client_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Client supprimé.").send();
            redirect("/clients")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(ACCESS_DENIED).send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Client introuvable.").send();
            redirect("/clients")
        }
        Err(_) => {
            FlashMessage::error("Erreur lors de la suppression du client.").send();
            redirect("/clients")
        }
    }
}

/// Downloads the filtered listing as CSV.
///
/// Filters come from the query string, or from the form body on POST.
#[route("/clients/export", method = "GET", method = "POST")]
pub async fn export_clients(
    query: web::Query<ClientsQuery>,
    form: Option<web::Form<ClientsQuery>>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let query = form.map_or_else(|| query.into_inner(), web::Form::into_inner);
    let today = today_in(server_config.timezone);

    match clients_service::export_clients(
        repo.get_ref(),
        &user,
        &query,
        server_config.export_delimiter,
        today,
    ) {
        Ok(file) => HttpResponse::Ok()
            .content_type(CSV_CONTENT_TYPE)
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.filename),
            ))
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .body(file.body),
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(ACCESS_DENIED).send();
            redirect("/na")
        }
        Err(_) => {
            FlashMessage::error("Export impossible : les clients n'ont pas pu être chargés.").send();
            redirect("/clients")
        }
    }
}
