//! Multi-tenant sales pipeline CRM: clients, follow-up tasks, a dashboard
//! and a CSV export.

pub mod dates;
pub mod db;
pub mod domain;
pub mod dto;
pub mod export;
pub mod forms;
pub mod models;
pub mod repository;
pub mod schema;
pub mod services;

#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod routes;

pub const SERVICE_ACCESS_ROLE: &str = "crm";

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use actix_cors::Cors;
    use actix_files::Files;
    use actix_identity::IdentityMiddleware;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::db::{establish_connection_pool, run_migrations};
    use crate::middleware::RedirectUnauthorized;
    use crate::models::config::ServerConfig;
    use crate::repository::DieselRepository;
    use crate::routes::auth::{logout, not_assigned};
    use crate::routes::client::{add_task, delete_task, show_client, toggle_task};
    use crate::routes::clients::{
        add_client, change_status, delete_client, export_clients, show_clients, update_client,
    };
    use crate::routes::dashboard::show_dashboard;
    use crate::routes::seed::seed_demo;

    /// Cookie signing and encryption keys are carved out of the secret.
    const MIN_SECRET_LEN: usize = 64;

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        // Establish Diesel connection pool for the SQLite database.
        let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
            std::io::Error::other(format!("Failed to establish database connection: {e}"))
        })?;
        run_migrations(&pool)
            .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {e}")))?;

        let repo = DieselRepository::new(pool);

        // Keys and stores for identity, sessions, and flash messages.
        if server_config.secret.len() < MIN_SECRET_LEN {
            return Err(std::io::Error::other(format!(
                "secret must be at least {MIN_SECRET_LEN} bytes long"
            )));
        }
        let secret_key = Key::from(server_config.secret.as_bytes());

        let message_store = CookieMessageStore::builder(secret_key.clone()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        log::info!(
            "Starting server on {}:{} (timezone {}, demo mode {})",
            server_config.address,
            server_config.port,
            server_config.timezone,
            server_config.demo_mode
        );
        let bind_address = (server_config.address.clone(), server_config.port);

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(message_framework.clone())
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                        .cookie_secure(false) // set to true in prod
                        .cookie_domain(Some(format!(".{}", server_config.domain)))
                        .build(),
                )
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", "./assets"))
                .service(not_assigned)
                .service(
                    web::scope("")
                        .wrap(RedirectUnauthorized::new(&server_config.signin_url))
                        .service(show_dashboard)
                        .service(show_clients)
                        .service(add_client)
                        .service(export_clients)
                        .service(show_client)
                        .service(update_client)
                        .service(change_status)
                        .service(delete_client)
                        .service(add_task)
                        .service(toggle_task)
                        .service(delete_task)
                        .service(seed_demo)
                        .service(logout),
                )
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::new(repo.clone()))
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
