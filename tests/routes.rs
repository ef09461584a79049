use actix_identity::{Identity, IdentityMiddleware};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::http::{StatusCode, header};
use actix_web::{App, HttpMessage, HttpRequest, HttpResponse, test, web};
use actix_web_flash_messages::Level;
use pipeline_crm::dates::DEFAULT_TIMEZONE;
use pipeline_crm::domain::auth::AuthenticatedUser;
use pipeline_crm::export::ExportDelimiter;
use pipeline_crm::models::config::ServerConfig;
use pipeline_crm::middleware::RedirectUnauthorized;
use pipeline_crm::routes::auth::encode_token;
use pipeline_crm::routes::seed::seed_demo;
use pipeline_crm::routes::{alert_level_to_str, redirect};

mod common;

const SECRET: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

fn server_config() -> ServerConfig {
    ServerConfig {
        domain: "localhost".to_string(),
        address: "127.0.0.1".to_string(),
        port: 8080,
        database_url: ":memory:".to_string(),
        templates_dir: "templates/**/*".to_string(),
        secret: SECRET.to_string(),
        auth_service_url: "http://localhost:8000".to_string(),
        signin_url: "http://localhost:8000/auth/signin".to_string(),
        timezone: DEFAULT_TIMEZONE,
        export_delimiter: ExportDelimiter::default(),
        demo_mode: false,
    }
}

fn user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "user-7".to_string(),
        email: "user7@example.com".to_string(),
        name: "User Seven".to_string(),
        roles: vec!["crm".to_string()],
        exp: 4_102_444_800,
    }
}

async fn login(req: HttpRequest, token: web::Path<String>) -> HttpResponse {
    match Identity::login(&req.extensions(), token.into_inner()) {
        Ok(_) => HttpResponse::Ok().finish(),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

async fn whoami(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().body(user.sub)
}

#[test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[test]
fn test_redirect_is_see_other() {
    let resp = redirect("/client/7");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/client/7");
}

#[actix_web::test]
async fn test_session_token_resolves_to_user() {
    let key = Key::from(SECRET.as_bytes());
    let app = test::init_service(
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(SessionMiddleware::new(CookieSessionStore::default(), key))
            .app_data(web::Data::new(server_config()))
            .route("/login/{token}", web::get().to(login))
            .route("/me", web::get().to(whoami)),
    )
    .await;

    let anonymous = test::call_service(&app, test::TestRequest::get().uri("/me").to_request()).await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let token = encode_token(&user(), SECRET).unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/login/{token}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookies: Vec<_> = resp
        .response()
        .cookies()
        .map(|cookie| cookie.into_owned())
        .collect();
    assert!(!cookies.is_empty());

    let mut req = test::TestRequest::get().uri("/me");
    for cookie in cookies {
        req = req.cookie(cookie);
    }
    let body = test::call_and_read_body(&app, req.to_request()).await;
    assert_eq!(body, "user-7");
}

#[actix_web::test]
async fn test_token_signed_with_another_secret_is_rejected() {
    let key = Key::from(SECRET.as_bytes());
    let app = test::init_service(
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(SessionMiddleware::new(CookieSessionStore::default(), key))
            .app_data(web::Data::new(server_config()))
            .route("/login/{token}", web::get().to(login))
            .route("/me", web::get().to(whoami)),
    )
    .await;

    let forged = encode_token(&user(), "not-the-shared-secret").unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/login/{forged}"))
            .to_request(),
    )
    .await;
    let cookies: Vec<_> = resp
        .response()
        .cookies()
        .map(|cookie| cookie.into_owned())
        .collect();

    let mut req = test::TestRequest::get().uri("/me");
    for cookie in cookies {
        req = req.cookie(cookie);
    }
    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_seed_is_missing_outside_demo_mode() {
    let test_db = common::TestDb::new("test_seed_is_missing_outside_demo_mode.db");
    let key = Key::from(SECRET.as_bytes());
    let app = test::init_service(
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(SessionMiddleware::new(CookieSessionStore::default(), key))
            .app_data(web::Data::new(server_config()))
            .app_data(web::Data::new(test_db.repo()))
            .route("/login/{token}", web::get().to(login))
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized::new("/auth/signin"))
                    .service(seed_demo),
            ),
    )
    .await;

    let anonymous =
        test::call_service(&app, test::TestRequest::post().uri("/seed").to_request()).await;
    assert_eq!(anonymous.status(), StatusCode::NOT_FOUND);
    assert!(anonymous.headers().get(header::LOCATION).is_none());

    let token = encode_token(&user(), SECRET).unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/login/{token}"))
            .to_request(),
    )
    .await;
    let mut req = test::TestRequest::post().uri("/seed");
    for cookie in resp.response().cookies() {
        req = req.cookie(cookie.into_owned());
    }
    let signed_in = test::call_service(&app, req.to_request()).await;
    assert_eq!(signed_in.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_anonymous_seed_in_demo_mode_goes_to_signin() {
    let test_db = common::TestDb::new("test_anonymous_seed_in_demo_mode_goes_to_signin.db");
    let config = ServerConfig {
        demo_mode: true,
        ..server_config()
    };
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(config))
            .app_data(web::Data::new(test_db.repo()))
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized::new("/auth/signin"))
                    .service(seed_demo),
            ),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::post().uri("/seed").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/auth/signin"
    );
}
