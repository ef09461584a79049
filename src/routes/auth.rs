//! Identity adapter: the session cookie carries a JWT issued by the auth
//! service.

use std::future::{Ready, ready};

use actix_identity::{Identity, IdentityExt};
use actix_web::dev::Payload;
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{FromRequest, HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, redirect, render_template};

/// Verifies an HS256 token and returns its claims.
pub fn decode_token(token: &str, secret: &str) -> Result<AuthenticatedUser, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);
    jsonwebtoken::decode::<AuthenticatedUser>(token, &key, &validation).map(|data| data.claims)
}

/// Signs claims the same way the auth service does.
pub fn encode_token(
    user: &AuthenticatedUser,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let key = EncodingKey::from_secret(secret.as_bytes());
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), user, &key)
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
    let token = req
        .get_identity()
        .and_then(|identity| identity.id())
        .map_err(|_| ErrorUnauthorized("not signed in"))?;

    let config = req
        .app_data::<web::Data<ServerConfig>>()
        .ok_or_else(|| ErrorInternalServerError("server configuration is missing"))?;

    decode_token(&token, &config.secret).map_err(|err| {
        log::warn!("Rejected session token: {err}");
        ErrorUnauthorized("invalid session")
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[post("/logout")]
pub async fn logout(user: Identity) -> impl Responder {
    user.logout();
    redirect("/")
}

#[get("/na")]
pub async fn not_assigned(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, &user, "na", &server_config.auth_service_url);
    render_template(&tera, "main/not_assigned.html", &context)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(exp: usize) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "user-1".into(),
            email: "user@example.com".into(),
            name: "User".into(),
            roles: vec!["crm".into()],
            exp,
        }
    }

    fn far_future() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[test]
    fn token_round_trip() {
        let user = claims(far_future());
        let token = encode_token(&user, "secret").unwrap();
        assert_eq!(decode_token(&token, "secret").unwrap(), user);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = encode_token(&claims(far_future()), "secret").unwrap();
        assert!(decode_token(&token, "other").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = encode_token(&claims(1_000), "secret").unwrap();
        assert!(decode_token(&token, "secret").is_err());
    }
}
