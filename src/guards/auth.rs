use rocket::request::{self, FromRequest, Request, Outcome};
use rocket::http::Status;
use rocket::State;

// === OpenAPI (compatible with rocket_okapi 0.8.0 / 0.8.1) ===
use rocket_okapi::request::{OpenApiFromRequest, RequestHeaderInput};
use rocket_okapi::r#gen::OpenApiGenerator;

use crate::models::AdminUser;
use crate::services::AdminSessions;

/// JWT-based admin guard. Rejects missing, invalid, expired and
/// logged-out tokens.
pub struct AdminGuard {
    pub user: AdminUser,
    pub token_id: String,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminGuard {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let Some(header) = req.headers().get_one("Authorization") else {
            return Outcome::Error((Status::Unauthorized, ()));
        };
        let token = header.trim_start_matches("Bearer ").trim();

        let claims = match crate::services::JwtService::verify_token(token) {
            Ok(claims) => claims,
            Err(_) => return Outcome::Error((Status::Unauthorized, ())),
        };

        if claims.role != "admin" {
            return Outcome::Error((Status::Forbidden, ()));
        }

        let sessions = match req.guard::<&State<AdminSessions>>().await {
            Outcome::Success(sessions) => sessions,
            _ => return Outcome::Error((Status::InternalServerError, ())),
        };

        if sessions.is_revoked(&claims.jti).await {
            return Outcome::Error((Status::Unauthorized, ()));
        }

        Outcome::Success(AdminGuard {
            user: claims.user(),
            token_id: claims.jti,
        })
    }
}

impl<'a> OpenApiFromRequest<'a> for AdminGuard {
    fn from_request_input(
        _gen: &mut OpenApiGenerator,
        _name: String,
        _required: bool,
    ) -> rocket_okapi::Result<RequestHeaderInput> {
        Ok(RequestHeaderInput::None)
    }
}
