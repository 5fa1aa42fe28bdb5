use jsonwebtoken::{encode, decode, Header, Validation, EncodingKey, DecodingKey};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::AdminUser;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // Admin ID
    pub email: String,
    pub role: String,
    pub jti: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn user(&self) -> AdminUser {
        AdminUser {
            id: self.sub.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

pub struct JwtService;

impl JwtService {
    pub fn generate_access_token(user: &AdminUser) -> Result<String, jsonwebtoken::errors::Error> {
        Self::generate_with(user, &crate::config::Config::jwt_secret(), crate::config::Config::jwt_expiry())
    }

    fn generate_with(user: &AdminUser, secret: &str, expiry: i64) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp();

        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            jti: Uuid::new_v4().to_string(),
            exp: now + expiry,
            iat: now,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_with(token, &crate::config::Config::jwt_secret())
    }

    fn verify_with(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
