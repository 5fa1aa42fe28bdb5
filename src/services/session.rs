use log::{info, warn};
use std::collections::HashSet;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{AdminUser, LoginResponse};
use crate::services::JwtService;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Current password is incorrect")]
    IncorrectPassword,
    #[error("New password must be at least 6 characters")]
    WeakPassword,
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

struct AdminAccount {
    user: AdminUser,
    password_hash: String,
}

/// The single mock admin account plus the set of revoked token ids.
pub struct AdminSessions {
    account: RwLock<AdminAccount>,
    revoked: RwLock<HashSet<String>>,
    cost: u32,
}

impl AdminSessions {
    pub fn new(email: &str, password: &str, cost: u32) -> Result<Self, AuthError> {
        let password_hash = bcrypt::hash(password, cost)?;

        Ok(AdminSessions {
            account: RwLock::new(AdminAccount {
                user: AdminUser {
                    id: "1".to_string(),
                    email: email.trim().to_string(),
                    role: "admin".to_string(),
                },
                password_hash,
            }),
            revoked: RwLock::new(HashSet::new()),
            cost,
        })
    }

    async fn check(&self, email: &str, password: &str) -> Result<AdminUser, AuthError> {
        let account = self.account.read().await;

        let email_ok = account.user.email.eq_ignore_ascii_case(email.trim());
        let password_ok = bcrypt::verify(password, &account.password_hash)?;

        if email_ok && password_ok {
            Ok(account.user.clone())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let user = match self.check(email, password).await {
            Ok(user) => user,
            Err(e) => {
                warn!("Rejected admin login for {}", email);
                return Err(e);
            }
        };

        let token = JwtService::generate_access_token(&user)?;
        info!("Admin {} logged in", user.email);

        Ok(LoginResponse { token, user })
    }

    pub async fn logout(&self, jti: &str) {
        self.revoked.write().await.insert(jti.to_string());
    }

    pub async fn is_revoked(&self, jti: &str) -> bool {
        self.revoked.read().await.contains(jti)
    }

    pub async fn change_password(&self, current: &str, new: &str) -> Result<(), AuthError> {
        let mut account = self.account.write().await;

        if !bcrypt::verify(current, &account.password_hash)? {
            return Err(AuthError::IncorrectPassword);
        }
        if new.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }

        account.password_hash = bcrypt::hash(new, self.cost)?;
        info!("Admin {} changed password", account.user.email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sessions() -> AdminSessions {
        AdminSessions::new("admin@doorservice.com", "admin123", 4).unwrap()
    }

    #[tokio::test]
    async fn accepts_configured_credentials() {
        let s = sessions();
        let user = s.check(" Admin@DoorService.com", "admin123").await.unwrap();
        assert_eq!(user.role, "admin");
    }

    #[tokio::test]
    async fn rejects_wrong_password() {
        let s = sessions();
        assert!(matches!(
            s.check("admin@doorservice.com", "nope").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn change_password_requires_current() {
        let s = sessions();

        assert!(matches!(
            s.change_password("wrong", "newsecret").await,
            Err(AuthError::IncorrectPassword)
        ));
        assert!(matches!(
            s.change_password("admin123", "abc").await,
            Err(AuthError::WeakPassword)
        ));

        s.change_password("admin123", "newsecret").await.unwrap();
        assert!(s.check("admin@doorservice.com", "admin123").await.is_err());
        assert!(s.check("admin@doorservice.com", "newsecret").await.is_ok());
    }

    #[tokio::test]
    async fn logout_revokes_token_id() {
        let s = sessions();
        assert!(!s.is_revoked("abc").await);
        s.logout("abc").await;
        assert!(s.is_revoked("abc").await);
    }
}
