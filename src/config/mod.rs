use rocket::figment::{Figment, providers::{Env, Format, Toml}};
use rocket::Config as RocketConfig;
use std::env;

pub struct Config;

impl Config {
    fn figment() -> Figment {
        // Get the current profile
        let profile = env::var("ROCKET_PROFILE").unwrap_or_else(|_| "development".to_string());

        Figment::from(RocketConfig::default())
            .merge(Toml::file("Rocket.toml").nested())
            .select(&profile)
            .merge(Env::prefixed("ROCKET_").ignore(&["PROFILE"]))
    }

    pub fn jwt_secret() -> String {
        Self::figment()
            .extract_inner("jwt_secret")
            .unwrap_or_else(|_| "default-secret".to_string())
    }

    pub fn jwt_expiry() -> i64 {
        Self::figment()
            .extract_inner("jwt_expiry")
            .unwrap_or(86400)
    }

    pub fn admin_email() -> String {
        Self::figment()
            .extract_inner("admin_email")
            .unwrap_or_else(|_| "admin@doorservice.com".to_string())
    }

    pub fn admin_password() -> String {
        Self::figment()
            .extract_inner("admin_password")
            .unwrap_or_else(|_| "admin123".to_string())
    }

    pub fn bcrypt_cost() -> u32 {
        Self::figment()
            .extract_inner("bcrypt_cost")
            .unwrap_or(bcrypt::DEFAULT_COST)
    }

    pub fn seed_mock_workers() -> bool {
        Self::figment()
            .extract_inner("seed_mock_workers")
            .unwrap_or(true)
    }

    pub fn is_development() -> bool {
        let profile = env::var("ROCKET_PROFILE").unwrap_or_else(|_| "development".to_string());
        profile == "development"
    }
}
