use serde::{Deserialize, Serialize};
use rocket_okapi::okapi::schemars::JsonSchema;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LoginDto {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: AdminUser,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordDto {
    pub current_password: String,
    pub new_password: String,
}
