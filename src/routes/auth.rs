use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

use crate::guards::AdminGuard;
use crate::models::{AdminUser, ChangePasswordDto, LoginDto, LoginResponse};
use crate::services::AdminSessions;
use crate::utils::{ApiResponse, ApiError};

/// --------------------
/// Login
/// --------------------
#[openapi(tag = "Auth")]
#[post("/auth/login", data = "<dto>")]
pub async fn login(
    sessions: &State<AdminSessions>,
    dto: Json<LoginDto>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let response = sessions.login(&dto.email, &dto.password).await?;
    Ok(Json(ApiResponse::success_with_message("Login successful", response)))
}

/// --------------------
/// Logout
/// --------------------
#[openapi(tag = "Auth")]
#[post("/auth/logout")]
pub async fn logout(
    sessions: &State<AdminSessions>,
    admin: AdminGuard,
) -> Json<ApiResponse<serde_json::Value>> {
    sessions.logout(&admin.token_id).await;
    Json(ApiResponse::success_with_message(
        "Logged out",
        serde_json::json!({ "email": admin.user.email }),
    ))
}

/// --------------------
/// Current admin (token validation)
/// --------------------
#[openapi(tag = "Auth")]
#[get("/auth/me")]
pub async fn me(admin: AdminGuard) -> Json<ApiResponse<AdminUser>> {
    Json(ApiResponse::success(admin.user))
}

#[openapi(tag = "Auth")]
#[post("/auth/change-password", data = "<dto>")]
pub async fn change_password(
    sessions: &State<AdminSessions>,
    _admin: AdminGuard,
    dto: Json<ChangePasswordDto>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    sessions
        .change_password(&dto.current_password, &dto.new_password)
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        "Password changed successfully",
        serde_json::json!({}),
    )))
}
