// HTTP handlers for authentication endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::{
    error::AuthError,
    models::{
        LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UpdateUserRequest,
        UpdateUserResponse,
    },
};
use crate::AppState;

/// Register a new user
/// POST /api/v1/register
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = RegisterResponse),
        (status = 400, description = "Email already registered or invalid body", body = String, example = json!({"success": false, "message": "User already exists"})),
        (status = 500, description = "Internal server error", body = String)
    ),
    tag = "auth"
)]
pub async fn register_handler(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    let user = state
        .auth_service
        .register(&request.username, &request.email, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "User registered successfully!".to_string(),
            data: user.into(),
        }),
    ))
}

/// Login a user
/// POST /api/v1/login
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "User logged in", body = LoginResponse),
        (status = 401, description = "Bad credentials", body = String, example = json!({"success": false, "message": "Invalid email or password"})),
        (status = 500, description = "Internal server error", body = String)
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    request
        .validate()
        .map_err(|_| AuthError::InvalidCredentials)?;

    let token = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        success: true,
        message: "User successfully logged in!".to_string(),
        access_token: token,
    }))
}

/// Merge fields into a user record
/// PATCH /user/:email
#[utoipa::path(
    patch,
    path = "/user/{email}",
    params(("email" = String, Path, description = "Email of the user to update")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UpdateUserResponse),
        (status = 404, description = "No user with this email", body = String),
        (status = 500, description = "Internal server error", body = String)
    ),
    tag = "auth"
)]
pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UpdateUserResponse>, AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    let report = state.auth_service.update_user(&email, &request).await?;

    Ok(Json(UpdateUserResponse {
        success: true,
        message: "User updated successfully!".to_string(),
        data: report,
    }))
}
