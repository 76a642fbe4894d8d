//! services/api/src/web/auth.rs
//!
//! Account endpoints: signup, login, and password changes.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use fitness_tracker_core::ports::PortError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::web::extract::ApiJson;
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

// Fields are optional so that an incomplete body gets the documented message
// instead of the extractor's rejection text.

#[derive(Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdatePasswordRequest {
    pub username: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

type AuthRejection = (StatusCode, Json<MessageResponse>);

fn reply(status: StatusCode, message: &str) -> AuthRejection {
    (
        status,
        Json(MessageResponse {
            message: message.to_string(),
        }),
    )
}

fn missing_fields() -> AuthRejection {
    reply(StatusCode::BAD_REQUEST, "Missing required fields")
}

fn unexpected() -> AuthRejection {
    reply(StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred")
}

//=========================================================================================
// Password Hashing
//=========================================================================================

/// Hashes `password` with Argon2 under a fresh random salt, in PHC string form.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Checks `password` against a PHC string produced by [`hash_password`].
pub fn verify_password(
    password: &str,
    hashed_password: &str,
) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hashed_password)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /create-account - Create a new user account
#[utoipa::path(
    post,
    path = "/create-account",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created successfully", body = MessageResponse),
        (status = 400, description = "Missing fields or username already exists", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tag = "accounts"
)]
pub async fn create_account_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateAccountRequest>,
) -> Result<impl IntoResponse, AuthRejection> {
    let (Some(username), Some(password)) = (req.username, req.password) else {
        error!("Account creation failed due to missing field");
        return Err(missing_fields());
    };
    info!("Account creation attempt for username: {}", username);

    let password_hash = hash_password(&password).map_err(|e| {
        error!("Failed to hash password: {:?}", e);
        unexpected()
    })?;

    match state.users.create_user(&username, &password_hash).await {
        Ok(user) => {
            info!("Account created successfully for username: {}", user.username);
            Ok((
                StatusCode::CREATED,
                Json(MessageResponse {
                    message: "Account created successfully".to_string(),
                }),
            ))
        }
        Err(PortError::Conflict(_)) => {
            warn!(
                "Account creation failed - username already exists: {}",
                username
            );
            Err(reply(StatusCode::BAD_REQUEST, "Username already exists"))
        }
        Err(e) => {
            error!("Failed to create user: {:?}", e);
            Err(unexpected())
        }
    }
}

/// POST /login - Verify a username and password
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = MessageResponse),
        (status = 400, description = "Missing fields", body = MessageResponse),
        (status = 401, description = "Invalid credentials", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tag = "accounts"
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, AuthRejection> {
    let (Some(username), Some(password)) = (req.username, req.password) else {
        error!("Login attempt failed due to missing field");
        return Err(missing_fields());
    };
    info!("Login attempt for username: {}", username);

    let invalid = || reply(StatusCode::UNAUTHORIZED, "Invalid username or password");

    // 1. Get user by username
    let user_creds = match state.users.get_user_by_username(&username).await {
        Ok(creds) => creds,
        Err(PortError::NotFound(_)) => {
            warn!("Failed login attempt for username: {}", username);
            return Err(invalid());
        }
        Err(e) => {
            error!("Failed to get user: {:?}", e);
            return Err(unexpected());
        }
    };

    // 2. Verify password
    let valid = verify_password(&password, &user_creds.hashed_password).map_err(|e| {
        error!("Failed to parse password hash: {:?}", e);
        unexpected()
    })?;

    if !valid {
        warn!("Failed login attempt for username: {}", username);
        return Err(invalid());
    }

    info!("Successful login for user: {}", user_creds.username);
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Login successful".to_string(),
        }),
    ))
}

/// POST /update-password - Replace a password after checking the current one
#[utoipa::path(
    post,
    path = "/update-password",
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password updated successfully", body = MessageResponse),
        (status = 400, description = "Missing fields", body = MessageResponse),
        (status = 401, description = "Invalid username or current password", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tag = "accounts"
)]
pub async fn update_password_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<UpdatePasswordRequest>,
) -> Result<impl IntoResponse, AuthRejection> {
    let (Some(username), Some(current_password), Some(new_password)) =
        (req.username, req.current_password, req.new_password)
    else {
        error!("Password update failed due to missing field");
        return Err(missing_fields());
    };
    info!("Password update attempt for username: {}", username);

    let invalid = || {
        warn!(
            "Password update failed - invalid credentials for username: {}",
            username
        );
        reply(StatusCode::UNAUTHORIZED, "Invalid username or current password")
    };

    let user_creds = match state.users.get_user_by_username(&username).await {
        Ok(creds) => creds,
        Err(PortError::NotFound(_)) => return Err(invalid()),
        Err(e) => {
            error!("Failed to get user: {:?}", e);
            return Err(unexpected());
        }
    };

    let valid = verify_password(&current_password, &user_creds.hashed_password).map_err(|e| {
        error!("Failed to parse password hash: {:?}", e);
        unexpected()
    })?;
    if !valid {
        return Err(invalid());
    }

    let password_hash = hash_password(&new_password).map_err(|e| {
        error!("Failed to hash password: {:?}", e);
        unexpected()
    })?;

    state
        .users
        .update_password(user_creds.user_id, &password_hash)
        .await
        .map_err(|e| {
            error!("Failed to update password: {:?}", e);
            unexpected()
        })?;

    info!("Password updated successfully for user: {}", user_creds.username);
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Password updated successfully".to_string(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_verify_against_their_password() {
        let hash = hash_password("securepassword").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("securepassword", &hash).unwrap());
        assert!(!verify_password("wrongpassword", &hash).unwrap());
    }

    #[test]
    fn each_hash_gets_its_own_salt() {
        let first = hash_password("securepassword").unwrap();
        let second = hash_password("securepassword").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("securepassword", &second).unwrap());
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(verify_password("securepassword", "not-a-phc-string").is_err());
    }
}
