use crate::api::controllers::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest};
use crate::services::errors::UserServiceError;
use crate::services::user_service::UserService;
use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

pub async fn register(Json(payload): Json<RegisterRequest>) -> impl IntoResponse {
    let service = UserService::new();

    match service.register(payload.into()).await {
        Ok(()) => (StatusCode::CREATED, "Registration successful").into_response(),
        Err(e @ UserServiceError::DuplicateUser) => {
            (StatusCode::CONFLICT, e.to_string()).into_response()
        }
        Err(
            e @ (UserServiceError::MissingField(_)
            | UserServiceError::PasswordTooShort
            | UserServiceError::PasswordMismatch
            | UserServiceError::InvalidRole),
        ) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        Err(e) => {
            tracing::error!("registration failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Registration failed").into_response()
        }
    }
}

pub async fn login(Json(payload): Json<LoginRequest>) -> impl IntoResponse {
    let service = UserService::new();

    match service.login(&payload.username, &payload.password).await {
        Ok((token, user)) => {
            let response = LoginResponse {
                token,
                message: format!("Welcome back, {}!", user.full_name),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e @ UserServiceError::InvalidCredentials) => {
            (StatusCode::UNAUTHORIZED, e.to_string()).into_response()
        }
        Err(e @ UserServiceError::AccountDisabled) => {
            (StatusCode::FORBIDDEN, e.to_string()).into_response()
        }
        Err(e @ UserServiceError::MissingField(_)) => {
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(e) => {
            tracing::error!("login failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Login failed").into_response()
        }
    }
}
