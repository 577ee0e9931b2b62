use crate::api::controllers::dto::user_dto::{
    ChangePasswordRequest, DashboardResponse, ProfileResponse, UpdateProfileRequest,
};
use crate::security::identity::Identity;
use crate::services::errors::UserServiceError;
use crate::services::user_service::UserService;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub async fn get_profile(identity: Identity) -> impl IntoResponse {
    let service = UserService::new();

    match service.profile(identity).await {
        Ok(user) => (StatusCode::OK, Json(ProfileResponse::from(user))).into_response(),
        Err(e) => user_error_response(e),
    }
}

pub async fn update_profile(
    identity: Identity,
    Json(payload): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    let service = UserService::new();

    match service.update_profile(identity, payload.into()).await {
        Ok(()) => (StatusCode::OK, "Profile updated successfully").into_response(),
        Err(e) => user_error_response(e),
    }
}

pub async fn change_password(
    identity: Identity,
    Json(payload): Json<ChangePasswordRequest>,
) -> impl IntoResponse {
    let service = UserService::new();

    match service
        .change_password(
            identity,
            &payload.current_password,
            &payload.new_password,
            &payload.confirm_password,
        )
        .await
    {
        Ok(()) => (StatusCode::OK, "Password changed successfully").into_response(),
        Err(e) => user_error_response(e),
    }
}

pub async fn dashboard(identity: Identity) -> impl IntoResponse {
    let service = UserService::new();

    match service.dashboard(identity).await {
        Ok(stats) => (StatusCode::OK, Json(DashboardResponse::from(stats))).into_response(),
        Err(e) => user_error_response(e),
    }
}

fn user_error_response(error: UserServiceError) -> Response {
    match error {
        UserServiceError::UserNotFound => {
            (StatusCode::NOT_FOUND, error.to_string()).into_response()
        }
        UserServiceError::DuplicateEmail => {
            (StatusCode::CONFLICT, error.to_string()).into_response()
        }
        UserServiceError::MissingField(_)
        | UserServiceError::PasswordTooShort
        | UserServiceError::PasswordMismatch
        | UserServiceError::WrongPassword => {
            (StatusCode::BAD_REQUEST, error.to_string()).into_response()
        }
        _ => {
            tracing::error!("profile operation failed: {}", error);
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}
