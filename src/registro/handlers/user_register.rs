use crate::registro::{
    signup::{self, NewUser, RegisterError},
    store::AccountStore,
};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize)]
pub struct UserRegister {
    email: String,
    password: String,
    password_confirmation: String,
}

impl std::fmt::Debug for UserRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRegister")
            .field("email", &self.email)
            .field("password", &"***")
            .field("password_confirmation", &"***")
            .finish()
    }
}

/// Public fields of a created account. The password hash is never part of
/// any response payload.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct AccountInfo {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountInfo>,
}

impl RegisterResponse {
    fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            account: None,
        }
    }
}

#[utoipa::path(
    post,
    path= "/user/register",
    request_body = UserRegister,
    responses (
        (status = 201, description = "Registration successful", body = [RegisterResponse], content_type = "application/json"),
        (status = 400, description = "Malformed payload", body = [RegisterResponse]),
        (status = 409, description = "An account with the specified email already exists", body = [RegisterResponse]),
    ),
    tag= "register"
)]
// axum handler for register
#[instrument(skip(store))]
pub async fn register(
    store: Extension<Arc<dyn AccountStore>>,
    payload: Option<Json<UserRegister>>,
) -> impl IntoResponse {
    let user: UserRegister = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(RegisterResponse::failure("Missing payload")),
            )
        }
    };

    debug!("user: {:?}", user);

    let new_user = NewUser::new(&user.email, &user.password, &user.password_confirmation);

    match signup::register(store.0.as_ref(), &new_user).await {
        Ok(account) => (
            StatusCode::CREATED,
            Json(RegisterResponse {
                success: true,
                message: "User created successfully".to_string(),
                account: Some(AccountInfo {
                    id: account.id,
                    email: account.email,
                    created_at: account.created_at,
                }),
            }),
        ),
        Err(err @ RegisterError::Validation { .. }) => (
            StatusCode::BAD_REQUEST,
            Json(RegisterResponse::failure(&err.to_string())),
        ),
        Err(err @ RegisterError::EmailTaken) => {
            error!("Email already registered");

            (
                StatusCode::CONFLICT,
                Json(RegisterResponse::failure(&err.to_string())),
            )
        }
        Err(RegisterError::StoreUnavailable(err)) => {
            error!("Account store unavailable: {:?}", err);

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RegisterResponse::failure("An error occurred during signup")),
            )
        }
    }
}
