use crate::registro::{
    signup::{self, RegisterError},
    store::AccountStore,
};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct CheckEmail {
    email: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct CheckEmailResponse {
    pub available: bool,
    pub message: String,
}

#[utoipa::path(
    post,
    path= "/user/check-email",
    request_body = CheckEmail,
    responses (
        (status = 200, description = "Availability reported", body = [CheckEmailResponse], content_type = "application/json"),
        (status = 400, description = "Malformed payload", body = [CheckEmailResponse]),
    ),
    tag= "register"
)]
// axum handler for check-email
#[instrument(skip(store))]
pub async fn check_email(
    store: Extension<Arc<dyn AccountStore>>,
    payload: Option<Json<CheckEmail>>,
) -> impl IntoResponse {
    let request: CheckEmail = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(CheckEmailResponse {
                    available: false,
                    message: "Missing payload".to_string(),
                }),
            )
        }
    };

    debug!("check email: {:?}", request);

    match signup::check_email(store.0.as_ref(), &request.email).await {
        Ok(true) => (
            StatusCode::OK,
            Json(CheckEmailResponse {
                available: true,
                message: "Email is available".to_string(),
            }),
        ),
        Ok(false) => (
            StatusCode::OK,
            Json(CheckEmailResponse {
                available: false,
                message: "Email is already registered".to_string(),
            }),
        ),
        Err(err @ RegisterError::Validation { .. }) => (
            StatusCode::BAD_REQUEST,
            Json(CheckEmailResponse {
                available: false,
                message: err.to_string(),
            }),
        ),
        Err(err) => {
            error!("Account store unavailable: {:?}", err);

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(CheckEmailResponse {
                    available: false,
                    message: "Error checking email availability".to_string(),
                }),
            )
        }
    }
}
