//! Two-factor code submission and cancel endpoints.

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::{
    flow::LoginStep,
    gate::{TwoFactorError, CODE_LENGTH_ERROR},
    types::{LoginResponse, TwoFactorCancelRequest, TwoFactorCancelResponse, TwoFactorVerifyRequest},
    AuthState,
};
use crate::api::handlers::{error_response, ErrorBody};

#[utoipa::path(
    post,
    path = "/v1/auth/two-factor/verify",
    request_body = TwoFactorVerifyRequest,
    responses(
        (status = 200, description = "Code accepted", body = LoginResponse),
        (status = 400, description = "Code must be 6 digits", body = ErrorBody),
        (status = 404, description = "Unknown or expired challenge", body = ErrorBody)
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn verify(
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<TwoFactorVerifyRequest>>,
) -> Response {
    let Some(Json(request)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "Missing payload");
    };

    let Ok(challenge_id) = Uuid::parse_str(request.challenge_id.trim()) else {
        return unknown_challenge();
    };

    sleep(auth_state.config().latency()).await;

    match auth_state
        .challenges()
        .submit_code(challenge_id, &request.code)
        .await
    {
        Some(LoginStep::Authenticated { user, destination }) => {
            info!(email = %user.email, role = %user.role, redirect = destination.path(), "two-factor verified");
            (
                StatusCode::OK,
                Json(LoginResponse::authenticated(user, destination)),
            )
                .into_response()
        }
        Some(LoginStep::AwaitingCode(challenge)) => {
            warn!(email = %challenge.target_email(), "two-factor code rejected");
            error_response(
                StatusCode::BAD_REQUEST,
                challenge.error().unwrap_or(CODE_LENGTH_ERROR),
            )
        }
        Some(LoginStep::Credentials { .. }) | None => unknown_challenge(),
    }
}

#[utoipa::path(
    post,
    path = "/v1/auth/two-factor/cancel",
    request_body = TwoFactorCancelRequest,
    responses(
        (status = 200, description = "Back to the credential step", body = TwoFactorCancelResponse)
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn cancel(
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<TwoFactorCancelRequest>>,
) -> Response {
    if let Some(challenge_id) = payload
        .as_ref()
        .and_then(|Json(request)| Uuid::parse_str(request.challenge_id.trim()).ok())
    {
        auth_state.challenges().cancel(challenge_id).await;
        debug!(%challenge_id, "two-factor challenge cancelled");
    }

    (
        StatusCode::OK,
        Json(TwoFactorCancelResponse {
            status: "credentials".to_string(),
        }),
    )
        .into_response()
}

fn unknown_challenge() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        TwoFactorError::UnknownChallenge.message(),
    )
}
