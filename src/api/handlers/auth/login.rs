//! Credential step and role lookup endpoints.

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

use super::{
    accounts::{SessionAttempt, INVALID_CREDENTIALS},
    flow::LoginStep,
    routing::destination_for,
    types::{DestinationQuery, DestinationResponse, LoginResponse},
    AuthState,
};
use crate::api::handlers::{error_response, ErrorBody};

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = SessionAttempt,
    responses(
        (status = 200, description = "Authenticated, or a two-factor challenge was issued", body = LoginResponse),
        (status = 400, description = "Missing or malformed payload", body = ErrorBody),
        (status = 401, description = "Incorrect email or password", body = ErrorBody)
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn login(
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<SessionAttempt>>,
) -> Response {
    let Some(Json(attempt)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "Missing payload");
    };

    sleep(auth_state.config().latency()).await;

    match auth_state.flow().submit_credentials(&attempt) {
        LoginStep::Credentials { error } => {
            warn!(email = %attempt.email, "login rejected");
            error_response(
                StatusCode::UNAUTHORIZED,
                error.unwrap_or_else(|| INVALID_CREDENTIALS.to_string()),
            )
        }
        LoginStep::AwaitingCode(challenge) => {
            let email = challenge.target_email().to_string();
            let role = challenge.role();
            let challenge_id = auth_state.challenges().store(challenge).await;
            info!(%email, %role, %challenge_id, "two-factor challenge issued");
            (
                StatusCode::OK,
                Json(LoginResponse::TwoFactorRequired {
                    challenge_id: challenge_id.to_string(),
                    email,
                    role,
                }),
            )
                .into_response()
        }
        LoginStep::Authenticated { user, destination } => {
            info!(email = %user.email, role = %user.role, redirect = destination.path(), "login succeeded");
            (
                StatusCode::OK,
                Json(LoginResponse::authenticated(user, destination)),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/v1/auth/destination",
    params(DestinationQuery),
    responses(
        (status = 200, description = "Landing screen for the role", body = DestinationResponse)
    ),
    tag = "auth"
)]
pub async fn destination(Query(query): Query<DestinationQuery>) -> impl IntoResponse {
    let redirect = destination_for(&query.role).path().to_string();
    Json(DestinationResponse {
        role: query.role,
        redirect,
    })
}
