//! `POST /api/send-sms` notification stub.

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, instrument, warn};
use utoipa::ToSchema;

use super::{error_response, ErrorBody};
use crate::api::sms::{SmsMessage, SmsSender};

pub(crate) const MISSING_FIELDS: &str = "Missing required fields: to, message";
pub(crate) const SEND_FAILED: &str = "Failed to send SMS";
const SEND_OK: &str = "SMS sent successfully";

#[derive(ToSchema, Serialize, Deserialize, Debug, Default)]
pub struct SendSmsRequest {
    pub to: Option<String>,
    pub message: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SendSmsResponse {
    pub success: bool,
    pub message: String,
    pub sid: String,
    pub to: String,
    pub status: String,
}

#[derive(Debug)]
pub(crate) enum SmsError {
    MissingFields,
    Delivery,
}

impl SmsError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields => StatusCode::BAD_REQUEST,
            Self::Delivery => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Self::MissingFields => MISSING_FIELDS,
            Self::Delivery => SEND_FAILED,
        }
    }
}

impl IntoResponse for SmsError {
    fn into_response(self) -> Response {
        error_response(self.status(), self.message())
    }
}

/// Both fields must be present and non-empty.
pub(crate) fn validate(request: SendSmsRequest) -> Result<SmsMessage, SmsError> {
    match (request.to, request.message) {
        (Some(to), Some(body)) if !to.is_empty() && !body.is_empty() => Ok(SmsMessage { to, body }),
        _ => Err(SmsError::MissingFields),
    }
}

#[utoipa::path(
    post,
    path = "/api/send-sms",
    request_body = SendSmsRequest,
    responses(
        (status = 200, description = "Message accepted", body = SendSmsResponse),
        (status = 400, description = "Missing required fields", body = ErrorBody),
        (status = 500, description = "Delivery failed", body = ErrorBody)
    ),
    tag = "notifications"
)]
/// Requires `Content-Type: application/json`; without it the body is unreadable.
#[instrument(skip_all)]
pub async fn send_sms(
    sender: Extension<Arc<dyn SmsSender>>,
    payload: Option<Json<SendSmsRequest>>,
) -> Response {
    // An unreadable body is reported as a delivery failure, not a validation error.
    let Some(Json(request)) = payload else {
        error!("send-sms payload could not be parsed");
        return SmsError::Delivery.into_response();
    };

    let message = match validate(request) {
        Ok(message) => message,
        Err(err) => {
            warn!("send-sms rejected: {}", err.message());
            return err.into_response();
        }
    };

    match sender.send(&message).await {
        Ok(receipt) => (
            StatusCode::OK,
            Json(SendSmsResponse {
                success: true,
                message: SEND_OK.to_string(),
                sid: receipt.sid,
                to: message.to,
                status: receipt.status,
            }),
        )
            .into_response(),
        Err(err) => {
            error!("Failed to send SMS: {err:#}");
            SmsError::Delivery.into_response()
        }
    }
}
