//! Request/response types for auth endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::accounts::{Role, UserRecord};
use super::routing::Destination;

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoginResponse {
    Authenticated {
        email: String,
        name: String,
        role: Role,
        redirect: String,
    },
    TwoFactorRequired {
        challenge_id: String,
        email: String,
        role: Role,
    },
}

impl LoginResponse {
    pub(super) fn authenticated(user: UserRecord, destination: Destination) -> Self {
        Self::Authenticated {
            email: user.email,
            name: user.name,
            role: user.role,
            redirect: destination.path().to_string(),
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct TwoFactorVerifyRequest {
    pub challenge_id: String,
    pub code: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct TwoFactorCancelRequest {
    pub challenge_id: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct TwoFactorCancelResponse {
    pub status: String,
}

#[derive(IntoParams, Deserialize, Debug)]
#[into_params(parameter_in = Query)]
pub struct DestinationQuery {
    /// Role to route; unknown or missing roles map to `/`.
    #[serde(default)]
    pub role: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct DestinationResponse {
    pub role: String,
    pub redirect: String,
}
