//! Login steps and the transitions between them.

use super::{
    accounts::{AccountDirectory, SessionAttempt, UserRecord},
    gate::{TwoFactorChallenge, TwoFactorPolicy},
    routing::Destination,
};

/// Where a login currently stands.
#[derive(Clone, Debug)]
pub enum LoginStep {
    /// The login form, optionally with the message of the last failure.
    Credentials { error: Option<String> },
    AwaitingCode(TwoFactorChallenge),
    Authenticated {
        user: UserRecord,
        destination: Destination,
    },
}

impl LoginStep {
    fn authenticated(user: UserRecord) -> Self {
        let destination = Destination::from(user.role);
        Self::Authenticated { user, destination }
    }
}

pub struct LoginFlow<'a> {
    directory: &'a AccountDirectory,
    policy: TwoFactorPolicy,
}

impl<'a> LoginFlow<'a> {
    #[must_use]
    pub fn new(directory: &'a AccountDirectory, policy: TwoFactorPolicy) -> Self {
        Self { directory, policy }
    }

    /// Credential step: reject, challenge, or route.
    #[must_use]
    pub fn submit_credentials(&self, attempt: &SessionAttempt) -> LoginStep {
        match self.directory.authenticate(attempt) {
            Ok(user) if self.policy.requires_two_factor(user.role) => {
                LoginStep::AwaitingCode(TwoFactorChallenge::new(user))
            }
            Ok(user) => LoginStep::authenticated(user),
            Err(err) => LoginStep::Credentials {
                error: Some(err.message().to_string()),
            },
        }
    }

    /// Code step: route on an accepted code, otherwise stay on the challenge.
    #[must_use]
    pub fn submit_code(mut challenge: TwoFactorChallenge, code: &str) -> LoginStep {
        match challenge.submit_code(code) {
            Ok(()) => LoginStep::authenticated(challenge.user().clone()),
            Err(_) => LoginStep::AwaitingCode(challenge),
        }
    }

    /// Back-navigation from the challenge to the login form.
    #[must_use]
    pub fn cancel(challenge: TwoFactorChallenge) -> LoginStep {
        drop(challenge);
        LoginStep::Credentials { error: None }
    }
}
