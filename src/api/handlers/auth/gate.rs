//! Two-factor gate.
//!
//! A challenge starts in `AwaitingCode` and moves to `Verified` once a code of
//! exactly six characters is submitted. The code itself is not compared
//! against anything; a real delivery channel would replace the length check.

use super::accounts::{Role, UserRecord};

pub const CODE_LENGTH: usize = 6;
pub(crate) const CODE_LENGTH_ERROR: &str = "Code must be 6 digits";
pub(crate) const UNKNOWN_CHALLENGE: &str = "Unknown or expired challenge";

/// Whether a login has to pass the two-factor gate.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TwoFactorPolicy {
    enabled: bool,
}

impl TwoFactorPolicy {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Elevated roles are challenged only while the gate is enabled.
    #[must_use]
    pub fn requires_two_factor(&self, role: Role) -> bool {
        self.enabled && role.is_elevated()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GateState {
    AwaitingCode,
    Verified,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TwoFactorError {
    InvalidLength,
    UnknownChallenge,
}

impl TwoFactorError {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidLength => CODE_LENGTH_ERROR,
            Self::UnknownChallenge => UNKNOWN_CHALLENGE,
        }
    }
}

/// Pending verification for one user.
#[derive(Clone, Debug)]
pub struct TwoFactorChallenge {
    user: UserRecord,
    code: String,
    error: Option<String>,
    state: GateState,
}

impl TwoFactorChallenge {
    #[must_use]
    pub fn new(user: UserRecord) -> Self {
        Self {
            user,
            code: String::new(),
            error: None,
            state: GateState::AwaitingCode,
        }
    }

    #[must_use]
    pub fn target_email(&self) -> &str {
        &self.user.email
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.user.role
    }

    #[must_use]
    pub fn user(&self) -> &UserRecord {
        &self.user
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Submit a code.
    ///
    /// # Errors
    /// Returns `TwoFactorError::InvalidLength` when the code is not exactly
    /// six characters long. The stored code is cleared and the error is kept
    /// on the challenge for display.
    pub fn submit_code(&mut self, code: &str) -> Result<(), TwoFactorError> {
        if code.chars().count() == CODE_LENGTH {
            self.code = code.to_string();
            self.error = None;
            self.state = GateState::Verified;
            Ok(())
        } else {
            self.code.clear();
            self.error = Some(CODE_LENGTH_ERROR.to_string());
            self.state = GateState::AwaitingCode;
            Err(TwoFactorError::InvalidLength)
        }
    }
}
