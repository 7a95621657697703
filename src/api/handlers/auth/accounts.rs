//! Fixed account table used by the credential step.
//!
//! Passwords are compared as plain strings. The table is a stand-in for a
//! real identity store and carries no hashing, lockout or rate limiting.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use utoipa::ToSchema;

pub(crate) const INVALID_CREDENTIALS: &str = "Incorrect email or password";

const DEFAULT_PASSWORD: &str = "password123";

/// Roles known to the portal.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Recruiter,
    Client,
    Vendor,
    Candidate,
}

impl Role {
    pub const ALL: [Self; 5] = [
        Self::Admin,
        Self::Recruiter,
        Self::Client,
        Self::Vendor,
        Self::Candidate,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Recruiter => "recruiter",
            Self::Client => "client",
            Self::Vendor => "vendor",
            Self::Candidate => "candidate",
        }
    }

    /// Exact, case-sensitive parse of a role string.
    #[must_use]
    pub fn parse_exact(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "recruiter" => Some(Self::Recruiter),
            "client" => Some(Self::Client),
            "vendor" => Some(Self::Vendor),
            "candidate" => Some(Self::Candidate),
            _ => None,
        }
    }

    /// Internal staff roles, the ones the two-factor gate applies to.
    #[must_use]
    pub fn is_elevated(self) -> bool {
        matches!(self, Self::Admin | Self::Recruiter)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable user record returned by a successful credential check.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserRecord {
    pub email: String,
    pub role: Role,
    pub name: String,
}

/// Credentials submitted on the login form. Never stored.
#[derive(Clone, Deserialize, ToSchema)]
pub struct SessionAttempt {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SessionAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionAttempt")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LoginError {
    InvalidCredentials,
}

impl LoginError {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => INVALID_CREDENTIALS,
        }
    }
}

#[derive(Clone, Debug)]
struct Account {
    record: UserRecord,
    password: &'static str,
    // Second accepted password kept from the legacy portal. Drop it here to
    // retire it.
    alternate_password: Option<&'static str>,
}

impl Account {
    fn accepts(&self, password: &str) -> bool {
        password == self.password || self.alternate_password == Some(password)
    }
}

/// In-memory table of accounts keyed by exact email.
#[derive(Clone, Debug)]
pub struct AccountDirectory {
    accounts: HashMap<String, Account>,
}

impl AccountDirectory {
    /// The six seeded portal accounts.
    #[must_use]
    pub fn seeded() -> Self {
        let seed = [
            ("admin@prorecruit.co.il", Role::Admin, "Dana Levi", Some("admin2024")),
            ("ceo@prorecruit.co.il", Role::Admin, "Avi Ben-David", None),
            ("recruiter@prorecruit.co.il", Role::Recruiter, "Yossi Cohen", None),
            ("client@prorecruit.co.il", Role::Client, "Acme Industries", None),
            ("vendor@prorecruit.co.il", Role::Vendor, "TalentSource Ltd", None),
            ("candidate@prorecruit.co.il", Role::Candidate, "Noa Mizrahi", None),
        ];

        let accounts = seed
            .into_iter()
            .map(|(email, role, name, alternate_password)| {
                (
                    email.to_string(),
                    Account {
                        record: UserRecord {
                            email: email.to_string(),
                            role,
                            name: name.to_string(),
                        },
                        password: DEFAULT_PASSWORD,
                        alternate_password,
                    },
                )
            })
            .collect();

        Self { accounts }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    #[must_use]
    pub fn lookup(&self, email: &str) -> Option<&UserRecord> {
        self.accounts.get(email).map(|account| &account.record)
    }

    /// Iterate over every seeded record.
    pub fn records(&self) -> impl Iterator<Item = &UserRecord> {
        self.accounts.values().map(|account| &account.record)
    }

    /// Check an attempt against the table.
    ///
    /// # Errors
    /// Returns `LoginError::InvalidCredentials` for an unknown email or a
    /// password that does not match exactly. The two cases are not
    /// distinguished.
    pub fn authenticate(&self, attempt: &SessionAttempt) -> Result<UserRecord, LoginError> {
        self.accounts
            .get(&attempt.email)
            .filter(|account| account.accepts(&attempt.password))
            .map(|account| account.record.clone())
            .ok_or(LoginError::InvalidCredentials)
    }
}

impl Default for AccountDirectory {
    fn default() -> Self {
        Self::seeded()
    }
}
