//! Sign-in handlers and the login state machine.
//!
//! A login is a `LoginStep` value moved forward by explicit transitions:
//!
//! - `Credentials` → `Authenticated` when the account matches and no
//!   challenge is required.
//! - `Credentials` → `AwaitingCode` when the two-factor gate applies to the
//!   user's role.
//! - `AwaitingCode` → `Authenticated` on any 6-character code, or back to
//!   `Credentials` on cancel.
//!
//! ## Two-factor gate
//!
//! The gate is off by default. Enabling it (`--two-factor-enabled`) challenges
//! `admin` and `recruiter` logins. Pending challenges are kept in memory for
//! `--two-factor-ttl-seconds` and are lost on restart.
//!
//! ## Accounts
//!
//! The account table is fixed at compile time. `admin@prorecruit.co.il`
//! additionally accepts a legacy second password.

pub mod accounts;
pub mod flow;
pub mod gate;
pub(crate) mod login;
pub mod routing;
mod state;
pub(crate) mod two_factor;
pub(crate) mod types;

pub use accounts::{AccountDirectory, Role, SessionAttempt, UserRecord};
pub use flow::{LoginFlow, LoginStep};
pub use gate::{GateState, TwoFactorChallenge, TwoFactorPolicy};
pub use routing::{destination_for, Destination};
pub use state::{AuthConfig, AuthState, ChallengeStore};

#[cfg(test)]
mod tests;
