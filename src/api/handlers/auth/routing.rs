//! Role to landing-screen mapping.

use super::accounts::Role;

/// Screen a client navigates to after sign-in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Destination {
    ExecutiveDashboard,
    Candidates,
    ClientPortal,
    VendorPortal,
    CandidatePortal,
    Home,
}

impl Destination {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::ExecutiveDashboard => "/executive-dashboard",
            Self::Candidates => "/candidates",
            Self::ClientPortal => "/client-portal",
            Self::VendorPortal => "/vendor-portal",
            Self::CandidatePortal => "/candidate-portal",
            Self::Home => "/",
        }
    }
}

impl From<Role> for Destination {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => Self::ExecutiveDashboard,
            Role::Recruiter => Self::Candidates,
            Role::Client => Self::ClientPortal,
            Role::Vendor => Self::VendorPortal,
            Role::Candidate => Self::CandidatePortal,
        }
    }
}

/// Map a role string to its destination. Unknown roles fall back to `/`.
#[must_use]
pub fn destination_for(role: &str) -> Destination {
    Role::parse_exact(role).map_or(Destination::Home, Destination::from)
}
