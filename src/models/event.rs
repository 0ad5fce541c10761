use serde::{Deserialize, Serialize};

/// An SSH authentication event recognized in a single log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// `Failed password for [invalid user ]<user> from <ip>`
    Failed { user: String, ip: String },
    /// `Accepted <method> for <user> from <ip>`
    Accepted {
        method: String,
        user: String,
        ip: String,
    },
}

impl AuthEvent {
    pub fn user(&self) -> &str {
        match self {
            AuthEvent::Failed { user, .. } | AuthEvent::Accepted { user, .. } => user,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, AuthEvent::Failed { .. })
    }
}

/// A source IP whose failure count reached the brute-force threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BruteForceCandidate {
    pub ip: String,
    pub failures: u64,
}
