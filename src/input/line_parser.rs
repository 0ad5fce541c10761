//! Recognizes sshd authentication events in raw log lines
//!
//! Matching is unanchored, so syslog prefixes (timestamp, hostname,
//! `sshd[pid]:`) are skipped over. User and IP are captured as maximal
//! non-whitespace runs.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::AuthEvent;

/// "Failed password for [invalid user ]<user> from <ip>"
static FAILED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Failed password for (?:invalid user )?(?P<user>\S+) from (?P<ip>\S+)")
        .expect("failed-login regex")
});

/// "Accepted <method> for <user> from <ip>"
static ACCEPTED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Accepted (?P<method>\S+) for (?P<user>\S+) from (?P<ip>\S+)")
        .expect("accepted-login regex")
});

/// Parse a log line into an AuthEvent, `None` if it is neither a failed
/// nor an accepted login
pub fn parse_line(line: &str) -> Option<AuthEvent> {
    if let Some(cap) = FAILED_PATTERN.captures(line) {
        return Some(AuthEvent::Failed {
            user: cap["user"].to_string(),
            ip: cap["ip"].to_string(),
        });
    }

    ACCEPTED_PATTERN.captures(line).map(|cap| AuthEvent::Accepted {
        method: cap["method"].to_string(),
        user: cap["user"].to_string(),
        ip: cap["ip"].to_string(),
    })
}
