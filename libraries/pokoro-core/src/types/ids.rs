/// ID types for Pokoro entities
use serde::{Deserialize, Serialize};
use std::fmt;

/// User identifier
///
/// Either `host:<platformUserId>` or `guest:<token>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Prefix for identities resolved from the host platform
    pub const HOST_PREFIX: &'static str = "host:";

    /// Prefix for locally generated guest identities
    pub const GUEST_PREFIX: &'static str = "guest:";

    /// Create a new user ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identity for a user known to the host platform
    pub fn host(platform_user_id: impl fmt::Display) -> Self {
        Self(format!("{}{}", Self::HOST_PREFIX, platform_user_id))
    }

    /// Identity for a guest token
    pub fn guest(token: impl fmt::Display) -> Self {
        Self(format!("{}{}", Self::GUEST_PREFIX, token))
    }

    /// Whether this is a guest identity
    pub fn is_guest(&self) -> bool {
        self.0.starts_with(Self::GUEST_PREFIX)
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Track identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create a new track ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TrackId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TrackId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_and_guest_prefixes() {
        let host = UserId::host(42);
        assert_eq!(host.as_str(), "host:42");
        assert!(!host.is_guest());

        let guest = UserId::guest("ab12");
        assert_eq!(guest.as_str(), "guest:ab12");
        assert!(guest.is_guest());
    }

    #[test]
    fn track_id_serializes_transparently() {
        let id = TrackId::from("t-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"t-1\"");
    }
}
