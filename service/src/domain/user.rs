//! Authenticated principal definitions.

use std::str::FromStr;

use derive_more::{AsRef, Display, Into};
use serde::{Deserialize, Serialize};

/// Username of an authenticated principal, as decoded from a bearer
/// credential by the (external) application layer.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, Into, PartialEq,
    Serialize,
)]
#[as_ref(str, String)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Creates a new [`Username`] if the given `username` is valid.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Option<Self> {
        let username = username.into();
        Self::check(&username).then_some(Self(username))
    }

    /// Checks whether the given `username` is a valid [`Username`].
    fn check(username: impl AsRef<str>) -> bool {
        let username = username.as_ref();
        username.trim() == username
            && !username.is_empty()
            && username.len() <= 150
    }
}

impl FromStr for Username {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Username`")
    }
}

impl TryFrom<String> for Username {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Username`")
    }
}

#[cfg(test)]
mod spec {
    use super::Username;

    #[test]
    fn validates_on_construction() {
        assert!(Username::new("alice").is_some());
        assert!(Username::new("").is_none());
        assert!(Username::new(" alice").is_none());
        assert!(Username::new("a".repeat(151)).is_none());
    }
}
