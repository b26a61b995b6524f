//! Substance tokens
//!
//! A substance is an opaque string. Nothing about its chemistry is modeled;
//! two substances are the same exactly when their text is the same.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An element or compound, e.g. `"H₂O"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Substance(String);

impl Substance {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Textual containment (`"H₂O₂"` contains `"H₂O"`).
    ///
    /// Plain substring match on the token, not a structural check.
    pub fn contains(&self, other: &Substance) -> bool {
        self.0.contains(other.as_str())
    }
}

impl fmt::Display for Substance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Substance {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Substance {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl Borrow<str> for Substance {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Substance {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Substance {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
