use std::fmt;

use serde::Serialize;

/// Name and email attributed to a commit. Compared exactly, case included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Identity recorded in a store, with absent fields read as empty.
    pub fn from_parts(name: Option<&str>, email: Option<&str>) -> Self {
        Self::new(name.unwrap_or_default(), email.unwrap_or_default())
    }

    /// An identity without a name cannot attribute a commit.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.email.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} <{}>", self.name, self.email)
        }
    }
}
