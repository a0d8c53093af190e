//! Serializable key identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A physical key, identified by its string code name (`"KeyW"`,
/// `"ArrowUp"`, `"Escape"`, ...). Names the host does not recognize
/// round-trip untouched, so bindings survive across host key tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct KeyCode(String);

impl KeyCode {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for KeyCode {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_code_round_trips_through_json() {
        let key = KeyCode::from("ArrowUp");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"ArrowUp\"");

        let back: KeyCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn unknown_names_are_preserved() {
        let key = KeyCode::from("SomeVendorKey");
        assert_eq!(key.as_str(), "SomeVendorKey");
    }
}
