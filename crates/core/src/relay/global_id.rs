//! Global object identifiers.

use std::fmt;
use std::str::FromStr;

use base64::Engine as _;

use crate::error::{DomainError, DomainResult};

use super::cursor::BASE64;

/// A `(type tag, local id)` pair, serialized as `base64("Tag:id")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlobalId {
    pub type_tag: String,
    pub local_id: i64,
}

impl GlobalId {
    pub fn new(type_tag: impl Into<String>, local_id: i64) -> Self {
        Self {
            type_tag: type_tag.into(),
            local_id,
        }
    }

    /// Opaque wire form.
    pub fn encode(&self) -> String {
        BASE64.encode(format!("{}:{}", self.type_tag, self.local_id))
    }

    /// Parse the wire form.
    ///
    /// Fails with [`DomainError::InvalidGlobalId`] when the input is not
    /// base64, not UTF-8, does not split into exactly two parts on `':'`,
    /// or the id part is not an `i64`. The tag itself is not checked here.
    pub fn decode(encoded: &str) -> DomainResult<Self> {
        let invalid = || DomainError::InvalidGlobalId(encoded.to_string());

        let bytes = BASE64.decode(encoded).map_err(|_| invalid())?;
        let payload = String::from_utf8(bytes).map_err(|_| invalid())?;

        let mut parts = payload.split(':');
        let (Some(type_tag), Some(local_id), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let local_id = local_id.parse::<i64>().map_err(|_| invalid())?;

        Ok(Self::new(type_tag, local_id))
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for GlobalId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_world_42() {
        let id = GlobalId::new("World", 42);
        let decoded = GlobalId::decode(&id.encode()).unwrap();
        assert_eq!(decoded.type_tag, "World");
        assert_eq!(decoded.local_id, 42);
    }

    #[test]
    fn test_wire_format() {
        // base64("World:42")
        assert_eq!(GlobalId::new("World", 42).encode(), "V29ybGQ6NDI=");
        assert_eq!(GlobalId::new("World", 42).to_string(), "V29ybGQ6NDI=");
        assert_eq!(
            "V29ybGQ6NDI".parse::<GlobalId>().unwrap(),
            GlobalId::new("World", 42)
        );
    }

    #[test]
    fn test_negative_and_large_ids_survive() {
        for local_id in [-7, 0, i64::MAX, i64::MIN] {
            let id = GlobalId::new("Character", local_id);
            assert_eq!(GlobalId::decode(&id.encode()).unwrap(), id);
        }
    }

    // Test critique: toute entrée malformée donne InvalidGlobalId, jamais de panique
    #[test]
    fn test_malformed_ids_are_rejected() {
        let cases = [
            "",
            "%%%",
            // base64("World")
            "V29ybGQ=",
            // base64("World:42:1")
            "V29ybGQ6NDI6MQ==",
            // base64("World:42:"), trailing separator
            "V29ybGQ6NDI6",
            // base64("World:")
            "V29ybGQ6",
            // base64("World:abc")
            "V29ybGQ6YWJj",
            // base64 of invalid UTF-8
            "/w==",
        ];
        for case in cases {
            let err = GlobalId::decode(case).unwrap_err();
            assert!(
                matches!(err, DomainError::InvalidGlobalId(_)),
                "{} -> {:?}",
                case,
                err
            );
        }
    }
}
