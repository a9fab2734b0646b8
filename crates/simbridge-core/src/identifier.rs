//! Identifiers used to address commands
//!
//! An identifier is a non-empty, case-sensitive ASCII name over
//! `[a-zA-Z0-9_]`. Interface and operation tags of an [`ArbCmd`] are
//! identifiers.
//!
//! [`ArbCmd`]: crate::ArbCmd

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{BridgeError, BridgeResult};

/// Check that `s` is a valid identifier without allocating
pub fn validate(s: &str) -> BridgeResult<()> {
    if s.is_empty() {
        return Err(BridgeError::EmptyIdentifier);
    }
    if !s.bytes().all(is_identifier_byte) {
        return Err(BridgeError::InvalidIdentifier(s.to_string()));
    }
    Ok(())
}

#[inline]
fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// A validated identifier
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Validate and wrap a string
    pub fn new(s: impl Into<String>) -> BridgeResult<Self> {
        let s = s.into();
        validate(&s)?;
        Ok(Identifier(s))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identifier {
    type Err = BridgeError;

    fn from_str(s: &str) -> BridgeResult<Self> {
        Identifier::new(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = BridgeError;

    fn try_from(s: String) -> BridgeResult<Self> {
        Identifier::new(s)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
