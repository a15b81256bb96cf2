//! Identifiers - 128-bit random document ids.
//!
//! A `Uid` always renders as lowercase hyphenated hex (`8-4-4-4-12`).
//! Incoming strings are checked with [`validate_format`] before any lookup,
//! so a syntactically broken id fails with `MalformedIdentifier` while a
//! well-formed but unknown one fails with `NotFound`.
//!
//! ## Example
//!
//! ```
//! use docstore::uid::{validate_format, RandomUidGenerator, Uid, UidGenerator};
//!
//! let uid = RandomUidGenerator.generate();
//! assert!(validate_format(&uid.to_string()));
//! assert_eq!(Uid::parse(&uid.to_string()).unwrap(), uid);
//! ```

mod generator;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::StoreError;

pub use generator::{RandomUidGenerator, UidGenerator};

const CANONICAL_LEN: usize = 36;
const HYPHEN_OFFSETS: [usize; 4] = [8, 13, 18, 23];

/// Unique identifier for a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uid(Uuid);

impl Uid {
    /// Parse a canonical hyphenated identifier.
    ///
    /// Hex digits may be upper or lower case; the result always renders
    /// lowercase.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        if !validate_format(raw) {
            return Err(StoreError::MalformedIdentifier(raw.to_string()));
        }
        Uuid::parse_str(raw)
            .map(Uid)
            .map_err(|_| StoreError::MalformedIdentifier(raw.to_string()))
    }

    /// The all-zero identifier. Well-formed, never issued by a generator.
    pub fn nil() -> Self {
        Uid(Uuid::nil())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for Uid {
    fn from(value: Uuid) -> Self {
        Uid(value)
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.as_hyphenated(), f)
    }
}

impl FromStr for Uid {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uid::parse(s)
    }
}

impl Serialize for Uid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Uid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Uid::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Returns true when `raw` has the canonical `8-4-4-4-12` hex shape.
///
/// Pure string check with no side effects. Braced, URN and unhyphenated
/// forms are rejected even though they denote valid UUIDs.
pub fn validate_format(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    if bytes.len() != CANONICAL_LEN {
        return false;
    }
    bytes.iter().enumerate().all(|(idx, byte)| {
        if HYPHEN_OFFSETS.contains(&idx) {
            *byte == b'-'
        } else {
            byte.is_ascii_hexdigit()
        }
    })
}
