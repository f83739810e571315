//! API versions as used for gating comparisons.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A core API version, `major.minor`.
///
/// Ordering matches the packed-u32 wire encoding (major in the high bits),
/// so `v <= negotiated` can be evaluated on either representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiVersion {
    pub major: u16,
    pub minor: u16,
}

impl ApiVersion {
    /// Create a version from its components.
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    /// The packed-u32 encoding: major in bits 22.., minor in bits 12..22.
    ///
    /// This is the form persisted artifacts and callers negotiating a
    /// version exchange; the patch bits (0..12) are always zero here.
    pub const fn packed(self) -> u32 {
        ((self.major as u32) << 22) | ((self.minor as u32) << 12)
    }
}

/// Error produced when a version string is not of the form `major.minor`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseVersionError {
    pub input: String,
}

impl fmt::Display for ParseVersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid API version '{}': expected 'major.minor'", self.input)
    }
}

impl std::error::Error for ParseVersionError {}

impl FromStr for ApiVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseVersionError { input: s.to_string() };
        let (major, minor) = s.split_once('.').ok_or_else(err)?;
        if minor.contains('.') {
            return Err(err());
        }
        Ok(ApiVersion {
            major: major.parse().map_err(|_| err())?,
            minor: minor.parse().map_err(|_| err())?,
        })
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = ParseVersionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ApiVersion> for String {
    fn from(v: ApiVersion) -> String {
        v.to_string()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
