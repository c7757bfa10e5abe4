//! Shared types used across Sleuth.
//!
//! This module defines the platform enum and the credential identity key
//! that every keyed mapping in the pipeline is built on.

use crate::error::SleuthError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Social-media platform an account belongs to.
///
/// Known platforms have dedicated login handling; anything else is carried
/// as [`Platform::Other`] and gets a bare, unauthenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Platform {
    /// linkedin.com
    LinkedIn,
    /// twitter.com / x.com
    Twitter,
    /// facebook.com
    Facebook,
    /// instagram.com
    Instagram,
    /// reddit.com
    Reddit,
    /// Any platform without built-in support (lowercased name)
    Other(String),
}

impl Platform {
    /// Lowercase platform name, as used in identity keys and storage names.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::LinkedIn => "linkedin",
            Self::Twitter => "twitter",
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::Reddit => "reddit",
            Self::Other(name) => name,
        }
    }
}

impl FromStr for Platform {
    type Err = SleuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        match name.as_str() {
            "" => Err(SleuthError::Validation(
                "platform name cannot be empty".to_string(),
            )),
            "linkedin" => Ok(Self::LinkedIn),
            "twitter" | "x" => Ok(Self::Twitter),
            "facebook" => Ok(Self::Facebook),
            "instagram" => Ok(Self::Instagram),
            "reddit" => Ok(Self::Reddit),
            _ => Ok(Self::Other(name)),
        }
    }
}

impl TryFrom<String> for Platform {
    type Error = SleuthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.as_str().to_string()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity key of a credential: `"<platform>-<username>"`.
///
/// Assumed unique across a registry. Maps built from credential lists keep
/// the last entry for a repeated key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CredentialKey(String);

impl CredentialKey {
    /// Build the identity key for a platform and username.
    #[must_use]
    pub fn new(platform: &Platform, username: &str) -> Self {
        Self(format!("{platform}-{username}"))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_parse_known() {
        assert_eq!("linkedin".parse::<Platform>().unwrap(), Platform::LinkedIn);
        assert_eq!("LinkedIn".parse::<Platform>().unwrap(), Platform::LinkedIn);
        assert_eq!("x".parse::<Platform>().unwrap(), Platform::Twitter);
        assert_eq!(" reddit ".parse::<Platform>().unwrap(), Platform::Reddit);
    }

    #[test]
    fn test_platform_parse_other() {
        let platform: Platform = "Mastodon".parse().unwrap();
        assert_eq!(platform, Platform::Other("mastodon".to_string()));
        assert_eq!(platform.as_str(), "mastodon");
    }

    #[test]
    fn test_platform_parse_empty() {
        assert!("".parse::<Platform>().is_err());
        assert!("   ".parse::<Platform>().is_err());
    }

    #[test]
    fn test_platform_serde_roundtrip() {
        let json = serde_json::to_string(&Platform::Instagram).unwrap();
        assert_eq!(json, "\"instagram\"");

        let parsed: Platform = serde_json::from_str("\"facebook\"").unwrap();
        assert_eq!(parsed, Platform::Facebook);

        assert!(serde_json::from_str::<Platform>("\"\"").is_err());
    }

    #[test]
    fn test_credential_key_format() {
        let key = CredentialKey::new(&Platform::Twitter, "acme_watch");
        assert_eq!(key.as_str(), "twitter-acme_watch");
        assert_eq!(key.to_string(), "twitter-acme_watch");
    }

    #[test]
    fn test_credential_key_collision() {
        let a = CredentialKey::new(&Platform::LinkedIn, "dup");
        let b = CredentialKey::new(&"LINKEDIN".parse().unwrap(), "dup");
        assert_eq!(a, b);
    }
}
