//! Ordered credential registry with platform grouping.

use crate::{
    credential::Credential,
    error::{CredentialError, Result},
    loader::CredentialLoader,
};
use sleuth_core::{CredentialKey, Platform};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Credentials of one platform, in registry order.
#[derive(Debug, Clone)]
pub struct PlatformGroup {
    /// Shared platform of every credential in the group
    pub platform: Platform,
    /// Group members, in their original relative order
    pub credentials: Vec<Credential>,
}

/// Ordered list of accounts.
///
/// Order matters: it decides which share of work each account receives and
/// which entry wins when two credentials share an identity key.
#[derive(Debug, Clone, Default)]
pub struct CredentialRegistry {
    credentials: Vec<Credential>,
}

impl CredentialRegistry {
    /// Create a registry from credentials in their intended order.
    #[must_use]
    pub fn new(credentials: Vec<Credential>) -> Self {
        Self { credentials }
    }

    /// Create a registry from all credentials the loader yields.
    pub fn load_from(loader: &CredentialLoader) -> Result<Self> {
        let registry = Self::new(loader.load_all()?);

        for key in registry.duplicate_keys() {
            warn!(credential = %key, "duplicate credential key, later entry wins");
        }

        Ok(registry)
    }

    /// All credentials in registry order.
    #[must_use]
    pub fn credentials(&self) -> &[Credential] {
        &self.credentials
    }

    /// Iterate credentials in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Credential> {
        self.credentials.iter()
    }

    /// Number of credentials, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Whether the registry holds no credentials.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    /// Look up a credential by identity key; the last matching entry wins.
    pub fn get(&self, key: &CredentialKey) -> Result<&Credential> {
        self.credentials
            .iter()
            .rev()
            .find(|credential| &credential.key() == key)
            .ok_or_else(|| CredentialError::NotFound {
                key: key.to_string(),
            })
    }

    /// Keyed view of the registry; later duplicates overwrite earlier ones.
    #[must_use]
    pub fn keyed(&self) -> HashMap<CredentialKey, &Credential> {
        self.credentials
            .iter()
            .map(|credential| (credential.key(), credential))
            .collect()
    }

    /// Identity keys that occur more than once, in order of first repetition.
    #[must_use]
    pub fn duplicate_keys(&self) -> Vec<CredentialKey> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();

        for credential in &self.credentials {
            let key = credential.key();
            if !seen.insert(key.clone()) && !duplicates.contains(&key) {
                duplicates.push(key);
            }
        }

        duplicates
    }

    /// Group credentials by platform.
    ///
    /// Groups appear in order of each platform's first credential; members
    /// keep their relative registry order.
    #[must_use]
    pub fn by_platform(&self) -> Vec<PlatformGroup> {
        let mut groups: Vec<PlatformGroup> = Vec::new();

        for credential in &self.credentials {
            match groups
                .iter_mut()
                .find(|group| group.platform == credential.platform)
            {
                Some(group) => group.credentials.push(credential.clone()),
                None => groups.push(PlatformGroup {
                    platform: credential.platform.clone(),
                    credentials: vec![credential.clone()],
                }),
            }
        }

        debug!(groups = groups.len(), "grouped credentials by platform");

        groups
    }
}

impl From<Vec<Credential>> for CredentialRegistry {
    fn from(credentials: Vec<Credential>) -> Self {
        Self::new(credentials)
    }
}
