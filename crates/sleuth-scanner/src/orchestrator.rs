//! Dispatch orchestration: sessions, query shares and the search loop.
//!
//! The [`Dispatcher`] ties the pipeline together. It asks the session
//! provider for one session per credential, partitions query keys across
//! credentials per platform, and can then drive each credential's share
//! through a caller-supplied [`SearchTask`] with a random pause between
//! queries.

use crate::error::{Result, ScanError};
use crate::partition::{partition, PartitionAssignment};
use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use sleuth_browser::{BrowserSession, Pacer, SessionEngine};
use sleuth_core::CredentialKey;
use sleuth_credentials::{CredentialLoader, CredentialRegistry};
use sleuth_queries::{by_incident, by_subject, load_records, InvestigationRecord};
use sleuth_session::{CredentialSessions, SessionError, SessionProvider};
use std::path::Path;
use tracing::{debug, error, info, warn};

/// How investigation records are expanded into query keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// One key per (company or product) × incident keyword.
    #[default]
    Incident,
    /// One key per company or product name.
    Subject,
}

/// Query keys for `records` under `grouping`, in generation order.
#[must_use]
pub fn query_keys(records: &[InvestigationRecord], grouping: Grouping) -> Vec<String> {
    match grouping {
        Grouping::Incident => by_incident(records).keys().to_vec(),
        Grouping::Subject => by_subject(records).keys().to_vec(),
    }
}

/// Load the credential file and the investigation records file.
pub fn load_inputs(
    credentials: &Path,
    records: &Path,
) -> Result<(CredentialRegistry, Vec<InvestigationRecord>)> {
    let loader = CredentialLoader::new(credentials)?;
    let registry = CredentialRegistry::load_from(&loader)?;
    let records = load_records(records)?;

    info!(
        credentials = registry.len(),
        records = records.len(),
        "loaded dispatch inputs"
    );

    Ok((registry, records))
}

/// Sessions and the query share each credential should work through.
pub struct DispatchPlan<S> {
    /// Query keys assigned to each credential
    pub assignments: PartitionAssignment,
    /// Live session for each credential
    pub sessions: CredentialSessions<S>,
}

/// One search step a credential's session performs for a query key.
#[async_trait]
pub trait SearchTask<S: BrowserSession>: Send + Sync {
    /// Run `query` in `session`.
    async fn search(&self, session: &S, query: &str) -> sleuth_browser::Result<()>;
}

/// Result of working through one credential's share.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentOutcome {
    /// Credential the share belonged to
    pub credential: CredentialKey,
    /// Number of query keys in the share
    pub assigned: usize,
    /// Number of queries that completed before any failure
    pub completed: usize,
    /// Error that stopped the share, if any
    pub error: Option<String>,
}

/// Sets up sessions and dispatches partitioned queries to them.
pub struct Dispatcher<E: SessionEngine> {
    provider: SessionProvider<E>,
    pacer: Pacer,
    max_concurrent: usize,
}

impl<E: SessionEngine> Dispatcher<E> {
    /// Create a dispatcher over a session provider.
    pub fn new(provider: SessionProvider<E>, pacer: Pacer) -> Self {
        Self {
            provider,
            pacer,
            max_concurrent: 5,
        }
    }

    /// Set how many credential shares run at once (minimum 1).
    #[must_use]
    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max.max(1);
        self
    }

    /// Session provider backing this dispatcher.
    pub fn provider(&self) -> &SessionProvider<E> {
        &self.provider
    }

    /// Set up every session and partition `keys` across all credentials.
    ///
    /// A single failed session setup fails the whole plan.
    pub async fn prepare(
        &self,
        registry: &CredentialRegistry,
        keys: &[String],
    ) -> Result<DispatchPlan<E::Session>> {
        let sessions = self.provider.provide_all(registry).await?;
        let assignments = partition(keys, registry);

        info!(
            sessions = sessions.len(),
            keys = keys.len(),
            "dispatch plan ready"
        );

        Ok(DispatchPlan {
            assignments,
            sessions,
        })
    }

    /// Set up sessions independently and partition `keys` across the
    /// credentials that got one.
    ///
    /// Failed credentials are returned alongside the plan and take no share.
    pub async fn prepare_settled(
        &self,
        registry: &CredentialRegistry,
        keys: &[String],
    ) -> (DispatchPlan<E::Session>, Vec<(CredentialKey, SessionError)>) {
        let mut sessions = CredentialSessions::new();
        let mut failures = Vec::new();

        for (key, outcome) in self.provider.provide_each(registry).await {
            match outcome {
                Ok(session) => {
                    sessions.insert(key, session);
                }
                Err(e) => {
                    warn!(credential = %key, error = %e, "excluding credential from dispatch");
                    failures.push((key, e));
                }
            }
        }

        let ready: CredentialRegistry = registry
            .iter()
            .filter(|credential| sessions.contains_key(&credential.key()))
            .cloned()
            .collect::<Vec<_>>()
            .into();
        let assignments = partition(keys, &ready);

        info!(
            sessions = sessions.len(),
            failed = failures.len(),
            keys = keys.len(),
            "dispatch plan ready"
        );

        (
            DispatchPlan {
                assignments,
                sessions,
            },
            failures,
        )
    }

    /// Work through every share of `plan`, shares running concurrently.
    ///
    /// Within a share queries run in order with a random pause between them.
    /// The first failing query stops that share; other shares continue.
    pub async fn execute<T>(
        &self,
        plan: &DispatchPlan<E::Session>,
        task: &T,
    ) -> Vec<AssignmentOutcome>
    where
        T: SearchTask<E::Session>,
    {
        let mut futures = FuturesUnordered::new();
        let mut outcomes = Vec::new();

        for (key, share) in plan.assignments.iter() {
            let Some(session) = plan.sessions.get(key) else {
                let e = ScanError::MissingSession {
                    credential: key.clone(),
                };
                error!(credential = %key, "{e}");
                outcomes.push(AssignmentOutcome {
                    credential: key.clone(),
                    assigned: share.len(),
                    completed: 0,
                    error: Some(e.to_string()),
                });
                continue;
            };

            futures.push(self.run_share(key, share, session, task));

            while futures.len() >= self.max_concurrent {
                if let Some(outcome) = futures.next().await {
                    outcomes.push(outcome);
                }
            }
        }

        while let Some(outcome) = futures.next().await {
            outcomes.push(outcome);
        }

        let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
        info!(shares = outcomes.len(), failed, "dispatch finished");

        outcomes
    }

    async fn run_share<T>(
        &self,
        key: &CredentialKey,
        share: &[String],
        session: &E::Session,
        task: &T,
    ) -> AssignmentOutcome
    where
        T: SearchTask<E::Session>,
    {
        let mut completed = 0;

        for (i, query) in share.iter().enumerate() {
            if i > 0 {
                let waited = self.pacer.pause().await;
                debug!(credential = %key, waited_ms = waited.as_millis(), "paused between queries");
            }

            if let Err(e) = task.search(session, query).await {
                error!(credential = %key, query = %query, error = %e, "search failed");
                return AssignmentOutcome {
                    credential: key.clone(),
                    assigned: share.len(),
                    completed,
                    error: Some(e.to_string()),
                };
            }
            completed += 1;
        }

        debug!(credential = %key, completed, "share finished");

        AssignmentOutcome {
            credential: key.clone(),
            assigned: share.len(),
            completed,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_keys_by_grouping() {
        let records = vec![InvestigationRecord::new(
            "Acme",
            vec!["Widget"],
            vec!["leak", "hack"],
        )];

        assert_eq!(
            query_keys(&records, Grouping::Incident),
            vec!["Acme Widget leak", "Acme Widget hack"]
        );
        assert_eq!(query_keys(&records, Grouping::Subject), vec!["Acme", "Widget"]);
    }

    #[test]
    fn test_grouping_default_is_incident() {
        assert_eq!(Grouping::default(), Grouping::Incident);
    }
}
