//! Contiguous partitioning of query keys across credentials.

use sleuth_core::{CredentialKey, OrderedMap};
use sleuth_credentials::{Credential, CredentialRegistry};
use tracing::debug;

/// Each credential's ordered share of query keys.
pub type PartitionAssignment = OrderedMap<CredentialKey, Vec<String>>;

/// Share size for `total` keys over `workers` credentials: `ceil(total / workers)`.
#[must_use]
pub fn chunk_size(total: usize, workers: usize) -> usize {
    if workers == 0 {
        return total;
    }
    total.div_ceil(workers)
}

/// Split `keys` across one platform group.
///
/// With at least as many credentials as keys, every credential gets the full
/// list. Otherwise contiguous chunks of `chunk_size` go to credentials in
/// order; credentials left without a chunk get an empty share.
#[must_use]
pub fn partition_group(
    keys: &[String],
    credentials: &[Credential],
) -> Vec<(CredentialKey, Vec<String>)> {
    if credentials.len() >= keys.len() {
        return credentials
            .iter()
            .map(|credential| (credential.key(), keys.to_vec()))
            .collect();
    }

    let size = chunk_size(keys.len(), credentials.len());
    let mut chunks = keys.chunks(size);

    credentials
        .iter()
        .map(|credential| {
            let share = chunks.next().map(<[String]>::to_vec).unwrap_or_default();
            (credential.key(), share)
        })
        .collect()
}

/// Assign query keys to every credential, independently per platform group.
///
/// Credentials sharing an identity key overwrite each other; the later share
/// wins.
#[must_use]
pub fn partition(keys: &[String], registry: &CredentialRegistry) -> PartitionAssignment {
    let mut assignment = PartitionAssignment::new();

    for group in registry.by_platform() {
        let shares = partition_group(keys, &group.credentials);
        debug!(
            platform = %group.platform,
            credentials = group.credentials.len(),
            keys = keys.len(),
            "partitioned platform group"
        );
        for (key, share) in shares {
            assignment.insert(key, share);
        }
    }

    assignment
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleuth_core::Platform;

    fn keys(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("query {i}")).collect()
    }

    fn credentials(platform: &Platform, n: usize) -> Vec<Credential> {
        (0..n)
            .map(|i| Credential::new(platform.clone(), format!("user{i}"), "pw"))
            .collect()
    }

    #[test]
    fn test_chunk_size() {
        assert_eq!(chunk_size(5, 2), 3);
        assert_eq!(chunk_size(6, 3), 2);
        assert_eq!(chunk_size(7, 3), 3);
        assert_eq!(chunk_size(0, 3), 0);
    }

    #[test]
    fn test_five_keys_two_credentials() {
        let keys = keys(5);
        let shares = partition_group(&keys, &credentials(&Platform::LinkedIn, 2));

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].1, keys[0..3].to_vec());
        assert_eq!(shares[1].1, keys[3..5].to_vec());

        let combined: Vec<String> = shares.into_iter().flat_map(|(_, share)| share).collect();
        assert_eq!(combined, keys);
    }

    #[test]
    fn test_more_credentials_than_keys_get_full_list() {
        let keys = keys(2);
        let shares = partition_group(&keys, &credentials(&Platform::Twitter, 3));

        assert_eq!(shares.len(), 3);
        for (_, share) in shares {
            assert_eq!(share, keys);
        }
    }

    #[test]
    fn test_equal_counts_get_full_list() {
        let keys = keys(3);
        let shares = partition_group(&keys, &credentials(&Platform::Twitter, 3));
        assert!(shares.iter().all(|(_, share)| share == &keys));
    }

    #[test]
    fn test_empty_keys_give_empty_shares() {
        let shares = partition_group(&[], &credentials(&Platform::Reddit, 2));
        assert_eq!(shares.len(), 2);
        assert!(shares.iter().all(|(_, share)| share.is_empty()));
    }

    #[test]
    fn test_single_credential_gets_everything() {
        let keys = keys(17);
        let shares = partition_group(&keys, &credentials(&Platform::Reddit, 1));
        assert_eq!(shares, vec![(CredentialKey::new(&Platform::Reddit, "user0"), keys)]);
    }

    #[test]
    fn test_rounding_leaves_trailing_credential_empty() {
        let keys = keys(4);
        let shares = partition_group(&keys, &credentials(&Platform::LinkedIn, 3));

        let sizes: Vec<usize> = shares.iter().map(|(_, share)| share.len()).collect();
        assert_eq!(sizes, vec![2, 2, 0]);
    }

    #[test]
    fn test_shares_cover_keys_contiguously() {
        for n in 1..40 {
            for p in 1..n {
                let keys = keys(n);
                let shares = partition_group(&keys, &credentials(&Platform::LinkedIn, p));

                let combined: Vec<String> =
                    shares.iter().flat_map(|(_, share)| share.clone()).collect();
                assert_eq!(combined, keys, "n={n} p={p}");

                let size = chunk_size(n, p);
                let non_empty: Vec<usize> = shares
                    .iter()
                    .map(|(_, share)| share.len())
                    .filter(|len| *len > 0)
                    .collect();
                let (last, rest) = non_empty.split_last().expect("at least one share");
                assert!(rest.iter().all(|len| *len == size), "n={n} p={p}");
                assert!(*last <= size, "n={n} p={p}");
            }
        }
    }

    #[test]
    fn test_partition_per_platform_group() {
        let registry = CredentialRegistry::new(vec![
            Credential::new(Platform::LinkedIn, "l0", "pw"),
            Credential::new(Platform::Twitter, "t0", "pw"),
            Credential::new(Platform::LinkedIn, "l1", "pw"),
        ]);
        let keys = keys(4);

        let assignment = partition(&keys, &registry);

        assert_eq!(assignment.len(), 3);
        assert_eq!(
            assignment.get(&CredentialKey::new(&Platform::LinkedIn, "l0")),
            Some(&keys[0..2].to_vec())
        );
        assert_eq!(
            assignment.get(&CredentialKey::new(&Platform::LinkedIn, "l1")),
            Some(&keys[2..4].to_vec())
        );
        assert_eq!(
            assignment.get(&CredentialKey::new(&Platform::Twitter, "t0")),
            Some(&keys)
        );
    }

    #[test]
    fn test_partition_identity_collision_later_wins() {
        let registry = CredentialRegistry::new(vec![
            Credential::new(Platform::LinkedIn, "dup", "a"),
            Credential::new(Platform::LinkedIn, "other", "pw"),
            Credential::new(Platform::LinkedIn, "dup", "b"),
        ]);
        let keys = keys(6);

        let assignment = partition(&keys, &registry);

        assert_eq!(assignment.len(), 2);
        assert_eq!(
            assignment.get(&CredentialKey::new(&Platform::LinkedIn, "dup")),
            Some(&keys[4..6].to_vec())
        );
    }
}
