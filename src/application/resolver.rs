//! # Name Resolver
//!
//! Resolves a killmail's collected ids to names and indexes them by id.
//! Ids are sent in as few requests as the endpoint allows (one for any normal killmail).

use futures::future::try_join_all;
use std::collections::BTreeSet;

use crate::domain::error::ServiceError;
use crate::domain::killmail::NameMap;
use crate::domain::traits::NameLookup;

/// Per-request id limit of `/universe/names/`.
pub const MAX_IDS_PER_REQUEST: usize = 1000;

pub async fn resolve_names<L>(lookup: &L, ids: &BTreeSet<i32>) -> Result<NameMap, ServiceError>
where
    L: NameLookup + ?Sized,
{
    if ids.is_empty() {
        return Ok(NameMap::new());
    }

    let ids: Vec<i32> = ids.iter().copied().collect();
    let batches = try_join_all(ids.chunks(MAX_IDS_PER_REQUEST).map(|chunk| lookup.names(chunk))).await?;

    Ok(batches
        .into_iter()
        .flatten()
        .map(|name| (name.id, name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::killmail::NameRef;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct EchoLookup {
        requests: Mutex<Vec<Vec<i32>>>,
        /// ids the endpoint does not know
        unknown: Vec<i32>,
    }

    #[async_trait]
    impl NameLookup for EchoLookup {
        async fn names(&self, ids: &[i32]) -> Result<Vec<NameRef>, ServiceError> {
            self.requests.lock().unwrap().push(ids.to_vec());
            Ok(ids
                .iter()
                .filter(|id| !self.unknown.contains(id))
                .map(|id| NameRef {
                    category: "character".to_string(),
                    id: *id,
                    name: format!("name-{id}"),
                })
                .collect())
        }
    }

    struct FailingLookup;

    #[async_trait]
    impl NameLookup for FailingLookup {
        async fn names(&self, _ids: &[i32]) -> Result<Vec<NameRef>, ServiceError> {
            Err(ServiceError::Status {
                service: "esi",
                status: 502,
                body: String::new(),
            })
        }
    }

    #[tokio::test]
    async fn test_single_request_builds_map() {
        let lookup = EchoLookup::default();
        let ids: BTreeSet<i32> = [100, 200, 300].into_iter().collect();

        let names = resolve_names(&lookup, &ids).await.unwrap();
        assert_eq!(names.len(), 3);
        assert_eq!(names[&200].name, "name-200");
        assert_eq!(*lookup.requests.lock().unwrap(), vec![vec![100, 200, 300]]);
    }

    #[tokio::test]
    async fn test_missing_ids_have_no_entry() {
        let lookup = EchoLookup {
            unknown: vec![200],
            ..Default::default()
        };
        let ids: BTreeSet<i32> = [100, 200].into_iter().collect();

        let names = resolve_names(&lookup, &ids).await.unwrap();
        assert!(names.contains_key(&100));
        assert!(!names.contains_key(&200));
    }

    #[tokio::test]
    async fn test_large_sets_are_chunked() {
        let lookup = EchoLookup::default();
        let ids: BTreeSet<i32> = (1..=2500).collect();

        let names = resolve_names(&lookup, &ids).await.unwrap();
        assert_eq!(names.len(), 2500);

        let requests = lookup.requests.lock().unwrap();
        let sizes: Vec<usize> = requests.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![1000, 1000, 500]);
    }

    #[tokio::test]
    async fn test_empty_set_makes_no_request() {
        let lookup = EchoLookup::default();
        let names = resolve_names(&lookup, &BTreeSet::new()).await.unwrap();
        assert!(names.is_empty());
        assert!(lookup.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_propagates() {
        let ids: BTreeSet<i32> = [1].into_iter().collect();
        let err = resolve_names(&FailingLookup, &ids).await.unwrap_err();
        assert!(err.is_transient());
    }
}
