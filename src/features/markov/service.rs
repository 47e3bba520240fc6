//! Markov generation entry point used by the `/markov` command
//!
//! Picks the data source for a scope, applies the trigram fallback and
//! bounds the whole request with a timeout.
//!
//! - **Version**: 1.0.0
//! - **Since**: 2.0.0

use anyhow::Result;
use log::{debug, error};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::timeout;

use super::generator::{generate, GenerationOptions};
use super::snapshot::{SnapshotScope, SnapshotStore};
use super::table::NgramOrder;
use crate::database::Database;

/// Where the transitions for a request come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkovSource {
    /// Precomputed per-user or per-channel snapshot, all candidates weighted
    Snapshot(SnapshotScope),
    /// Global bigram relation, strongest continuations only
    Global,
}

#[derive(Debug, Clone)]
pub struct MarkovRequest {
    pub source: MarkovSource,
    pub order: NgramOrder,
    pub options: GenerationOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkovOutcome {
    /// `order` is the order actually used, which may differ from the request after fallback
    Generated { text: String, order: NgramOrder },
    NoData,
    TimedOut,
}

#[derive(Clone)]
pub struct MarkovService {
    snapshots: SnapshotStore,
    database: Database,
    timeout: Duration,
}

impl MarkovService {
    pub fn new(data_dir: impl Into<PathBuf>, database: Database, timeout: Duration) -> Self {
        Self {
            snapshots: SnapshotStore::new(data_dir),
            database,
            timeout,
        }
    }

    /// Run one generation request. Corrupt snapshot data is logged and reported as no data.
    pub async fn generate(&self, request: MarkovRequest) -> Result<MarkovOutcome> {
        match timeout(self.timeout, self.run(request)).await {
            Ok(outcome) => outcome,
            Err(_) => Ok(MarkovOutcome::TimedOut),
        }
    }

    async fn run(&self, request: MarkovRequest) -> Result<MarkovOutcome> {
        let MarkovRequest {
            source,
            order,
            options,
        } = request;

        let generated = match source {
            MarkovSource::Global => self
                .database
                .generate_global_markov(options)
                .await?
                .map(|text| (text, NgramOrder::Bigram)),
            MarkovSource::Snapshot(scope) => {
                let table = match self.snapshots.load_with_fallback(scope, order).await {
                    Ok(Some(table)) => table,
                    Ok(None) => return Ok(MarkovOutcome::NoData),
                    Err(e) => {
                        error!("Failed to load markov snapshot for {scope:?}: {e:#}");
                        return Ok(MarkovOutcome::NoData);
                    }
                };

                let used = table.order();
                tokio::task::spawn_blocking(move || {
                    let mut rng = rand::rng();
                    generate(&table, &options, &mut rng)
                })
                .await?
                .map(|text| (text, used))
            }
        };

        Ok(match generated {
            Some((text, order)) => {
                debug!("Generated {} chars with {}", text.chars().count(), order.as_str());
                MarkovOutcome::Generated { text, order }
            }
            None => MarkovOutcome::NoData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::markov::snapshot::tests::TempRoot;

    async fn service(root: &TempRoot) -> MarkovService {
        let database = Database::new(":memory:").await.unwrap();
        MarkovService::new(&root.0, database, Duration::from_secs(5))
    }

    fn request(source: MarkovSource, order: NgramOrder, start: Option<&str>) -> MarkovRequest {
        MarkovRequest {
            source,
            order,
            options: GenerationOptions::default().with_start_word(start.map(String::from)),
        }
    }

    #[tokio::test]
    async fn test_user_snapshot_generation() {
        let root = TempRoot::new();
        root.write(
            SnapshotScope::User(10),
            NgramOrder::Bigram,
            r#"{"data": {"猫:が": 2, "猫:は": 1}}"#,
        );

        let outcome = service(&root)
            .await
            .generate(request(
                MarkovSource::Snapshot(SnapshotScope::User(10)),
                NgramOrder::Bigram,
                Some("猫"),
            ))
            .await
            .unwrap();

        match outcome {
            MarkovOutcome::Generated { text, order } => {
                assert!(text == "猫が" || text == "猫は");
                assert_eq!(order, NgramOrder::Bigram);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_trigram_request_reports_fallback_order() {
        let root = TempRoot::new();
        root.write(SnapshotScope::Channel(3), NgramOrder::Bigram, r#"{"data": {"a:b": 1}}"#);

        let outcome = service(&root)
            .await
            .generate(request(
                MarkovSource::Snapshot(SnapshotScope::Channel(3)),
                NgramOrder::Trigram,
                None,
            ))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            MarkovOutcome::Generated {
                text: "ab".to_string(),
                order: NgramOrder::Bigram
            }
        );
    }

    #[tokio::test]
    async fn test_missing_and_corrupt_snapshots_are_no_data() {
        let root = TempRoot::new();
        root.write(SnapshotScope::User(2), NgramOrder::Bigram, "garbage");
        let service = service(&root).await;

        for scope in [SnapshotScope::User(1), SnapshotScope::User(2)] {
            let outcome = service
                .generate(request(MarkovSource::Snapshot(scope), NgramOrder::Bigram, None))
                .await
                .unwrap();
            assert_eq!(outcome, MarkovOutcome::NoData);
        }
    }

    #[tokio::test]
    async fn test_global_source_uses_database() {
        let root = TempRoot::new();
        let service = service(&root).await;

        let empty = service
            .generate(request(MarkovSource::Global, NgramOrder::Trigram, None))
            .await
            .unwrap();
        assert_eq!(empty, MarkovOutcome::NoData);

        service.database.record_bigram("おは", "よう", 1).await.unwrap();
        let outcome = service
            .generate(request(MarkovSource::Global, NgramOrder::Trigram, None))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            MarkovOutcome::Generated {
                text: "おはよう".to_string(),
                order: NgramOrder::Bigram
            }
        );
    }
}
