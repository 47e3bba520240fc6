//! Per-user and per-channel n-gram snapshots
//!
//! Snapshots are produced offline and laid out as
//! `{root}/user_markov/{id}/{bigram,trigram}.json` and
//! `{root}/channel_markov/{id}/{bigram,trigram}.json`, each holding
//! `{"data": {"w1:w2": count, ...}}`.
//!
//! - **Version**: 1.0.0
//! - **Since**: 2.0.0

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::table::{NgramOrder, TransitionTable};

/// Whose messages a snapshot was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotScope {
    User(u64),
    Channel(u64),
}

impl SnapshotScope {
    fn directory(&self) -> PathBuf {
        match self {
            SnapshotScope::User(id) => Path::new("user_markov").join(id.to_string()),
            SnapshotScope::Channel(id) => Path::new("channel_markov").join(id.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    data: Option<HashMap<String, u64>>,
}

fn file_name(order: NgramOrder) -> &'static str {
    match order {
        NgramOrder::Bigram => "bigram.json",
        NgramOrder::Trigram => "trigram.json",
    }
}

/// Read-only access to the snapshot directory tree. Every call reads the file fresh.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, scope: SnapshotScope, order: NgramOrder) -> PathBuf {
        self.root.join(scope.directory()).join(file_name(order))
    }

    /// Load one snapshot. `Ok(None)` if the file is missing or holds no transitions.
    pub async fn load(
        &self,
        scope: SnapshotScope,
        order: NgramOrder,
    ) -> Result<Option<TransitionTable>> {
        let path = self.path_for(scope, order);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No snapshot at {}", path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", path.display()));
            }
        };

        let file: SnapshotFile = serde_json::from_str(&contents)
            .with_context(|| format!("parsing {}", path.display()))?;

        let table = TransitionTable::from_joined(order, file.data.unwrap_or_default());
        if table.is_empty() {
            return Ok(None);
        }

        debug!(
            "Loaded {} {} transitions from {}",
            table.len(),
            order.as_str(),
            path.display()
        );
        Ok(Some(table))
    }

    /// Load the requested order, quietly falling back to bigram when trigram data is absent
    pub async fn load_with_fallback(
        &self,
        scope: SnapshotScope,
        order: NgramOrder,
    ) -> Result<Option<TransitionTable>> {
        if let Some(table) = self.load(scope, order).await? {
            return Ok(Some(table));
        }
        if order == NgramOrder::Trigram {
            debug!("Trigram snapshot for {scope:?} unavailable, using bigram");
            return self.load(scope, NgramOrder::Bigram).await;
        }
        Ok(None)
    }
}
