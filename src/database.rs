//! # SQLite Store
//!
//! Word dictionary, global bigram relation, reaction counts and command log.
//!
//! - **Version**: 1.0.0
//! - **Since**: 2.0.0

use anyhow::Result;
use log::{debug, info};
use sqlite::{Connection, State};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::features::markov::{generate_from_edges, Edge, EdgeSource, GenerationOptions, WordId};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS words (
        word_id INTEGER PRIMARY KEY AUTOINCREMENT,
        word TEXT NOT NULL UNIQUE
    );
    CREATE TABLE IF NOT EXISTS bigram_stats (
        word1_id INTEGER NOT NULL,
        word2_id INTEGER NOT NULL,
        count INTEGER NOT NULL DEFAULT 0,
        PRIMARY KEY (word1_id, word2_id)
    );
    CREATE INDEX IF NOT EXISTS idx_bigram_from_count ON bigram_stats (word1_id, count DESC);
    CREATE TABLE IF NOT EXISTS reactions (
        author_id INTEGER NOT NULL,
        emoji_name TEXT NOT NULL,
        count INTEGER NOT NULL DEFAULT 0
    );
    CREATE INDEX IF NOT EXISTS idx_reactions_emoji ON reactions (emoji_name);
    CREATE TABLE IF NOT EXISTS command_log (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        command TEXT NOT NULL,
        result TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
";

/// Cloneable handle to the bot's SQLite database
#[derive(Clone)]
pub struct Database {
    connection: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database at `path` and ensure the schema exists
    pub async fn new(path: &str) -> Result<Self> {
        let connection = sqlite::open(path)?;
        connection.execute(SCHEMA)?;
        info!("Database ready at {path}");
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Record a command invocation and its result code
    pub async fn log_command(&self, user_id: &str, command: &str, result: &str) -> Result<()> {
        let connection = self.connection.lock().await;
        let mut statement = connection
            .prepare("INSERT INTO command_log (user_id, command, result) VALUES (?, ?, ?)")?;
        statement.bind((1, user_id))?;
        statement.bind((2, command))?;
        statement.bind((3, result))?;
        statement.next()?;
        debug!("Logged /{command} for {user_id}: {result}");
        Ok(())
    }

    /// Add `count` observations of the word pair `first second` to the global relation
    pub async fn record_bigram(&self, first: &str, second: &str, count: u64) -> Result<()> {
        let connection = self.connection.lock().await;
        let from = intern_word(&connection, first)?;
        let to = intern_word(&connection, second)?;

        let mut statement = connection.prepare(
            "INSERT INTO bigram_stats (word1_id, word2_id, count) VALUES (?, ?, ?)
             ON CONFLICT (word1_id, word2_id) DO UPDATE SET count = count + excluded.count",
        )?;
        statement.bind((1, from))?;
        statement.bind((2, to))?;
        statement.bind((3, count as i64))?;
        statement.next()?;
        Ok(())
    }

    /// Add reactions received by `author_id` under one emoji name
    pub async fn record_reactions(&self, author_id: u64, emoji_name: &str, count: u64) -> Result<()> {
        let connection = self.connection.lock().await;
        let mut statement = connection
            .prepare("INSERT INTO reactions (author_id, emoji_name, count) VALUES (?, ?, ?)")?;
        statement.bind((1, author_id as i64))?;
        statement.bind((2, emoji_name))?;
        statement.bind((3, count as i64))?;
        statement.next()?;
        Ok(())
    }

    /// Per-author reaction totals across every name in `variants`, highest first
    pub async fn reaction_totals(&self, variants: &BTreeSet<String>) -> Result<Vec<(u64, u64)>> {
        if variants.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; variants.len()].join(", ");
        let sql = format!(
            "SELECT author_id, SUM(count) AS total FROM reactions
             WHERE emoji_name IN ({placeholders})
             GROUP BY author_id
             ORDER BY total DESC"
        );

        let connection = self.connection.lock().await;
        let mut statement = connection.prepare(sql)?;
        for (index, name) in variants.iter().enumerate() {
            statement.bind((index + 1, name.as_str()))?;
        }

        let mut totals = Vec::new();
        while let State::Row = statement.next()? {
            let author = statement.read::<i64, _>("author_id")?;
            let total = statement.read::<i64, _>("total")?;
            totals.push((author as u64, total.max(0) as u64));
        }
        Ok(totals)
    }

    /// Walk the global bigram relation on a blocking thread
    pub async fn generate_global_markov(&self, options: GenerationOptions) -> Result<Option<String>> {
        let connection = Arc::clone(&self.connection);
        tokio::task::spawn_blocking(move || {
            let connection = connection.blocking_lock();
            let source = SqliteEdges::new(&connection);
            let mut rng = rand::rng();
            generate_from_edges(&source, &options, &mut rng)
        })
        .await?
    }
}

fn intern_word(connection: &Connection, word: &str) -> Result<WordId> {
    let mut insert = connection.prepare("INSERT OR IGNORE INTO words (word) VALUES (?)")?;
    insert.bind((1, word))?;
    insert.next()?;

    SqliteEdges::new(connection)
        .word_id(word)?
        .ok_or_else(|| anyhow::anyhow!("word {word:?} missing after insert"))
}

/// [`EdgeSource`] over the `words` / `bigram_stats` tables
pub struct SqliteEdges<'a> {
    connection: &'a Connection,
}

impl<'a> SqliteEdges<'a> {
    pub fn new(connection: &'a Connection) -> Self {
        Self { connection }
    }

    fn read_edges(&self, sql: &str, bindings: &[i64]) -> Result<Vec<Edge>> {
        let mut statement = self.connection.prepare(sql)?;
        for (index, value) in bindings.iter().enumerate() {
            statement.bind((index + 1, *value))?;
        }

        let mut edges = Vec::new();
        while let State::Row = statement.next()? {
            edges.push(Edge {
                from: statement.read::<i64, _>("word1_id")?,
                to: statement.read::<i64, _>("word2_id")?,
                count: statement.read::<i64, _>("count")?.max(0) as u64,
            });
        }
        Ok(edges)
    }
}

impl EdgeSource for SqliteEdges<'_> {
    fn word_id(&self, word: &str) -> Result<Option<WordId>> {
        let mut statement = self
            .connection
            .prepare("SELECT word_id FROM words WHERE word = ? LIMIT 1")?;
        statement.bind((1, word))?;
        match statement.next()? {
            State::Row => Ok(Some(statement.read::<i64, _>("word_id")?)),
            State::Done => Ok(None),
        }
    }

    fn word(&self, id: WordId) -> Result<Option<String>> {
        let mut statement = self
            .connection
            .prepare("SELECT word FROM words WHERE word_id = ?")?;
        statement.bind((1, id))?;
        match statement.next()? {
            State::Row => Ok(Some(statement.read::<String, _>("word")?)),
            State::Done => Ok(None),
        }
    }

    fn edge_count(&self) -> Result<u64> {
        let mut statement = self
            .connection
            .prepare("SELECT COUNT(*) AS total FROM bigram_stats WHERE count > 0")?;
        statement.next()?;
        Ok(statement.read::<i64, _>("total")?.max(0) as u64)
    }

    fn nth_edge(&self, index: u64) -> Result<Option<Edge>> {
        let edges = self.read_edges(
            "SELECT word1_id, word2_id, count FROM bigram_stats
             WHERE count > 0
             ORDER BY word1_id, word2_id LIMIT 1 OFFSET ?",
            &[index as i64],
        )?;
        Ok(edges.into_iter().next())
    }

    fn edges_from(&self, from: WordId, limit: Option<usize>) -> Result<Vec<Edge>> {
        // SQLite treats a negative LIMIT as unbounded
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        self.read_edges(
            "SELECT word1_id, word2_id, count FROM bigram_stats
             WHERE word1_id = ?
             ORDER BY count DESC, word2_id LIMIT ?",
            &[from, limit],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> Database {
        Database::new(":memory:").await.unwrap()
    }

    fn variants(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_log_command_inserts_row() {
        let db = test_db().await;
        db.log_command("123", "markov", "OK").await.unwrap();
        db.log_command("123", "markov", "NO_DATA").await.unwrap();

        let connection = db.connection.lock().await;
        let mut statement = connection
            .prepare("SELECT COUNT(*) AS total FROM command_log WHERE user_id = '123'")
            .unwrap();
        statement.next().unwrap();
        assert_eq!(statement.read::<i64, _>("total").unwrap(), 2);
    }

    #[tokio::test]
    async fn test_record_bigram_accumulates() {
        let db = test_db().await;
        db.record_bigram("猫", "が", 2).await.unwrap();
        db.record_bigram("猫", "が", 3).await.unwrap();
        db.record_bigram("猫", "は", 1).await.unwrap();

        let connection = db.connection.lock().await;
        let source = SqliteEdges::new(&connection);
        let cat = source.word_id("猫").unwrap().unwrap();

        let edges = source.edges_from(cat, None).unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].count, 5);
        assert_eq!(source.word(edges[0].to).unwrap().as_deref(), Some("が"));
        assert_eq!(source.edge_count().unwrap(), 2);
        assert_eq!(source.edges_from(cat, Some(1)).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sqlite_edges_lookups() {
        let db = test_db().await;
        db.record_bigram("a", "b", 1).await.unwrap();

        let connection = db.connection.lock().await;
        let source = SqliteEdges::new(&connection);
        assert!(source.word_id("missing").unwrap().is_none());
        assert!(source.word(9999).unwrap().is_none());
        assert!(source.nth_edge(0).unwrap().is_some());
        assert!(source.nth_edge(1).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_generate_global_markov() {
        let db = test_db().await;
        assert!(db
            .generate_global_markov(GenerationOptions::default())
            .await
            .unwrap()
            .is_none());

        db.record_bigram("今日", "は", 3).await.unwrap();
        db.record_bigram("は", "晴れ", 1).await.unwrap();

        let options = GenerationOptions::default().with_start_word(Some("今日".to_string()));
        let text = db.generate_global_markov(options).await.unwrap();
        assert_eq!(text.as_deref(), Some("今日は晴れ"));
    }

    #[tokio::test]
    async fn test_zero_count_edges_are_not_seeds() {
        let db = test_db().await;
        db.record_bigram("a", "b", 0).await.unwrap();
        assert!(db
            .generate_global_markov(GenerationOptions::default())
            .await
            .unwrap()
            .is_none());

        db.record_bigram("c", "d", 1).await.unwrap();
        {
            let connection = db.connection.lock().await;
            let source = SqliteEdges::new(&connection);
            assert_eq!(source.edge_count().unwrap(), 1);
            let seed = source.nth_edge(0).unwrap().unwrap();
            assert_eq!(source.word(seed.from).unwrap().as_deref(), Some("c"));
        }

        let options = GenerationOptions::default().with_start_word(Some("a".to_string()));
        let text = db.generate_global_markov(options).await.unwrap();
        assert_eq!(text.as_deref(), Some("cd"));
    }

    #[tokio::test]
    async fn test_reaction_totals_group_variants() {
        let db = test_db().await;
        db.record_reactions(1, "thumbsup", 3).await.unwrap();
        db.record_reactions(1, "thumbsup_tone2", 2).await.unwrap();
        db.record_reactions(2, "thumbsup", 4).await.unwrap();
        db.record_reactions(3, "grin", 10).await.unwrap();

        let totals = db
            .reaction_totals(&variants(&["thumbsup", "thumbsup_tone2"]))
            .await
            .unwrap();
        assert_eq!(totals, vec![(1, 5), (2, 4)]);
    }

    #[tokio::test]
    async fn test_reaction_totals_empty_variants() {
        let db = test_db().await;
        db.record_reactions(1, "grin", 1).await.unwrap();
        assert!(db.reaction_totals(&BTreeSet::new()).await.unwrap().is_empty());
    }
}
