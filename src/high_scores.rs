// high_scores.rs - The top-3 table and the policy for merging a new score into it.
// Where the table is stored is someone else's problem: anything implementing
// HighScoreStore will do.

use std::collections::HashMap;

use bevy::log::{error, info, warn};

/// Key the table is stored under.
pub const HIGH_SCORES_KEY: &str = "highScores";

/// How many scores the table keeps.
pub const TABLE_SIZE: usize = 3;

/// Up to three scores, best first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighScoreTable {
    scores: Vec<u32>,
}

impl HighScoreTable {
    /// Builds a table from whatever was stored, restoring the
    /// sorted-descending and length invariants.
    pub fn from_scores(mut scores: Vec<u32>) -> Self {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(TABLE_SIZE);
        HighScoreTable { scores }
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    /// Would `score` make it onto the table?
    pub fn qualifies(&self, score: u32) -> bool {
        match self.scores.last() {
            Some(&lowest) if self.scores.len() >= TABLE_SIZE => score > lowest,
            _ => true,
        }
    }

    /// Inserts `score` if it qualifies. Returns whether it did.
    pub fn insert(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.scores.push(score);
        self.scores.sort_unstable_by(|a, b| b.cmp(a));
        self.scores.truncate(TABLE_SIZE);
        true
    }
}

/// Why the score store could not be read or written.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored scores are unreadable: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("could not encode scores: {0}")]
    Serialize(#[from] ron::Error),
}

/// A persistent key-value store holding integer lists.
/// A missing key is an empty list, not an error.
pub trait HighScoreStore {
    fn load(&self, key: &str) -> Result<Vec<u32>, StoreError>;
    fn save(&mut self, key: &str, scores: &[u32]) -> Result<(), StoreError>;
}

/// In-memory store, used in tests and as a fallback when nothing can be written.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u32>>,
    pub writes: usize,
}

impl HighScoreStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Vec<u32>, StoreError> {
        Ok(self.entries.get(key).cloned().unwrap_or_default())
    }

    fn save(&mut self, key: &str, scores: &[u32]) -> Result<(), StoreError> {
        self.writes += 1;
        self.entries.insert(key.to_string(), scores.to_vec());
        Ok(())
    }
}

/// Reads the stored table. Unreadable storage counts as an empty table.
pub fn read_table(store: &impl HighScoreStore) -> HighScoreTable {
    match store.load(HIGH_SCORES_KEY) {
        Ok(scores) => HighScoreTable::from_scores(scores),
        Err(e) => {
            warn!("Could not read high scores: {}. Starting from an empty table.", e);
            HighScoreTable::default()
        }
    }
}

/// Merges a finished game's score into the stored table.
///
/// Writes only when the score made the table. Returns whether it did, even if
/// the write itself failed (the failure is logged).
pub fn record_score(store: &mut impl HighScoreStore, final_score: u32) -> bool {
    let mut table = read_table(store);
    if !table.insert(final_score) {
        return false;
    }

    if let Err(e) = store.save(HIGH_SCORES_KEY, table.scores()) {
        error!("Failed to save high scores: {}", e);
    } else {
        info!("New high score {} saved, table is {:?}", final_score, table.scores());
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(scores: &[u32]) -> MemoryStore {
        let mut store = MemoryStore::default();
        store.save(HIGH_SCORES_KEY, scores).unwrap();
        store.writes = 0;
        store
    }

    #[test]
    fn better_score_bumps_the_lowest() {
        let mut store = store_with(&[50, 30, 10]);
        assert!(record_score(&mut store, 40));
        assert_eq!(read_table(&store).scores(), &[50, 40, 30]);
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn worse_score_changes_nothing() {
        let mut store = store_with(&[50, 30, 10]);
        assert!(!record_score(&mut store, 5));
        assert_eq!(read_table(&store).scores(), &[50, 30, 10]);
        assert_eq!(store.writes, 0);
    }

    #[test]
    fn tie_with_lowest_does_not_qualify() {
        let mut store = store_with(&[50, 30, 10]);
        assert!(!record_score(&mut store, 10));
    }

    #[test]
    fn short_table_takes_anything() {
        let mut store = MemoryStore::default();
        assert!(record_score(&mut store, 0));
        assert!(record_score(&mut store, 0));
        assert_eq!(read_table(&store).scores(), &[0, 0]);
    }

    #[test]
    fn invariant_holds_over_many_games() {
        let mut store = MemoryStore::default();
        let games = [70, 20, 90, 90, 5, 100, 60, 61, 0, 300, 299];
        for score in games {
            record_score(&mut store, score);
            let table = read_table(&store);
            assert!(table.scores().len() <= TABLE_SIZE);
            assert!(table.scores().windows(2).all(|w| w[0] >= w[1]));
        }
        assert_eq!(read_table(&store).scores(), &[300, 299, 100]);
    }

    #[test]
    fn stored_junk_is_normalised() {
        let table = HighScoreTable::from_scores(vec![1, 9, 4, 7, 3]);
        assert_eq!(table.scores(), &[9, 7, 4]);
    }

    struct BrokenStore;

    impl HighScoreStore for BrokenStore {
        fn load(&self, _key: &str) -> Result<Vec<u32>, StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk on fire")))
        }

        fn save(&mut self, _key: &str, _scores: &[u32]) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk on fire")))
        }
    }

    #[test]
    fn store_errors_wrap_their_cause() {
        let err: StoreError = std::io::Error::other("disk on fire").into();
        assert!(matches!(err, StoreError::Io(_)));
        assert_eq!(err.to_string(), "storage i/o failed: disk on fire");
        assert!(std::error::Error::source(&err).is_some());

        let parse: StoreError = ron::from_str::<Vec<u32>>("[1, oops").unwrap_err().into();
        assert!(parse.to_string().starts_with("stored scores are unreadable"));
    }

    #[test]
    fn broken_storage_degrades_to_empty_table() {
        let mut store = BrokenStore;
        assert!(read_table(&store).scores().is_empty());
        assert!(record_score(&mut store, 10));
    }
}
