use std::collections::BTreeMap;
use std::path::PathBuf;

use bevy::prelude::*;

use crate::high_scores::{
    read_table, record_score, HighScoreStore, HighScoreTable, MemoryStore, StoreError,
};

pub struct SaveLoadPlugin;

impl Plugin for SaveLoadPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_high_scores);
    }
}

pub const SCORES_FILE: &str = "astro_dash_scores.ron";

/// Key-value store backed by one RON file holding a map of key -> list.
///
/// The whole file is read on every load and rewritten on every save; it only
/// ever holds a handful of integers.
#[derive(Debug, Clone)]
pub struct RonFileStore {
    path: PathBuf,
}

impl RonFileStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        RonFileStore { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, Vec<u32>>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(ron::from_str(&contents)?)
    }
}

impl HighScoreStore for RonFileStore {
    fn load(&self, key: &str) -> Result<Vec<u32>, StoreError> {
        Ok(self.read_all()?.remove(key).unwrap_or_default())
    }

    fn save(&mut self, key: &str, scores: &[u32]) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking every future save.
        let mut all = self.read_all().unwrap_or_else(|e| {
            warn!("Overwriting unreadable score file {:?}: {}", self.path, e);
            BTreeMap::new()
        });
        all.insert(key.to_string(), scores.to_vec());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let pretty = ron::ser::PrettyConfig::default();
        let serialized = ron::ser::to_string_pretty(&all, pretty)?;
        std::fs::write(&self.path, serialized)?;
        Ok(())
    }
}

/// Where the score file lives: the platform data dir when there is one,
/// otherwise the working directory.
pub fn scores_file_path() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("astro_dash").join(SCORES_FILE),
        None => PathBuf::from(SCORES_FILE),
    }
}

/// Either the file store, or memory when running somewhere without a filesystem.
#[derive(Debug, Clone)]
pub enum ScoreStorage {
    File(RonFileStore),
    Memory(MemoryStore),
}

impl HighScoreStore for ScoreStorage {
    fn load(&self, key: &str) -> Result<Vec<u32>, StoreError> {
        match self {
            ScoreStorage::File(store) => store.load(key),
            ScoreStorage::Memory(store) => store.load(key),
        }
    }

    fn save(&mut self, key: &str, scores: &[u32]) -> Result<(), StoreError> {
        match self {
            ScoreStorage::File(store) => store.save(key, scores),
            ScoreStorage::Memory(store) => store.save(key, scores),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn platform_storage() -> ScoreStorage {
    ScoreStorage::File(RonFileStore::at(scores_file_path()))
}

// TODO: back this with localStorage through web-sys once the web build exists.
#[cfg(target_arch = "wasm32")]
fn platform_storage() -> ScoreStorage {
    warn!("No persistent storage on the web yet; high scores last for this session only.");
    ScoreStorage::Memory(MemoryStore::default())
}

/// The persisted top-3 and the outcome of the last finished game.
#[derive(Resource, Debug)]
pub struct HighScoreBoard {
    pub storage: ScoreStorage,
    pub table: HighScoreTable,
    /// Set when the most recent game made the table.
    pub last_was_new: bool,
}

impl HighScoreBoard {
    pub fn new(storage: ScoreStorage) -> Self {
        let table = read_table(&storage);
        HighScoreBoard {
            storage,
            table,
            last_was_new: false,
        }
    }

    /// Records a finished game and refreshes the cached table.
    pub fn record(&mut self, final_score: u32) -> bool {
        self.last_was_new = record_score(&mut self.storage, final_score);
        self.table = read_table(&self.storage);
        self.last_was_new
    }
}

fn load_high_scores(mut commands: Commands) {
    let board = HighScoreBoard::new(platform_storage());
    info!("Loaded high scores: {:?}", board.table.scores());
    commands.insert_resource(board);
}
