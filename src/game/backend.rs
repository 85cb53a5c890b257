//! Key-value backends for the persisted game records.
//!
//! Each backend stores opaque byte blobs under string keys and declares the
//! codec its blobs use: sled keeps compact bincode, the JSON directory keeps
//! one human-readable file per key.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::game::errors::GameError;

const TREE_RECORDS: &str = "arise_records";

/// Which backend a store directory uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Sled,
    Json,
}

/// Byte encoding of stored records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Bincode,
    Json,
}

impl Codec {
    pub fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, GameError> {
        match self {
            Codec::Bincode => Ok(bincode::serialize(value)?),
            Codec::Json => Ok(serde_json::to_vec_pretty(value)?),
        }
    }

    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, GameError> {
        match self {
            Codec::Bincode => Ok(bincode::deserialize(bytes)?),
            Codec::Json => Ok(serde_json::from_slice(bytes)?),
        }
    }
}

pub trait KeyValueStore: Send + Sync {
    /// `None` when nothing was ever saved under `key`.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, GameError>;

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), GameError>;

    fn codec(&self) -> Codec {
        Codec::Bincode
    }
}

/// Embedded sled database, one tree holding every record.
pub struct SledStore {
    _db: sled::Db,
    records: sled::Tree,
}

impl SledStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let path = path.as_ref();
        fs::create_dir_all(path)?;
        let db = sled::open(path)?;
        let records = db.open_tree(TREE_RECORDS)?;
        Ok(Self { _db: db, records })
    }
}

impl KeyValueStore for SledStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, GameError> {
        Ok(self.records.get(key.as_bytes())?.map(|v| v.to_vec()))
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), GameError> {
        self.records.insert(key.as_bytes(), bytes)?;
        self.records.flush()?;
        Ok(())
    }
}

/// One pretty-printed JSON file per key, guarded by fs2 file locks
/// (shared for read, exclusive for write).
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    pub fn open<P: Into<PathBuf>>(dir: P) -> Result<Self, GameError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn lock_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{}.lock", key))
    }

    fn lock_file(&self, key: &str) -> Result<File, GameError> {
        Ok(OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(self.lock_path(key))?)
    }
}

impl KeyValueStore for JsonDirStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, GameError> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let lock = self.lock_file(key)?;
        lock.lock_shared()?;
        let mut bytes = Vec::new();
        let read = File::open(&path).and_then(|mut f| f.read_to_end(&mut bytes));
        let _ = lock.unlock();
        read?;
        Ok(Some(bytes))
    }

    /// Write to a temp file and rename it over the record.
    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), GameError> {
        let path = self.record_path(key);
        let tmp_path = self
            .dir
            .join(format!(".{}.tmp-{}", key, std::process::id()));
        let lock = self.lock_file(key)?;
        lock.lock_exclusive()?;
        let written = (|| -> std::io::Result<()> {
            let mut tmp = File::create(&tmp_path)?;
            tmp.write_all(bytes)?;
            tmp.sync_all()?;
            fs::rename(&tmp_path, &path)
        })();
        let _ = lock.unlock();
        if written.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        written?;
        Ok(())
    }

    fn codec(&self) -> Codec {
        Codec::Json
    }
}

/// Process-local store for tests and dry runs.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, GameError> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        Ok(records.get(key).cloned())
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), GameError> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}
