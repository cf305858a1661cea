//! Persistence interface for curriculum records and topic-mapping
//! overrides.
//!
//! The engine never retries a failed store call; errors are surfaced as
//! [`StoreError`] so the caller can offer a retry affordance.
//!
//! # Storage format
//!
//! [`FileStore`] keeps JSON files under a base directory:
//!
//! - `records/{id}.json` — one curriculum fragment per file
//! - `mappings/{institution}_{subject_code}.json` — the saved topic
//!   overrides for one institution subject

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

use currec_model::{CurriculumRecord, SavedTopicMapping, SubjectCode};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt data in {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("curriculum record not found: {0}")]
    NotFound(String),
    #[error("store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Data-fetch/persist interface consumed by the reconciliation engine's
/// callers.
pub trait CurriculumStore {
    /// Every stored curriculum fragment.
    fn fetch_all(&self) -> StoreResult<Vec<CurriculumRecord>>;

    /// Batch fetch by record id; unknown ids are simply absent from the
    /// result.
    fn fetch_by_ids(&self, ids: &[String]) -> StoreResult<Vec<CurriculumRecord>>;

    /// Create or wholesale-replace one fragment.
    fn put_record(&self, record: &CurriculumRecord) -> StoreResult<()>;

    /// Delete one fragment by id.
    fn delete_record(&self, id: &str) -> StoreResult<()>;

    /// Save one topic-mapping override, replacing any existing override
    /// for the same `(unit_number, topic_text)` key.
    fn save_topic_mapping(&self, mapping: &SavedTopicMapping) -> StoreResult<()>;

    /// Load the overrides saved for one institution subject.
    fn load_topic_mappings(
        &self,
        institution: &str,
        subject_code: &SubjectCode,
    ) -> StoreResult<Vec<SavedTopicMapping>>;
}

/// In-memory store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    records: BTreeMap<String, CurriculumRecord>,
    mappings: BTreeMap<(String, SubjectCode), Vec<SavedTopicMapping>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CurriculumStore for MemoryStore {
    fn fetch_all(&self) -> StoreResult<Vec<CurriculumRecord>> {
        let inner = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.records.values().cloned().collect())
    }

    fn fetch_by_ids(&self, ids: &[String]) -> StoreResult<Vec<CurriculumRecord>> {
        let inner = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(ids
            .iter()
            .filter_map(|id| inner.records.get(id).cloned())
            .collect())
    }

    fn put_record(&self, record: &CurriculumRecord) -> StoreResult<()> {
        let mut inner = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        inner.records.insert(record.id.clone(), record.clone());
        Ok(())
    }

    fn delete_record(&self, id: &str) -> StoreResult<()> {
        let mut inner = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        inner
            .records
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn save_topic_mapping(&self, mapping: &SavedTopicMapping) -> StoreResult<()> {
        let mut inner = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        let rows = inner
            .mappings
            .entry((mapping.institution.clone(), mapping.subject_code.clone()))
            .or_default();
        upsert_mapping(rows, mapping);
        Ok(())
    }

    fn load_topic_mappings(
        &self,
        institution: &str,
        subject_code: &SubjectCode,
    ) -> StoreResult<Vec<SavedTopicMapping>> {
        let inner = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(inner
            .mappings
            .get(&(institution.to_string(), subject_code.clone()))
            .cloned()
            .unwrap_or_default())
    }
}

/// Filesystem-backed store: one JSON file per record, one per
/// institution-subject override set.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `base_dir`, creating the directory layout.
    pub fn new(base_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let base_dir = base_dir.into();
        for sub in ["records", "mappings"] {
            let dir = base_dir.join(sub);
            fs::create_dir_all(&dir).map_err(|source| StoreError::Io { path: dir, source })?;
        }
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.base_dir
            .join("records")
            .join(format!("{}.json", sanitize_id(id)))
    }

    fn mapping_path(&self, institution: &str, subject_code: &SubjectCode) -> PathBuf {
        self.base_dir.join("mappings").join(format!(
            "{}_{}.json",
            sanitize_id(institution),
            sanitize_id(subject_code.as_str())
        ))
    }

    fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> StoreResult<T> {
        let contents = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl CurriculumStore for FileStore {
    fn fetch_all(&self) -> StoreResult<Vec<CurriculumRecord>> {
        let dir = self.base_dir.join("records");
        let entries = fs::read_dir(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        let mut records = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
                records.push(Self::read_json::<CurriculumRecord>(&path)?);
            }
        }
        records.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(records)
    }

    fn fetch_by_ids(&self, ids: &[String]) -> StoreResult<Vec<CurriculumRecord>> {
        let mut records = Vec::new();
        for id in ids {
            let path = self.record_path(id);
            if path.exists() {
                records.push(Self::read_json::<CurriculumRecord>(&path)?);
            }
        }
        Ok(records)
    }

    fn put_record(&self, record: &CurriculumRecord) -> StoreResult<()> {
        Self::write_json(&self.record_path(&record.id), record)
    }

    fn delete_record(&self, id: &str) -> StoreResult<()> {
        let path = self.record_path(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        fs::remove_file(&path).map_err(|source| StoreError::Io { path, source })
    }

    fn save_topic_mapping(&self, mapping: &SavedTopicMapping) -> StoreResult<()> {
        let path = self.mapping_path(&mapping.institution, &mapping.subject_code);
        let mut rows: Vec<SavedTopicMapping> = if path.exists() {
            Self::read_json(&path)?
        } else {
            Vec::new()
        };
        upsert_mapping(&mut rows, mapping);
        Self::write_json(&path, &rows)
    }

    fn load_topic_mappings(
        &self,
        institution: &str,
        subject_code: &SubjectCode,
    ) -> StoreResult<Vec<SavedTopicMapping>> {
        let path = self.mapping_path(institution, subject_code);
        if !path.exists() {
            return Ok(Vec::new());
        }
        Self::read_json(&path)
    }
}

/// Replace the row with the same `(unit_number, topic_text)` key, or
/// append.
fn upsert_mapping(rows: &mut Vec<SavedTopicMapping>, mapping: &SavedTopicMapping) {
    match rows
        .iter_mut()
        .find(|r| r.unit_number == mapping.unit_number && r.topic_text == mapping.topic_text)
    {
        Some(existing) => *existing = mapping.clone(),
        None => rows.push(mapping.clone()),
    }
}

/// Lowercase and replace filesystem-hostile characters for filenames.
fn sanitize_id(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}
