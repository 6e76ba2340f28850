//! Grid storage.
//!
//! Tables never read files themselves; they ask a `GridStore` for the grid at
//! a location and copy what they get. Two stores are provided:
//!
//! - `JsonGridStore`: a JSON document of named grids
//! - `InMemoryStore`: grids inserted programmatically
//!
//! JSON layout:
//!
//! ```text
//! { "grids": { "<location>": { "x": {...}, "y": {...}, "z": {...},
//!                              "contents": [...], "errors": [...] } } }
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::table::GridData;

/// Store failures. `NotFound` is kept distinct from everything else.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no grid at location '{location}'")]
    NotFound { location: String },

    #[error("grid at location '{location}' is malformed: {reason}")]
    Malformed { location: String, reason: String },

    #[error("failed to open grid file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("grid file '{}' is not valid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of raw grids keyed by location.
pub trait GridStore {
    /// Return an owned copy of the grid at `location`.
    fn load(&self, location: &str) -> Result<GridData, StoreError>;
}

/// Grids held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    grids: HashMap<String, GridData>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, location: impl Into<String>, data: GridData) {
        self.grids.insert(location.into(), data);
    }
}

impl GridStore for InMemoryStore {
    fn load(&self, location: &str) -> Result<GridData, StoreError> {
        self.grids
            .get(location)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                location: location.to_string(),
            })
    }
}

#[derive(Debug, Deserialize)]
struct GridDocument {
    grids: HashMap<String, serde_json::Value>,
}

/// Grids read from a JSON document.
///
/// The document is parsed once on `open`; each entry is decoded only when it is
/// loaded, so a malformed entry is reported against its own location.
#[derive(Debug, Clone)]
pub struct JsonGridStore {
    path: PathBuf,
    grids: HashMap<String, serde_json::Value>,
}

impl JsonGridStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let file = File::open(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let doc: GridDocument =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| StoreError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            grids: doc.grids,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Locations available in the document, sorted.
    pub fn locations(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.grids.keys().map(String::as_str).collect();
        out.sort_unstable();
        out
    }
}

impl GridStore for JsonGridStore {
    fn load(&self, location: &str) -> Result<GridData, StoreError> {
        let value = self.grids.get(location).ok_or_else(|| StoreError::NotFound {
            location: location.to_string(),
        })?;
        GridData::deserialize(value).map_err(|e| StoreError::Malformed {
            location: location.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Write grids to a JSON document readable by `JsonGridStore`.
pub fn write_grid_json(path: &Path, grids: &HashMap<String, GridData>) -> Result<(), StoreError> {
    let file = File::create(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = serde_json::json!({ "grids": grids });
    serde_json::to_writer_pretty(file, &doc).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_doc(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_edges_and_uniform_axes() {
        let n = 4 * 3 * 3;
        let contents = vec![0.5; n];
        let doc = serde_json::json!({
            "grids": {
                "dir/eff": {
                    "x": { "edges": [0.0, 10.0, 20.0] },
                    "y": { "bins": 1, "min": -2.5, "max": 2.5 },
                    "z": { "edges": [0.0, 1.0] },
                    "contents": contents,
                }
            }
        });
        let file = write_doc(&doc.to_string());
        let store = JsonGridStore::open(file.path()).unwrap();
        assert_eq!(store.locations(), vec!["dir/eff"]);

        let data = store.load("dir/eff").unwrap();
        assert_eq!(data.contents.len(), n);
        assert!(data.errors.is_none());
    }

    #[test]
    fn not_found_is_distinct_from_malformed() {
        let file = write_doc(r#"{ "grids": { "bad": { "x": 3 } } }"#);
        let store = JsonGridStore::open(file.path()).unwrap();
        assert!(matches!(store.load("nope"), Err(StoreError::NotFound { .. })));
        assert!(matches!(store.load("bad"), Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn open_reports_io_and_json_errors() {
        let missing = Path::new("/definitely/not/here.json");
        assert!(matches!(JsonGridStore::open(missing), Err(StoreError::Io { .. })));

        let file = write_doc("{ not json");
        assert!(matches!(JsonGridStore::open(file.path()), Err(StoreError::Json { .. })));
    }

    #[test]
    fn written_documents_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grids.json");
        let mut grids = HashMap::new();
        grids.insert(
            "effs/a".to_string(),
            GridData::filled(vec![0.0, 1.0], vec![0.0, 1.0], vec![0.0, 1.0], 0.9, 0.01),
        );
        write_grid_json(&path, &grids).unwrap();

        let store = JsonGridStore::open(&path).unwrap();
        assert_eq!(store.load("effs/a").unwrap(), grids["effs/a"]);
    }

    #[test]
    fn in_memory_store_returns_copies() {
        let mut store = InMemoryStore::new();
        let data = GridData::filled(vec![0.0, 1.0], vec![0.0, 1.0], vec![0.0, 1.0], 0.9, 0.01);
        store.insert("a", data.clone());
        let mut loaded = store.load("a").unwrap();
        loaded.contents[0] = -1.0;
        assert_eq!(store.load("a").unwrap(), data);
    }
}
