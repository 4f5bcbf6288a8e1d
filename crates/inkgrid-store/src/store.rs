use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum StoreError {
    #[display("failed to access {}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("malformed value under {key:?}")]
    Malformed {
        key: String,
        source: serde_json::Error,
    },
    #[display("storage is unavailable")]
    Unavailable,
}

/// String key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

pub(crate) fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(text) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| StoreError::Malformed {
            key: key.to_owned(),
            source,
        })
}

pub(crate) fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let text = serde_json::to_string(value).map_err(|source| StoreError::Malformed {
        key: key.to_owned(),
        source,
    })?;
    store.set(key, &text)
}

/// Stores each key as `<key>.json` in a directory.
///
/// The directory is created on the first write. Writes go through a
/// temporary file and a rename, so a crash mid-write leaves the previous
/// value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_owned(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path)(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;
        let path = self.path(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value).map_err(io_error(&tmp_path))?;
        fs::rename(&tmp_path, &path).map_err(io_error(&path))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path(key);
        match fs::remove_file(&path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(io_error(&path)(e)),
            _ => Ok(()),
        }
    }
}

/// In-memory store, mainly for tests.
///
/// [`MemoryStore::set_failing`] makes every operation fail with
/// [`StoreError::Unavailable`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    failing: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing {
            return Err(StoreError::Unavailable);
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check()?;
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.check()?;
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        process,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!("inkgrid-store-{name}-{}-{n}", process::id()))
    }

    #[test]
    fn test_file_store() {
        let dir = temp_dir("file-store");
        let mut store = FileStore::new(&dir);
        assert_eq!(store.get("missing").unwrap(), None);
        store.remove("missing").unwrap();

        store.set("answer", "42").unwrap();
        assert_eq!(store.get("answer").unwrap().as_deref(), Some("42"));
        assert!(dir.join("answer.json").exists());
        assert!(!dir.join("answer.json.tmp").exists());

        store.set("answer", "43").unwrap();
        assert_eq!(store.get("answer").unwrap().as_deref(), Some("43"));

        store.remove("answer").unwrap();
        assert_eq!(store.get("answer").unwrap(), None);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_memory_store_failure() {
        let mut store = MemoryStore::new();
        store.set("k", "v").unwrap();
        store.set_failing(true);
        assert!(matches!(store.get("k"), Err(StoreError::Unavailable)));
        assert!(store.set("k", "w").is_err());
        assert!(store.remove("k").is_err());
        store.set_failing(false);
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_json_helpers() {
        let mut store = MemoryStore::new();
        save_json(&mut store, "list", &[1, 2, 3]).unwrap();
        let list: Option<Vec<u32>> = load_json(&store, "list").unwrap();
        assert_eq!(list, Some(vec![1, 2, 3]));

        store.set("broken", "{not json").unwrap();
        let err = load_json::<Vec<u32>, _>(&store, "broken").unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
        assert_eq!(load_json::<Vec<u32>, _>(&store, "absent").unwrap(), None);
    }
}
