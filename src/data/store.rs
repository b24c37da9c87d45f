use std::path::{Path, PathBuf};

use log::debug;
use once_cell::sync::OnceCell;

use super::loader::load;
use super::model::Dataset;
use crate::error::DataLoadError;

// ---------------------------------------------------------------------------
// Load-once dataset holder
// ---------------------------------------------------------------------------

/// A lazily loaded, read-only dataset bound to one source path.
///
/// The first successful call to [`DataStore::dataset`] loads the file; later
/// calls, from any thread, get the same `&Dataset`.  A failed load is not
/// cached, so the next call retries.
#[derive(Debug)]
pub struct DataStore {
    path: PathBuf,
    dataset: OnceCell<Dataset>,
}

impl DataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DataStore {
            path: path.into(),
            dataset: OnceCell::new(),
        }
    }

    /// Load on first access, then hand out the cached table.
    pub fn dataset(&self) -> Result<&Dataset, DataLoadError> {
        self.dataset.get_or_try_init(|| {
            debug!("First access, loading {}", self.path.display());
            load(&self.path)
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.get().is_some()
    }
}

static SHARED: OnceCell<Dataset> = OnceCell::new();

/// Process-wide dataset, loaded exactly once.
///
/// Only the path passed on the first successful call is read; later paths
/// are ignored.
pub fn shared(path: &Path) -> Result<&'static Dataset, DataLoadError> {
    SHARED.get_or_try_init(|| load(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file() -> NamedTempFile {
        let mut tmp = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(
            tmp,
            "indiastates,industry_group,total_workers,main_males,main_females,marginal_males,marginal_females,total_main_workers,total_marginal_workers"
        )
        .unwrap();
        writeln!(tmp, "Goa,Fishing,10,4,3,2,1,7,3").unwrap();
        tmp
    }

    #[test]
    fn test_store_loads_once_across_threads() {
        let tmp = csv_file();
        let store = DataStore::new(tmp.path());
        assert!(!store.is_loaded());

        let addrs: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| store.dataset().unwrap() as *const Dataset as usize))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(store.is_loaded());
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(store.dataset().unwrap().len(), 1);
    }

    #[test]
    fn test_store_missing_file_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("later.csv");
        let store = DataStore::new(&path);
        assert!(matches!(store.dataset(), Err(DataLoadError::NotFound(_))));
        assert!(!store.is_loaded());

        std::fs::copy(csv_file().path(), &path).unwrap();
        assert_eq!(store.dataset().unwrap().len(), 1);
    }

    #[test]
    fn test_shared_returns_same_instance() {
        let tmp = csv_file();
        let first = shared(tmp.path()).unwrap();
        let second = shared(Path::new("ignored.csv")).unwrap();
        assert!(std::ptr::eq(first, second));
    }
}
