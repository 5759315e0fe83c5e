//! Memoized dataset handle shared by the whole process.

use super::loader::{DataLoader, LoadError, LoadOptions};
use super::record::Dataset;
use std::sync::{Arc, OnceLock, RwLock};
use tracing::{debug, info};

static GLOBAL: OnceLock<DatasetCache> = OnceLock::new();

struct CachedDataset {
    options: LoadOptions,
    dataset: Arc<Dataset>,
}

/// Holds at most one loaded dataset, keyed by the options it was loaded with.
#[derive(Default)]
pub struct DatasetCache {
    slot: RwLock<Option<CachedDataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide instance, created on first use.
    pub fn global() -> &'static DatasetCache {
        GLOBAL.get_or_init(DatasetCache::new)
    }

    /// Cached dataset for `options`, loading it if absent or if a different
    /// source is cached.
    pub fn get_or_load(&self, options: &LoadOptions) -> Result<Arc<Dataset>, LoadError> {
        if let Some(dataset) = self.get(options) {
            debug!(path = %options.path.display(), "dataset cache hit");
            return Ok(dataset);
        }

        let dataset = Arc::new(DataLoader::load(options)?);

        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        // Another caller may have loaded the same source meanwhile.
        if let Some(cached) = slot.as_ref().filter(|c| &c.options == options) {
            return Ok(Arc::clone(&cached.dataset));
        }
        info!(path = %options.path.display(), "dataset cached");
        *slot = Some(CachedDataset {
            options: options.clone(),
            dataset: Arc::clone(&dataset),
        });
        Ok(dataset)
    }

    /// Cached dataset if it was loaded with `options`.
    pub fn get(&self, options: &LoadOptions) -> Option<Arc<Dataset>> {
        let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
        slot.as_ref()
            .filter(|c| &c.options == options)
            .map(|c| Arc::clone(&c.dataset))
    }

    pub fn invalidate(&self) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        if slot.take().is_some() {
            debug!("dataset cache invalidated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(rows: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "ORDERNUMBER,QUANTITYORDERED,PRICEEACH,ORDERDATE,PRODUCTLINE,ADDRESSLINE1,CITY"
        )
        .unwrap();
        write!(file, "{rows}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn same_source_returns_same_handle() {
        let file = write_csv("1,2,3.0,1/1/2003 0:00,Ships,a,NYC\n");
        let cache = DatasetCache::new();
        let options = LoadOptions::new(file.path());

        let first = cache.get_or_load(&options).unwrap();
        let second = cache.get_or_load(&options).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn different_source_replaces_cached_dataset() {
        let a = write_csv("1,2,3.0,1/1/2003 0:00,Ships,a,NYC\n");
        let b = write_csv("1,2,3.0,1/1/2003 0:00,Ships,a,NYC\n2,1,1.0,1/1/2004 0:00,Ships,a,NYC\n");
        let cache = DatasetCache::new();
        let opts_a = LoadOptions::new(a.path());
        let opts_b = LoadOptions::new(b.path());

        assert_eq!(cache.get_or_load(&opts_a).unwrap().len(), 1);
        assert_eq!(cache.get_or_load(&opts_b).unwrap().len(), 2);
        assert!(cache.get(&opts_a).is_none());
        assert!(cache.get(&opts_b).is_some());
    }

    #[test]
    fn invalidate_forces_reload() {
        let file = write_csv("1,2,3.0,1/1/2003 0:00,Ships,a,NYC\n");
        let cache = DatasetCache::new();
        let options = LoadOptions::new(file.path());

        let first = cache.get_or_load(&options).unwrap();
        cache.invalidate();
        assert!(cache.get(&options).is_none());
        let second = cache.get_or_load(&options).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }

    #[test]
    fn failed_load_leaves_cache_empty() {
        let cache = DatasetCache::new();
        let options = LoadOptions::new("/definitely/not/here.csv");
        assert!(matches!(
            cache.get_or_load(&options),
            Err(LoadError::Io { .. })
        ));
        assert!(cache.get(&options).is_none());
    }
}
