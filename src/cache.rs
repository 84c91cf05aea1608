//! Statement cache.
//!
//! Insert, update and upsert statements depend only on the set of columns
//! involved, so each distinct column combination is built once and reused.
//! Entries live as long as the owning [`CacheRegistry`]; nothing is evicted.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::binding::BindingPlan;
use crate::error::Result;

#[cfg(feature = "metrics")]
use crate::metrics::METRICS;

/// A built statement with its parameter and returning plans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedQuery {
    pub sql: String,
    /// Fields bound to `$1..$n`, in order.
    pub values: BindingPlan,
    /// Fields receiving the `RETURNING` columns, in order.
    pub returning: BindingPlan,
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: RwLock<HashMap<String, Arc<CachedQuery>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the entry for `key`, building and storing it on a miss.
    ///
    /// `build` runs without the lock held. When two callers race on the same
    /// key the first stored entry wins and both get it back. A failed build
    /// stores nothing.
    pub fn get_or_build<F>(&self, key: &str, build: F) -> Result<Arc<CachedQuery>>
    where
        F: FnOnce() -> Result<CachedQuery>,
    {
        if let Some(hit) = self.get(key) {
            #[cfg(feature = "metrics")]
            METRICS.record_cache_hit();
            return Ok(hit);
        }

        #[cfg(feature = "metrics")]
        METRICS.record_cache_miss();
        log::trace!("query cache miss for key {key:?}");

        let built = Arc::new(build()?);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.entry(key.to_string()).or_insert(built);
        Ok(Arc::clone(entry))
    }

    pub fn get(&self, key: &str) -> Option<Arc<CachedQuery>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The insert, update and upsert caches of one table.
#[derive(Debug, Default)]
pub struct TableCaches {
    pub insert: QueryCache,
    pub update: QueryCache,
    pub upsert: QueryCache,
}

/// Per-table caches, created on first use of a table.
#[derive(Debug, Default)]
pub struct CacheRegistry {
    tables: RwLock<HashMap<&'static str, Arc<TableCaches>>>,
}

impl CacheRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self, name: &'static str) -> Arc<TableCaches> {
        if let Some(caches) = self
            .tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Arc::clone(caches);
        }
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(tables.entry(name).or_default())
    }

    pub fn table_count(&self) -> usize {
        self.tables.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Key for an insert: whitelist, then the non-zero default columns.
pub fn insert_key(whitelist: &[&str], non_zero_defaults: &[&str]) -> String {
    format!("{}.{}", whitelist.join(","), non_zero_defaults.join(","))
}

pub fn update_key(whitelist: &[&str]) -> String {
    whitelist.join(",")
}

pub fn upsert_key(
    update_on_conflict: bool,
    conflict: &[&str],
    update: &[&str],
    whitelist: &[&str],
    non_zero_defaults: &[&str],
) -> String {
    format!(
        "{}.{}.{}.{}.{}",
        if update_on_conflict { 't' } else { 'f' },
        conflict.join(","),
        update.join(","),
        whitelist.join(","),
        non_zero_defaults.join(",")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn query(sql: &str) -> CachedQuery {
        CachedQuery {
            sql: sql.to_string(),
            values: BindingPlan::default(),
            returning: BindingPlan::default(),
        }
    }

    #[test]
    fn test_hit_reuses_entry() {
        let cache = QueryCache::new();
        let builds = AtomicUsize::new(0);

        let first = cache
            .get_or_build("name.", || {
                builds.fetch_add(1, Ordering::SeqCst);
                Ok(query("INSERT 1"))
            })
            .unwrap();
        let second = cache
            .get_or_build("name.", || {
                builds.fetch_add(1, Ordering::SeqCst);
                Ok(query("INSERT 2"))
            })
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.sql, "INSERT 1");
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failed_build_is_not_stored() {
        let cache = QueryCache::new();
        let res = cache.get_or_build("bad.", || Err(ModelError::Invalid("boom".into())));
        assert!(res.is_err());
        assert!(cache.is_empty());

        let ok = cache.get_or_build("bad.", || Ok(query("SELECT 1"))).unwrap();
        assert_eq!(ok.sql, "SELECT 1");
    }

    #[test]
    fn test_registry_returns_same_table_caches() {
        let registry = CacheRegistry::new();
        let a = registry.table("sources");
        let b = registry.table("sources");
        let c = registry.table("authors");
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(registry.table_count(), 2);
    }

    #[test]
    fn test_keys() {
        assert_eq!(insert_key(&[], &["id"]), ".id");
        assert_eq!(insert_key(&["name", "uid"], &[]), "name,uid.");
        assert_eq!(update_key(&["name", "uid"]), "name,uid");
        assert_eq!(
            upsert_key(true, &["id"], &["name"], &[], &["created_at"]),
            "t.id.name..created_at"
        );
        assert_ne!(
            upsert_key(false, &["id"], &["name"], &[], &[]),
            upsert_key(true, &["id"], &["name"], &[], &[])
        );
    }

    #[test]
    fn test_concurrent_coroutines_converge() {
        let cache = Arc::new(QueryCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                may::go!(move || {
                    cache
                        .get_or_build("uid,name.", || Ok(query(&format!("INSERT {i}"))))
                        .unwrap()
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let stored = cache.get("uid,name.").unwrap();
        for r in &results {
            assert!(Arc::ptr_eq(r, &stored));
        }
        assert_eq!(cache.len(), 1);
    }
}
