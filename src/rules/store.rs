//! Rule table storage.
//!
//! The check engine only sees the [`RuleStore`] trait: give it a
//! `MAJOR.MINOR` bucket, get back the rule table for that bucket. Lookups
//! never fail. A malformed bucket, a missing table or a broken table all
//! come back as an empty table, which turns every verdict into `unknown`.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex};

use regex::Regex;

use super::rule::RuleTable;
use crate::error::{DefcheckError, Result};

/// Valid bucket identifiers: one digit, a dot, one digit.
static BUCKET_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]\.[0-9]$").unwrap());

/// A validated `MAJOR.MINOR` bucket identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionBucket(String);

impl VersionBucket {
    /// Validate a bucket identifier.
    ///
    /// ```
    /// use defcheck::rules::VersionBucket;
    ///
    /// assert!(VersionBucket::parse("5.7").is_some());
    /// assert!(VersionBucket::parse("10.2").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        BUCKET_REGEX
            .is_match(raw)
            .then(|| Self(raw.to_string()))
    }

    /// The identifier as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of this bucket's table.
    pub fn file_name(&self) -> String {
        format!("mysql-{}.yml", self.0)
    }
}

impl fmt::Display for VersionBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read access to rule tables, one per version bucket.
pub trait RuleStore {
    /// Short description of where tables come from.
    fn source(&self) -> String;

    /// Load the table for a bucket, `None` if this store has none.
    ///
    /// # Errors
    ///
    /// Returns an error when a table exists but cannot be read or parsed.
    fn load_table(&self, bucket: &VersionBucket) -> Result<Option<RuleTable>>;

    /// Rules for a bucket identifier. Never fails.
    fn rules_for(&self, bucket: &str) -> Arc<RuleTable> {
        let Some(valid) = VersionBucket::parse(bucket) else {
            tracing::debug!("Malformed version bucket '{}', no rules apply", bucket);
            return Arc::new(RuleTable::empty(bucket));
        };
        Arc::new(load_or_empty(self, &valid))
    }
}

fn load_or_empty<S: RuleStore + ?Sized>(store: &S, bucket: &VersionBucket) -> RuleTable {
    match store.load_table(bucket) {
        Ok(Some(table)) => {
            if table.bucket != bucket.as_str() {
                tracing::warn!(
                    "Rule table from {} declares bucket '{}' but was loaded for '{}'",
                    store.source(),
                    table.bucket,
                    bucket
                );
            }
            tracing::debug!(
                "Loaded {} variables for {} from {}",
                table.len(),
                bucket,
                store.source()
            );
            table
        }
        Ok(None) => {
            tracing::debug!("No rule table for {} in {}", bucket, store.source());
            RuleTable::empty(bucket.as_str())
        }
        Err(e) => {
            tracing::warn!("{}", e);
            RuleTable::empty(bucket.as_str())
        }
    }
}

/// Rule tables read from `mysql-<bucket>.yml` files in a directory.
#[derive(Debug, Clone)]
pub struct DirectoryRuleStore {
    dir: PathBuf,
}

impl DirectoryRuleStore {
    /// Open a rules directory.
    ///
    /// # Errors
    ///
    /// Returns `RulesDirNotFound` if `dir` is not a directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(DefcheckError::RulesDirNotFound { path: dir });
        }
        Ok(Self { dir })
    }
}

impl RuleStore for DirectoryRuleStore {
    fn source(&self) -> String {
        self.dir.display().to_string()
    }

    fn load_table(&self, bucket: &VersionBucket) -> Result<Option<RuleTable>> {
        let path = self.dir.join(bucket.file_name());
        if !path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        RuleTable::from_yaml(&content, &path).map(Some)
    }
}

/// Rule tables held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRuleStore {
    tables: HashMap<String, RuleTable>,
}

impl MemoryRuleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table under its own bucket.
    pub fn with_table(mut self, table: RuleTable) -> Self {
        self.tables.insert(table.bucket.clone(), table);
        self
    }
}

impl RuleStore for MemoryRuleStore {
    fn source(&self) -> String {
        "memory".to_string()
    }

    fn load_table(&self, bucket: &VersionBucket) -> Result<Option<RuleTable>> {
        Ok(self.tables.get(bucket.as_str()).cloned())
    }
}

/// Loads each bucket's table once and shares it afterwards.
pub struct CachedRuleStore<S> {
    inner: S,
    cache: Mutex<HashMap<VersionBucket, Arc<RuleTable>>>,
}

impl<S: RuleStore> CachedRuleStore<S> {
    /// Wrap a store with a load-once cache.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: RuleStore> RuleStore for CachedRuleStore<S> {
    fn source(&self) -> String {
        self.inner.source()
    }

    fn load_table(&self, bucket: &VersionBucket) -> Result<Option<RuleTable>> {
        self.inner.load_table(bucket)
    }

    fn rules_for(&self, bucket: &str) -> Arc<RuleTable> {
        let Some(valid) = VersionBucket::parse(bucket) else {
            return self.inner.rules_for(bucket);
        };

        let mut cache = match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Arc::clone(
            cache
                .entry(valid.clone())
                .or_insert_with(|| Arc::new(load_or_empty(&self.inner, &valid))),
        )
    }
}

impl<S: RuleStore + ?Sized> RuleStore for Box<S> {
    fn source(&self) -> String {
        (**self).source()
    }

    fn load_table(&self, bucket: &VersionBucket) -> Result<Option<RuleTable>> {
        (**self).load_table(bucket)
    }

    fn rules_for(&self, bucket: &str) -> Arc<RuleTable> {
        (**self).rules_for(bucket)
    }
}

/// Open the rule store for an optional rules directory.
///
/// Without a directory the built-in tables are used. Either way tables are
/// cached after their first load.
///
/// # Errors
///
/// Returns `RulesDirNotFound` if `rules_dir` is given but is not a directory.
pub fn open_store(rules_dir: Option<&Path>) -> Result<Box<dyn RuleStore>> {
    match rules_dir {
        Some(dir) => {
            let store = DirectoryRuleStore::new(dir)?;
            tracing::debug!("Using rule tables from {}", store.source());
            Ok(Box::new(CachedRuleStore::new(store)))
        }
        None => Ok(Box::new(CachedRuleStore::new(
            super::builtin::BuiltinRuleStore::new(),
        ))),
    }
}

impl<S> fmt::Debug for CachedRuleStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedRuleStore").finish_non_exhaustive()
    }
}
