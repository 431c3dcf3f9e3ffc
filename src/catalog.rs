use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseQueryError, Result};
use crate::normalize::normalize;

/// Marker prefix (after normalization) for section-header lines in a
/// catalog file. Header lines are excluded from the catalog.
const HEADER_MARKER: &str = "dre:";

/// Kind tag the remote listing uses for expense categories.
pub const EXPENSE_KIND: &str = "DESPESA";

/// How long a loaded catalog stays fresh in a [`CatalogCache`].
pub const DEFAULT_CATALOG_TTL: Duration = Duration::from_secs(3600);

/// A known expense category. The identifier is opaque and only present when
/// the catalog came from (or was resolved against) the remote listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub id: Option<String>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
        }
    }

    pub fn with_id(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: Some(id.into()),
        }
    }

    pub fn normalized_name(&self) -> String {
        normalize(&self.name)
    }
}

/// Identity is normalized-name equality. Identifiers may be unknown before
/// resolution and do not participate.
impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.normalized_name() == other.normalized_name()
    }
}

impl Eq for Category {}

/// One record of the remote category listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteCategory {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: String,
}

/// The ordered collection of known category names, loaded once per session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl CategoryCatalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Loads a catalog from a line-delimited UTF-8 file: one category name
    /// per non-empty line, `DRE:`-prefixed lines (case-insensitive) skipped
    /// as section headers.
    ///
    /// A missing or unreadable file is a [`ExpenseQueryError::CatalogLoad`]
    /// error; an absent catalog is not the same as an empty one.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let file = File::open(path).map_err(|e| ExpenseQueryError::CatalogLoad {
            origin: origin.clone(),
            details: e.to_string(),
        })?;
        Self::read_lines(BufReader::new(file), &origin)
    }

    /// Same parsing rules as [`CategoryCatalog::from_file`], for any reader.
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        Self::read_lines(reader, "<reader>")
    }

    fn read_lines(reader: impl BufRead, origin: &str) -> Result<Self> {
        let mut categories = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|e| ExpenseQueryError::CatalogLoad {
                origin: origin.to_string(),
                details: e.to_string(),
            })?;
            let trimmed = line.trim();
            if trimmed.is_empty() || normalize(trimmed).starts_with(HEADER_MARKER) {
                continue;
            }
            categories.push(Category::new(trimmed));
        }
        debug!("loaded {} categories from {origin}", categories.len());
        Ok(Self { categories })
    }

    /// Builds a catalog from the deserialized items of the remote category
    /// listing, keeping only expense-kind records and their resolved ids.
    pub fn from_remote_items(items: impl IntoIterator<Item = RemoteCategory>) -> Self {
        let categories = items
            .into_iter()
            .filter(|item| item.kind == EXPENSE_KIND)
            .map(|item| Category::with_id(item.name, item.id))
            .collect();
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

struct CachedCatalog {
    loaded_at: Instant,
    catalog: Arc<CategoryCatalog>,
}

/// Time-bound cache for loaded catalogs.
///
/// The key must be derived from the session identity (e.g. client id plus
/// access credential) when listings are session-specific. Loader errors
/// propagate to the caller and are never cached.
pub struct CatalogCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CachedCatalog>>,
}

impl CatalogCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_default_ttl() -> Self {
        Self::new(DEFAULT_CATALOG_TTL)
    }

    /// Returns the cached catalog for `key` if still fresh, otherwise runs
    /// `loader` and caches its result.
    pub fn get_or_load<F>(&self, key: &str, loader: F) -> Result<Arc<CategoryCatalog>>
    where
        F: FnOnce() -> Result<CategoryCatalog>,
    {
        let mut entries = self.entries.lock().unwrap();
        if let Some(entry) = entries.get(key) {
            if entry.loaded_at.elapsed() < self.ttl {
                debug!("catalog cache hit for key '{key}'");
                return Ok(Arc::clone(&entry.catalog));
            }
        }

        debug!("catalog cache miss for key '{key}'");
        let catalog = Arc::new(loader()?);
        entries.insert(
            key.to_string(),
            CachedCatalog {
                loaded_at: Instant::now(),
                catalog: Arc::clone(&catalog),
            },
        );
        Ok(catalog)
    }

    pub fn invalidate(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}
