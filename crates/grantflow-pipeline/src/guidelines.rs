//! Organization guideline cache
//!
//! Guideline text is read from `<dir>/<org>.txt` on first use and cached
//! for the process lifetime. A missing file degrades silently to empty
//! guideline text; it is a configuration choice, not an error.

use grantflow_domain::Organization;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Lazy, process-wide cache of per-organization guideline text
#[derive(Debug)]
pub struct GuidelineCache {
    dir: PathBuf,
    cache: Mutex<HashMap<Organization, String>>,
}

impl GuidelineCache {
    /// Create a cache reading from the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Get the guideline text for an organization
    ///
    /// Returns an empty string when the guideline file does not exist or
    /// cannot be read; the outcome is cached either way, so the disk is hit
    /// at most once per organization.
    pub fn load(&self, org: Organization) -> String {
        let mut cache = match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(text) = cache.get(&org) {
            return text.clone();
        }

        let path = self.dir.join(org.guideline_filename());
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => {
                debug!(org = %org, path = %path.display(), chars = text.len(), "loaded guidelines");
                text.trim().to_string()
            }
            Err(e) => {
                warn!(org = %org, path = %path.display(), "no guideline file: {}", e);
                String::new()
            }
        };

        cache.insert(org, text.clone());
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let cache = GuidelineCache::new(dir.path());
        assert_eq!(cache.load(Organization::Fpi), "");
    }

    #[test]
    fn test_load_reads_and_caches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cu.txt");
        std::fs::write(&path, "Budget must include a cost breakdown.\n").unwrap();

        let cache = GuidelineCache::new(dir.path());
        assert_eq!(
            cache.load(Organization::Cu),
            "Budget must include a cost breakdown."
        );

        // Cached: deleting the file no longer changes the answer.
        std::fs::remove_file(&path).unwrap();
        assert_eq!(
            cache.load(Organization::Cu),
            "Budget must include a cost breakdown."
        );
    }

    #[test]
    fn test_organizations_cached_independently() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("fpi.txt"), "FPI rules").unwrap();

        let cache = GuidelineCache::new(dir.path());
        assert_eq!(cache.load(Organization::Fpi), "FPI rules");
        assert_eq!(cache.load(Organization::Cu), "");
    }
}
