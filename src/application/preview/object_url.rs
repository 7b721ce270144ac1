// SPDX-License-Identifier: MPL-2.0
//! Transient object URLs bound to files on disk.
//!
//! Media previews reference their file through a `blob:` URL that lives only
//! as long as the preview session. The registry is shared (cheap clone) so
//! loader tasks can register URLs and the session can revoke them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const URL_PREFIX: &str = "blob:iced-preview/";

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    live: HashMap<String, PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct ObjectUrlRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl ObjectUrlRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates a new URL bound to `path`.
    pub fn create(&self, path: &Path) -> String {
        let mut registry = self.lock();
        registry.next_id += 1;
        let url = format!("{URL_PREFIX}{}", registry.next_id);
        registry.live.insert(url.clone(), path.to_path_buf());
        log::debug!("Created object URL {} for {}", url, path.display());
        url
    }

    /// Releases `url`. Returns false if it was unknown or already revoked.
    pub fn revoke(&self, url: &str) -> bool {
        let removed = self.lock().live.remove(url).is_some();
        if removed {
            log::debug!("Revoked object URL {}", url);
        }
        removed
    }

    /// The file a live URL points to.
    #[must_use]
    pub fn resolve(&self, url: &str) -> Option<PathBuf> {
        self.lock().live.get(url).cloned()
    }

    /// Number of URLs not yet revoked.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.lock().live.len()
    }
}
