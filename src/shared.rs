use crate::error::Result;
use crate::file::{join, load};
use crate::model::Document;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::warn;

/// Path-backed document that can be reloaded by one thread while others
/// read it. Readers work on immutable snapshots; a reload parses the new
/// content first and then swaps the snapshot in one step.
#[derive(Debug)]
pub struct SharedIniFile {
    path: PathBuf,
    current: RwLock<Arc<Document>>,
}

impl SharedIniFile {
    pub fn open<I, P>(segments: I) -> Result<SharedIniFile>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let path = join(segments);
        let document = load(&path)?;
        Ok(SharedIniFile {
            path,
            current: RwLock::new(Arc::new(document)),
        })
    }

    /// Current content. The snapshot is unaffected by later reloads.
    pub fn snapshot(&self) -> Arc<Document> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Read the file again and publish the new content. On failure the
    /// published content does not change.
    pub fn reload(&self) -> Result<()> {
        let document = load(&self.path).inspect_err(|e| {
            warn!(path = %self.path.display(), error = %e, "reload failed, keeping previous content");
        })?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(document);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.snapshot().get(key).map(String::from)
    }

    pub fn get_section_value(&self, section: &str, key: &str) -> Option<String> {
        self.snapshot()
            .get_section_value(section, key)
            .map(String::from)
    }
}

#[test]
fn test_is_send_and_sync() {
    fn check<T: Send + Sync>() {}
    check::<SharedIniFile>();
}
