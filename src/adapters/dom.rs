use crate::core::template::Markup;
use crate::domain::ports::{MountPoint, RenderTarget};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MountState {
    content: String,
    writes: usize,
}

type Mounts = Arc<Mutex<BTreeMap<String, MountState>>>;

/// In-memory page with a fixed set of mount ids.
///
/// Clones share the same mounts, so a caller can keep a handle while
/// renderers write into it.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    mounts: Mounts,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mounts(ids: &[&str]) -> Self {
        let doc = Self::new();
        for id in ids {
            doc.add_mount(id);
        }
        doc
    }

    pub fn add_mount(&self, id: &str) {
        lock(&self.mounts).entry(id.to_string()).or_default();
    }

    pub fn content(&self, id: &str) -> Option<String> {
        lock(&self.mounts).get(id).map(|m| m.content.clone())
    }

    pub fn write_count(&self, id: &str) -> usize {
        lock(&self.mounts).get(id).map(|m| m.writes).unwrap_or(0)
    }

    /// All mounts with their current content, ordered by id.
    pub fn snapshot(&self) -> Vec<(String, String)> {
        lock(&self.mounts)
            .iter()
            .map(|(id, m)| (id.clone(), m.content.clone()))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct MemoryMount {
    id: String,
    mounts: Mounts,
}

impl MemoryMount {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl RenderTarget for MemoryDocument {
    type Mount = MemoryMount;

    fn find_by_id(&self, id: &str) -> Option<MemoryMount> {
        lock(&self.mounts).contains_key(id).then(|| MemoryMount {
            id: id.to_string(),
            mounts: Arc::clone(&self.mounts),
        })
    }
}

impl MountPoint for MemoryMount {
    fn set_content(&self, markup: Markup) {
        let mut mounts = lock(&self.mounts);
        let state = mounts.entry(self.id.clone()).or_default();
        state.content = markup.into_string();
        state.writes += 1;
    }
}

// A panic elsewhere while holding the lock leaves the map itself intact.
fn lock(mounts: &Mounts) -> MutexGuard<'_, BTreeMap<String, MountState>> {
    mounts.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_id_only_known_mounts() {
        let doc = MemoryDocument::with_mounts(&["a"]);
        assert!(doc.find_by_id("a").is_some());
        assert!(doc.find_by_id("b").is_none());
    }

    #[test]
    fn test_set_content_replaces_and_is_shared_across_clones() {
        let doc = MemoryDocument::with_mounts(&["a"]);
        let handle = doc.clone();
        let mount = doc.find_by_id("a").unwrap();
        assert_eq!(mount.id(), "a");

        mount.set_content(Markup::literal("<p>one</p>"));
        mount.set_content(Markup::literal("<p>two</p>"));

        assert_eq!(handle.content("a").unwrap(), "<p>two</p>");
        assert_eq!(handle.write_count("a"), 2);
        assert_eq!(handle.snapshot(), vec![("a".to_string(), "<p>two</p>".to_string())]);
    }
}
