//! Render Cache - slide contents that outlive the active pointer.
//!
//! Keeps every slide that is currently mounted, keyed by slide key, across
//! renders. The outgoing slide stays available for its exit animation after
//! the active key has moved on. The cache never touches the host.

use std::collections::BTreeMap;

use crate::primitives::SlideRender;
use crate::types::SlideKey;

/// Mapping from slide key to renderable content, ordered by key.
#[derive(Debug)]
pub struct RenderCache<C> {
    renders: BTreeMap<SlideKey, SlideRender<C>>,
}

impl<C> Default for RenderCache<C> {
    fn default() -> Self {
        Self { renders: BTreeMap::new() }
    }
}

impl<C> RenderCache<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or overwrite the content for a key.
    pub fn record(&mut self, key: SlideKey, content: SlideRender<C>) {
        self.renders.insert(key, content);
    }

    pub fn has(&self, key: SlideKey) -> bool {
        self.renders.contains_key(&key)
    }

    pub fn get(&self, key: SlideKey) -> Option<&SlideRender<C>> {
        self.renders.get(&key)
    }

    /// Drop every entry except `exception`, if it is present.
    pub fn evict_all_except(&mut self, exception: Option<SlideKey>) {
        let preserved = exception.and_then(|key| self.renders.remove(&key).map(|r| (key, r)));
        self.renders.clear();
        if let Some((key, render)) = preserved {
            self.renders.insert(key, render);
        }
    }

    /// Known keys in ascending order.
    pub fn keys(&self) -> Vec<SlideKey> {
        self.renders.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.renders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renders.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
