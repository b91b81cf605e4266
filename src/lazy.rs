use std::collections::BTreeSet;

/// Intersection watcher for deferred images.
///
/// An image is `observe`d while pending. Its first intersection marks it loaded and
/// drops it from the watch list; later observations of a loaded image are ignored.
///
/// Pages only record which images are under observation. In the browser the
/// transition to loaded is driven by `static/js/lazy-load.js`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LazyImages {
    pending: BTreeSet<String>,
    loaded: BTreeSet<String>,
}

impl LazyImages {
    pub fn observe<S: Into<String>>(&mut self, id: S) {
        let id = id.into();
        if !self.loaded.contains(&id) {
            self.pending.insert(id);
        }
    }

    /// Returns `true` only for the transition from pending to loaded.
    pub fn intersect(&mut self, id: &str) -> bool {
        if self.pending.remove(id) {
            self.loaded.insert(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains(id)
    }

    pub fn is_loaded(&self, id: &str) -> bool {
        self.loaded.contains(id)
    }

    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }
}
