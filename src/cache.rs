//! Optional memoization in front of a [`Renderer`].
//!
//! Rendering is pure, so cached entries never go stale and there is no
//! invalidation. The cache only bounds how many distinct messages it keeps.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::pipeline::Renderer;

pub struct RenderCache {
    renderer: Renderer,
    capacity: usize,
    entries: Mutex<HashMap<String, Arc<str>>>,
}

impl RenderCache {
    /// A cache holding at most `capacity` rendered messages.
    pub fn new(renderer: Renderer, capacity: usize) -> Self {
        Self {
            renderer,
            capacity,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Render `text`, reusing an earlier result for the same input.
    ///
    /// Once the cache is full, new inputs are rendered without being stored.
    pub fn render(&self, text: &str) -> Arc<str> {
        if let Some(hit) = self.entries.lock().get(text) {
            return Arc::clone(hit);
        }

        // Render outside the lock; concurrent misses on the same text produce
        // identical output, so whichever insert lands first wins.
        let rendered: Arc<str> = self.renderer.render(text).into();

        let mut entries = self.entries.lock();
        if entries.len() < self.capacity {
            let entry = entries
                .entry(text.to_string())
                .or_insert_with(|| Arc::clone(&rendered));
            return Arc::clone(entry);
        }
        tracing::trace!(capacity = self.capacity, "render cache full");
        rendered
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
