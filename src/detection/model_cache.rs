use crate::detection::error::DetectError;
use std::sync::{Arc, Mutex};
use tracing::info;

/// A load-once cache for a detection model.
///
/// Model deserialization is by far the slowest part of a detection call, so a
/// long-lived caller loads the model a single time and reuses it. The cache is
/// initialized lazily on first use; the lock makes concurrent first use from
/// multiple threads perform the load exactly once. A failed load leaves the
/// cache empty, so the next call attempts the load again rather than pinning
/// the failure.
///
/// The cache is never invalidated on its own, even if the artifact on disk is
/// replaced. Call [`ModelCache::reset`] to force the next use to reload.
pub struct ModelCache<T> {
    loader: Box<dyn Fn() -> Result<T, DetectError> + Send + Sync>,
    slot: Mutex<Option<Arc<T>>>,
}

impl<T> ModelCache<T> {
    pub fn new(loader: impl Fn() -> Result<T, DetectError> + Send + Sync + 'static) -> Self {
        ModelCache {
            loader: Box::new(loader),
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached model, loading it first if no load has succeeded yet.
    pub fn get_or_load(&self) -> Result<Arc<T>, DetectError> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(model) = slot.as_ref() {
            return Ok(Arc::clone(model));
        }
        let model = Arc::new((self.loader)()?);
        *slot = Some(Arc::clone(&model));
        Ok(model)
    }

    /// Drops the cached model so the next use reloads from the artifact.
    pub fn reset(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        if slot.take().is_some() {
            info!("model cache reset, next detection reloads the model");
        }
    }
}
