//! Registry of per-type record metadata
//!
//! One entry per concrete record type, built on first use and never evicted.
//! Building is a pure function of the type's static declarations, so two
//! threads racing on the same type build equal values and whichever insert
//! lands first is the one everybody reads afterwards.

use std::any::TypeId;
use std::sync::Arc;

use dashmap::DashMap;

use super::error::MetadataError;
use super::types::TypeMetadata;
use crate::domain::common::Record;

#[derive(Debug, Default)]
pub struct MetadataRegistry {
    entries: DashMap<TypeId, Arc<TypeMetadata>>,
}

impl MetadataRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Eagerly build and cache metadata for `T`
    ///
    /// Intended for startup: malformed declarations surface here as an error
    /// instead of on the first comparison.
    pub fn register<T: Record>(&self) -> Result<Arc<TypeMetadata>, MetadataError> {
        let metadata = self.metadata::<T>()?;
        tracing::info!(
            type_name = T::TYPE_NAME,
            key_fields = metadata.key_fields().len(),
            required_fields = metadata.required_fields().len(),
            info_fields = metadata.info_fields().len(),
            "Registered record metadata"
        );
        Ok(metadata)
    }

    /// Cached metadata for `T`, built on first access
    ///
    /// A failed build is not cached.
    pub fn metadata<T: Record>(&self) -> Result<Arc<TypeMetadata>, MetadataError> {
        let id = TypeId::of::<T>();
        if let Some(entry) = self.entries.get(&id) {
            return Ok(Arc::clone(entry.value()));
        }

        // Built outside the shard lock; the first published value wins
        let built = Arc::new(TypeMetadata::for_record::<T>()?);
        tracing::debug!(type_name = T::TYPE_NAME, "Built record metadata");

        let entry = self.entries.entry(id).or_insert(built);
        Ok(Arc::clone(entry.value()))
    }

    pub fn contains<T: Record>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_location::Location;
    use crate::domain::a003_item::Item;

    #[test]
    fn metadata_is_built_once_and_reused() {
        let registry = MetadataRegistry::new();
        assert!(registry.is_empty());

        let first = registry.metadata::<Location>().unwrap();
        let second = registry.metadata::<Location>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains::<Location>());
        assert!(!registry.contains::<Item>());
    }

    #[test]
    fn rebuilt_metadata_equals_cached() {
        let registry = MetadataRegistry::new();
        let cached = registry.register::<Item>().unwrap();
        let rebuilt = TypeMetadata::for_record::<Item>().unwrap();
        assert_eq!(*cached, rebuilt);
    }

    #[test]
    fn concurrent_first_access_publishes_one_value() {
        let registry = Arc::new(MetadataRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.metadata::<Item>().unwrap())
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let cached = registry.metadata::<Item>().unwrap();
        for result in &results {
            assert_eq!(**result, *cached);
        }
        assert_eq!(registry.len(), 1);
    }
}
