//! Priority-ordered, copy-on-write registries for mechanisms and augmentors.
//!
//! Registration publishes a new sorted list atomically. Readers take a
//! snapshot once per request and keep iterating it even if a registration
//! lands concurrently; the new entry is visible to the next request.

use std::sync::Arc;

use arc_swap::ArcSwap;
use authn_dispatcher_sdk::{AuthenticationMechanism, IdentityAugmentor};
use tracing::debug;

/// A registered item together with its name and priority.
pub struct Registration<T: ?Sized> {
    name: String,
    priority: i32,
    item: Arc<T>,
}

impl<T: ?Sized> Clone for Registration<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            priority: self.priority,
            item: Arc::clone(&self.item),
        }
    }
}

impl<T: ?Sized> Registration<T> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    #[must_use]
    pub fn item(&self) -> &Arc<T> {
        &self.item
    }
}

impl<T: ?Sized> std::fmt::Debug for Registration<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

/// Append-only registry kept sorted by ascending priority.
///
/// Entries with equal priority keep their registration order.
pub struct PriorityRegistry<T: ?Sized> {
    entries: ArcSwap<Vec<Registration<T>>>,
}

impl<T: ?Sized> Default for PriorityRegistry<T> {
    fn default() -> Self {
        Self {
            entries: ArcSwap::from_pointee(Vec::new()),
        }
    }
}

impl<T: ?Sized> PriorityRegistry<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `item` after every entry whose priority is lower or equal.
    pub fn register(&self, name: impl Into<String>, priority: i32, item: Arc<T>) {
        let entry = Registration {
            name: name.into(),
            priority,
            item,
        };
        debug!(name = %entry.name, priority, "Registering entry");

        self.entries.rcu(|current| {
            let mut next: Vec<Registration<T>> = current.iter().cloned().collect();
            let at = next.partition_point(|e| e.priority <= priority);
            next.insert(at, entry.clone());
            next
        });
    }

    /// Current sorted entries.
    ///
    /// The returned list never changes; later registrations publish a new one.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<Registration<T>>> {
        self.entries.load_full()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.load().is_empty()
    }
}

impl<T: ?Sized> std::fmt::Debug for PriorityRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.load().iter()).finish()
    }
}

/// Registry of identity augmentors.
pub type AugmentorRegistry = PriorityRegistry<dyn IdentityAugmentor>;

/// Registry of authentication mechanisms.
pub type MechanismRegistry = PriorityRegistry<dyn AuthenticationMechanism>;

impl PriorityRegistry<dyn IdentityAugmentor> {
    /// Register an augmentor under its own name.
    pub fn register_augmentor(&self, priority: i32, augmentor: Arc<dyn IdentityAugmentor>) {
        let name = augmentor.name().to_owned();
        self.register(name, priority, augmentor);
    }
}

impl PriorityRegistry<dyn AuthenticationMechanism> {
    /// Register a mechanism under its own name.
    pub fn register_mechanism(&self, priority: i32, mechanism: Arc<dyn AuthenticationMechanism>) {
        let name = mechanism.name().to_owned();
        self.register(name, priority, mechanism);
    }
}
