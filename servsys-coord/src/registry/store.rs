//! Twin-map registry of running instances.

// Layer 1: Standard library imports
use std::collections::HashMap;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};

// Layer 3: Internal module imports
use crate::spec::ServiceSpec;
use crate::supervisor::{InstanceHandle, WatchToken};

/// Bookkeeping for one running instance.
#[derive(Debug, Clone)]
pub struct RunningInstance {
    /// Handle to the worker, owned by the external supervisor
    pub handle: InstanceHandle,

    /// Watch token mapped back to the spec for termination events
    pub token: WatchToken,

    /// When the instance was recorded as started
    pub started_at: DateTime<Utc>,

    /// Start-order sequence number, used for deterministic universe order
    seq: u64,
}

/// In-memory mapping between specs and live instances.
///
/// The registry keeps two maps: `specs` from spec to running instance, and
/// `refs` from watch token back to spec. The coordinator task is the sole
/// mutator. At every quiescent point the maps are bijective via watch
/// tokens; during termination handling the token entry is popped first so
/// dependents can still be computed over the running set.
#[derive(Debug, Default)]
pub struct Registry {
    specs: HashMap<ServiceSpec, RunningInstance>,
    refs: HashMap<WatchToken, ServiceSpec>,
    next_seq: u64,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a started instance under its spec and watch token.
    pub fn insert(&mut self, spec: ServiceSpec, handle: InstanceHandle, token: WatchToken) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.refs.insert(token, spec.clone());
        self.specs.insert(
            spec,
            RunningInstance {
                handle,
                token,
                started_at: Utc::now(),
                seq,
            },
        );
    }

    /// Removes the instance recorded under `spec`, returning its handle.
    ///
    /// The matching token entry is left to [`remove_by_token`]; the
    /// termination pipeline pops the two maps in its own order.
    ///
    /// [`remove_by_token`]: Registry::remove_by_token
    pub fn remove_by_spec(&mut self, spec: &ServiceSpec) -> Option<InstanceHandle> {
        self.specs.remove(spec).map(|instance| instance.handle)
    }

    /// Pops the spec recorded under a watch token.
    ///
    /// The spec's entry in the running set is intentionally untouched so the
    /// caller can still resolve dependents over it.
    pub fn remove_by_token(&mut self, token: &WatchToken) -> Option<ServiceSpec> {
        self.refs.remove(token)
    }

    /// Handle of the instance running under `spec`, if any.
    pub fn handle_of(&self, spec: &ServiceSpec) -> Option<InstanceHandle> {
        self.specs.get(spec).map(|instance| instance.handle)
    }

    /// Returns `true` if an instance is recorded under `spec`.
    pub fn contains(&self, spec: &ServiceSpec) -> bool {
        self.specs.contains_key(spec)
    }

    /// Currently tracked specs, in start order.
    pub fn specs(&self) -> Vec<ServiceSpec> {
        let mut entries: Vec<_> = self.specs.iter().collect();
        entries.sort_by_key(|(_, instance)| instance.seq);
        entries.into_iter().map(|(spec, _)| spec.clone()).collect()
    }

    /// Number of tracked instances.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns `true` if nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Number of live watch-token entries.
    pub fn token_count(&self) -> usize {
        self.refs.len()
    }

    /// Spec recorded under a watch token, without removing it.
    pub fn spec_of_token(&self, token: &WatchToken) -> Option<&ServiceSpec> {
        self.refs.get(token)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::spec::Service;

    struct Alpha;

    impl Service for Alpha {
        fn name(&self) -> &'static str {
            "alpha"
        }
    }

    struct Beta;

    impl Service for Beta {
        fn name(&self) -> &'static str {
            "beta"
        }
    }

    fn handle_and_token() -> (InstanceHandle, WatchToken) {
        (InstanceHandle::new(), WatchToken::new())
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut registry = Registry::new();
        let spec = ServiceSpec::new(Alpha);
        let (handle, token) = handle_and_token();

        registry.insert(spec.clone(), handle, token);

        assert!(registry.contains(&spec));
        assert_eq!(registry.handle_of(&spec), Some(handle));
        assert_eq!(registry.spec_of_token(&token), Some(&spec));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.token_count(), 1);
    }

    #[test]
    fn test_maps_stay_bijective() {
        let mut registry = Registry::new();
        for spec in [ServiceSpec::new(Alpha), ServiceSpec::new(Beta)] {
            let (handle, token) = handle_and_token();
            registry.insert(spec, handle, token);
        }

        assert_eq!(registry.len(), registry.token_count());
        for spec in registry.specs() {
            let token = registry
                .specs
                .get(&spec)
                .map(|instance| instance.token)
                .unwrap();
            assert_eq!(registry.spec_of_token(&token), Some(&spec));
        }
    }

    #[test]
    fn test_remove_by_token_leaves_running_set() {
        let mut registry = Registry::new();
        let spec = ServiceSpec::new(Alpha);
        let (handle, token) = handle_and_token();
        registry.insert(spec.clone(), handle, token);

        let popped = registry.remove_by_token(&token);
        assert_eq!(popped, Some(spec.clone()));
        assert!(registry.contains(&spec));

        let removed = registry.remove_by_spec(&spec);
        assert_eq!(removed, Some(handle));
        assert!(registry.is_empty());
        assert_eq!(registry.token_count(), 0);
    }

    #[test]
    fn test_remove_unknown_token() {
        let mut registry = Registry::new();
        assert_eq!(registry.remove_by_token(&WatchToken::new()), None);
    }

    #[test]
    fn test_specs_in_start_order() {
        let mut registry = Registry::new();
        let first = ServiceSpec::new(Beta);
        let second = ServiceSpec::new(Alpha);

        let (handle, token) = handle_and_token();
        registry.insert(first.clone(), handle, token);
        let (handle, token) = handle_and_token();
        registry.insert(second.clone(), handle, token);

        assert_eq!(registry.specs(), vec![first, second]);
    }
}
