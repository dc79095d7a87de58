//! Edge kinds defined outside this crate.
//!
//! A custom edge kind is a [`PayloadMethods`] implementation registered once
//! per process under a caller-chosen name. Each edge of that kind is a
//! [`CustomPayload`]: an opaque, caller-owned value (the "soul") bound to the
//! shared method table. The dispatcher forwards every traversal of a custom
//! payload to its table, so new kinds never require changes here.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::mem;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing::debug;

use crate::config::WalkOptions;
use crate::state::State;

use super::{EdgeEffect, EdgeError, EdgePayload, WalkResult};

/// The opaque value a custom payload carries.
pub type Soul = dyn Any + Send + Sync;

/// Traversal rules shared by every edge of one custom kind.
///
/// `walk` and `walk_back` follow the same contract as built-in edges:
/// return a modified copy of `state`, `Ok(None)` when the edge cannot be
/// used, or an error when the soul is malformed.
pub trait PayloadMethods: Send + Sync {
    fn walk(&self, soul: &Soul, state: &State) -> WalkResult;

    fn walk_back(&self, soul: &Soul, state: &State) -> WalkResult;

    /// Resolve the edge for itinerary reconstruction. `Ok(None)` keeps the
    /// payload as it is.
    fn collapse(&self, _soul: &Soul, _state: &State) -> Result<Option<EdgePayload>, EdgeError> {
        Ok(None)
    }

    fn collapse_back(
        &self,
        _soul: &Soul,
        _state: &State,
    ) -> Result<Option<EdgePayload>, EdgeError> {
        Ok(None)
    }

    /// Release the soul when its payload is dropped. Called exactly once.
    fn destroy(&self, soul: Box<Soul>) {
        drop(soul);
    }
}

/// An edge whose behaviour lives in a registered [`PayloadMethods`] table.
pub struct CustomPayload {
    soul: Box<Soul>,
    methods: Arc<dyn PayloadMethods>,
}

impl CustomPayload {
    pub fn new(soul: Box<Soul>, methods: Arc<dyn PayloadMethods>) -> Self {
        Self { soul, methods }
    }

    pub fn soul(&self) -> &Soul {
        &*self.soul
    }

    /// Returns the soul if it is a `T`.
    pub fn soul_as<T: Any>(&self) -> Option<&T> {
        self.soul().downcast_ref::<T>()
    }

    pub fn methods(&self) -> &Arc<dyn PayloadMethods> {
        &self.methods
    }

    pub(crate) fn collapse(&self, state: &State) -> Result<Option<EdgePayload>, EdgeError> {
        self.methods.collapse(self.soul(), state)
    }

    pub(crate) fn collapse_back(&self, state: &State) -> Result<Option<EdgePayload>, EdgeError> {
        self.methods.collapse_back(self.soul(), state)
    }
}

impl fmt::Debug for CustomPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomPayload").finish_non_exhaustive()
    }
}

impl EdgeEffect for CustomPayload {
    fn walk(&self, state: &State, _options: &WalkOptions) -> WalkResult {
        self.methods.walk(self.soul(), state)
    }

    fn walk_back(&self, state: &State, _options: &WalkOptions) -> WalkResult {
        self.methods.walk_back(self.soul(), state)
    }
}

impl Drop for CustomPayload {
    fn drop(&mut self) {
        let soul = mem::replace(&mut self.soul, Box::new(()));
        self.methods.destroy(soul);
    }
}

/// Method tables of the custom edge kinds known to the process.
#[derive(Default)]
pub struct PayloadTypeRegistry {
    types: RwLock<HashMap<String, Arc<dyn PayloadMethods>>>,
}

impl PayloadTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by [`define_custom_payload_type`].
    pub fn global() -> &'static PayloadTypeRegistry {
        static GLOBAL: OnceLock<PayloadTypeRegistry> = OnceLock::new();
        GLOBAL.get_or_init(PayloadTypeRegistry::new)
    }

    /// Register `methods` under `kind` and return the shared table.
    pub fn define(
        &self,
        kind: impl Into<String>,
        methods: Arc<dyn PayloadMethods>,
    ) -> Result<Arc<dyn PayloadMethods>, EdgeError> {
        let kind = kind.into();
        let mut types = self.types.write().unwrap_or_else(PoisonError::into_inner);
        if types.contains_key(&kind) {
            return Err(EdgeError::DuplicatePayloadType(kind));
        }
        debug!(kind = %kind, "defined custom payload type");
        types.insert(kind, methods.clone());
        Ok(methods)
    }

    /// Remove `kind`, returning its table if it was registered.
    ///
    /// Payloads already built keep their own reference to the table.
    pub fn undefine(&self, kind: &str) -> Option<Arc<dyn PayloadMethods>> {
        let removed = self
            .types
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(kind);
        if removed.is_some() {
            debug!(kind, "undefined custom payload type");
        }
        removed
    }

    pub fn get(&self, kind: &str) -> Option<Arc<dyn PayloadMethods>> {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(kind)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for PayloadTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types = self.types.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("PayloadTypeRegistry")
            .field("kinds", &types.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Register a custom edge kind in the process-wide registry.
pub fn define_custom_payload_type(
    kind: impl Into<String>,
    methods: Arc<dyn PayloadMethods>,
) -> Result<Arc<dyn PayloadMethods>, EdgeError> {
    PayloadTypeRegistry::global().define(kind, methods)
}

/// Remove a custom edge kind from the process-wide registry.
pub fn undefine_custom_payload_type(kind: &str) -> Option<Arc<dyn PayloadMethods>> {
    PayloadTypeRegistry::global().undefine(kind)
}
