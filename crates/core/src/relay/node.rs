//! Polymorphic node lookup by global ID.
//!
//! A [`NodeRegistry`] maps type tags to async lookup functions. It is
//! filled once at startup and then only read, so it can be shared behind
//! an `Arc` by every request.

use std::collections::HashMap;
use std::fmt;

use futures::future::{join_all, BoxFuture, FutureExt};
use tracing::{debug, warn};

use crate::error::{DomainError, DomainResult, StorageResult};
use crate::metrics::record_node_lookup;
use crate::models::Entity;
use crate::ports::{EntityRepository, Repositories};

use super::GlobalId;

type Lookup<C, N> =
    Box<dyn for<'a> Fn(&'a C, i64) -> BoxFuture<'a, StorageResult<Option<N>>> + Send + Sync>;

/// Dispatch table from type tag to lookup function.
///
/// `C` is the per-request context handed to every lookup (the repository
/// set in production) and `N` is the polymorphic node type returned.
pub struct NodeRegistry<C: ?Sized, N> {
    lookups: HashMap<&'static str, Lookup<C, N>>,
}

impl<C: ?Sized, N> NodeRegistry<C, N> {
    pub fn new() -> Self {
        Self {
            lookups: HashMap::new(),
        }
    }

    /// Register the lookup for a type tag, replacing any previous one.
    pub fn register<F>(&mut self, type_tag: &'static str, lookup: F)
    where
        F: for<'a> Fn(&'a C, i64) -> BoxFuture<'a, StorageResult<Option<N>>>
            + Send
            + Sync
            + 'static,
    {
        self.lookups.insert(type_tag, Box::new(lookup));
    }

    /// Check if a type tag has a registered lookup.
    pub fn is_registered(&self, type_tag: &str) -> bool {
        self.lookups.contains_key(type_tag)
    }

    /// List all registered type tags.
    pub fn tags(&self) -> Vec<&'static str> {
        let mut tags: Vec<_> = self.lookups.keys().copied().collect();
        tags.sort_unstable();
        tags
    }
}

impl<C: ?Sized + Sync, N: Send> NodeRegistry<C, N> {
    /// Resolve a global ID, reporting why it failed.
    pub async fn resolve(&self, ctx: &C, id: &str) -> DomainResult<N> {
        let global_id = GlobalId::decode(id)?;
        self.dispatch(ctx, &global_id).await
    }

    /// Resolve a global ID, or `None` if it is malformed, names an
    /// unregistered type, or points at nothing.
    ///
    /// Storage failures also collapse to `None`; they are logged at `warn`.
    pub async fn node(&self, ctx: &C, id: &str) -> Option<N> {
        let global_id = match GlobalId::decode(id) {
            Ok(global_id) => global_id,
            Err(e) => {
                debug!(error = %e, "Rejected malformed node id");
                record_node_lookup("invalid", "invalid_id");
                return None;
            }
        };

        // Unregistered tags come straight from client input; keep them
        // out of metric labels.
        let tag_label = self
            .lookups
            .get_key_value(global_id.type_tag.as_str())
            .map(|(tag, _)| *tag)
            .unwrap_or("unknown");

        match self.dispatch(ctx, &global_id).await {
            Ok(node) => {
                record_node_lookup(tag_label, "found");
                Some(node)
            }
            Err(DomainError::Storage(e)) => {
                warn!(
                    type_tag = %global_id.type_tag,
                    id = global_id.local_id,
                    error = %e,
                    "Node lookup failed"
                );
                record_node_lookup(tag_label, "error");
                None
            }
            Err(e) => {
                debug!(error = %e, "Node not resolved");
                let outcome = match e {
                    DomainError::UnknownNodeType(_) => "unknown_type",
                    _ => "not_found",
                };
                record_node_lookup(tag_label, outcome);
                None
            }
        }
    }

    /// Resolve every ID independently, keeping input order and dropping
    /// the ones that do not resolve.
    pub async fn nodes<S>(&self, ctx: &C, ids: &[S]) -> Vec<N>
    where
        S: AsRef<str> + Sync,
    {
        join_all(ids.iter().map(|id| self.node(ctx, id.as_ref())))
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    async fn dispatch(&self, ctx: &C, global_id: &GlobalId) -> DomainResult<N> {
        let lookup = self
            .lookups
            .get(global_id.type_tag.as_str())
            .ok_or_else(|| DomainError::UnknownNodeType(global_id.type_tag.clone()))?;

        lookup(ctx, global_id.local_id)
            .await?
            .ok_or_else(|| DomainError::NodeNotFound {
                type_tag: global_id.type_tag.clone(),
                id: global_id.local_id,
            })
    }
}

impl<N: Send + 'static> NodeRegistry<dyn Repositories, N> {
    /// Register the lookup for entity kind `T`, reading from the repository
    /// `repository` selects and wrapping hits with `wrap`.
    pub fn register_entity<T: Entity>(
        &mut self,
        repository: fn(&dyn Repositories) -> &dyn EntityRepository<T>,
        wrap: fn(T) -> N,
    ) {
        self.register(T::KIND.as_str(), move |repos, id| {
            async move { Ok(repository(repos).get(id).await?.map(wrap)) }.boxed()
        });
    }
}

impl<C: ?Sized, N> Default for NodeRegistry<C, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized, N> fmt::Debug for NodeRegistry<C, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}
