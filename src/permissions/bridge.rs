use super::dispatch::DispatchContext;
use super::resolver::{AutoGrantPolicy, PermissionResolver};
use super::types::{CapabilitySet, Grant};
use std::sync::Arc;

/// A pending permission solicitation owned by the embedded engine.
///
/// Engine bindings wrap their native request object in this trait. The
/// request is consumed by [`CapabilityRequest::grant`], so it can be
/// resolved at most once, and there is deliberately no deny method for the
/// bridge to reach for.
pub trait CapabilityRequest: Send + 'static {
    /// Origin of the requesting page, when the engine exposes it.
    fn origin(&self) -> Option<String>;

    fn resources(&self) -> &CapabilitySet;

    /// Hand the resolution back to the engine. Always called on the
    /// engine's thread.
    fn grant(self, grant: Grant);
}

/// Sole handler of the engine's capability-request callback.
///
/// Holds no per-request state: each request is resolved by the injected
/// [`PermissionResolver`] and granted through the injected
/// [`DispatchContext`], then forgotten. Cheap to share behind an `Arc`
/// across any number of webviews and concurrent requests.
pub struct PermissionBridge {
    resolver: Arc<dyn PermissionResolver>,
    dispatch: Arc<dyn DispatchContext>,
}

impl PermissionBridge {
    pub fn new(resolver: Arc<dyn PermissionResolver>, dispatch: Arc<dyn DispatchContext>) -> Self {
        Self { resolver, dispatch }
    }

    pub fn auto_grant(dispatch: Arc<dyn DispatchContext>) -> Self {
        Self::new(Arc::new(AutoGrantPolicy), dispatch)
    }

    /// Same resolver, delivered through a different context. For engines
    /// whose permission events need a different thread contract than the
    /// host's default.
    pub fn with_dispatch(&self, dispatch: Arc<dyn DispatchContext>) -> Self {
        Self::new(self.resolver.clone(), dispatch)
    }

    pub fn resolver_name(&self) -> &'static str {
        self.resolver.name()
    }

    pub fn on_capability_request<R: CapabilityRequest>(&self, request: R) {
        let grant = Grant {
            request_id: uuid::Uuid::new_v4(),
            origin: request.origin(),
            resources: self.resolver.resolve(request.resources()),
            granted_at: chrono::Utc::now(),
        };

        log::info!(
            "[permissions] granting {} to {} (request {}, policy {})",
            grant.resources,
            grant.origin.as_deref().unwrap_or("<unknown origin>"),
            grant.request_id,
            self.resolver.name(),
        );

        let request_id = grant.request_id;
        // On failure the task, and the request with it, is dropped; the
        // engine treats a request it never hears back about as denied.
        if let Err(e) = self
            .dispatch
            .dispatch(Box::new(move || request.grant(grant)))
        {
            log::error!("[permissions] could not resolve request {}: {}", request_id, e);
        }
    }
}

// ---------------------------------------------------------------------------
// MockRequest: for testing
// ---------------------------------------------------------------------------
