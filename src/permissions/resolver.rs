//! Grant policy for capability requests raised by hosted content.
//!
//! The shell ships a single policy, [`AutoGrantPolicy`], which hands back
//! exactly what was asked for. This is a trust-boundary decision: any page
//! loaded inside the shell, whatever its origin, gets camera and microphone
//! access without a prompt. The hosted client is bundled with the app, which
//! is what makes this acceptable here. Pointing `start_url` at third-party
//! content extends the same silent access to that content.
//!
//! Swapping in an origin allow-list or an interactive consent flow means
//! writing another [`PermissionResolver`]; the bridge and the engine
//! bindings stay as they are.

use super::types::CapabilitySet;

/// Decides which of the requested resources are granted.
pub trait PermissionResolver: Send + Sync {
    fn resolve(&self, requested: &CapabilitySet) -> CapabilitySet;

    /// Short name for logs and diagnostics.
    fn name(&self) -> &'static str;
}

/// Grants every request in full. Identity over the requested resources.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoGrantPolicy;

impl PermissionResolver for AutoGrantPolicy {
    fn resolve(&self, requested: &CapabilitySet) -> CapabilitySet {
        requested.clone()
    }

    fn name(&self) -> &'static str {
        "auto_grant"
    }
}
