pub mod bridge;
pub mod dispatch;
pub mod resolver;
pub mod types;

pub use bridge::{CapabilityRequest, PermissionBridge};
pub use dispatch::{DispatchContext, InlineDispatch, TauriDispatch};
pub use resolver::{AutoGrantPolicy, PermissionResolver};
pub use types::{Capability, CapabilitySet, Grant};
