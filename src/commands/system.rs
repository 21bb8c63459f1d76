use std::sync::Arc;

use crate::config::ShellConfig;
use crate::engine::RuntimeFeatureSet;
use crate::permissions::PermissionBridge;
use serde::Serialize;

#[derive(Serialize)]
pub struct AppVersionInfo {
    pub version: String,
    pub name: String,
    pub commit: Option<String>,
}

#[tauri::command]
pub fn app_version(config: tauri::State<'_, ShellConfig>) -> AppVersionInfo {
    AppVersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        name: config.app_name.clone(),
        commit: option_env!("SHELL_COMMIT").map(|s| s.to_string()),
    }
}

/// What the shell enforces on the engine, for the client's media diagnostics.
#[derive(Debug, Serialize)]
pub struct ShellPolicy {
    pub features: RuntimeFeatureSet,
    pub resolver: &'static str,
}

impl ShellPolicy {
    pub fn current(bridge: &PermissionBridge) -> Self {
        Self {
            features: RuntimeFeatureSet::POLICY,
            resolver: bridge.resolver_name(),
        }
    }
}

#[tauri::command]
pub fn shell_policy(bridge: tauri::State<'_, Arc<PermissionBridge>>) -> ShellPolicy {
    ShellPolicy::current(&bridge)
}
