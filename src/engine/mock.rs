//! In-memory engine for testing the configurator without a real webview.

use super::{EngineFeatures, RuntimeFeatureSet};
use crate::error::{ShellError, ShellResult};

#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    ScriptExecution(bool),
    AutoplayRequiresGesture(bool),
    DomStorage(bool),
    LocalFileAccess(bool),
    LocalContentAccess(bool),
}

pub struct MockEngine {
    features: RuntimeFeatureSet,
    calls: Vec<EngineCall>,
    reject: Option<&'static str>,
}

impl MockEngine {
    /// Stock Android WebView settings before the shell touches them.
    pub fn with_platform_defaults() -> Self {
        Self {
            features: RuntimeFeatureSet {
                script_execution_enabled: false,
                autoplay_requires_gesture: true,
                dom_storage_enabled: false,
                local_file_access_enabled: false,
                local_content_access_enabled: true,
            },
            calls: Vec::new(),
            reject: None,
        }
    }

    /// Make the named flag fail like an unsupported engine feature.
    pub fn rejecting(mut self, flag: &'static str) -> Self {
        self.reject = Some(flag);
        self
    }

    pub fn features(&self) -> RuntimeFeatureSet {
        self.features
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.clone()
    }

    fn record(&mut self, flag: &'static str, call: EngineCall) -> ShellResult<()> {
        if self.reject == Some(flag) {
            return Err(ShellError::Engine(format!("unsupported feature: {flag}")));
        }
        self.calls.push(call);
        Ok(())
    }
}

impl EngineFeatures for MockEngine {
    fn set_script_execution_enabled(&mut self, enabled: bool) -> ShellResult<()> {
        self.record("script_execution", EngineCall::ScriptExecution(enabled))?;
        self.features.script_execution_enabled = enabled;
        Ok(())
    }

    fn set_autoplay_requires_gesture(&mut self, required: bool) -> ShellResult<()> {
        self.record("autoplay", EngineCall::AutoplayRequiresGesture(required))?;
        self.features.autoplay_requires_gesture = required;
        Ok(())
    }

    fn set_dom_storage_enabled(&mut self, enabled: bool) -> ShellResult<()> {
        self.record("dom_storage", EngineCall::DomStorage(enabled))?;
        self.features.dom_storage_enabled = enabled;
        Ok(())
    }

    fn set_local_file_access_enabled(&mut self, enabled: bool) -> ShellResult<()> {
        self.record("local_file_access", EngineCall::LocalFileAccess(enabled))?;
        self.features.local_file_access_enabled = enabled;
        Ok(())
    }

    fn set_local_content_access_enabled(&mut self, enabled: bool) -> ShellResult<()> {
        self.record("local_content_access", EngineCall::LocalContentAccess(enabled))?;
        self.features.local_content_access_enabled = enabled;
        Ok(())
    }
}
