//! Android WebView binding.
//!
//! Feature flags go straight to `android.webkit.WebSettings` over JNI. Must
//! be called from the closure handed to `JniHandle::exec`, which runs on the
//! activity's UI thread.

use jni::objects::{JObject, JValue};
use jni::JNIEnv;

use super::EngineFeatures;
use crate::error::{ShellError, ShellResult};

pub struct AndroidWebSettings<'a, 'local> {
    env: &'a mut JNIEnv<'local>,
    settings: JObject<'local>,
}

impl<'a, 'local> AndroidWebSettings<'a, 'local> {
    pub fn from_webview(env: &'a mut JNIEnv<'local>, webview: &JObject<'_>) -> ShellResult<Self> {
        let settings = env
            .call_method(webview, "getSettings", "()Landroid/webkit/WebSettings;", &[])
            .and_then(|v| v.l())
            .map_err(|e| ShellError::Engine(format!("WebView.getSettings: {e}")))?;
        Ok(Self { env, settings })
    }

    /// `WebSettings.setMixedContentMode(MIXED_CONTENT_ALWAYS_ALLOW)`: lets the
    /// client, served over https, reach plain-http signalling servers on the
    /// LAN. Android-only, so it sits outside the portable feature set.
    pub fn allow_mixed_content(&mut self) -> ShellResult<()> {
        const MIXED_CONTENT_ALWAYS_ALLOW: i32 = 0;
        self.env
            .call_method(
                &self.settings,
                "setMixedContentMode",
                "(I)V",
                &[JValue::Int(MIXED_CONTENT_ALWAYS_ALLOW)],
            )
            .map(|_| ())
            .map_err(|e| ShellError::Engine(format!("WebSettings.setMixedContentMode: {e}")))
    }

    fn set_flag(&mut self, method: &str, value: bool) -> ShellResult<()> {
        self.env
            .call_method(&self.settings, method, "(Z)V", &[JValue::Bool(u8::from(value))])
            .map(|_| ())
            .map_err(|e| ShellError::Engine(format!("WebSettings.{method}: {e}")))
    }
}

impl EngineFeatures for AndroidWebSettings<'_, '_> {
    fn set_script_execution_enabled(&mut self, enabled: bool) -> ShellResult<()> {
        self.set_flag("setJavaScriptEnabled", enabled)
    }

    fn set_autoplay_requires_gesture(&mut self, required: bool) -> ShellResult<()> {
        self.set_flag("setMediaPlaybackRequiresUserGesture", required)
    }

    fn set_dom_storage_enabled(&mut self, enabled: bool) -> ShellResult<()> {
        self.set_flag("setDomStorageEnabled", enabled)
    }

    fn set_local_file_access_enabled(&mut self, enabled: bool) -> ShellResult<()> {
        self.set_flag("setAllowFileAccess", enabled)
    }

    fn set_local_content_access_enabled(&mut self, enabled: bool) -> ShellResult<()> {
        self.set_flag("setAllowContentAccess", enabled)
    }
}
