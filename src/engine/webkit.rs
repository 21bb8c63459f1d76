//! WebKitGTK binding (Linux).
//!
//! Everything here runs on the GTK main thread. Native request objects are
//! wrapped in a `ThreadGuard` so they can ride through the bridge's
//! `Send` task without ever being touched from another thread.

use std::sync::Arc;

use gtk::glib::thread_guard::ThreadGuard;
use gtk::glib::{Cast, ObjectExt};
use webkit2gtk::{
    PermissionRequest, PermissionRequestExt, Settings, SettingsExt, UserMediaPermissionRequest,
    WebView, WebViewExt,
};

use super::EngineFeatures;
use crate::error::{ShellError, ShellResult};
use crate::events;
use crate::permissions::{CapabilityRequest, CapabilitySet, Grant, PermissionBridge};

pub struct WebKitEngine {
    settings: Settings,
}

impl WebKitEngine {
    pub fn new(webview: &WebView) -> ShellResult<Self> {
        let settings = WebViewExt::settings(webview)
            .ok_or_else(|| ShellError::Engine("webview has no settings object".into()))?;
        Ok(Self::from_settings(settings))
    }

    fn from_settings(settings: Settings) -> Self {
        // getUserMedia is compiled in but switched off by default in WebKitGTK
        settings.set_enable_media_stream(true);
        Self { settings }
    }
}

impl EngineFeatures for WebKitEngine {
    fn set_script_execution_enabled(&mut self, enabled: bool) -> ShellResult<()> {
        self.settings.set_enable_javascript(enabled);
        Ok(())
    }

    fn set_autoplay_requires_gesture(&mut self, required: bool) -> ShellResult<()> {
        self.settings.set_media_playback_requires_user_gesture(required);
        Ok(())
    }

    fn set_dom_storage_enabled(&mut self, enabled: bool) -> ShellResult<()> {
        self.settings.set_enable_html5_local_storage(enabled);
        Ok(())
    }

    // WebKitGTK always loads file:// documents and has no switch for it. The
    // nearby allow-*-from-file-urls settings grant file:// pages cross-origin
    // reads, which is broader than this flag, so they are left at their
    // defaults.
    fn set_local_file_access_enabled(&mut self, enabled: bool) -> ShellResult<()> {
        log::debug!("[engine] webkit: local file access {} (engine default, no setting)", enabled);
        Ok(())
    }

    // No content:// provider scheme exists outside Android.
    fn set_local_content_access_enabled(&mut self, enabled: bool) -> ShellResult<()> {
        log::debug!("[engine] webkit: local content access {} (no such scheme)", enabled);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Permission requests
// ---------------------------------------------------------------------------

struct WebKitRequest {
    native: ThreadGuard<PermissionRequest>,
    origin: Option<String>,
    resources: CapabilitySet,
    app: tauri::AppHandle,
}

impl CapabilityRequest for WebKitRequest {
    fn origin(&self) -> Option<String> {
        self.origin.clone()
    }

    fn resources(&self) -> &CapabilitySet {
        &self.resources
    }

    fn grant(self, grant: Grant) {
        // WebKit resolves the request as a whole
        self.native.get_ref().allow();
        events::emit_granted(&self.app, &grant);
    }
}

fn resources_of(request: &PermissionRequest) -> CapabilitySet {
    let devices = request.downcast_ref::<UserMediaPermissionRequest>().map(|media| {
        (
            media.property::<bool>("is-for-video-device"),
            media.property::<bool>("is-for-audio-device"),
        )
    });
    super::requested_capabilities(request.type_().name(), devices)
}

/// Route every `permission-request` signal of `webview` through `bridge`.
pub fn attach(webview: &WebView, bridge: Arc<PermissionBridge>, app: tauri::AppHandle) {
    webview.connect_permission_request(move |view, request| {
        let origin = view.uri().and_then(|uri| super::origin_of(uri.as_str()));
        bridge.on_capability_request(WebKitRequest {
            native: ThreadGuard::new(request.clone()),
            origin,
            resources: resources_of(request),
            app: app.clone(),
        });
        // Handled: WebKit waits for allow() instead of applying its default
        true
    });
}
