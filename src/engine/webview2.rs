//! WebView2 binding (Windows).
//!
//! WebView2 raises `PermissionRequested` on its UI thread and reads the
//! decision back from the event args when the handler returns. The bridge
//! used here therefore delivers inline, and the grant is written into the
//! args before the handler exits.

use std::sync::{Arc, Mutex};

use webview2_com::Microsoft::Web::WebView2::Win32::{
    ICoreWebView2Controller, ICoreWebView2Settings, COREWEBVIEW2_PERMISSION_KIND,
    COREWEBVIEW2_PERMISSION_KIND_CAMERA, COREWEBVIEW2_PERMISSION_KIND_MICROPHONE,
    COREWEBVIEW2_PERMISSION_STATE_ALLOW,
};
use webview2_com::{take_pwstr, PermissionRequestedEventHandler};
use windows::core::PWSTR;

use super::EngineFeatures;
use crate::error::{ShellError, ShellResult};
use crate::events;
use crate::permissions::{Capability, CapabilityRequest, CapabilitySet, Grant, PermissionBridge};

/// Chromium only reads its autoplay policy at environment creation. The
/// `--disable-features` list repeats wry's defaults, which a custom argument
/// string replaces.
pub const BROWSER_ARGS: &str = "--disable-features=msWebOOUI,msPdfOOUI,msSmartScreenProtection \
     --autoplay-policy=no-user-gesture-required";

fn engine_error(e: windows::core::Error) -> ShellError {
    ShellError::Engine(format!("webview2: {e}"))
}

pub struct WebView2Engine {
    settings: ICoreWebView2Settings,
}

impl WebView2Engine {
    pub fn new(controller: &ICoreWebView2Controller) -> ShellResult<Self> {
        let settings = unsafe { controller.CoreWebView2().and_then(|webview| webview.Settings()) }
            .map_err(engine_error)?;
        Ok(Self { settings })
    }
}

impl EngineFeatures for WebView2Engine {
    fn set_script_execution_enabled(&mut self, enabled: bool) -> ShellResult<()> {
        unsafe { self.settings.SetIsScriptEnabled(enabled) }.map_err(engine_error)
    }

    fn set_autoplay_requires_gesture(&mut self, required: bool) -> ShellResult<()> {
        if required {
            return Err(ShellError::Engine(
                "webview2: autoplay policy is fixed by the browser arguments".into(),
            ));
        }
        log::debug!("[engine] webview2: gesture-free autoplay set through browser arguments");
        Ok(())
    }

    fn set_dom_storage_enabled(&mut self, enabled: bool) -> ShellResult<()> {
        log::debug!("[engine] webview2: DOM storage {} (always on)", enabled);
        Ok(())
    }

    fn set_local_file_access_enabled(&mut self, enabled: bool) -> ShellResult<()> {
        log::debug!("[engine] webview2: local file access {} (engine default, no setting)", enabled);
        Ok(())
    }

    fn set_local_content_access_enabled(&mut self, enabled: bool) -> ShellResult<()> {
        log::debug!("[engine] webview2: local content access {} (no such scheme)", enabled);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Permission requests
// ---------------------------------------------------------------------------

/// WebView2 asks for one permission kind per event.
fn capabilities_of(kind: COREWEBVIEW2_PERMISSION_KIND) -> CapabilitySet {
    if kind == COREWEBVIEW2_PERMISSION_KIND_CAMERA {
        CapabilitySet::from([Capability::Camera])
    } else if kind == COREWEBVIEW2_PERMISSION_KIND_MICROPHONE {
        CapabilitySet::from([Capability::Microphone])
    } else {
        CapabilitySet::from([Capability::Other(format!("webview2-permission-{}", kind.0))])
    }
}

struct WebView2Request {
    origin: Option<String>,
    resources: CapabilitySet,
    decision: Arc<Mutex<Option<Grant>>>,
}

impl CapabilityRequest for WebView2Request {
    fn origin(&self) -> Option<String> {
        self.origin.clone()
    }

    fn resources(&self) -> &CapabilitySet {
        &self.resources
    }

    fn grant(self, grant: Grant) {
        if let Ok(mut slot) = self.decision.lock() {
            *slot = Some(grant);
        }
    }
}

/// Route every `PermissionRequested` event of the controller's webview
/// through `bridge`, which must deliver inline.
pub fn attach(
    controller: &ICoreWebView2Controller,
    bridge: Arc<PermissionBridge>,
    app: tauri::AppHandle,
) -> ShellResult<()> {
    let webview = unsafe { controller.CoreWebView2() }.map_err(engine_error)?;

    let handler = PermissionRequestedEventHandler::create(Box::new(move |_, args| {
        let Some(args) = args else {
            return Ok(());
        };
        let mut kind = COREWEBVIEW2_PERMISSION_KIND::default();
        let mut uri = PWSTR::null();
        unsafe {
            args.PermissionKind(&mut kind)?;
            args.Uri(&mut uri)?;
        }
        let uri = take_pwstr(uri);

        let decision = Arc::new(Mutex::new(None));
        bridge.on_capability_request(WebView2Request {
            origin: super::origin_of(&uri),
            resources: capabilities_of(kind),
            decision: decision.clone(),
        });

        let granted = decision.lock().ok().and_then(|mut slot| slot.take());
        if let Some(grant) = granted {
            unsafe { args.SetState(COREWEBVIEW2_PERMISSION_STATE_ALLOW)? };
            events::emit_granted(&app, &grant);
        }
        Ok(())
    }));

    let mut token = 0;
    unsafe { webview.add_PermissionRequested(&handler, &mut token) }.map_err(engine_error)?;
    Ok(())
}
