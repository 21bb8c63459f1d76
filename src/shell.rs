//! Startup wiring: window creation, engine policy, bridge registration.
//!
//! The window is created on `about:blank` so that the feature policy and
//! the permission handler are in place before the hosted client's first
//! script runs. Navigation to the client is queued behind them on the same
//! main-thread channel.

use std::sync::Arc;

use tauri::{Manager, WebviewUrl, WebviewWindowBuilder};
use url::Url;

use crate::config::ShellConfig;
use crate::engine;
use crate::error::{ShellError, ShellResult};
#[cfg(windows)]
use crate::permissions::InlineDispatch;
use crate::permissions::{PermissionBridge, TauriDispatch};

pub fn install(app: &tauri::App, config: &ShellConfig) -> ShellResult<()> {
    let handle = app.handle().clone();

    let blank: Url = "about:blank"
        .parse()
        .map_err(|e| ShellError::Other(format!("about:blank: {e}")))?;
    let builder = WebviewWindowBuilder::new(app, &config.window_label, WebviewUrl::External(blank))
        .devtools(config.devtools);
    #[cfg(desktop)]
    let builder = builder.title(&config.app_name).inner_size(1024.0, 768.0);
    #[cfg(windows)]
    let builder = builder.additional_browser_args(engine::webview2::BROWSER_ARGS);
    let window = builder.build()?;

    let bridge = Arc::new(PermissionBridge::auto_grant(Arc::new(TauriDispatch::new(
        handle.clone(),
    ))));
    app.manage(bridge.clone());
    log::warn!(
        "[shell] capability requests are granted without prompting (policy: {})",
        bridge.resolver_name()
    );

    bind_engine(&window, bridge, handle.clone())?;

    let target = match config.start_url()? {
        Some(url) => url,
        None => bundled_client_url(&handle)?,
    };
    log::info!(
        "[shell] loading hosted client from {}",
        engine::origin_of(target.as_str()).unwrap_or_else(|| target.to_string())
    );
    window.navigate(target)?;

    Ok(())
}

/// URL the bundled frontend is served from on this platform.
fn bundled_client_url(
    #[cfg_attr(not(dev), allow(unused_variables))] app: &tauri::AppHandle,
) -> ShellResult<Url> {
    #[cfg(dev)]
    {
        if let Some(dev_url) = app.config().build.dev_url.clone() {
            return Ok(dev_url);
        }
    }

    let base = if cfg!(any(windows, target_os = "android")) {
        "http://tauri.localhost/"
    } else {
        "tauri://localhost/"
    };
    Url::parse(base).map_err(|e| ShellError::Config(format!("bundled client url: {e}")))
}

/// The engine refused part of the fixed policy, or its permission hook.
/// Nothing sensible can run after that, so the host exits.
#[cfg_attr(not(any(target_os = "linux", target_os = "android", windows)), allow(dead_code))]
fn abort_startup(app: &tauri::AppHandle, err: ShellError) {
    log::error!("[shell] engine binding failed: {}", err);
    app.exit(1);
}

#[cfg(target_os = "linux")]
fn bind_engine(
    window: &tauri::WebviewWindow,
    bridge: Arc<PermissionBridge>,
    app: tauri::AppHandle,
) -> ShellResult<()> {
    window.with_webview(move |platform| {
        let webview = platform.inner();
        let configured = engine::webkit::WebKitEngine::new(&webview)
            .and_then(|mut features| engine::configure(&mut features));
        match configured {
            Ok(()) => engine::webkit::attach(&webview, bridge, app),
            Err(e) => abort_startup(&app, e),
        }
    })?;
    Ok(())
}

#[cfg(windows)]
fn bind_engine(
    window: &tauri::WebviewWindow,
    bridge: Arc<PermissionBridge>,
    app: tauri::AppHandle,
) -> ShellResult<()> {
    let bridge = Arc::new(bridge.with_dispatch(Arc::new(InlineDispatch)));
    window.with_webview(move |platform| {
        let controller = platform.controller();
        let bound = engine::webview2::WebView2Engine::new(&controller)
            .and_then(|mut features| engine::configure(&mut features))
            .and_then(|()| engine::webview2::attach(&controller, bridge, app.clone()));
        if let Err(e) = bound {
            abort_startup(&app, e);
        }
    })?;
    Ok(())
}

#[cfg(target_os = "android")]
fn bind_engine(
    window: &tauri::WebviewWindow,
    _bridge: Arc<PermissionBridge>,
    app: tauri::AppHandle,
) -> ShellResult<()> {
    // The WebChromeClient slot belongs to the Tauri Android runtime, whose
    // onPermissionRequest grants media once the manifest's CAMERA /
    // RECORD_AUDIO permissions are held. Replacing it needs Kotlin code.
    log::info!("[shell] android: capability requests are resolved by the runtime chrome client");
    window.with_webview(move |platform| {
        platform.jni_handle().exec(move |env, _activity, webview| {
            let configured = engine::android::AndroidWebSettings::from_webview(env, webview)
                .and_then(|mut settings| {
                    engine::configure(&mut settings)?;
                    settings.allow_mixed_content()
                });
            if let Err(e) = configured {
                abort_startup(&app, e);
            }
        });
    })?;
    Ok(())
}

#[cfg(not(any(target_os = "linux", target_os = "android", windows)))]
fn bind_engine(
    _window: &tauri::WebviewWindow,
    _bridge: Arc<PermissionBridge>,
    _app: tauri::AppHandle,
) -> ShellResult<()> {
    // WKWebView has a single UI delegate and the runtime's already grants
    // media capture; swapping it would drop the runtime's other handlers.
    log::warn!(
        "[shell] no native engine binding on this platform; engine defaults apply and media capture is answered by the runtime"
    );
    Ok(())
}
