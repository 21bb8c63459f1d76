#[cfg(target_os = "android")]
pub mod android;
#[cfg(target_os = "linux")]
pub mod webkit;
#[cfg(windows)]
pub mod webview2;

#[cfg(test)]
pub mod mock;

use crate::error::ShellResult;
use crate::permissions::{Capability, CapabilitySet};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Feature policy
// ---------------------------------------------------------------------------

/// Engine switches the hosted client depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuntimeFeatureSet {
    pub script_execution_enabled: bool,
    /// `false` lets remote media streams start playing without a tap.
    pub autoplay_requires_gesture: bool,
    pub dom_storage_enabled: bool,
    pub local_file_access_enabled: bool,
    pub local_content_access_enabled: bool,
}

impl RuntimeFeatureSet {
    /// The only supported configuration. Not tunable at runtime.
    pub const POLICY: RuntimeFeatureSet = RuntimeFeatureSet {
        script_execution_enabled: true,
        autoplay_requires_gesture: false,
        dom_storage_enabled: true,
        local_file_access_enabled: true,
        local_content_access_enabled: true,
    };

    /// Push every flag onto `engine`. Re-applying the same set is a no-op in effect.
    pub fn apply<E: EngineFeatures + ?Sized>(&self, engine: &mut E) -> ShellResult<()> {
        engine.set_script_execution_enabled(self.script_execution_enabled)?;
        engine.set_autoplay_requires_gesture(self.autoplay_requires_gesture)?;
        engine.set_dom_storage_enabled(self.dom_storage_enabled)?;
        engine.set_local_file_access_enabled(self.local_file_access_enabled)?;
        engine.set_local_content_access_enabled(self.local_content_access_enabled)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Engine seam
// ---------------------------------------------------------------------------

/// Feature-flag surface of an embedded browser engine instance.
///
/// An `Err` means the engine refused the flag. Callers treat that as fatal.
pub trait EngineFeatures {
    fn set_script_execution_enabled(&mut self, enabled: bool) -> ShellResult<()>;
    fn set_autoplay_requires_gesture(&mut self, required: bool) -> ShellResult<()>;
    fn set_dom_storage_enabled(&mut self, enabled: bool) -> ShellResult<()>;
    fn set_local_file_access_enabled(&mut self, enabled: bool) -> ShellResult<()>;
    fn set_local_content_access_enabled(&mut self, enabled: bool) -> ShellResult<()>;
}

/// Apply [`RuntimeFeatureSet::POLICY`] to a live engine that has not
/// navigated yet.
pub fn configure<E: EngineFeatures + ?Sized>(engine: &mut E) -> ShellResult<()> {
    RuntimeFeatureSet::POLICY.apply(engine)?;
    log::info!(
        "[engine] runtime features applied: {:?}",
        RuntimeFeatureSet::POLICY
    );
    Ok(())
}

/// `scheme://host[:port]` of a page URL. `None` for host-less URLs such as
/// `about:blank` or `data:`. Custom schemes (`tauri://localhost`) are kept,
/// unlike `Url::origin`, which treats them as opaque.
pub(crate) fn origin_of(uri: &str) -> Option<String> {
    let url = url::Url::parse(uri).ok()?;
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}

// ---------------------------------------------------------------------------
// Native request mapping
// ---------------------------------------------------------------------------

/// Reported for a user-media request that names neither device.
pub const DISPLAY_CAPTURE: &str = "display-capture";

/// Resources a native permission request asks for.
///
/// `devices` is `Some((video, audio))` for a user-media request and `None`
/// for anything else, which is passed through under its native type name.
/// WebKit raises `getDisplayMedia` as a user-media request with both device
/// flags off; that becomes [`DISPLAY_CAPTURE`] rather than an empty set, so
/// the log line and the grant event say what was actually allowed.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
pub(crate) fn requested_capabilities(type_name: &str, devices: Option<(bool, bool)>) -> CapabilitySet {
    let Some((video, audio)) = devices else {
        return CapabilitySet::from([Capability::Other(type_name.to_string())]);
    };

    let mut set = CapabilitySet::new();
    if video {
        set.insert(Capability::Camera);
    }
    if audio {
        set.insert(Capability::Microphone);
    }
    if set.is_empty() {
        set.insert(Capability::Other(DISPLAY_CAPTURE.to_string()));
    }
    set
}

#[cfg(test)]
mod tests {
    use super::mock::{EngineCall, MockEngine};
    use super::*;
    use crate::error::ShellError;

    #[test]
    fn origin_strips_path_and_query() {
        assert_eq!(
            origin_of("https://chat.example.org:8443/room/42?join=1").as_deref(),
            Some("https://chat.example.org:8443")
        );
        assert_eq!(
            origin_of("tauri://localhost/index.html").as_deref(),
            Some("tauri://localhost")
        );
    }

    #[test]
    fn opaque_origins_are_none() {
        assert_eq!(origin_of("about:blank"), None);
        assert_eq!(origin_of("data:text/html,hi"), None);
        assert_eq!(origin_of("not a url"), None);
    }

    const USER_MEDIA: &str = "WebKitUserMediaPermissionRequest";

    #[test]
    fn user_media_with_both_devices() {
        assert_eq!(
            requested_capabilities(USER_MEDIA, Some((true, true))),
            CapabilitySet::from([Capability::Camera, Capability::Microphone])
        );
    }

    #[test]
    fn user_media_with_one_device() {
        assert_eq!(
            requested_capabilities(USER_MEDIA, Some((true, false))),
            CapabilitySet::from([Capability::Camera])
        );
        assert_eq!(
            requested_capabilities(USER_MEDIA, Some((false, true))),
            CapabilitySet::from([Capability::Microphone])
        );
    }

    #[test]
    fn display_capture_is_named() {
        let set = requested_capabilities(USER_MEDIA, Some((false, false)));
        assert!(!set.is_empty());
        assert_eq!(set, CapabilitySet::from([Capability::Other(DISPLAY_CAPTURE.into())]));
        assert_eq!(set.to_string(), "{display-capture}");
    }

    #[test]
    fn non_media_request_keeps_type_name() {
        let set = requested_capabilities("WebKitGeolocationPermissionRequest", None);
        assert_eq!(
            set,
            CapabilitySet::from([Capability::Other("WebKitGeolocationPermissionRequest".into())])
        );
        assert!(!set.contains(&Capability::Camera));
        assert!(!set.contains(&Capability::Microphone));
    }

    #[test]
    fn policy_values() {
        let p = RuntimeFeatureSet::POLICY;
        assert!(p.script_execution_enabled);
        assert!(!p.autoplay_requires_gesture);
        assert!(p.dom_storage_enabled);
        assert!(p.local_file_access_enabled);
        assert!(p.local_content_access_enabled);
    }

    #[test]
    fn configure_sets_fixed_policy() {
        let mut engine = MockEngine::with_platform_defaults();
        assert_ne!(engine.features(), RuntimeFeatureSet::POLICY);

        configure(&mut engine).unwrap();

        assert_eq!(engine.features(), RuntimeFeatureSet::POLICY);
    }

    #[test]
    fn configure_touches_every_flag_once() {
        let mut engine = MockEngine::with_platform_defaults();
        configure(&mut engine).unwrap();

        assert_eq!(
            engine.calls(),
            vec![
                EngineCall::ScriptExecution(true),
                EngineCall::AutoplayRequiresGesture(false),
                EngineCall::DomStorage(true),
                EngineCall::LocalFileAccess(true),
                EngineCall::LocalContentAccess(true),
            ]
        );
    }

    #[test]
    fn configure_twice_is_idempotent() {
        let mut engine = MockEngine::with_platform_defaults();
        configure(&mut engine).unwrap();
        let once = engine.features();

        configure(&mut engine).unwrap();
        assert_eq!(engine.features(), once);
        assert_eq!(engine.features(), RuntimeFeatureSet::POLICY);
    }

    #[test]
    fn rejected_flag_is_propagated() {
        let mut engine = MockEngine::with_platform_defaults().rejecting("dom_storage");

        let err = configure(&mut engine).unwrap_err();
        assert!(matches!(err, ShellError::Engine(ref m) if m.contains("dom_storage")));
        // Flags after the rejected one are never attempted
        assert!(!engine
            .calls()
            .iter()
            .any(|c| matches!(c, EngineCall::LocalFileAccess(_))));
    }

    #[test]
    fn works_through_trait_object() {
        let mut engine = MockEngine::with_platform_defaults();
        let dyn_engine: &mut dyn EngineFeatures = &mut engine;
        configure(dyn_engine).unwrap();
        assert_eq!(engine.features(), RuntimeFeatureSet::POLICY);
    }
}
