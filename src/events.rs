use crate::permissions::Grant;
use tauri::Emitter;

/// Fired to the hosted client after each grant. Informational only.
pub const CAPABILITY_GRANTED: &str = "shell://capability-granted";

#[cfg_attr(not(any(target_os = "linux", windows)), allow(dead_code))]
pub fn emit_granted(app: &tauri::AppHandle, grant: &Grant) {
    if let Err(e) = app.emit(CAPABILITY_GRANTED, grant) {
        log::debug!("[events] could not emit {}: {}", CAPABILITY_GRANTED, e);
    }
}
