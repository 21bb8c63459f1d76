//! Execution contexts the bridge can hand a grant to.
//!
//! Engines insist that a permission request is resolved on their own
//! thread (the Android UI thread, the GTK main loop). The bridge never
//! assumes it is already there; it always goes through a [`DispatchContext`].

use crate::error::{ShellError, ShellResult};

pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs work on the thread an engine requires.
pub trait DispatchContext: Send + Sync {
    fn dispatch(&self, task: Task) -> ShellResult<()>;
}

// ---------------------------------------------------------------------------
// TauriDispatch: the host's main (UI) thread
// ---------------------------------------------------------------------------

pub struct TauriDispatch {
    app: tauri::AppHandle,
}

impl TauriDispatch {
    pub fn new(app: tauri::AppHandle) -> Self {
        Self { app }
    }
}

impl DispatchContext for TauriDispatch {
    fn dispatch(&self, task: Task) -> ShellResult<()> {
        self.app
            .run_on_main_thread(task)
            .map_err(|e| ShellError::Dispatch(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// InlineDispatch: caller is already on the right thread
// ---------------------------------------------------------------------------

/// For engines that raise permission events on the thread that must answer
/// them, and expect the answer before the handler returns (WebView2).
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineDispatch;

impl DispatchContext for InlineDispatch {
    fn dispatch(&self, task: Task) -> ShellResult<()> {
        task();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// EventLoopDispatch: a dedicated thread draining a task queue (for testing)
// ---------------------------------------------------------------------------

#[cfg(test)]
pub use event_loop::EventLoopDispatch;
