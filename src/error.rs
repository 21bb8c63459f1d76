use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// The embedded engine rejected a setting or a native call failed.
    #[error("Engine error: {0}")]
    Engine(String),

    /// The engine's event thread is no longer accepting work.
    #[error("Dispatch error: {0}")]
    Dispatch(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tauri error: {0}")]
    Tauri(#[from] tauri::Error),

    #[error("{0}")]
    Other(String),
}

impl Serialize for ShellError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type ShellResult<T> = Result<T, ShellError>;
