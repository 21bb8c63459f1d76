mod commands;
pub mod config;
pub mod engine;
mod error;
mod events;
pub mod permissions;
mod shell;

pub use error::{ShellError, ShellResult};

use config::ShellConfig;
use tauri::Manager;

#[cfg(desktop)]
fn focus_existing_window(app: &tauri::AppHandle) {
    let label = app
        .try_state::<ShellConfig>()
        .map(|c| c.window_label.clone())
        .unwrap_or_else(|| ShellConfig::default().window_label);
    if let Some(window) = app.get_webview_window(&label) {
        let _ = window.unminimize();
        let _ = window.show();
        let _ = window.set_focus();
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let builder = tauri::Builder::default();

    #[cfg(desktop)]
    let builder = builder.plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
        // Another instance tried to launch, so bring the existing window to front
        focus_existing_window(app);
    }));

    builder
        .setup(|app| {
            let config_dir = app.path().app_config_dir()?;
            let (config, load_error) = ShellConfig::load(&config_dir);

            app.handle().plugin(
                tauri_plugin_log::Builder::default()
                    .level(config.log_level())
                    .build(),
            )?;
            if let Some(e) = &load_error {
                log::warn!(
                    "Ignoring {} and using defaults: {}",
                    config_dir.join(config::CONFIG_FILE).display(),
                    e
                );
            }

            if cfg!(debug_assertions) {
                log::info!("{} shell (dev build)", config.app_name);
            }

            shell::install(app, &config)?;
            app.manage(config);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::system::app_version,
            commands::system::shell_policy,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
