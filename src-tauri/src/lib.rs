mod app;
mod events;
mod notify;

use std::sync::Arc;

use notify_stack::{NotifyConfig, NotifyManager};
use tauri::Manager;
use tracing_subscriber::EnvFilter;

#[tauri::command]
fn get_version() -> &'static str {
    "1.0.0"
}

/// Start the notification core against the Tauri window system.
fn init_notify(app: &tauri::AppHandle) -> Result<app::SharedState, anyhow::Error> {
    let config = NotifyConfig::default();
    let host = Arc::new(notify::host::TauriSurfaceHost::new(
        app.clone(),
        config.clone(),
    ));
    // The manager spawns its worker on the tokio runtime, so start it
    // from inside the runtime context.
    let manager =
        tauri::async_runtime::block_on(async move { NotifyManager::start(host, config) })?;
    tracing::info!("Notification core initialized");
    Ok(app::SharedState::new(manager))
}

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tauri::Builder::default()
        .setup(|app| {
            let state = init_notify(app.handle())?;
            notify::ipc::register(app.handle(), state.clone());
            app.manage(state);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![get_version])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app, event| {
            if let tauri::RunEvent::ExitRequested { .. } = event {
                let state = app.state::<app::SharedState>();
                let manager = state.notify().clone();
                tauri::async_runtime::block_on(async move { manager.shutdown().await });
            }
        });
}
