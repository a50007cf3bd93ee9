//! Boundary adapter: event listeners wiring the presentation side to
//! the notification manager.

use notify_stack::boundary::{ClickForward, ClickRequest, CloseRequest, ShowRequest};
use tauri::{AppHandle, Emitter, Listener, Manager};

use crate::app::SharedState;
use crate::events;

/// Register the inbound boundary listeners.
pub fn register(app: &AppHandle, state: SharedState) {
    let show_state = state.clone();
    app.listen_any(events::NOTIFY_SHOW, move |event| {
        match serde_json::from_str::<ShowRequest>(event.payload()) {
            Ok(request) => {
                if let Err(e) = show_state.notify().notify(request.title, request.options) {
                    tracing::warn!(error = %e, "Dropped show request");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Malformed notify-show payload"),
        }
    });

    let close_state = state.clone();
    app.listen_any(events::NOTIFY_CLOSE, move |event| {
        match serde_json::from_str::<CloseRequest>(event.payload()) {
            Ok(request) => {
                close_state.notify().request_close(request.surface_id);
            }
            Err(e) => tracing::warn!(error = %e, "Malformed notify-close payload"),
        }
    });

    let click_app = app.clone();
    app.listen_any(events::NOTIFY_CLICK, move |event| {
        match serde_json::from_str::<ClickRequest>(event.payload()) {
            Ok(request) => {
                // A click dismisses every popup and hands the
                // conversation over to the main window.
                state.notify().close_all();
                forward_click(&click_app, ClickForward::for_notification(request.notify.as_ref()));
            }
            Err(e) => tracing::warn!(error = %e, "Malformed notify-click payload"),
        }
    });
}

fn forward_click(app: &AppHandle, forward: ClickForward) {
    let Some(main) = app.get_webview_window(events::MAIN_WINDOW_LABEL) else {
        tracing::warn!("Main window missing, click dropped");
        return;
    };
    let _ = main.show();
    let _ = main.set_focus();
    if let Err(e) = app.emit_to(events::MAIN_WINDOW_LABEL, events::NOTIFY_CLICKED, forward) {
        tracing::warn!(error = %e, "Failed to forward click to main window");
    }
}
