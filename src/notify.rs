//! User Notifications
//!
//! Blocking alert/confirm/prompt dialogs for failures and destructive
//! actions, and a transient toast for successes.

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::api::ApiError;
use crate::logging;

const TOAST_MS: u32 = 3000;

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Ask before a mutation; a missing window counts as "no"
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Free-text answer; `None` when cancelled or left blank
pub fn prompt(message: &str, default: &str) -> Option<String> {
    web_sys::window()
        .and_then(|w| w.prompt_with_message_and_default(message, default).ok())
        .flatten()
        .map(|answer| answer.trim().to_string())
        .filter(|answer| !answer.is_empty())
}

pub fn alert_text(context: &str, err: &ApiError) -> String {
    format!("{}\n\n{}", context, err.user_message())
}

/// Log the detailed error, show the user the classified message
pub fn report_error(context: &str, err: &ApiError) {
    logging::error("APP", format!("{}: {}", context, err));
    alert(&alert_text(context, err));
}

pub fn toast(message: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else { return };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else { return };
    toast.set_class_name("toast");
    toast.set_text_content(Some(message));
    let toast: HtmlElement = toast.unchecked_into();
    let style = toast.style();
    style.set_property("position", "fixed").ok();
    style.set_property("bottom", "20px").ok();
    style.set_property("left", "50%").ok();
    style.set_property("transform", "translateX(-50%)").ok();
    style.set_property("z-index", "10000").ok();

    if body.append_child(&toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_MS).await;
            if let Some(parent) = toast.parent_node() {
                parent.remove_child(&toast).ok();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_text_uses_classified_message() {
        let text = alert_text("Could not save invoice", &ApiError::Forbidden);
        assert!(text.starts_with("Could not save invoice"));
        assert!(text.ends_with("You do not have permission to do that."));
    }
}
