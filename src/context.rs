//! Application Context
//!
//! Shared state provided via Leptos Context API: configuration and the toast
//! queue. [`AppContext`] is the UI's [`Notifier`]; [`BrowserConfirm`] is its
//! [`Confirmer`].

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use workshop_core::{AppConfig, Confirmer, Notifier, NotifyLevel};

/// One visible notification
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub level: NotifyLevel,
    pub message: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    config: StoredValue<AppConfig>,
    /// Visible toasts, oldest first - read
    pub toasts: ReadSignal<Vec<Toast>>,
    /// Visible toasts - write
    set_toasts: WriteSignal<Vec<Toast>>,
    next_toast_id: StoredValue<u32>,
}

impl AppContext {
    pub fn new(config: AppConfig, toasts: (ReadSignal<Vec<Toast>>, WriteSignal<Vec<Toast>>)) -> Self {
        Self {
            config: StoredValue::new(config),
            toasts: toasts.0,
            set_toasts: toasts.1,
            next_toast_id: StoredValue::new(0),
        }
    }

    pub fn api_base(&self) -> String {
        self.config.with_value(|c| c.api.base_url.clone())
    }

    pub fn page_size(&self) -> usize {
        self.config.with_value(|c| c.list.page_size)
    }

    /// Remove a toast
    pub fn dismiss(&self, id: u32) {
        self.set_toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    fn push_toast(&self, level: NotifyLevel, message: &str) -> u32 {
        let id = self.next_toast_id.get_value();
        self.next_toast_id.set_value(id.wrapping_add(1));
        self.set_toasts.update(|toasts| {
            toasts.push(Toast {
                id,
                level,
                message: message.to_string(),
            })
        });
        id
    }
}

impl Notifier for AppContext {
    fn notify(&self, level: NotifyLevel, message: &str) {
        match level {
            NotifyLevel::Error => log::error!("[TOAST] {}", message),
            NotifyLevel::Warning => log::warn!("[TOAST] {}", message),
            NotifyLevel::Info | NotifyLevel::Success => log::info!("[TOAST] {}", message),
        }
        let id = self.push_toast(level, message);

        let delay = self.config.with_value(|c| c.toast.dismiss_after_ms);
        if delay > 0 {
            let ctx = *self;
            spawn_local(async move {
                TimeoutFuture::new(delay).await;
                ctx.dismiss(id);
            });
        }
    }
}

/// `window.confirm` prompt
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserConfirm;

impl Confirmer for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
