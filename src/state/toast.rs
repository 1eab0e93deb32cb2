use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Toasts linger this long before auto-dismissing.
const AUTO_DISMISS_MS: i32 = 6_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ToastLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

/// Global stack of transient notifications. Mutation outcomes land here;
/// failures never block further interaction.
#[derive(Clone, Copy)]
pub(crate) struct ToastStack {
    items: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl ToastStack {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(vec![]),
            next_id: RwSignal::new(0),
        }
    }

    pub fn items(&self) -> Vec<Toast> {
        self.items.get()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message.into());
    }

    pub fn dismiss(&self, id: u64) {
        self.items.update(|v| v.retain(|t| t.id != id));
    }

    fn push(&self, level: ToastLevel, message: String) {
        let id = self.next_id.get_untracked() + 1;
        self.next_id.set(id);

        self.items.update(|v| {
            v.push(Toast { id, level, message });
        });

        let items = self.items;
        if let Some(win) = web_sys::window() {
            let cb = wasm_bindgen::closure::Closure::once_into_js(move || {
                items.update(|v| v.retain(|t| t.id != id));
            });
            let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                AUTO_DISMISS_MS,
            );
        }
    }
}
