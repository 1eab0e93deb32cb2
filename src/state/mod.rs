pub(crate) mod list;
pub(crate) mod toast;

use crate::api::ApiClient;
use crate::session::SessionStore;
use crate::state::toast::ToastStack;
use leptos::prelude::*;

/// Process-wide state, owned here and handed out through `AppContext`.
/// The Session is restored synchronously before the router mounts, so route
/// guards never see a half-initialized identity.
#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,
    pub session: SessionStore,
    pub toasts: ToastStack,
}

impl AppState {
    pub fn new() -> Self {
        let api_client = RwSignal::new(ApiClient::from_env());
        let session = SessionStore::restore(api_client);

        Self {
            api_client,
            session,
            toasts: ToastStack::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
