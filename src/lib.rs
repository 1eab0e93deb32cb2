mod api;
mod app;
mod components;
mod models;
mod pages;
mod session;
mod state;
mod storage;
mod util;

pub use app::App;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::prelude::mount_to_body(App);
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` +
// wasm-bindgen-test-runner). Everything touching localStorage lives here;
// pure logic is tested natively in its own module.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::api::ApiClient;
    use crate::session::{Session, SessionStore};
    use crate::storage;
    use leptos::prelude::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn local_storage() -> web_sys::Storage {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .expect("browser test environment should expose localStorage")
    }

    fn api_signal() -> RwSignal<ApiClient> {
        RwSignal::new(ApiClient::new("http://localhost:8080/api".to_string()))
    }

    #[wasm_bindgen_test]
    fn session_storage_round_trip() {
        storage::clear_session();

        storage::save_session(&Session {
            login: "alice".to_string(),
            token: "t1".to_string(),
        });
        let restored = storage::load_session().expect("session should round-trip");
        assert_eq!(restored.login, "alice");
        assert_eq!(restored.token, "t1");

        storage::clear_session();
        assert!(storage::load_session().is_none());
    }

    #[wasm_bindgen_test]
    fn restore_with_both_keys_yields_matching_session() {
        storage::clear_session();
        storage::save_session(&Session {
            login: "alice".to_string(),
            token: "t1".to_string(),
        });

        let api = api_signal();
        let store = SessionStore::restore(api);

        let current = store.current_untracked();
        assert_eq!(current.as_ref().map(|s| s.login.as_str()), Some("alice"));
        // The token is mirrored into the shared client.
        assert_eq!(api.get_untracked().token.as_deref(), Some("t1"));

        storage::clear_session();
    }

    #[wasm_bindgen_test]
    fn restore_with_orphaned_token_is_unauthenticated() {
        storage::clear_session();
        let _ = local_storage().set_item(storage::TOKEN_KEY, "t1");

        let store = SessionStore::restore(api_signal());
        assert!(store.current_untracked().is_none());

        // The orphan was cleaned up.
        let leftover = local_storage().get_item(storage::TOKEN_KEY).ok().flatten();
        assert!(leftover.is_none());
    }

    #[wasm_bindgen_test]
    fn restore_with_orphaned_login_is_unauthenticated() {
        storage::clear_session();
        let _ = local_storage().set_item(storage::LOGIN_KEY, "alice");

        let store = SessionStore::restore(api_signal());
        assert!(store.current_untracked().is_none());

        let leftover = local_storage().get_item(storage::LOGIN_KEY).ok().flatten();
        assert!(leftover.is_none());
    }

    #[wasm_bindgen_test]
    fn logout_clears_storage_and_client_token() {
        storage::clear_session();
        storage::save_session(&Session {
            login: "alice".to_string(),
            token: "t1".to_string(),
        });

        let api = api_signal();
        let store = SessionStore::restore(api);
        store.logout();

        assert!(store.current_untracked().is_none());
        assert!(api.get_untracked().token.is_none());
        assert!(storage::load_session().is_none());
    }
}
