use crate::session::Session;

/// The two localStorage entries backing the Session. Nothing else about the
/// Session is persisted.
pub(crate) const TOKEN_KEY: &str = "token";
pub(crate) const LOGIN_KEY: &str = "userLogin";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// A Session exists iff BOTH keys are present. A lone token or a lone login
/// (interrupted logout, manual tampering) counts as absent and is removed so
/// the next restore starts clean.
pub(crate) fn load_session() -> Option<Session> {
    let storage = local_storage()?;

    let token = storage.get_item(TOKEN_KEY).ok().flatten();
    let login = storage.get_item(LOGIN_KEY).ok().flatten();

    match (login, token) {
        (Some(login), Some(token)) => Some(Session { login, token }),
        (None, None) => None,
        _ => {
            let _ = storage.remove_item(TOKEN_KEY);
            let _ = storage.remove_item(LOGIN_KEY);
            None
        }
    }
}

pub(crate) fn save_session(session: &Session) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(TOKEN_KEY, &session.token);
        let _ = storage.set_item(LOGIN_KEY, &session.login);
    }
}

pub(crate) fn clear_session() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(LOGIN_KEY);
    }
}
