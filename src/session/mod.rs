use crate::api::{ApiClient, ApiResult, AuthResponse, Credentials};
use crate::storage;
use leptos::prelude::*;

/// The backend keys the admin role off this login.
pub(crate) const ADMIN_LOGIN: &str = "admin";

/// Client-held proof of authenticated identity. Exists iff both halves were
/// persisted together (see `storage::load_session`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Session {
    pub login: String,
    pub token: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AuthState {
    Unauthenticated,
    NonAdmin,
    Admin,
}

impl AuthState {
    /// Pure derivation from the Session; re-evaluated reactively on every
    /// navigation and on every login/logout.
    pub fn derive(session: Option<&Session>) -> Self {
        match session {
            None => AuthState::Unauthenticated,
            Some(s) if s.login == ADMIN_LOGIN => AuthState::Admin,
            Some(_) => AuthState::NonAdmin,
        }
    }

    pub fn is_authenticated(self) -> bool {
        !matches!(self, AuthState::Unauthenticated)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RouteClass {
    Public,
    Protected,
    Admin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Access {
    Render,
    RedirectToLogin,
    RedirectToDashboard,
}

/// Access decision per route class. Public routes render in every state —
/// an authenticated user can still open /login. The admin route bounces
/// everyone else to the dashboard, which re-guards unauthenticated visitors
/// down to /login.
pub(crate) fn route_access(state: AuthState, class: RouteClass) -> Access {
    match class {
        RouteClass::Public => Access::Render,
        RouteClass::Protected => {
            if state.is_authenticated() {
                Access::Render
            } else {
                Access::RedirectToLogin
            }
        }
        RouteClass::Admin => {
            if state == AuthState::Admin {
                Access::Render
            } else {
                Access::RedirectToDashboard
            }
        }
    }
}

/// Single source of truth for "who is logged in", passed explicitly through
/// the app context to the route guard and every page. Persists to the two
/// localStorage keys and mirrors the token into the shared `ApiClient`.
#[derive(Clone, Copy)]
pub(crate) struct SessionStore {
    api: RwSignal<ApiClient>,
    current: RwSignal<Option<Session>>,
}

impl SessionStore {
    /// Startup restore. Synchronous: the router never evaluates against a
    /// half-initialized Session. No network validation happens here — a
    /// stale token only surfaces on the first protected request.
    pub fn restore(api: RwSignal<ApiClient>) -> Self {
        let session = storage::load_session();
        if let Some(s) = &session {
            api.update_untracked(|c| c.set_token(s.token.clone()));
        }

        Self {
            api,
            current: RwSignal::new(session),
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.current.get()
    }

    pub fn current_untracked(&self) -> Option<Session> {
        self.current.get_untracked()
    }

    pub fn auth_state(&self) -> AuthState {
        self.current.with(|s| AuthState::derive(s.as_ref()))
    }

    pub async fn login(&self, credentials: Credentials) -> ApiResult<AuthResponse> {
        let client = self.api.get_untracked();
        let response = client.login(&credentials).await?;
        self.establish(credentials.login, response.token.clone());
        Ok(response)
    }

    /// Same contract as `login`; successful registration auto-establishes a
    /// Session.
    pub async fn register(&self, credentials: Credentials) -> ApiResult<AuthResponse> {
        let client = self.api.get_untracked();
        let response = client.register(&credentials).await?;
        self.establish(credentials.login, response.token.clone());
        Ok(response)
    }

    /// Client-side only; the token is not invalidated server-side.
    pub fn logout(&self) {
        storage::clear_session();
        self.api.update(|c| c.clear_token());
        self.current.set(None);
    }

    fn establish(&self, login: String, token: String) {
        let session = Session { login, token };
        storage::save_session(&session);
        self.api.update(|c| c.set_token(session.token.clone()));
        self.current.set(Some(session));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(login: &str) -> Session {
        Session {
            login: login.to_string(),
            token: "t1".to_string(),
        }
    }

    #[test]
    fn derive_absent_session_is_unauthenticated() {
        assert_eq!(AuthState::derive(None), AuthState::Unauthenticated);
    }

    #[test]
    fn derive_admin_login() {
        assert_eq!(AuthState::derive(Some(&session("admin"))), AuthState::Admin);
    }

    #[test]
    fn derive_regular_login() {
        assert_eq!(AuthState::derive(Some(&session("alice"))), AuthState::NonAdmin);
    }

    #[test]
    fn public_routes_render_in_every_state() {
        for state in [
            AuthState::Unauthenticated,
            AuthState::NonAdmin,
            AuthState::Admin,
        ] {
            assert_eq!(route_access(state, RouteClass::Public), Access::Render);
        }
    }

    #[test]
    fn protected_routes_redirect_unauthenticated_to_login() {
        assert_eq!(
            route_access(AuthState::Unauthenticated, RouteClass::Protected),
            Access::RedirectToLogin
        );
        assert_eq!(
            route_access(AuthState::NonAdmin, RouteClass::Protected),
            Access::Render
        );
        assert_eq!(
            route_access(AuthState::Admin, RouteClass::Protected),
            Access::Render
        );
    }

    #[test]
    fn admin_route_admits_only_admin() {
        assert_eq!(route_access(AuthState::Admin, RouteClass::Admin), Access::Render);
        assert_eq!(
            route_access(AuthState::NonAdmin, RouteClass::Admin),
            Access::RedirectToDashboard
        );
        assert_eq!(
            route_access(AuthState::Unauthenticated, RouteClass::Admin),
            Access::RedirectToDashboard
        );
    }
}
