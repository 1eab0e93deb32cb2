use crate::pages::{
    AdminPage, CategoriesPage, DashboardPage, LoginPage, NotesPage, RegisterPage, RequireAdmin,
    RequireAuth, SettingsPage,
};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    // Session restore happens inside AppState::new(), before the router
    // mounts, so guards never evaluate a half-initialized Session.
    provide_context(AppContext(AppState::new()));

    // IMPORTANT:
    // - Leptos CSR requires the `csr` feature on `leptos`.
    // - router hooks require a <Router> context.
    view! {
        <Router>
            <Routes fallback=|| view! { <Redirect path="/dashboard" /> }>
                <Route path=path!("login") view=LoginPage />
                <Route path=path!("register") view=RegisterPage />
                <Route path=path!("dashboard") view=move || view! {
                    <RequireAuth>
                        <DashboardPage />
                    </RequireAuth>
                } />
                <Route path=path!("notes") view=move || view! {
                    <RequireAuth>
                        <NotesPage />
                    </RequireAuth>
                } />
                <Route path=path!("categories") view=move || view! {
                    <RequireAuth>
                        <CategoriesPage />
                    </RequireAuth>
                } />
                <Route path=path!("settings") view=move || view! {
                    <RequireAuth>
                        <SettingsPage />
                    </RequireAuth>
                } />
                <Route path=path!("admin") view=move || view! {
                    <RequireAdmin>
                        <AdminPage />
                    </RequireAdmin>
                } />
                <Route path=path!("") view=LoginPage />
            </Routes>
        </Router>
    }
}
