use crate::api::{
    CategoryPayload, Credentials, NoteListParams, NotePayload, UpdateProfileRequest,
    UserListParams,
};
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent,
    CardDescription, CardHeader, CardTitle, Checkbox, Dialog, DialogFooter, DialogHeader,
    DialogTitle, Input, Label, Pagination, Select, Spinner, Switch, Textarea,
};
use crate::models::{Category, Note, SortBy, User};
use crate::session::{route_access, Access, AuthState, RouteClass};
use crate::state::list::{ListView, RequestSeq, PAGE_SIZE};
use crate::state::toast::ToastLevel;
use crate::state::AppContext;
use crate::util;
use icons::X;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;
use leptos_router::hooks::{use_location, use_navigate};
use std::str::FromStr;
use wasm_bindgen::JsCast;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn category_title(categories: &[Category], id: Option<i64>) -> String {
    id.and_then(|id| categories.iter().find(|c| c.id == id))
        .map(|c| c.title.clone())
        .unwrap_or_else(|| "Uncategorized".to_string())
}

#[component]
pub fn Toaster() -> impl IntoView {
    let state = expect_context::<AppContext>();
    let toasts = state.0.toasts;

    view! {
        <div class="fixed bottom-4 right-4 z-[70] flex w-80 flex-col gap-2">
            {move || {
                toasts
                    .items()
                    .into_iter()
                    .map(|t| {
                        let (border, text) = match t.level {
                            ToastLevel::Success => {
                                ("bg-background shadow-md", "pr-5 text-xs text-foreground")
                            }
                            ToastLevel::Error => (
                                "border-destructive/40 bg-background shadow-md",
                                "pr-5 text-xs text-destructive",
                            ),
                        };
                        let id = t.id;
                        view! {
                            <Alert class=border>
                                <AlertDescription class=text>{t.message}</AlertDescription>
                                <button
                                    type="button"
                                    class="absolute top-2 right-2 text-muted-foreground hover:text-foreground [&_svg:not([class*='size-'])]:size-3.5"
                                    aria-label="Dismiss"
                                    on:click=move |_| toasts.dismiss(id)
                                >
                                    <X />
                                </button>
                            </Alert>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
pub fn AppShell(children: ChildrenFn) -> impl IntoView {
    let state = expect_context::<AppContext>();
    let session = state.0.session;
    let navigate = StoredValue::new(use_navigate());
    let location = use_location();
    let pathname = location.pathname;

    let login_name = move || session.current().map(|s| s.login).unwrap_or_default();
    let is_admin = move || session.auth_state() == AuthState::Admin;

    let on_logout = move |_| {
        session.logout();
        navigate.with_value(|nav| nav("/login", Default::default()));
    };

    let children = StoredValue::new(children);

    let nav_link = move |href: &'static str, label: &'static str| {
        view! {
            <a
                href=href
                class=move || {
                    if pathname.get().starts_with(href) {
                        "flex items-center gap-2 rounded-lg bg-accent px-3 py-2 text-sm font-medium text-accent-foreground"
                    } else {
                        "flex items-center gap-2 rounded-lg px-3 py-2 text-sm text-muted-foreground transition-colors hover:bg-accent hover:text-accent-foreground"
                    }
                }
            >
                {label}
            </a>
        }
    };

    view! {
        <div class="min-h-screen bg-background">
            <header class="fixed inset-x-0 top-0 z-40 flex h-14 items-center justify-between border-b bg-background px-4">
                <div class="flex items-baseline gap-2">
                    <span class="text-sm font-semibold">"Notable"</span>
                    <span class="text-xs text-muted-foreground">"Notes, organized."</span>
                </div>
                <div class="flex items-center gap-3">
                    <span class="text-xs text-muted-foreground">{login_name}</span>
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        on:click=on_logout
                    >
                        "Sign out"
                    </Button>
                </div>
            </header>

            <aside class="fixed bottom-0 left-0 top-14 z-30 w-56 border-r bg-background p-3">
                <nav class="flex flex-col gap-1">
                    {nav_link("/dashboard", "Dashboard")}
                    {nav_link("/notes", "Notes")}
                    {nav_link("/categories", "Categories")}
                    <Show when=is_admin fallback=|| ().into_view()>
                        {nav_link("/admin", "Admin")}
                    </Show>
                    {nav_link("/settings", "Settings")}
                </nav>
            </aside>

            <main class="ml-56 px-6 pb-10 pt-20">
                {move || children.with_value(|c| c())}
            </main>

            <Toaster />
        </div>
    }
}

/// Protected region: unauthenticated visitors bounce to /login; everyone
/// else gets the shell.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let state = expect_context::<AppContext>();
    let session = state.0.session;

    // Store children so the view macro sees an `Fn` (not an `FnOnce`).
    let children = StoredValue::new(children);

    view! {
        {move || match route_access(session.auth_state(), RouteClass::Protected) {
            Access::Render => view! {
                <AppShell>{move || children.with_value(|c| c())}</AppShell>
            }
            .into_any(),
            Access::RedirectToLogin => view! { <Redirect path="/login" /> }.into_any(),
            Access::RedirectToDashboard => view! { <Redirect path="/dashboard" /> }.into_any(),
        }}
    }
}

/// Admin region: non-admins (authenticated or not) bounce to /dashboard,
/// which re-guards them down to /login when needed.
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let state = expect_context::<AppContext>();
    let session = state.0.session;

    let children = StoredValue::new(children);

    view! {
        {move || match route_access(session.auth_state(), RouteClass::Admin) {
            Access::Render => view! {
                <AppShell>{move || children.with_value(|c| c())}</AppShell>
            }
            .into_any(),
            Access::RedirectToLogin => view! { <Redirect path="/login" /> }.into_any(),
            Access::RedirectToDashboard => view! { <Redirect path="/dashboard" /> }.into_any(),
        }}
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let login: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let state = expect_context::<AppContext>();
    let session = state.0.session;

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        if loading.get_untracked() {
            return;
        }

        let credentials = Credentials {
            login: login.get_untracked(),
            password: password.get_untracked(),
        };

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match session.login(credentials).await {
                Ok(_) => {
                    let _ = window().location().set_href("/dashboard");
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <div class="mb-6 flex items-center justify-center">
                    <a href="/" class="text-sm font-medium text-foreground">"Notable"</a>
                </div>

                <Card>
                    <CardHeader>
                        <CardTitle class="text-lg">"Log in"</CardTitle>
                        <CardDescription class="text-xs">
                            "Use your login and password to continue."
                        </CardDescription>
                    </CardHeader>

                    <CardContent>
                        <form class="flex flex-col gap-3" on:submit=on_submit>
                            <div class="flex flex-col gap-1.5">
                                <Label html_for="login" class="text-xs">"Login"</Label>
                                <Input
                                    id="login"
                                    placeholder="yourname"
                                    bind_value=login
                                    required=true
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="password" class="text-xs">"Password"</Label>
                                <Input
                                    id="password"
                                    r#type="password"
                                    placeholder="••••••••"
                                    bind_value=password
                                    required=true
                                />
                            </div>

                            <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                                {move || {
                                    error.get().map(|e| {
                                        view! {
                                            <Alert class="border-destructive/30">
                                                <AlertDescription class="text-destructive text-xs">
                                                    {e}
                                                </AlertDescription>
                                            </Alert>
                                        }
                                    })
                                }}
                            </Show>

                            <Button
                                class="w-full"
                                size=ButtonSize::Sm
                                attr:disabled=move || loading.get()
                            >
                                <span class="inline-flex items-center gap-2">
                                    <Show when=move || loading.get() fallback=|| ().into_view()>
                                        <Spinner />
                                    </Show>
                                    {move || if loading.get() { "Signing in..." } else { "Continue" }}
                                </span>
                            </Button>

                            <div class="pt-1 text-xs text-muted-foreground">
                                "No account? "
                                <a class="text-primary underline underline-offset-4" href="/register">
                                    "Register"
                                </a>
                            </div>
                        </form>
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let login: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let confirm_password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let state = expect_context::<AppContext>();
    let session = state.0.session;

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        if loading.get_untracked() {
            return;
        }

        let login_val = login.get_untracked();
        let password_val = password.get_untracked();
        let confirm_val = confirm_password.get_untracked();

        if let Some(msg) = util::password_rule_violation(&password_val, &confirm_val) {
            error.set(Some(msg.to_string()));
            return;
        }

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            let credentials = Credentials {
                login: login_val,
                password: password_val,
            };

            match session.register(credentials).await {
                Ok(_) => {
                    // Registration auto-establishes a Session.
                    let _ = window().location().set_href("/dashboard");
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <div class="mb-6 flex items-center justify-center">
                    <a href="/" class="text-sm font-medium text-foreground">"Notable"</a>
                </div>

                <Card>
                    <CardHeader>
                        <CardTitle class="text-lg">"Create account"</CardTitle>
                        <CardDescription class="text-xs">
                            "Registering signs you in right away."
                        </CardDescription>
                    </CardHeader>

                    <CardContent>
                        <form class="flex flex-col gap-3" on:submit=on_submit>
                            <div class="flex flex-col gap-1.5">
                                <Label html_for="login" class="text-xs">"Login"</Label>
                                <Input
                                    id="login"
                                    placeholder="yourname"
                                    bind_value=login
                                    required=true
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="password" class="text-xs">"Password"</Label>
                                <Input
                                    id="password"
                                    r#type="password"
                                    placeholder="••••••••"
                                    bind_value=password
                                    required=true
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="confirm_password" class="text-xs">
                                    "Confirm password"
                                </Label>
                                <Input
                                    id="confirm_password"
                                    r#type="password"
                                    placeholder="••••••••"
                                    bind_value=confirm_password
                                    required=true
                                />
                            </div>

                            <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                                {move || {
                                    error.get().map(|e| {
                                        view! {
                                            <Alert class="border-destructive/30">
                                                <AlertDescription class="text-destructive text-xs">
                                                    {e}
                                                </AlertDescription>
                                            </Alert>
                                        }
                                    })
                                }}
                            </Show>

                            <Button
                                class="w-full"
                                size=ButtonSize::Sm
                                attr:disabled=move || loading.get()
                            >
                                <span class="inline-flex items-center gap-2">
                                    <Show when=move || loading.get() fallback=|| ().into_view()>
                                        <Spinner />
                                    </Show>
                                    {move || if loading.get() { "Creating..." } else { "Continue" }}
                                </span>
                            </Button>

                            <div class="pt-1 text-xs text-muted-foreground">
                                "Already have an account? "
                                <a class="text-primary underline underline-offset-4" href="/login">
                                    "Log in"
                                </a>
                            </div>
                        </form>
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let state = expect_context::<AppContext>();

    let notes: RwSignal<Vec<Note>> = RwSignal::new(vec![]);
    let categories: RwSignal<Vec<Category>> = RwSignal::new(vec![]);
    let loading: RwSignal<bool> = RwSignal::new(true);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loaded_once: RwSignal<bool> = RwSignal::new(false);

    Effect::new(move |_| {
        if loaded_once.get_untracked() {
            return;
        }
        loaded_once.set(true);

        let api = state.0.api_client.get_untracked();
        spawn_local(async move {
            let params = NoteListParams {
                offset: 0,
                limit: PAGE_SIZE,
                search: None,
                category_id: None,
                is_completed: None,
                sort_by: SortBy::Newest,
            };
            let notes_res = api.list_notes(&params).await;
            let cats_res = api.list_categories().await;

            match (notes_res, cats_res) {
                (Ok(page), Ok(cats)) => {
                    notes.set(page.content);
                    categories.set(cats);
                }
                (Err(e), _) | (_, Err(e)) => {
                    leptos::logging::warn!("dashboard load failed: {e}");
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    });

    let stat_card = move |label: &'static str, value: i64| {
        view! {
            <Card class="gap-1 py-4">
                <CardHeader>
                    <CardDescription class="text-xs">{label}</CardDescription>
                    <CardTitle class="text-2xl">{value.to_string()}</CardTitle>
                </CardHeader>
            </Card>
        }
    };

    view! {
        <div class="space-y-4">
            <div class="space-y-1">
                <h1 class="text-xl font-semibold">"Dashboard"</h1>
                <p class="text-xs text-muted-foreground">"A quick look at your latest notes."</p>
            </div>

            <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                {move || {
                    error.get().map(|e| {
                        view! {
                            <Alert class="border-destructive/30">
                                <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                            </Alert>
                        }
                    })
                }}
            </Show>

            <div class="grid gap-3 sm:grid-cols-2 lg:grid-cols-4">
                {move || stat_card("Categories", categories.get().len() as i64)}
                {move || stat_card("Recent notes", notes.get().len() as i64)}
                {move || {
                    stat_card(
                        "Completed",
                        notes.get().iter().filter(|n| n.completed).count() as i64,
                    )
                }}
                {move || {
                    stat_card(
                        "Reminders",
                        notes.get().iter().filter(|n| n.reminder.is_some()).count() as i64,
                    )
                }}
            </div>

            <Card>
                <CardHeader>
                    <CardTitle>"Recent notes"</CardTitle>
                    <CardDescription class="text-xs">"Newest first."</CardDescription>
                </CardHeader>
                <CardContent>
                    <Show
                        when=move || !loading.get()
                        fallback=|| view! {
                            <div class="flex items-center gap-2 text-sm text-muted-foreground">
                                <Spinner />
                                "Loading…"
                            </div>
                        }
                    >
                        <Show
                            when=move || !notes.get().is_empty()
                            fallback=|| view! {
                                <div class="text-sm text-muted-foreground">"No notes yet."</div>
                            }
                        >
                            <div class="space-y-2">
                                {move || {
                                    let cats = categories.get();
                                    notes
                                        .get()
                                        .into_iter()
                                        .take(5)
                                        .map(|n| {
                                            let category = category_title(&cats, n.category_id);
                                            view! {
                                                <div class="flex items-center justify-between rounded-lg border px-3 py-2">
                                                    <div class="min-w-0">
                                                        <div class="truncate text-sm font-medium">{n.title}</div>
                                                        <div class="text-xs text-muted-foreground">{category}</div>
                                                    </div>
                                                    <div class="shrink-0 text-xs text-muted-foreground">
                                                        {util::display_date(&n.created_date)}
                                                    </div>
                                                </div>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </div>
                        </Show>
                    </Show>
                    <a
                        href="/notes"
                        class="mt-3 inline-block text-xs text-primary underline underline-offset-4"
                    >
                        "Show all notes"
                    </a>
                </CardContent>
            </Card>
        </div>
    }
}

#[component]
pub fn NotesPage() -> impl IntoView {
    let state = expect_context::<AppContext>();
    let toasts = state.0.toasts;

    let notes: RwSignal<Vec<Note>> = RwSignal::new(vec![]);
    let categories: RwSignal<Vec<Category>> = RwSignal::new(vec![]);
    let view_state: RwSignal<ListView> = RwSignal::new(ListView::new());
    let loading: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let seq: RwSignal<RequestSeq> = RwSignal::new(RequestSeq::default());

    // Filter row state, as bound by the inputs ("" means "all").
    let search: RwSignal<String> = RwSignal::new(String::new());
    let category_filter: RwSignal<String> = RwSignal::new(String::new());
    let status_filter: RwSignal<String> = RwSignal::new(String::new());
    let sort_by: RwSignal<String> = RwSignal::new(SortBy::Newest.to_string());

    let current_params = move || {
        let view = view_state.get_untracked();
        let search_val = search.get_untracked();
        let search_val = search_val.trim();

        NoteListParams {
            offset: view.offset(),
            limit: PAGE_SIZE,
            search: (!search_val.is_empty()).then(|| search_val.to_string()),
            category_id: category_filter.get_untracked().parse::<i64>().ok(),
            is_completed: status_filter.get_untracked().parse::<bool>().ok(),
            sort_by: SortBy::from_str(&sort_by.get_untracked()).unwrap_or_default(),
        }
    };

    let fetch_notes = move || {
        let params = current_params();
        let ticket = seq.try_update(|s| s.issue()).unwrap_or_default();
        loading.set(true);
        error.set(None);

        let api = state.0.api_client.get_untracked();
        spawn_local(async move {
            let result = api.list_notes(&params).await;

            // A newer fetch was issued while this one was in flight.
            if !seq.with_untracked(|s| s.is_current(ticket)) {
                return;
            }

            match result {
                Ok(page) => {
                    notes.set(page.content);
                    view_state.update(|v| v.apply_total_pages(page.total_pages));
                }
                Err(e) => {
                    leptos::logging::warn!("notes fetch failed: {e}");
                    // Items stay stale-but-visible; only the banner changes.
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    };

    let fetch_categories = move || {
        let api = state.0.api_client.get_untracked();
        spawn_local(async move {
            match api.list_categories().await {
                Ok(cats) => categories.set(cats),
                Err(e) => leptos::logging::warn!("categories fetch failed: {e}"),
            }
        });
    };

    let loaded_once: RwSignal<bool> = RwSignal::new(false);
    Effect::new(move |_| {
        if loaded_once.get_untracked() {
            return;
        }
        loaded_once.set(true);
        fetch_notes();
        fetch_categories();
    });

    // Any filter change restarts from page 1; never combined with a page step.
    let apply_filters = move || {
        view_state.update(|v| v.reset_to_first());
        fetch_notes();
    };

    Effect::new(move |prev: Option<()>| {
        category_filter.track();
        status_filter.track();
        sort_by.track();
        if prev.is_some() {
            apply_filters();
        }
    });

    let on_search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        apply_filters();
    };

    let on_page = move |page: u32| {
        view_state.update(|v| v.set_page(page));
        fetch_notes();
    };

    let delete_note = move |id: i64| {
        let api = state.0.api_client.get_untracked();
        spawn_local(async move {
            match api.delete_note(id).await {
                Ok(()) => {
                    toasts.success("Note deleted");
                    fetch_notes();
                }
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    let toggle_complete = move |note: Note| {
        let api = state.0.api_client.get_untracked();
        spawn_local(async move {
            let payload = NotePayload::status_change(&note, !note.completed);
            match api.update_note(note.id, &payload).await {
                Ok(_) => fetch_notes(),
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    let export_notes = move |_| {
        let api = state.0.api_client.get_untracked();
        spawn_local(async move {
            match api.export_notes().await {
                Ok(bytes) => {
                    if let Err(e) = util::download_bytes(&bytes, "notes.xlsx", XLSX_MIME) {
                        toasts.error(e);
                    }
                }
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    // Note form dialog. One Draft per surface; mode is fixed at open.
    let form_open: RwSignal<bool> = RwSignal::new(false);
    let editing: RwSignal<Option<Note>> = RwSignal::new(None);
    let draft_title: RwSignal<String> = RwSignal::new(String::new());
    let draft_content: RwSignal<String> = RwSignal::new(String::new());
    let draft_reminder: RwSignal<String> = RwSignal::new(String::new());
    let draft_completed: RwSignal<bool> = RwSignal::new(false);
    let draft_category: RwSignal<String> = RwSignal::new(String::new());
    let draft_image_path: RwSignal<Option<String>> = RwSignal::new(None);
    let pending_image: RwSignal<Option<web_sys::File>> = RwSignal::new(None);
    let form_error: RwSignal<Option<String>> = RwSignal::new(None);
    let form_loading: RwSignal<bool> = RwSignal::new(false);

    let open_create = move |_| {
        editing.set(None);
        draft_title.set(String::new());
        draft_content.set(String::new());
        draft_reminder.set(String::new());
        draft_completed.set(false);
        draft_category.set(String::new());
        draft_image_path.set(None);
        pending_image.set(None);
        form_error.set(None);
        form_open.set(true);
    };

    let open_edit = move |note: Note| {
        draft_title.set(note.title.clone());
        draft_content.set(note.content.clone());
        draft_reminder.set(
            note.reminder
                .as_deref()
                .map(util::reminder_to_input)
                .unwrap_or_default(),
        );
        draft_completed.set(note.completed);
        draft_category.set(
            note.category_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        );
        draft_image_path.set(note.image_path.clone());
        pending_image.set(None);
        form_error.set(None);
        editing.set(Some(note));
        form_open.set(true);
    };

    let on_pick_image = move |ev: web_sys::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        if file.is_some() {
            pending_image.set(file);
        }
    };

    let submit_note = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        if form_loading.get_untracked() {
            return;
        }

        let title = draft_title.get_untracked();
        if title.trim().is_empty() {
            form_error.set(Some("Title is required".to_string()));
            return;
        }

        form_loading.set(true);
        form_error.set(None);

        let api = state.0.api_client.get_untracked();
        let file = pending_image.get_untracked();
        let mode = editing.get_untracked();

        spawn_local(async move {
            // The pending attachment goes up first; its path rides on the
            // note payload.
            let mut image_path = draft_image_path.get_untracked();
            if let Some(file) = file {
                let uploaded = match util::read_file_bytes(&file).await {
                    Ok(bytes) => api
                        .upload_image(&file.name(), bytes)
                        .await
                        .map_err(|e| e.to_string()),
                    Err(e) => Err(e),
                };

                match uploaded {
                    Ok(up) => image_path = Some(up.path),
                    Err(e) => {
                        form_error.set(Some(e));
                        form_loading.set(false);
                        return;
                    }
                }
            }

            let payload = NotePayload {
                title,
                content: draft_content.get_untracked(),
                category_id: draft_category.get_untracked().parse::<i64>().ok(),
                reminder: util::reminder_to_wire(&draft_reminder.get_untracked()),
                is_completed: draft_completed.get_untracked(),
                image_path,
            };

            let result = match &mode {
                Some(note) => api.update_note(note.id, &payload).await.map(|_| ()),
                None => api.create_note(&payload).await.map(|_| ()),
            };

            match result {
                Ok(()) => {
                    form_open.set(false);
                    toasts.success(if mode.is_some() {
                        "Note updated"
                    } else {
                        "Note created"
                    });
                    fetch_notes();
                }
                Err(e) => {
                    // Keep the form open and the Draft intact.
                    form_error.set(Some(e.to_string()));
                }
            }
            form_loading.set(false);
        });
    };

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <div class="space-y-1">
                    <h1 class="text-xl font-semibold">"My notes"</h1>
                    <p class="text-xs text-muted-foreground">
                        {move || format!("page {} of {}", view_state.get().page, view_state.get().total_pages)}
                    </p>
                </div>
                <div class="flex items-center gap-2">
                    <Button size=ButtonSize::Sm on:click=open_create>"Add note"</Button>
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        on:click=export_notes
                    >
                        "Export"
                    </Button>
                </div>
            </div>

            <form class="flex items-center gap-2" on:submit=on_search>
                <Input
                    class="max-w-xs"
                    placeholder="Search notes..."
                    bind_value=search
                />
                <Button variant=ButtonVariant::Outline size=ButtonSize::Sm>"Search"</Button>
            </form>

            <div class="flex flex-wrap items-center gap-2">
                <Select bind_value=category_filter class="min-w-40">
                    <option value="">"All categories"</option>
                    {move || {
                        categories
                            .get()
                            .into_iter()
                            .map(|c| view! { <option value=c.id.to_string()>{c.title}</option> })
                            .collect_view()
                    }}
                </Select>

                <Select bind_value=status_filter class="min-w-32">
                    <option value="">"All statuses"</option>
                    <option value="true">"Completed"</option>
                    <option value="false">"Active"</option>
                </Select>

                <Select bind_value=sort_by class="min-w-32">
                    <option value="newest">"Newest first"</option>
                    <option value="oldest">"Oldest first"</option>
                    <option value="title">"By title"</option>
                </Select>
            </div>

            <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                {move || {
                    error.get().map(|e| {
                        view! {
                            <Alert class="border-destructive/30">
                                <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                            </Alert>
                        }
                    })
                }}
            </Show>

            <Show
                when=move || !(loading.get() && notes.get().is_empty())
                fallback=|| view! {
                    <div class="flex items-center gap-2 text-sm text-muted-foreground">
                        <Spinner />
                        "Loading…"
                    </div>
                }
            >
                <Show
                    when=move || !notes.get().is_empty()
                    fallback=|| view! {
                        <div class="rounded-lg border bg-muted p-4 text-sm text-muted-foreground">
                            "No notes match the current filters."
                        </div>
                    }
                >
                    <div class="grid gap-3 sm:grid-cols-2 lg:grid-cols-3">
                        {move || {
                            let cats = categories.get();
                            notes
                                .get()
                                .into_iter()
                                .map(|note| {
                                    let category = category_title(&cats, note.category_id);
                                    let title = note.title.clone();
                                    let content = note.content.clone();
                                    let created = util::display_date(&note.created_date);
                                    let has_reminder = note.reminder.is_some();
                                    let reminder = note
                                        .reminder
                                        .as_deref()
                                        .map(util::display_date_time)
                                        .unwrap_or_default();
                                    let image_label = note.image_path.clone();
                                    let completed = note.completed;
                                    let id_for_delete = note.id;
                                    let note_for_edit = note.clone();
                                    let note_for_toggle = note;

                                    view! {
                                        <Card class="group relative gap-2 py-4">
                                            <CardHeader>
                                                <div class="flex items-center justify-between">
                                                    <CardDescription class="text-xs">{category}</CardDescription>
                                                    <div class="flex items-center gap-1 text-muted-foreground">
                                                        <Show
                                                            when=move || has_reminder
                                                            fallback=|| ().into_view()
                                                        >
                                                            <svg
                                                                xmlns="http://www.w3.org/2000/svg"
                                                                width="14"
                                                                height="14"
                                                                viewBox="0 0 24 24"
                                                                fill="none"
                                                                stroke="currentColor"
                                                                stroke-width="2"
                                                                stroke-linecap="round"
                                                                stroke-linejoin="round"
                                                                aria-hidden="true"
                                                            >
                                                                <path d="M6 8a6 6 0 0 1 12 0c0 7 3 9 3 9H3s3-2 3-9" />
                                                                <path d="M10.3 21a1.94 1.94 0 0 0 3.4 0" />
                                                            </svg>
                                                        </Show>
                                                    </div>
                                                </div>
                                                <CardTitle class="truncate text-sm">{title}</CardTitle>
                                                <CardDescription class="text-xs">{created}</CardDescription>
                                            </CardHeader>

                                            <CardContent class="space-y-2">
                                                <p class="line-clamp-3 text-sm">{content}</p>

                                                {image_label.map(|label| {
                                                    view! {
                                                        <div class="truncate rounded-md border border-dashed px-2 py-1 text-xs text-muted-foreground">
                                                            {label}
                                                        </div>
                                                    }
                                                })}

                                                <Show when=move || has_reminder fallback=|| ().into_view()>
                                                    <div class="text-xs text-primary">
                                                        "Reminder: " {reminder.clone()}
                                                    </div>
                                                </Show>

                                                <div class="flex items-center justify-between pt-1">
                                                    <label class="flex items-center gap-2 text-xs text-muted-foreground hover:cursor-pointer">
                                                        <input
                                                            type="checkbox"
                                                            class="size-4 accent-primary"
                                                            prop:checked=completed
                                                            on:change=move |_| toggle_complete(note_for_toggle.clone())
                                                        />
                                                        {if completed { "Completed" } else { "Mark done" }}
                                                    </label>

                                                    <div class="hidden items-center gap-1 group-hover:flex">
                                                        <Button
                                                            variant=ButtonVariant::Ghost
                                                            size=ButtonSize::Icon
                                                            class="h-7 w-7"
                                                            attr:title="Edit"
                                                            on:click=move |_| open_edit(note_for_edit.clone())
                                                        >
                                                            <svg
                                                                xmlns="http://www.w3.org/2000/svg"
                                                                width="16"
                                                                height="16"
                                                                viewBox="0 0 24 24"
                                                                fill="none"
                                                                stroke="currentColor"
                                                                stroke-width="2"
                                                                stroke-linecap="round"
                                                                stroke-linejoin="round"
                                                                class="text-muted-foreground"
                                                                aria-hidden="true"
                                                            >
                                                                <path d="M12 20h9" />
                                                                <path d="M16.5 3.5a2.121 2.121 0 0 1 3 3L7 19l-4 1 1-4Z" />
                                                            </svg>
                                                        </Button>

                                                        <Button
                                                            variant=ButtonVariant::Ghost
                                                            size=ButtonSize::Icon
                                                            class="h-7 w-7 text-destructive"
                                                            attr:title="Delete"
                                                            on:click=move |_| delete_note(id_for_delete)
                                                        >
                                                            <svg
                                                                xmlns="http://www.w3.org/2000/svg"
                                                                width="16"
                                                                height="16"
                                                                viewBox="0 0 24 24"
                                                                fill="none"
                                                                stroke="currentColor"
                                                                stroke-width="2"
                                                                stroke-linecap="round"
                                                                stroke-linejoin="round"
                                                                aria-hidden="true"
                                                            >
                                                                <path d="M3 6h18" />
                                                                <path d="M8 6V4h8v2" />
                                                                <path d="M19 6l-1 14H6L5 6" />
                                                                <path d="M10 11v6" />
                                                                <path d="M14 11v6" />
                                                            </svg>
                                                        </Button>
                                                    </div>
                                                </div>
                                            </CardContent>
                                        </Card>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </Show>
            </Show>

            <Pagination
                page=Signal::derive(move || view_state.get().page)
                total_pages=Signal::derive(move || view_state.get().total_pages)
                on_page=Callback::new(on_page)
            />

            <Dialog open=form_open>
                <DialogHeader>
                    <DialogTitle>
                        {move || if editing.get().is_some() { "Edit note" } else { "New note" }}
                    </DialogTitle>
                </DialogHeader>

                <form class="mt-4 flex flex-col gap-3" on:submit=submit_note>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="note_title" class="text-xs">"Title"</Label>
                        <Input id="note_title" bind_value=draft_title required=true />
                    </div>

                    <div class="flex flex-col gap-1.5">
                        <Label html_for="note_content" class="text-xs">"Content"</Label>
                        <Textarea id="note_content" bind_value=draft_content />
                    </div>

                    <div class="grid gap-3 sm:grid-cols-2">
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="note_reminder" class="text-xs">"Reminder"</Label>
                            <Input
                                id="note_reminder"
                                r#type="datetime-local"
                                bind_value=draft_reminder
                            />
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="note_category" class="text-xs">"Category"</Label>
                            <Select id="note_category" bind_value=draft_category class="w-full">
                                <option value="">"Uncategorized"</option>
                                {move || {
                                    categories
                                        .get()
                                        .into_iter()
                                        .map(|c| {
                                            view! { <option value=c.id.to_string()>{c.title}</option> }
                                        })
                                        .collect_view()
                                }}
                            </Select>
                        </div>
                    </div>

                    <label class="flex items-center gap-2 text-sm hover:cursor-pointer">
                        <Checkbox bind_checked=draft_completed />
                        "Completed"
                    </label>

                    <div class="flex flex-col gap-1.5">
                        <Label class="text-xs">"Image"</Label>
                        <input
                            type="file"
                            accept="image/*"
                            class="text-xs text-muted-foreground"
                            on:change=on_pick_image
                        />
                        {move || {
                            pending_image
                                .get()
                                .map(|f| f.name())
                                .or_else(|| draft_image_path.get())
                                .map(|name| {
                                    view! {
                                        <div class="truncate text-xs text-muted-foreground">{name}</div>
                                    }
                                })
                        }}
                    </div>

                    <Show when=move || form_error.get().is_some() fallback=|| ().into_view()>
                        {move || {
                            form_error.get().map(|e| {
                                view! {
                                    <Alert class="border-destructive/30">
                                        <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                                    </Alert>
                                }
                            })
                        }}
                    </Show>

                    <DialogFooter>
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            attr:r#type="button"
                            on:click=move |_| form_open.set(false)
                        >
                            "Cancel"
                        </Button>
                        <Button size=ButtonSize::Sm attr:disabled=move || form_loading.get()>
                            <span class="inline-flex items-center gap-2">
                                <Show when=move || form_loading.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || {
                                    if editing.get().is_some() { "Update" } else { "Create" }
                                }}
                            </span>
                        </Button>
                    </DialogFooter>
                </form>
            </Dialog>
        </div>
    }
}

#[component]
pub fn CategoriesPage() -> impl IntoView {
    let state = expect_context::<AppContext>();
    let toasts = state.0.toasts;

    let categories: RwSignal<Vec<Category>> = RwSignal::new(vec![]);
    let loading: RwSignal<bool> = RwSignal::new(true);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let seq: RwSignal<RequestSeq> = RwSignal::new(RequestSeq::default());

    let fetch_categories = move || {
        let ticket = seq.try_update(|s| s.issue()).unwrap_or_default();
        loading.set(true);
        error.set(None);

        let api = state.0.api_client.get_untracked();
        spawn_local(async move {
            let result = api.list_categories().await;

            if !seq.with_untracked(|s| s.is_current(ticket)) {
                return;
            }

            match result {
                Ok(cats) => categories.set(cats),
                Err(e) => {
                    leptos::logging::warn!("categories fetch failed: {e}");
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    };

    let loaded_once: RwSignal<bool> = RwSignal::new(false);
    Effect::new(move |_| {
        if loaded_once.get_untracked() {
            return;
        }
        loaded_once.set(true);
        fetch_categories();
    });

    // Category form dialog.
    let form_open: RwSignal<bool> = RwSignal::new(false);
    let editing: RwSignal<Option<Category>> = RwSignal::new(None);
    let draft_title: RwSignal<String> = RwSignal::new(String::new());
    let form_error: RwSignal<Option<String>> = RwSignal::new(None);
    let form_loading: RwSignal<bool> = RwSignal::new(false);

    let open_create = move |_| {
        editing.set(None);
        draft_title.set(String::new());
        form_error.set(None);
        form_open.set(true);
    };

    let open_edit = move |category: Category| {
        draft_title.set(category.title.clone());
        form_error.set(None);
        editing.set(Some(category));
        form_open.set(true);
    };

    let delete_category = move |id: i64| {
        let api = state.0.api_client.get_untracked();
        spawn_local(async move {
            match api.delete_category(id).await {
                Ok(()) => {
                    toasts.success("Category deleted");
                    fetch_categories();
                }
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    let submit_category = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        if form_loading.get_untracked() {
            return;
        }

        let title = draft_title.get_untracked();
        if title.trim().is_empty() {
            form_error.set(Some("Title is required".to_string()));
            return;
        }

        form_loading.set(true);
        form_error.set(None);

        let api = state.0.api_client.get_untracked();
        let mode = editing.get_untracked();

        spawn_local(async move {
            let payload = CategoryPayload { title };
            let result = match &mode {
                Some(category) => api.update_category(category.id, &payload).await.map(|_| ()),
                None => api.create_category(&payload).await.map(|_| ()),
            };

            match result {
                Ok(()) => {
                    form_open.set(false);
                    toasts.success(if mode.is_some() {
                        "Category updated"
                    } else {
                        "Category created"
                    });
                    fetch_categories();
                }
                Err(e) => {
                    form_error.set(Some(e.to_string()));
                }
            }
            form_loading.set(false);
        });
    };

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <div class="space-y-1">
                    <h1 class="text-xl font-semibold">"My categories"</h1>
                    <p class="text-xs text-muted-foreground">
                        {move || format!("{} total", categories.get().len())}
                    </p>
                </div>
                <Button size=ButtonSize::Sm on:click=open_create>"Add category"</Button>
            </div>

            <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                {move || {
                    error.get().map(|e| {
                        view! {
                            <Alert class="border-destructive/30">
                                <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                            </Alert>
                        }
                    })
                }}
            </Show>

            <Show
                when=move || !loading.get()
                fallback=|| view! {
                    <div class="flex items-center gap-2 text-sm text-muted-foreground">
                        <Spinner />
                        "Loading…"
                    </div>
                }
            >
                <Show
                    when=move || !categories.get().is_empty()
                    fallback=|| view! {
                        <div class="rounded-lg border bg-muted p-4 text-sm text-muted-foreground">
                            "No categories yet."
                        </div>
                    }
                >
                    <div class="divide-y rounded-lg border">
                        {move || {
                            categories
                                .get()
                                .into_iter()
                                .map(|category| {
                                    let category_for_edit = category.clone();
                                    let id_for_delete = category.id;

                                    view! {
                                        <div class="group flex items-center justify-between px-4 py-3">
                                            <div class="flex items-center gap-3">
                                                <span class="text-sm font-medium">{category.title.clone()}</span>
                                                <span class="rounded-full bg-muted px-2 py-0.5 text-xs text-muted-foreground">
                                                    {category.notes_count.to_string()}
                                                </span>
                                            </div>

                                            <div class="hidden items-center gap-1 group-hover:flex">
                                                <Button
                                                    variant=ButtonVariant::Ghost
                                                    size=ButtonSize::Icon
                                                    class="h-7 w-7"
                                                    attr:title="Edit"
                                                    on:click=move |_| open_edit(category_for_edit.clone())
                                                >
                                                    <svg
                                                        xmlns="http://www.w3.org/2000/svg"
                                                        width="16"
                                                        height="16"
                                                        viewBox="0 0 24 24"
                                                        fill="none"
                                                        stroke="currentColor"
                                                        stroke-width="2"
                                                        stroke-linecap="round"
                                                        stroke-linejoin="round"
                                                        class="text-muted-foreground"
                                                        aria-hidden="true"
                                                    >
                                                        <path d="M12 20h9" />
                                                        <path d="M16.5 3.5a2.121 2.121 0 0 1 3 3L7 19l-4 1 1-4Z" />
                                                    </svg>
                                                </Button>

                                                <Button
                                                    variant=ButtonVariant::Ghost
                                                    size=ButtonSize::Icon
                                                    class="h-7 w-7 text-destructive"
                                                    attr:title="Delete"
                                                    on:click=move |_| delete_category(id_for_delete)
                                                >
                                                    <svg
                                                        xmlns="http://www.w3.org/2000/svg"
                                                        width="16"
                                                        height="16"
                                                        viewBox="0 0 24 24"
                                                        fill="none"
                                                        stroke="currentColor"
                                                        stroke-width="2"
                                                        stroke-linecap="round"
                                                        stroke-linejoin="round"
                                                        aria-hidden="true"
                                                    >
                                                        <path d="M3 6h18" />
                                                        <path d="M8 6V4h8v2" />
                                                        <path d="M19 6l-1 14H6L5 6" />
                                                        <path d="M10 11v6" />
                                                        <path d="M14 11v6" />
                                                    </svg>
                                                </Button>
                                            </div>
                                        </div>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </Show>
            </Show>

            <Dialog open=form_open>
                <DialogHeader>
                    <DialogTitle>
                        {move || {
                            if editing.get().is_some() { "Edit category" } else { "New category" }
                        }}
                    </DialogTitle>
                </DialogHeader>

                <form class="mt-4 flex flex-col gap-3" on:submit=submit_category>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="category_title" class="text-xs">"Title"</Label>
                        <Input id="category_title" bind_value=draft_title required=true />
                    </div>

                    <Show when=move || form_error.get().is_some() fallback=|| ().into_view()>
                        {move || {
                            form_error.get().map(|e| {
                                view! {
                                    <Alert class="border-destructive/30">
                                        <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                                    </Alert>
                                }
                            })
                        }}
                    </Show>

                    <DialogFooter>
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            attr:r#type="button"
                            on:click=move |_| form_open.set(false)
                        >
                            "Cancel"
                        </Button>
                        <Button size=ButtonSize::Sm attr:disabled=move || form_loading.get()>
                            <span class="inline-flex items-center gap-2">
                                <Show when=move || form_loading.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || {
                                    if editing.get().is_some() { "Update" } else { "Create" }
                                }}
                            </span>
                        </Button>
                    </DialogFooter>
                </form>
            </Dialog>
        </div>
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let state = expect_context::<AppContext>();
    let toasts = state.0.toasts;

    let users: RwSignal<Vec<User>> = RwSignal::new(vec![]);
    let view_state: RwSignal<ListView> = RwSignal::new(ListView::new());
    let loading: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let seq: RwSignal<RequestSeq> = RwSignal::new(RequestSeq::default());
    let search: RwSignal<String> = RwSignal::new(String::new());

    let fetch_users = move || {
        let view = view_state.get_untracked();
        let params = UserListParams {
            offset: view.offset(),
            limit: PAGE_SIZE,
            search: search.get_untracked().trim().to_string(),
        };
        let ticket = seq.try_update(|s| s.issue()).unwrap_or_default();
        loading.set(true);
        error.set(None);

        let api = state.0.api_client.get_untracked();
        spawn_local(async move {
            let result = api.list_users(&params).await;

            if !seq.with_untracked(|s| s.is_current(ticket)) {
                return;
            }

            match result {
                Ok(page) => {
                    users.set(page.content);
                    view_state.update(|v| v.apply_total_pages(page.total_pages));
                }
                Err(e) => {
                    leptos::logging::warn!("users fetch failed: {e}");
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    };

    let loaded_once: RwSignal<bool> = RwSignal::new(false);
    Effect::new(move |_| {
        if loaded_once.get_untracked() {
            return;
        }
        loaded_once.set(true);
        fetch_users();
    });

    let on_search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        view_state.update(|v| v.reset_to_first());
        fetch_users();
    };

    let on_page = move |page: u32| {
        view_state.update(|v| v.set_page(page));
        fetch_users();
    };

    let set_active = move |user_id: i64, is_active: bool| {
        let api = state.0.api_client.get_untracked();
        spawn_local(async move {
            match api.set_user_active(user_id, is_active).await {
                Ok(()) => {
                    toasts.success(if is_active {
                        "User activated"
                    } else {
                        "User deactivated"
                    });
                    fetch_users();
                }
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <div class="space-y-1">
                    <h1 class="text-xl font-semibold">"User management"</h1>
                    <p class="text-xs text-muted-foreground">"Admin only."</p>
                </div>
                <Button
                    variant=ButtonVariant::Outline
                    size=ButtonSize::Sm
                    on:click=move |_| fetch_users()
                >
                    "Refresh"
                </Button>
            </div>

            <form class="flex items-center gap-2" on:submit=on_search>
                <Input
                    class="max-w-xs"
                    placeholder="Search users..."
                    bind_value=search
                />
                <Button variant=ButtonVariant::Outline size=ButtonSize::Sm>"Search"</Button>
            </form>

            <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                {move || {
                    error.get().map(|e| {
                        view! {
                            <Alert class="border-destructive/30">
                                <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                            </Alert>
                        }
                    })
                }}
            </Show>

            <Show
                when=move || !(loading.get() && users.get().is_empty())
                fallback=|| view! {
                    <div class="flex items-center gap-2 text-sm text-muted-foreground">
                        <Spinner />
                        "Loading…"
                    </div>
                }
            >
                <Show
                    when=move || !users.get().is_empty()
                    fallback=|| view! {
                        <div class="rounded-lg border bg-muted p-4 text-sm text-muted-foreground">
                            "No users found."
                        </div>
                    }
                >
                    <div class="overflow-hidden rounded-lg border">
                        <table class="w-full text-sm">
                            <thead class="bg-muted text-left text-xs text-muted-foreground">
                                <tr>
                                    <th class="px-4 py-2 font-medium">"Login"</th>
                                    <th class="px-4 py-2 font-medium">"Registered"</th>
                                    <th class="px-4 py-2 font-medium">"Role"</th>
                                    <th class="px-4 py-2 font-medium">"Status"</th>
                                    <th class="px-4 py-2 font-medium">"Actions"</th>
                                </tr>
                            </thead>
                            <tbody class="divide-y">
                                {move || {
                                    users
                                        .get()
                                        .into_iter()
                                        .map(|user| {
                                            let user_id = user.id;
                                            let is_active = user.is_active;

                                            view! {
                                                <tr>
                                                    <td class="px-4 py-2 font-medium">{user.login.clone()}</td>
                                                    <td class="px-4 py-2 text-muted-foreground">
                                                        {util::display_date(&user.register_date)}
                                                    </td>
                                                    <td class="px-4 py-2 text-muted-foreground">{user.role.clone()}</td>
                                                    <td class="px-4 py-2">
                                                        <span class=if is_active {
                                                            "text-xs text-primary"
                                                        } else {
                                                            "text-xs text-muted-foreground"
                                                        }>
                                                            {if is_active { "Active" } else { "Inactive" }}
                                                        </span>
                                                    </td>
                                                    <td class="px-4 py-2">
                                                        <Switch
                                                            checked=is_active
                                                            on_toggle=Callback::new(move |next| set_active(user_id, next))
                                                        />
                                                    </td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </tbody>
                        </table>
                    </div>
                </Show>
            </Show>

            <Pagination
                page=Signal::derive(move || view_state.get().page)
                total_pages=Signal::derive(move || view_state.get().total_pages)
                on_page=Callback::new(on_page)
            />
        </div>
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let state = expect_context::<AppContext>();
    let toasts = state.0.toasts;
    let session = state.0.session;

    let profile: RwSignal<Option<User>> = RwSignal::new(None);
    let loaded_once: RwSignal<bool> = RwSignal::new(false);

    Effect::new(move |_| {
        if loaded_once.get_untracked() {
            return;
        }
        loaded_once.set(true);

        let api = state.0.api_client.get_untracked();
        spawn_local(async move {
            match api.get_profile().await {
                Ok(user) => profile.set(Some(user)),
                // The header falls back to the Session login.
                Err(e) => leptos::logging::warn!("profile fetch failed: {e}"),
            }
        });
    });

    let current_password: RwSignal<String> = RwSignal::new(String::new());
    let new_password: RwSignal<String> = RwSignal::new(String::new());
    let confirm_password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let success: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let login_name = move || session.current().map(|s| s.login).unwrap_or_default();
    let initial = move || {
        login_name()
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default()
    };
    let role = move || {
        profile
            .get()
            .map(|p| p.role)
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| "User".to_string())
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        if loading.get_untracked() {
            return;
        }

        error.set(None);
        success.set(None);

        let new_val = new_password.get_untracked();
        let confirm_val = confirm_password.get_untracked();

        if let Some(msg) = util::password_rule_violation(&new_val, &confirm_val) {
            error.set(Some(msg.to_string()));
            return;
        }

        loading.set(true);

        let api = state.0.api_client.get_untracked();
        spawn_local(async move {
            match api
                .update_profile(&UpdateProfileRequest { password: new_val })
                .await
            {
                Ok(_) => {
                    success.set(Some("Profile updated".to_string()));
                    toasts.success("Profile updated");
                    current_password.set(String::new());
                    new_password.set(String::new());
                    confirm_password.set(String::new());
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    };

    view! {
        <div class="mx-auto max-w-xl space-y-4">
            <div class="space-y-1">
                <h1 class="text-xl font-semibold">"Profile settings"</h1>
            </div>

            <Card>
                <CardHeader>
                    <div class="flex items-center gap-4">
                        <div class="flex size-14 items-center justify-center rounded-full bg-primary text-xl font-semibold text-primary-foreground">
                            {initial}
                        </div>
                        <div>
                            <CardTitle class="text-lg">{login_name}</CardTitle>
                            <CardDescription class="text-xs">{role}</CardDescription>
                        </div>
                    </div>
                </CardHeader>

                <CardContent>
                    <form class="flex flex-col gap-3" on:submit=on_submit>
                        <h2 class="text-sm font-medium">"Change password"</h2>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="current_password" class="text-xs">
                                "Current password"
                            </Label>
                            <Input
                                id="current_password"
                                r#type="password"
                                bind_value=current_password
                            />
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="new_password" class="text-xs">"New password"</Label>
                            <Input
                                id="new_password"
                                r#type="password"
                                bind_value=new_password
                            />
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="confirm_new_password" class="text-xs">
                                "Confirm new password"
                            </Label>
                            <Input
                                id="confirm_new_password"
                                r#type="password"
                                bind_value=confirm_password
                            />
                        </div>

                        <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                            {move || {
                                error.get().map(|e| {
                                    view! {
                                        <Alert class="border-destructive/30">
                                            <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                                        </Alert>
                                    }
                                })
                            }}
                        </Show>

                        <Show when=move || success.get().is_some() fallback=|| ().into_view()>
                            {move || {
                                success.get().map(|s| {
                                    view! {
                                        <Alert>
                                            <AlertDescription class="text-xs">{s}</AlertDescription>
                                        </Alert>
                                    }
                                })
                            }}
                        </Show>

                        <div>
                            <Button size=ButtonSize::Sm attr:disabled=move || loading.get()>
                                <span class="inline-flex items-center gap-2">
                                    <Show when=move || loading.get() fallback=|| ().into_view()>
                                        <Spinner />
                                    </Show>
                                    {move || if loading.get() { "Saving..." } else { "Save changes" }}
                                </span>
                            </Button>
                        </div>
                    </form>
                </CardContent>
            </Card>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_title_resolves_by_id() {
        let cats = vec![
            Category {
                id: 1,
                title: "Work".to_string(),
                notes_count: 3,
            },
            Category {
                id: 2,
                title: "Ideas".to_string(),
                notes_count: 0,
            },
        ];
        assert_eq!(category_title(&cats, Some(2)), "Ideas");
    }

    #[test]
    fn category_title_falls_back_for_unknown_or_missing() {
        let cats = vec![Category {
            id: 1,
            title: "Work".to_string(),
            notes_count: 3,
        }];
        assert_eq!(category_title(&cats, Some(9)), "Uncategorized");
        assert_eq!(category_title(&cats, None), "Uncategorized");
    }
}
