use leptos::prelude::*;
use tw_merge::tw_merge;

/// Controlled toggle: the caller owns the state and flips it in `on_toggle`
/// (typically after the backend confirms the mutation via re-fetch).
#[component]
pub fn Switch(
    #[prop(into, optional)] class: String,
    #[prop(optional)] checked: bool,
    #[prop(optional)] disabled: bool,
    #[prop(into)] on_toggle: Callback<bool>,
) -> impl IntoView {
    let track_class = tw_merge!(
        "relative inline-flex h-5 w-9 shrink-0 items-center rounded-full border border-transparent transition-colors hover:cursor-pointer",
        "disabled:pointer-events-none disabled:opacity-50",
        if checked { "bg-primary" } else { "bg-input" },
        class
    );

    let thumb_class = if checked {
        "pointer-events-none block size-4 translate-x-4 rounded-full bg-background shadow transition-transform"
    } else {
        "pointer-events-none block size-4 translate-x-0.5 rounded-full bg-background shadow transition-transform"
    };

    view! {
        <button
            data-name="Switch"
            type="button"
            role="switch"
            aria-checked=checked.to_string()
            class=track_class
            disabled=disabled
            on:click=move |_| on_toggle.run(!checked)
        >
            <span class=thumb_class />
        </button>
    }
}
