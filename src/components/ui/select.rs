use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

/// Thin wrapper over the native `<select>`; options are passed as children.
/// Filter rows hold their state as plain strings, so the binding is string
/// valued and callers parse what they need.
#[component]
pub fn Select(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] id: String,
    #[prop(into)] bind_value: RwSignal<String>,
    children: Children,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "h-9 rounded-lg border border-input bg-background px-2 text-sm shadow-sm outline-none transition-colors hover:cursor-pointer",
        "focus-visible:border-ring focus-visible:ring-2 focus-visible:ring-ring/50",
        class
    );

    let on_change = move |ev: web_sys::Event| {
        if let Some(target) = ev.target() {
            if let Some(select) = target.dyn_ref::<web_sys::HtmlSelectElement>() {
                bind_value.set(select.value());
            }
        }
    };

    view! {
        <select
            data-name="Select"
            class=merged_class
            id=id
            prop:value=move || bind_value.get()
            on:change=on_change
        >
            {children()}
        </select>
    }
}
