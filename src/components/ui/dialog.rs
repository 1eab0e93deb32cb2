use icons::X;
use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;
use leptos_ui::clx;
use tw_merge::tw_merge;

mod components {
    use super::*;
    clx! {DialogHeader, div, "flex flex-col gap-1.5"}
    clx! {DialogTitle, h3, "text-lg font-semibold leading-none"}
    clx! {DialogDescription, p, "text-muted-foreground text-sm"}
    clx! {DialogFooter, footer, "flex justify-end gap-2 pt-2"}
}

#[allow(unused_imports)]
pub use components::*;

/// Signal-driven modal: the caller owns one `open` flag per form surface,
/// which is what keeps "at most one Draft per surface" true by construction.
/// Backdrop click and Escape both close without submitting.
#[component]
pub fn Dialog(
    #[prop(into)] open: RwSignal<bool>,
    #[prop(optional, into)] class: String,
    children: ChildrenFn,
) -> impl IntoView {
    let esc = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && open.get_untracked() {
            open.set(false);
        }
    });
    on_cleanup(move || esc.remove());

    let content_class = StoredValue::new(tw_merge!(
        "fixed top-[50%] left-[50%] z-50 w-full max-w-lg translate-x-[-50%] translate-y-[-50%] rounded-xl border bg-background p-6 shadow-lg",
        class
    ));
    let children = StoredValue::new(children);

    view! {
        <Show when=move || open.get() fallback=|| ().into_view()>
            <div
                data-name="DialogBackdrop"
                class="fixed inset-0 z-50 bg-black/50"
                on:click=move |_| open.set(false)
            />
            <div
                data-name="DialogContent"
                class=content_class.get_value()
                role="dialog"
                aria-modal="true"
            >
                <button
                    type="button"
                    class="absolute top-4 right-4 rounded-sm p-1 text-muted-foreground hover:text-foreground [&_svg:not([class*='size-'])]:size-4"
                    aria-label="Close dialog"
                    on:click=move |_| open.set(false)
                >
                    <X />
                </button>
                {move || children.with_value(|c| c())}
            </div>
        </Show>
    }
}
