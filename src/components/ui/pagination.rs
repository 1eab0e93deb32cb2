use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use leptos::prelude::*;

/// Page picker for the list views. Hidden while everything fits on one page.
#[component]
pub fn Pagination(
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] total_pages: Signal<u32>,
    #[prop(into)] on_page: Callback<u32>,
) -> impl IntoView {
    view! {
        <Show when=move || { total_pages.get() > 1 } fallback=|| ().into_view()>
            <nav class="flex items-center justify-center gap-1 pt-4" aria-label="Pagination">
                <Button
                    variant=ButtonVariant::Outline
                    size=ButtonSize::Sm
                    attr:disabled=move || page.get() <= 1
                    on:click=move |_| {
                        let p = page.get_untracked();
                        if p > 1 {
                            on_page.run(p - 1);
                        }
                    }
                >
                    "Prev"
                </Button>

                {move || {
                    let current = page.get();
                    (1..=total_pages.get())
                        .map(|p| {
                            let variant = if p == current {
                                ButtonVariant::Default
                            } else {
                                ButtonVariant::Ghost
                            };
                            view! {
                                <Button
                                    variant=variant
                                    size=ButtonSize::Sm
                                    on:click=move |_| on_page.run(p)
                                >
                                    {p.to_string()}
                                </Button>
                            }
                        })
                        .collect_view()
                }}

                <Button
                    variant=ButtonVariant::Outline
                    size=ButtonSize::Sm
                    attr:disabled=move || page.get() >= total_pages.get()
                    on:click=move |_| {
                        let p = page.get_untracked();
                        if p < total_pages.get_untracked() {
                            on_page.run(p + 1);
                        }
                    }
                >
                    "Next"
                </Button>
            </nav>
        </Show>
    }
}
