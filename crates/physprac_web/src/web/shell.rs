use leptos::prelude::*;

use crate::ui_model::{HeaderAction, NoticeLevel, NoticeQueue};

#[component]
pub(super) fn Topbar(
    loading: ReadSignal<bool>,
    on_home: Callback<()>,
    on_about: Callback<()>,
) -> impl IntoView {
    let home = HeaderAction::Home;
    let about = HeaderAction::About;

    view! {
        <header class="app-header">
            <div class="app-header-left">
                <h1 class="brand">"Physics Practice"</h1>
            </div>
            <div class="app-header-right">
                <Show when=move || loading.get()>
                    <span class="loading-dot" title="Loading view"></span>
                </Show>
                <button id=home.element_id() class="btn" on:click=move |_| on_home.run(())>
                    {home.label()}
                </button>
                <button id=about.element_id() class="btn ghost" on:click=move |_| on_about.run(())>
                    {about.label()}
                </button>
            </div>
        </header>
    }
}

#[component]
pub(super) fn NoticeStack(notices: RwSignal<NoticeQueue>) -> impl IntoView {
    view! {
        <div class="notice-stack" aria-live="polite" aria-relevant="additions removals">
            <For
                each=move || notices.with(|q| q.notices().to_vec())
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    let class = match n.level {
                        NoticeLevel::Info => "notice info",
                        NoticeLevel::Error => "notice error",
                    };
                    view! {
                        <div class=class role="status">
                            <div class="notice-message">{n.message}</div>
                            <button
                                class="notice-close"
                                title="Dismiss"
                                on:click=move |_| notices.update(|q| {
                                    q.dismiss(id);
                                })
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
