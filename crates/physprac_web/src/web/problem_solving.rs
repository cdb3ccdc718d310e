use hashbrown::HashMap;
use leptos::ev::{FocusEvent, MouseEvent};
use leptos::leptos_dom::helpers::window_event_listener;
use leptos::prelude::*;
use physprac::config::AppConfig;
use physprac::formula::FieldId;
use physprac::session::ProblemSession;
use physprac::toolbar::ToolbarCommand;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};

use super::formula_bridge::{self, FieldWidget};

type Widgets = StoredValue<HashMap<FieldId, FieldWidget>, LocalStorage>;

#[component]
pub(super) fn ProblemSolving(
    session: ProblemSession,
    config: AppConfig,
    on_back: Callback<()>,
) -> impl IntoView {
    let title = session.title().to_string();
    let statement_html = session.statement_html.clone();
    let session = RwSignal::new(session);
    let widgets: Widgets = StoredValue::new_local(HashMap::new());
    let (last_submitted, set_last_submitted) = signal::<Option<usize>>(None);

    let widget_options_json =
        serde_json::to_string(&config.formula).unwrap_or_else(|_| "{}".to_string());
    let typeset_options = config.typeset.clone();

    let statement_ref = NodeRef::<leptos::html::Div>::new();
    Effect::new(move |_| {
        let Some(el) = statement_ref.get() else {
            return;
        };
        let opts = typeset_options.clone();
        // Let the statement HTML land in the DOM before typesetting it.
        spawn_local(async move {
            let _ = JsFuture::from(js_sys::Promise::resolve(&JsValue::NULL)).await;
            if let Err(e) = formula_bridge::typeset(&el, &opts) {
                tracing::warn!("statement typesetting: {e}");
            }
        });
    });

    let add_field = Callback::new(move |_: ()| {
        session.update(|s| {
            s.fields.add();
        });
    });

    let remove_field = Callback::new(move |id: FieldId| {
        session.update(|s| {
            s.fields.remove(id);
        });
        widgets.update_value(|w| {
            w.remove(&id);
        });
    });

    let focus_field = Callback::new(move |id: FieldId| {
        session.update(|s| {
            s.fields.focus(id);
        });
    });

    let blur_field = Callback::new(move |id: FieldId| {
        session.update(|s| s.fields.blur(id));
    });

    let mirror_latex = Callback::new(move |(id, latex): (FieldId, String)| {
        session.update(|s| {
            s.fields.set_latex(id, latex);
        });
    });

    let run_command = Callback::new(move |command: String| {
        let mut target = None;
        session.update(|s| target = s.fields.insert_command(&command));
        let Some(id) = target else {
            return;
        };
        widgets.with_value(|w| {
            if let Some(widget) = w.get(&id) {
                widget.insert(&command);
            }
        });
    });

    let submit = move |_| {
        let readings: Vec<(FieldId, String)> = widgets.with_value(|w| {
            session
                .with_untracked(|s| s.fields.ids())
                .into_iter()
                .filter_map(|id| w.get(&id).map(|widget| (id, widget.latex())))
                .collect()
        });
        session.update(|s| {
            for (id, latex) in readings {
                s.fields.set_latex(id, latex);
            }
        });
        let submission = session.with_untracked(|s| s.submit());
        submission.log();
        set_last_submitted.set(Some(submission.entries.len()));
    };

    // The trigger stops propagation, so any click reaching the window is outside.
    let outside_click = window_event_listener(leptos::ev::click, move |_| {
        if session.with_untracked(|s| s.dropdown.is_open()) {
            session.update(|s| s.dropdown.on_document_click(false));
        }
    });
    on_cleanup(move || outside_click.remove());

    let toolbar = config.toolbar.clone();
    let dropdown_items = config.dropdown.clone();
    let dropdown_open = move || session.with(|s| s.dropdown.is_open());

    view! {
        <div class="solving-layout">
            <section id="problem-statement" class="column">
                <button class="btn ghost back-button" on:click=move |_| on_back.run(())>
                    "← Problems"
                </button>
                <div class="column-content" node_ref=statement_ref>
                    <h3>{title}</h3>
                    <div class="statement" inner_html=statement_html></div>
                </div>
            </section>

            <section id="solution-entry" class="column">
                <div class="toolbar">
                    {toolbar
                        .into_iter()
                        .map(|cmd| view! { <ToolbarButton cmd=cmd on_command=run_command /> })
                        .collect_view()}
                    <div class="dropdown">
                        <button
                            class="dropbtn toolbar-button"
                            on:click=move |ev: MouseEvent| {
                                ev.stop_propagation();
                                session.update(|s| s.dropdown.toggle());
                            }
                        >
                            "More ▾"
                        </button>
                        <div class="dropdown-content" class:show=dropdown_open>
                            {dropdown_items
                                .into_iter()
                                .map(|cmd| view! { <ToolbarButton cmd=cmd on_command=run_command /> })
                                .collect_view()}
                        </div>
                    </div>
                </div>

                <div id="equations-container">
                    <For
                        each=move || session.with(|s| s.fields.ids())
                        key=|id| *id
                        children=move |id| {
                            view! {
                                <FormulaRow
                                    id=id
                                    widgets=widgets
                                    options_json=widget_options_json.clone()
                                    on_edit=mirror_latex
                                    on_enter=add_field
                                    on_focus=focus_field
                                    on_blur=blur_field
                                    on_remove=remove_field
                                />
                            }
                        }
                    />
                </div>

                <div class="entry-actions">
                    <button id="add-equation" class="btn" on:click=move |_| add_field.run(())>
                        "+ Add equation"
                    </button>
                    <button id="submit-solution" class="btn primary" on:click=submit>
                        "Submit"
                    </button>
                </div>
                <Show when=move || last_submitted.get().is_some()>
                    <p class="submit-status">
                        {move || match last_submitted.get().unwrap_or(0) {
                            0 => "Nothing to submit: every field is empty.".to_string(),
                            1 => "Recorded 1 formula.".to_string(),
                            n => format!("Recorded {n} formulas."),
                        }}
                    </p>
                </Show>
            </section>
        </div>
    }
}

#[component]
fn ToolbarButton(cmd: ToolbarCommand, on_command: Callback<String>) -> impl IntoView {
    let latex = cmd.latex;
    view! {
        <button
            class="toolbar-button"
            title=latex.clone()
            attr:data-latex=latex.clone()
            // Keep the caret in the formula field.
            on:mousedown=|ev: MouseEvent| ev.prevent_default()
            on:click=move |_| on_command.run(latex.clone())
        >
            {cmd.label}
        </button>
    }
}

#[component]
fn FormulaRow(
    id: FieldId,
    widgets: Widgets,
    options_json: String,
    on_edit: Callback<(FieldId, String)>,
    on_enter: Callback<()>,
    on_focus: Callback<FieldId>,
    on_blur: Callback<FieldId>,
    on_remove: Callback<FieldId>,
) -> impl IntoView {
    let container_ref = NodeRef::<leptos::html::Span>::new();

    Effect::new(move |_| {
        let Some(span) = container_ref.get() else {
            return;
        };
        if widgets.with_value(|w| w.contains_key(&id)) {
            return;
        }
        let created = FieldWidget::create(
            &span,
            &options_json,
            move |latex| on_edit.run((id, latex)),
            move || on_enter.run(()),
        );
        match created {
            Ok(widget) => {
                widget.focus();
                widgets.update_value(|w| {
                    w.insert(id, widget);
                });
            }
            Err(e) => tracing::warn!("field {id}: {e}"),
        }
    });

    let container_id = id.container_id();
    let row_selector = format!("#{container_id}");

    view! {
        <div
            id=container_id
            class="equation-input-field"
            on:focusin=move |_| on_focus.run(id)
            on:focusout=move |ev: FocusEvent| {
                if !keeps_field_focus(&ev, &row_selector) {
                    on_blur.run(id);
                }
            }
        >
            <span class="math-field-container" node_ref=container_ref></span>
            <button
                class="remove-equation-button"
                title="Remove equation"
                on:click=move |_| on_remove.run(id)
            >
                "×"
            </button>
        </div>
    }
}

/// Focus moving inside the row or onto the toolbar still counts as this field.
fn keeps_field_focus(ev: &FocusEvent, row_selector: &str) -> bool {
    let Some(next) = ev
        .related_target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
    else {
        return false;
    };
    [".toolbar-button", row_selector]
        .into_iter()
        .any(|sel| matches!(next.closest(sel), Ok(Some(_))))
}
