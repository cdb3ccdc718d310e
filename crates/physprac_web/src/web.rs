use leptos::prelude::*;
use physprac::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::ui_model::{NoticeLevel, NoticeQueue};

mod config;
mod course_list;
mod formula_bridge;
mod fragment;
mod problem_list;
mod problem_solving;
mod shell;

use course_list::CourseList;
use problem_list::ProblemList;
use problem_solving::ProblemSolving;
use shell::{NoticeStack, Topbar};

pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    mount_to_body(|| view! { <App /> });
}

/// What `<main>` currently shows.
#[derive(Clone, PartialEq)]
struct Mounted {
    state: ViewState,
    markup: String,
}

#[component]
fn App() -> impl IntoView {
    let notices = RwSignal::new(NoticeQueue::default());

    let config = match config::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("ignoring page config: {e}");
            notices.update(|q| {
                q.push(NoticeLevel::Error, format!("Ignoring page config: {e}"));
            });
            AppConfig::default()
        }
    };
    let catalog = match Catalog::builtin() {
        Ok(c) => Some(c),
        Err(e) => {
            tracing::error!("catalog rejected: {e}");
            notices.update(|q| {
                q.push(NoticeLevel::Error, format!("Course catalog unavailable: {e}"));
            });
            None
        }
    };
    let catalog_ok = catalog.is_some();

    let main_id = config.main_content_id.clone();
    let loader = StoredValue::new(ViewLoader::new(config.views_base.clone()));
    let config = StoredValue::new(config);
    let catalog = StoredValue::new(catalog.unwrap_or_default());
    let navigator = StoredValue::new(Navigator::new());

    let (mounted, set_mounted) = signal::<Option<Mounted>>(None);
    let (loading, set_loading) = signal(false);

    let report_load_error = move |e: LoadError| {
        if matches!(e, LoadError::Stale { .. }) {
            tracing::debug!("{e}");
        } else {
            tracing::warn!("{e}");
        }
        notices.update(|q| {
            q.push_load_error(&e);
        });
        set_loading.set(loader.with_value(|l| l.is_loading()));
    };

    let navigate = Callback::new(move |target: ViewState| {
        let mut ticket = None;
        loader.update_value(|l| ticket = Some(l.begin(target)));
        let Some(ticket) = ticket else {
            return;
        };
        set_loading.set(true);

        spawn_local(async move {
            let fetched = fragment::fetch_text(ticket.markup_url()).await;

            let mut completed = None;
            loader.update_value(|l| completed = Some(l.complete(ticket, fetched)));
            let plan = match completed {
                Some(Ok(plan)) => plan,
                Some(Err(e)) => return report_load_error(e),
                None => return,
            };

            if !loader.with_value(|l| l.is_current(plan.generation)) {
                tracing::debug!("view {}: superseded before attaching", plan.view().slug());
                return;
            }

            tracing::debug!(
                "view {}: swapping companions {:?}",
                plan.view().slug(),
                plan.companions
            );
            let attached = fragment::attach_companions(&plan.companions);
            loader.update_value(|l| l.companions_attached(&plan));
            let outcome = match attached {
                Ok(Some(loaded)) => fragment::script_loaded(loaded).await,
                Ok(None) => Ok(()),
                Err(reason) => Err(reason),
            };
            if let Err(reason) = outcome {
                let mut failed = None;
                loader.update_value(|l| failed = Some(l.fail(&plan, reason)));
                roll_back(loader, plan.generation).await;
                if let Some(e) = failed {
                    report_load_error(e);
                }
                return;
            }

            let generation = plan.generation;
            let state = plan.state.clone();
            let markup = plan.markup.clone();
            let mut result = None;
            loader.update_value(|l| result = Some(l.mount(plan)));
            match result {
                Some(Ok(_)) => {
                    navigator.update_value(|n| n.enter(state.clone()));
                    set_mounted.set(Some(Mounted { state, markup }));
                    set_loading.set(loader.with_value(|l| l.is_loading()));
                }
                Some(Err(e)) => {
                    roll_back(loader, generation).await;
                    report_load_error(e);
                }
                None => {}
            }
        });
    });

    let show_courses = Callback::new(move |_: ()| {
        navigate.run(navigator.with_value(|n| n.home()));
    });

    let show_about = Callback::new(move |_: ()| {
        navigate.run(navigator.with_value(|n| n.about()));
    });

    let go_back = Callback::new(move |_: ()| {
        navigate.run(navigator.with_value(|n| n.back()));
    });

    let show_problems = Callback::new(move |course_id: String| {
        let target = catalog.with_value(|c| navigator.with_value(|n| n.select_course(c, &course_id)));
        match target {
            Ok(target) => navigate.run(target),
            Err(e) => notices.update(|q| {
                q.push_nav_error(&e);
            }),
        }
    });

    let show_problem = Callback::new(move |(course_id, problem_id): (String, String)| {
        let target = catalog.with_value(|c| {
            navigator.with_value(|n| n.select_problem(c, &course_id, &problem_id))
        });
        match target {
            Ok(target) => navigate.run(target),
            Err(e) => notices.update(|q| {
                q.push_nav_error(&e);
            }),
        }
    });

    let render_view = move |m: Mounted| {
        let body = match m.state {
            ViewState::Courses => {
                let courses = catalog.with_value(|c| c.courses().to_vec());
                view! { <CourseList courses=courses on_select=show_problems /> }.into_any()
            }
            ViewState::Problems { course_id } => {
                let lookup = catalog.with_value(|c| {
                    let course = c.course(&course_id)?.clone();
                    let problems = c.problems_for(&course_id)?.to_vec();
                    Ok::<_, NavError>((course, problems))
                });
                match lookup {
                    Ok((course, problems)) => {
                        let on_select = Callback::new(move |problem_id: String| {
                            show_problem.run((course_id.clone(), problem_id));
                        });
                        view! {
                            <ProblemList
                                course=course
                                problems=problems
                                on_back=go_back
                                on_select=on_select
                            />
                        }
                        .into_any()
                    }
                    Err(e) => view! { <ViewError message=e.to_string() /> }.into_any(),
                }
            }
            ViewState::Problem {
                course_id,
                problem_id,
            } => match catalog.with_value(|c| ProblemSession::open(c, &course_id, &problem_id)) {
                Ok(session) => {
                    let cfg = config.with_value(|c| c.clone());
                    view! { <ProblemSolving session=session config=cfg on_back=go_back /> }
                        .into_any()
                }
                Err(e) => view! { <ViewError message=e.to_string() /> }.into_any(),
            },
            ViewState::About => ().into_any(),
        };

        view! {
            <div class="view-fragment" inner_html=m.markup></div>
            {body}
        }
    };

    if catalog_ok {
        navigate.run(ViewState::Courses);
    }

    view! {
        <div class="app">
            <Topbar loading=loading on_home=show_courses on_about=show_about />
            <NoticeStack notices=notices />
            <main id=main_id class="main-content">
                {move || mounted.get().map(render_view)}
            </main>
        </div>
    }
}

/// Put back the mounted view's companions after a load that attached its own
/// but never mounted.
async fn roll_back(loader: StoredValue<ViewLoader>, generation: u64) {
    let mut restore = None;
    loader.update_value(|l| restore = l.rollback(generation));
    let Some(restore) = restore else {
        return;
    };
    let restored = match fragment::attach_companions(&restore) {
        Ok(Some(loaded)) => fragment::script_loaded(loaded).await,
        Ok(None) => Ok(()),
        Err(reason) => Err(reason),
    };
    if let Err(reason) = restored {
        tracing::warn!("restoring view companions: {reason}");
    }
}

#[component]
fn ViewError(message: String) -> impl IntoView {
    view! {
        <div class="view-error" role="alert">
            <p>"This page cannot be shown."</p>
            <p class="subtle">{message}</p>
        </div>
    }
}
