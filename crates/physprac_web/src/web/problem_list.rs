use leptos::prelude::*;
use physprac::catalog::{Course, Problem};

#[component]
pub(super) fn ProblemList(
    course: Course,
    problems: Vec<Problem>,
    on_back: Callback<()>,
    on_select: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="problem-list-view">
            <button class="btn ghost back-button" on:click=move |_| on_back.run(())>
                "← Courses"
            </button>
            <h2 id="course-title">{course.title}</h2>
            <ul id="problem-list" class="item-list">
                {problems
                    .into_iter()
                    .map(|problem| {
                        let id = problem.id;
                        view! {
                            <li class="item" on:click=move |_| on_select.run(id.clone())>
                                {problem.title}
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}
