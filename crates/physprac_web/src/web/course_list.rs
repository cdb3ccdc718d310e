use leptos::prelude::*;
use physprac::catalog::Course;

/// One clickable item per course, in catalog order.
#[component]
pub(super) fn CourseList(courses: Vec<Course>, on_select: Callback<String>) -> impl IntoView {
    view! {
        <ul id="course-list" class="item-list">
            {courses
                .into_iter()
                .map(|course| {
                    let id = course.id;
                    view! {
                        <li class="item" on:click=move |_| on_select.run(id.clone())>
                            {course.title}
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}
