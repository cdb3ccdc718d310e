use thiserror::Error;

use crate::view::ViewName;

/// Lookup failures while moving between screens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("course not found: {0}")]
    CourseNotFound(String),
    #[error("problem {problem_id} not found in course {course_id}")]
    ProblemNotFound {
        course_id: String,
        problem_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Fetch failed or returned a non-success status. The previous view stays mounted.
    #[error("failed to load view '{}': {reason}", .view.slug())]
    ViewLoadFailed { view: ViewName, reason: String },
    /// A newer navigation started before this load finished.
    #[error("load of view '{}' superseded (generation {generation}, latest {latest})", .view.slug())]
    Stale {
        view: ViewName,
        generation: u64,
        latest: u64,
    },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("problems keyed by unknown course: {0}")]
    UnknownCourse(String),
    #[error("course has no problems: {0}")]
    EmptyCourse(String),
    #[error("duplicate course id: {0}")]
    DuplicateCourse(String),
    #[error("duplicate problem id {problem_id} in course {course_id}")]
    DuplicateProblem {
        course_id: String,
        problem_id: String,
    },
}

/// Messages reported by the math typesetter for spans it could not render.
///
/// The statement still shows the raw source for those spans.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} math span(s) failed to typeset: {}", .messages.len(), .messages.join("; "))]
pub struct TypesetError {
    pub messages: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
