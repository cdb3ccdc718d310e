//! Screen transitions.
//!
//! Transitions only compute the target [`ViewState`] (after checking it
//! against the catalog). The state is committed with [`Navigator::enter`]
//! once the target view has actually been mounted, so a failed load leaves
//! the navigator where the user still is.

use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::error::NavError;
use crate::view::ViewState;

#[derive(Debug, Clone, Default)]
pub struct Navigator {
    state: ViewState,
}

impl Navigator {
    /// Starts on course selection.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn home(&self) -> ViewState {
        ViewState::Courses
    }

    pub fn about(&self) -> ViewState {
        ViewState::About
    }

    pub fn select_course(&self, catalog: &Catalog, course_id: &str) -> Result<ViewState, NavError> {
        catalog.course(course_id).inspect_err(log_nav_error)?;
        Ok(ViewState::Problems {
            course_id: course_id.to_string(),
        })
    }

    pub fn select_problem(
        &self,
        catalog: &Catalog,
        course_id: &str,
        problem_id: &str,
    ) -> Result<ViewState, NavError> {
        catalog
            .problem(course_id, problem_id)
            .inspect_err(log_nav_error)?;
        Ok(ViewState::Problem {
            course_id: course_id.to_string(),
            problem_id: problem_id.to_string(),
        })
    }

    /// Problem → its course's list; anything else → course selection.
    pub fn back(&self) -> ViewState {
        match &self.state {
            ViewState::Problem { course_id, .. } => ViewState::Problems {
                course_id: course_id.clone(),
            },
            ViewState::Problems { .. } | ViewState::Courses | ViewState::About => {
                ViewState::Courses
            }
        }
    }

    pub fn enter(&mut self, state: ViewState) {
        info!(view = state.view_name().slug(), course = ?state.course_id(), "entered view");
        self.state = state;
    }
}

fn log_nav_error(e: &NavError) {
    warn!("navigation rejected: {e}");
}
