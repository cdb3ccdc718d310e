//! Screens and the fragments that back them.

/// A view fragment, addressed by its directory under the views base path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewName {
    CourseSelection,
    ProblemList,
    ProblemSolving,
    About,
}

/// Which companion files a fragment attaches next to its markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewAssets {
    pub stylesheet: bool,
    pub script: bool,
}

impl ViewName {
    pub fn slug(self) -> &'static str {
        match self {
            ViewName::CourseSelection => "course-selection",
            ViewName::ProblemList => "problem-list",
            ViewName::ProblemSolving => "problem-solving",
            ViewName::About => "about",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.slug() == slug)
    }

    /// `about` is plain static content: no stylesheet, no script.
    /// Only the problem-solving screen ships a script (the formula/typesetting glue).
    pub fn assets(self) -> ViewAssets {
        match self {
            ViewName::About => ViewAssets {
                stylesheet: false,
                script: false,
            },
            ViewName::CourseSelection | ViewName::ProblemList => ViewAssets {
                stylesheet: true,
                script: false,
            },
            ViewName::ProblemSolving => ViewAssets {
                stylesheet: true,
                script: true,
            },
        }
    }

    pub fn markup_url(self, base: &str) -> String {
        format!("{}/{}/index.html", base.trim_end_matches('/'), self.slug())
    }

    pub fn stylesheet_url(self, base: &str) -> Option<String> {
        self.assets()
            .stylesheet
            .then(|| format!("{}/{}/style.css", base.trim_end_matches('/'), self.slug()))
    }

    pub fn script_url(self, base: &str) -> Option<String> {
        self.assets()
            .script
            .then(|| format!("{}/{}/script.js", base.trim_end_matches('/'), self.slug()))
    }

    pub fn all() -> &'static [ViewName] {
        &[
            ViewName::CourseSelection,
            ViewName::ProblemList,
            ViewName::ProblemSolving,
            ViewName::About,
        ]
    }
}

/// Where the user is. Each state is backed by exactly one [`ViewName`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Courses,
    Problems {
        course_id: String,
    },
    Problem {
        course_id: String,
        problem_id: String,
    },
    About,
}

impl ViewState {
    pub fn view_name(&self) -> ViewName {
        match self {
            ViewState::Courses => ViewName::CourseSelection,
            ViewState::Problems { .. } => ViewName::ProblemList,
            ViewState::Problem { .. } => ViewName::ProblemSolving,
            ViewState::About => ViewName::About,
        }
    }

    pub fn course_id(&self) -> Option<&str> {
        match self {
            ViewState::Problems { course_id } | ViewState::Problem { course_id, .. } => {
                Some(course_id)
            }
            ViewState::Courses | ViewState::About => None,
        }
    }
}
