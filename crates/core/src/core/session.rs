//! State behind one problem-solving screen.

use crate::catalog::{Catalog, Problem};
use crate::error::NavError;
use crate::formula::FormulaFields;
use crate::markup::render_statement;
use crate::submission::Submission;
use crate::toolbar::Dropdown;

#[derive(Debug, Clone)]
pub struct ProblemSession {
    pub course_id: String,
    pub problem: Problem,
    /// Description rendered to HTML, math still in source form.
    pub statement_html: String,
    pub fields: FormulaFields,
    pub dropdown: Dropdown,
}

impl ProblemSession {
    /// Opens the screen with a single focused formula field.
    pub fn open(catalog: &Catalog, course_id: &str, problem_id: &str) -> Result<Self, NavError> {
        let problem = catalog.problem(course_id, problem_id)?.clone();
        let statement_html = render_statement(&problem.description);
        let mut fields = FormulaFields::new();
        fields.add();
        Ok(Self {
            course_id: course_id.to_string(),
            problem,
            statement_html,
            fields,
            dropdown: Dropdown::default(),
        })
    }

    pub fn title(&self) -> &str {
        &self.problem.title
    }

    pub fn submit(&self) -> Submission {
        Submission {
            course_id: self.course_id.clone(),
            problem_id: self.problem.id.clone(),
            entries: self.fields.non_empty_latex(),
        }
    }
}
