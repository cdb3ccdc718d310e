//! Static course/problem content.
//!
//! The catalog is parsed once from JSON, validated, and never mutated.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, NavError};

const BUILTIN_CATALOG_JSON: &str = include_str!("../../data/catalog.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    pub title: String,
    /// Markdown with `$...$` / `$$...$$` math spans.
    pub description: String,
    /// Reference solution, same format as `description`. Never compared against submissions.
    pub solution: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    courses: Vec<Course>,
    problems: HashMap<String, Vec<Problem>>,
}

impl Catalog {
    /// The catalog shipped with the app.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG_JSON)
    }

    /// Parse and validate a catalog document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn new(courses: Vec<Course>, problems: HashMap<String, Vec<Problem>>) -> Result<Self, CatalogError> {
        let catalog = Self { courses, problems };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Checks id uniqueness and that problems and courses reference each other.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.courses.len());
        for course in &self.courses {
            if !seen.insert(course.id.as_str()) {
                return Err(CatalogError::DuplicateCourse(course.id.clone()));
            }
        }

        for (course_id, problems) in &self.problems {
            if !seen.contains(course_id.as_str()) {
                return Err(CatalogError::UnknownCourse(course_id.clone()));
            }
            let mut ids: HashSet<&str> = HashSet::with_capacity(problems.len());
            for p in problems {
                if !ids.insert(p.id.as_str()) {
                    return Err(CatalogError::DuplicateProblem {
                        course_id: course_id.clone(),
                        problem_id: p.id.clone(),
                    });
                }
            }
        }

        for course in &self.courses {
            let has_problems = self
                .problems
                .get(&course.id)
                .is_some_and(|ps| !ps.is_empty());
            if !has_problems {
                return Err(CatalogError::EmptyCourse(course.id.clone()));
            }
        }

        Ok(())
    }

    /// Courses in display order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course(&self, course_id: &str) -> Result<&Course, NavError> {
        self.courses
            .iter()
            .find(|c| c.id == course_id)
            .ok_or_else(|| NavError::CourseNotFound(course_id.to_string()))
    }

    /// Problems of a course in stored order.
    pub fn problems_for(&self, course_id: &str) -> Result<&[Problem], NavError> {
        self.course(course_id)?;
        Ok(self
            .problems
            .get(course_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]))
    }

    pub fn problem(&self, course_id: &str, problem_id: &str) -> Result<&Problem, NavError> {
        self.problems_for(course_id)?
            .iter()
            .find(|p| p.id == problem_id)
            .ok_or_else(|| NavError::ProblemNotFound {
                course_id: course_id.to_string(),
                problem_id: problem_id.to_string(),
            })
    }
}
