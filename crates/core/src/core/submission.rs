use serde::Serialize;
use tracing::info;

/// Formulas entered for one problem, blanks removed.
///
/// Submissions are only logged; nothing grades or stores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub course_id: String,
    pub problem_id: String,
    pub entries: Vec<String>,
}

impl Submission {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn log(&self) {
        info!(
            course = %self.course_id,
            problem = %self.problem_id,
            count = self.entries.len(),
            "submitted solution: {}",
            self.to_json()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_payload_lists_entries_in_order() {
        let s = Submission {
            course_id: "thermo".into(),
            problem_id: "t1".into(),
            entries: vec!["PV=nRT".into(), "P=\\frac{nRT}{V}".into()],
        };
        assert_eq!(
            s.to_json(),
            r#"{"course_id":"thermo","problem_id":"t1","entries":["PV=nRT","P=\\frac{nRT}{V}"]}"#
        );
        assert!(!s.is_empty());
    }
}
