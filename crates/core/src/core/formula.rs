//! Ordered formula-field bookkeeping for the problem-solving screen.
//!
//! This mirrors what the formula widgets hold: the web layer forwards widget
//! edits here and asks which field a toolbar command targets.

use std::fmt;

/// Identity of a formula field. Assigned from a counter at creation and never reused,
/// so it stays stable no matter which other fields are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(u64);

impl FieldId {
    pub fn get(self) -> u64 {
        self.0
    }

    /// DOM id of the field's container element.
    pub fn container_id(self) -> String {
        format!("equation-field-{}", self.0)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaField {
    pub id: FieldId,
    pub latex: String,
}

#[derive(Debug, Clone, Default)]
pub struct FormulaFields {
    fields: Vec<FormulaField>,
    next_id: u64,
    focused: Option<FieldId>,
}

impl FormulaFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty field and focus it.
    pub fn add(&mut self) -> FieldId {
        let id = FieldId(self.next_id);
        self.next_id += 1;
        self.fields.push(FormulaField {
            id,
            latex: String::new(),
        });
        self.focused = Some(id);
        id
    }

    /// Enter inside a field chains to adding a new one after the last field.
    pub fn on_enter(&mut self, _from: FieldId) -> FieldId {
        self.add()
    }

    pub fn remove(&mut self, id: FieldId) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        self.fields.remove(idx);
        if self.focused == Some(id) {
            self.focused = None;
        }
        true
    }

    pub fn set_latex(&mut self, id: FieldId, latex: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|f| f.id == id) {
            Some(f) => {
                f.latex = latex.into();
                true
            }
            None => false,
        }
    }

    pub fn focus(&mut self, id: FieldId) -> bool {
        if self.position(id).is_some() {
            self.focused = Some(id);
            true
        } else {
            false
        }
    }

    pub fn blur(&mut self, id: FieldId) {
        if self.focused == Some(id) {
            self.focused = None;
        }
    }

    pub fn focused(&self) -> Option<FieldId> {
        self.focused
    }

    /// The field a toolbar command goes to: the focused one, else the last one.
    pub fn command_target(&self) -> Option<FieldId> {
        self.focused.or_else(|| self.fields.last().map(|f| f.id))
    }

    /// Insert `command` into the target field's mirrored source and focus it.
    ///
    /// The widget applies the command with its own editing rules and reports
    /// the resulting source back through [`set_latex`](Self::set_latex).
    pub fn insert_command(&mut self, command: &str) -> Option<FieldId> {
        let target = self.command_target()?;
        if let Some(f) = self.fields.iter_mut().find(|f| f.id == target) {
            f.latex.push_str(command);
        }
        self.focused = Some(target);
        Some(target)
    }

    pub fn get(&self, id: FieldId) -> Option<&FormulaField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn ids(&self) -> Vec<FieldId> {
        self.fields.iter().map(|f| f.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormulaField> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field sources in order, with blank entries dropped.
    pub fn non_empty_latex(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|f| f.latex.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn position(&self, id: FieldId) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removing_kth_field_preserves_order_of_the_rest() {
        for n in 1..=6usize {
            for k in 0..n {
                let mut fields = FormulaFields::new();
                let ids: Vec<FieldId> = (0..n).map(|_| fields.add()).collect();

                assert!(fields.remove(ids[k]));
                assert_eq!(fields.len(), n - 1);

                let mut expected = ids.clone();
                expected.remove(k);
                assert_eq!(fields.ids(), expected);
                assert!(fields.get(ids[k]).is_none());
            }
        }
    }

    #[test]
    fn ids_are_never_reused_after_removal() {
        let mut fields = FormulaFields::new();
        let a = fields.add();
        let b = fields.add();
        fields.remove(a);
        fields.remove(b);
        let c = fields.add();
        assert!(c > b);
        assert_eq!(c.container_id(), "equation-field-2");
    }

    #[test]
    fn removing_twice_is_a_no_op() {
        let mut fields = FormulaFields::new();
        let a = fields.add();
        assert!(fields.remove(a));
        assert!(!fields.remove(a));
        assert!(fields.is_empty());
    }

    #[test]
    fn new_field_takes_focus() {
        let mut fields = FormulaFields::new();
        let a = fields.add();
        assert_eq!(fields.focused(), Some(a));
        let b = fields.on_enter(a);
        assert_eq!(fields.focused(), Some(b));
        assert_eq!(fields.ids(), vec![a, b]);
    }

    #[test]
    fn command_goes_to_focused_field_only() {
        let mut fields = FormulaFields::new();
        let a = fields.add();
        let b = fields.add();
        let c = fields.add();
        fields.set_latex(a, "x");
        fields.set_latex(c, "z");
        fields.focus(b);

        assert_eq!(fields.insert_command("\\sqrt"), Some(b));
        assert_eq!(fields.get(a).unwrap().latex, "x");
        assert_eq!(fields.get(b).unwrap().latex, "\\sqrt");
        assert_eq!(fields.get(c).unwrap().latex, "z");
        assert_eq!(fields.focused(), Some(b));
    }

    #[test]
    fn command_without_focus_goes_to_last_field() {
        let mut fields = FormulaFields::new();
        let a = fields.add();
        let b = fields.add();
        fields.blur(b);
        assert_eq!(fields.command_target(), Some(b));

        fields.remove(b);
        assert_eq!(fields.insert_command("\\pi"), Some(a));
        assert_eq!(fields.focused(), Some(a));
    }

    #[test]
    fn focus_leaving_an_earlier_field_sends_commands_to_the_last() {
        let mut fields = FormulaFields::new();
        let a = fields.add();
        let b = fields.add();
        assert!(fields.focus(a));

        fields.blur(a);
        assert_eq!(fields.focused(), None);
        assert_eq!(fields.insert_command("\\theta"), Some(b));
        assert_eq!(fields.get(b).unwrap().latex, "\\theta");
        assert_eq!(fields.get(a).unwrap().latex, "");
    }

    #[test]
    fn blurring_another_field_keeps_focus() {
        let mut fields = FormulaFields::new();
        let a = fields.add();
        let b = fields.add();
        fields.blur(a);
        assert_eq!(fields.focused(), Some(b));
    }

    #[test]
    fn command_with_no_fields_does_nothing() {
        let mut fields = FormulaFields::new();
        assert_eq!(fields.insert_command("\\pi"), None);
    }

    #[test]
    fn removing_focused_field_clears_focus() {
        let mut fields = FormulaFields::new();
        let a = fields.add();
        let b = fields.add();
        fields.remove(b);
        assert_eq!(fields.focused(), None);
        assert!(!fields.focus(b));
        assert!(fields.focus(a));
    }

    #[test]
    fn blank_fields_are_dropped_from_submission() {
        let mut fields = FormulaFields::new();
        let a = fields.add();
        let b = fields.add();
        fields.add();
        fields.set_latex(a, "   ");
        fields.set_latex(b, "");
        assert!(fields.non_empty_latex().is_empty());

        fields.set_latex(b, "P=\\frac{nRT}{V}");
        assert_eq!(fields.non_empty_latex(), vec!["P=\\frac{nRT}{V}".to_string()]);
    }
}
