use serde::{Deserialize, Serialize};

/// A toolbar button: label shown to the user, command handed to the formula widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarCommand {
    pub label: String,
    pub latex: String,
}

impl ToolbarCommand {
    pub fn new(label: impl Into<String>, latex: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            latex: latex.into(),
        }
    }
}

/// Buttons always visible above the fields.
pub fn default_toolbar() -> Vec<ToolbarCommand> {
    [
        ("a/b", "\\frac"),
        ("√", "\\sqrt"),
        ("xⁿ", "^"),
        ("xₙ", "_"),
        ("( )", "("),
        ("π", "\\pi"),
        ("θ", "\\theta"),
        ("Δ", "\\Delta"),
        ("·", "\\cdot"),
        ("×", "\\times"),
    ]
    .into_iter()
    .map(|(label, latex)| ToolbarCommand::new(label, latex))
    .collect()
}

/// Less common symbols, behind the "More" dropdown.
pub fn default_dropdown() -> Vec<ToolbarCommand> {
    [
        ("∫", "\\int"),
        ("∑", "\\sum"),
        ("∂", "\\partial"),
        ("∞", "\\infty"),
        ("≈", "\\approx"),
        ("≤", "\\le"),
        ("≥", "\\ge"),
        ("α", "\\alpha"),
        ("β", "\\beta"),
        ("ω", "\\omega"),
        ("μ", "\\mu"),
        ("ρ", "\\rho"),
        ("vec", "\\vec"),
    ]
    .into_iter()
    .map(|(label, latex)| ToolbarCommand::new(label, latex))
    .collect()
}

/// Open/closed state of the auxiliary symbol menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dropdown {
    open: bool,
}

impl Dropdown {
    pub fn is_open(self) -> bool {
        self.open
    }

    /// Trigger activated.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Any click anywhere. Clicks on the trigger itself are handled by [`toggle`](Self::toggle).
    pub fn on_document_click(&mut self, on_trigger: bool) {
        if !on_trigger {
            self.open = false;
        }
    }
}
