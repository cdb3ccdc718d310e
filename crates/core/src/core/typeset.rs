//! Options handed to the math auto-renderer, and its result.

use serde::{Deserialize, Serialize};

use crate::error::TypesetError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathDelimiter {
    pub left: String,
    pub right: String,
    /// Block (`true`) or inline (`false`) math.
    pub display: bool,
}

impl MathDelimiter {
    fn new(left: &str, right: &str, display: bool) -> Self {
        Self {
            left: left.to_string(),
            right: right.to_string(),
            display,
        }
    }
}

/// Serialized as the renderer's own option object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypesetOptions {
    pub delimiters: Vec<MathDelimiter>,
    pub throw_on_error: bool,
}

impl Default for TypesetOptions {
    fn default() -> Self {
        // `$$` must precede `$` so display spans are not split as two inline ones.
        Self {
            delimiters: vec![
                MathDelimiter::new("$$", "$$", true),
                MathDelimiter::new("$", "$", false),
                MathDelimiter::new("\\(", "\\)", false),
                MathDelimiter::new("\\[", "\\]", true),
            ],
            throw_on_error: false,
        }
    }
}

impl TypesetOptions {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Turn the messages collected from the renderer's error hook into a result.
pub fn typeset_result(messages: Vec<String>) -> Result<(), TypesetError> {
    if messages.is_empty() {
        Ok(())
    } else {
        Err(TypesetError { messages })
    }
}
