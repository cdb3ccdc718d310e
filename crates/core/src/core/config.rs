use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::toolbar::{default_dropdown, default_toolbar, ToolbarCommand};
use crate::typeset::TypesetOptions;

/// Options passed to every formula widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaWidgetOptions {
    pub space_behaves_as_tab: bool,
}

impl Default for FormulaWidgetOptions {
    fn default() -> Self {
        Self {
            space_behaves_as_tab: true,
        }
    }
}

/// Application configuration.
///
/// Every field is optional in JSON; missing ones keep their defaults. Keys are
/// camelCase like the collaborator options, and unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct AppConfig {
    /// Directory holding `<view>/index.html` fragments, relative to the page.
    pub views_base: String,
    /// Element the fragment markup is mounted into.
    pub main_content_id: String,
    pub typeset: TypesetOptions,
    pub formula: FormulaWidgetOptions,
    pub toolbar: Vec<ToolbarCommand>,
    pub dropdown: Vec<ToolbarCommand>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            views_base: "views".to_string(),
            main_content_id: "main-content".to_string(),
            typeset: TypesetOptions::default(),
            formula: FormulaWidgetOptions::default(),
            toolbar: default_toolbar(),
            dropdown: default_dropdown(),
        }
    }
}

impl AppConfig {
    /// Overlay a JSON document on the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: AppConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.views_base.trim().is_empty() {
            return Err(ConfigError::Invalid("viewsBase is empty".to_string()));
        }
        if self.main_content_id.trim().is_empty() {
            return Err(ConfigError::Invalid("mainContentId is empty".to_string()));
        }
        if self.typeset.delimiters.is_empty() {
            return Err(ConfigError::Invalid("no math delimiters".to_string()));
        }
        if let Some(d) = self
            .typeset
            .delimiters
            .iter()
            .find(|d| d.left.is_empty() || d.right.is_empty())
        {
            return Err(ConfigError::Invalid(format!(
                "empty math delimiter ({:?} .. {:?})",
                d.left, d.right
            )));
        }
        Ok(())
    }

    pub fn with_views_base(mut self, base: impl Into<String>) -> Self {
        self.views_base = base.into();
        self
    }

    pub fn with_toolbar(mut self, toolbar: Vec<ToolbarCommand>) -> Self {
        self.toolbar = toolbar;
        self
    }

    pub fn with_dropdown(mut self, dropdown: Vec<ToolbarCommand>) -> Self {
        self.dropdown = dropdown;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = AppConfig::from_json("{}").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert!(cfg.formula.space_behaves_as_tab);
        assert_eq!(cfg.views_base, "views");
    }

    #[test]
    fn partial_document_overrides_only_given_fields() {
        let cfg = AppConfig::from_json(
            r#"{ "viewsBase": "static/views", "toolbar": [{ "label": "Ω", "latex": "\\Omega" }] }"#,
        )
        .unwrap();
        assert_eq!(cfg.views_base, "static/views");
        assert_eq!(cfg.toolbar, vec![ToolbarCommand::new("Ω", "\\Omega")]);
        assert_eq!(cfg.dropdown, default_dropdown());
        assert_eq!(cfg.main_content_id, "main-content");
    }

    #[test]
    fn widget_options_use_the_widget_key_names() {
        let json = serde_json::to_string(&FormulaWidgetOptions::default()).unwrap();
        assert_eq!(json, r#"{"spaceBehavesAsTab":true}"#);
    }

    #[test]
    fn invalid_documents_are_rejected() {
        assert!(matches!(
            AppConfig::from_json(r#"{ "viewsBase": "  " }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AppConfig::from_json(r#"{ "typeset": { "delimiters": [], "throwOnError": false } }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AppConfig::from_json("[1, 2]"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn keys_are_camel_case() {
        let cfg = AppConfig::from_json(r#"{ "viewsBase": "assets/views", "mainContentId": "app" }"#)
            .unwrap();
        assert_eq!(cfg.views_base, "assets/views");
        assert_eq!(cfg.main_content_id, "app");

        let json = serde_json::to_string(&AppConfig::default()).unwrap();
        assert!(json.contains(r#""viewsBase":"views""#));
    }

    #[test]
    fn misspelled_keys_are_not_silently_ignored() {
        assert!(matches!(
            AppConfig::from_json(r#"{ "views_base": "static/views" }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn builder_overrides() {
        let cfg = AppConfig::default()
            .with_views_base("v")
            .with_toolbar(Vec::new())
            .with_dropdown(Vec::new());
        assert_eq!(cfg.views_base, "v");
        assert!(cfg.toolbar.is_empty());
        assert!(cfg.dropdown.is_empty());
        assert!(cfg.validate().is_ok());
    }
}
