use physprac::config::AppConfig;
use physprac::error::ConfigError;

/// Id of the optional `<script type="application/json">` holding config overrides.
const CONFIG_ELEMENT_ID: &str = "physprac-config";

/// Defaults overlaid with the page's inline config, if any.
pub(super) fn load_config() -> Result<AppConfig, ConfigError> {
    let inline = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    match inline {
        Some(json) if !json.trim().is_empty() => AppConfig::from_json(&json),
        _ => Ok(AppConfig::default()),
    }
}
