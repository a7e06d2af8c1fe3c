use crate::utils::constants::DEFAULT_STUDIES;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingScreen {
    pub background_color: String,
}

/// Configuration passed to the library's widget constructor. Apart from
/// symbol, interval and container id this is static presentation config.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetConfig {
    pub autosize: bool,
    pub symbol: String,
    pub interval: String,
    pub timezone: String,
    pub theme: String,
    pub style: String,
    pub locale: String,
    pub toolbar_bg: String,
    pub enable_publishing: bool,
    pub allow_symbol_change: bool,
    pub container_id: String,
    pub studies: Vec<String>,
    pub hide_side_toolbar: bool,
    pub withdateranges: bool,
    pub save_image: bool,
    pub hide_volume: bool,
    pub loading_screen: LoadingScreen,
    pub overrides: BTreeMap<String, String>,
    pub disabled_features: Vec<String>,
    pub enabled_features: Vec<String>,
}

impl WidgetConfig {
    pub fn new(symbol: &str, interval: &str, container_id: &str) -> Self {
        let overrides = BTreeMap::from([
            ("paneProperties.background".to_string(), "#fff".to_string()),
            ("scalesProperties.backgroundColor".to_string(), "#fff".to_string()),
        ]);

        Self {
            autosize: true,
            symbol: symbol.to_string(),
            interval: interval.to_string(),
            timezone: "Etc/UTC".to_string(),
            theme: "light".to_string(),
            style: "1".to_string(),
            locale: "en".to_string(),
            toolbar_bg: "#f1f3f6".to_string(),
            enable_publishing: false,
            allow_symbol_change: true,
            container_id: container_id.to_string(),
            studies: DEFAULT_STUDIES.iter().map(|s| s.to_string()).collect(),
            hide_side_toolbar: false,
            withdateranges: true,
            save_image: true,
            hide_volume: false,
            loading_screen: LoadingScreen {
                background_color: "#f4f4f5".to_string(),
            },
            overrides,
            disabled_features: vec!["use_localstorage_for_settings".to_string()],
            enabled_features: vec!["save_chart_properties_to_local_storage".to_string()],
        }
    }
}
