use axum::http::StatusCode;
use once_cell::sync::Lazy;
use serde::Deserialize;

use libs::util;

/// Which status codes the picture endpoints answer with for duplicates and empty collections.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusMode {
    /// 302 on duplicate create, an empty collection counts as "no data".
    #[default]
    Legacy,
    /// 409 on duplicate create, an empty collection is a regular empty result.
    Standard,
}

impl StatusMode {
    pub fn conflict_status(self) -> StatusCode {
        match self {
            StatusMode::Legacy => StatusCode::FOUND,
            StatusMode::Standard => StatusCode::CONFLICT,
        }
    }

    /// Whether a zero-length collection is answered as "no data".
    pub fn empty_is_missing(self) -> bool {
        self == StatusMode::Legacy
    }
}

#[derive(Deserialize, Clone)]
pub struct Config {
    pub backend_port: u16,
    pub backend_data_file: String,
    pub prometheus_port: u16,
    #[serde(default = "default_refresh_interval")]
    pub prometheus_refresh_interval: u64,
    #[serde(default)]
    pub backend_status_mode: StatusMode,
}

fn default_refresh_interval() -> u64 {
    15
}

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    let mut config = envy::from_env::<Config>()
        .unwrap_or_else(|err| panic!("Failed to load configuration from env: {:#?}", err));

    let config_dir = util::get_config_dir()
        .unwrap_or_else(|err| panic!("Failed to resolve config directory: {err}"));

    // absolute paths survive the join untouched
    config.backend_data_file = config_dir
        .join(&config.backend_data_file)
        .to_string_lossy()
        .into_owned();

    config
});
