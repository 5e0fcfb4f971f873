use crate::telemetry::{parse_log_level, LogLevel, DEFAULT_LOG_LEVEL};

pub const MOBILE_MAX_WIDTH: f64 = 768.0;
pub const TABLET_MAX_WIDTH: f64 = 1024.0;

pub const COUNTER_DEFAULT_DURATION_MS: f64 = 2_000.0;

pub const REVEAL_DEFAULT_THRESHOLD: f64 = 0.1;
pub const REVEAL_DEFAULT_ROOT_MARGIN: &str = "0px";
pub const REVEAL_DEFAULT_DURATION_MS: u32 = 800;
pub const REVEAL_OFFSET_PX: f64 = 40.0;

pub const SUBMIT_LATENCY_MS: u32 = 1_500;
pub const CTA_BANNER_AUTO_CLEAR_MS: u32 = 5_000;

pub const PAGE_EXIT_MS: u32 = 400;
pub const PAGE_ENTER_MS: u32 = 500;
pub const PAGE_SHIFT_PX: f64 = 20.0;

pub const BACK_TO_TOP_THRESHOLD_PX: f64 = 300.0;

const DEFAULT_ILLUSTRATION_URL: &str = "/illustrations/study-abroad.svg";

/// Build-time settings for the browser bundle, read from the environment
/// `trunk` runs under.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub log_level: LogLevel,
    pub illustration_url: String,
}

impl SiteConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("SITE_LOG_LEVEL"), option_env!("SITE_ILLUSTRATION_URL"))
    }

    fn from_values(log_level: Option<&str>, illustration_url: Option<&str>) -> Self {
        let illustration_url = illustration_url
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_ILLUSTRATION_URL)
            .to_string();

        Self {
            log_level: parse_log_level(log_level, DEFAULT_LOG_LEVEL),
            illustration_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_build_values_fall_back_to_defaults() {
        let config = SiteConfig::from_values(None, Some("   "));
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.illustration_url, DEFAULT_ILLUSTRATION_URL);
    }

    #[test]
    fn build_values_override_defaults() {
        let config = SiteConfig::from_values(Some("debug"), Some("https://cdn.example.com/a.svg"));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.illustration_url, "https://cdn.example.com/a.svg");
    }
}
