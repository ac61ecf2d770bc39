mod capture_config;
#[allow(clippy::module_inception)]
mod config;
mod links_config;
mod logging_config;
mod notification_config;
mod upload_config;

pub(crate) use {
    capture_config::{CaptureConfig, MediaBackendKind},
    config::Config,
    links_config::LinksConfig,
    logging_config::LoggingConfig,
    notification_config::NotificationConfig,
    upload_config::UploadConfig,
};

pub(crate) const DEFAULT_BASE_URL: &str = "https://interview.example.com";
pub(crate) const DEFAULT_UPLOAD_ENDPOINT: &str = "http://localhost:8080";
pub(crate) const DEFAULT_UPLOAD_LATENCY_MS: u64 = 1500;
pub(crate) const DEFAULT_LOG_FILTER: &str = "interview_desk=info,interview_desk_core=info";

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

pub(crate) fn default_upload_endpoint() -> String {
    DEFAULT_UPLOAD_ENDPOINT.to_string()
}

pub(crate) fn default_upload_latency_ms() -> u64 {
    DEFAULT_UPLOAD_LATENCY_MS
}

pub(crate) fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}
