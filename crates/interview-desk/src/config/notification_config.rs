use serde::{Deserialize, Serialize};

/// How notices are surfaced besides the console.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Also raise desktop notifications.
    #[serde(default)]
    pub desktop: bool,
}
