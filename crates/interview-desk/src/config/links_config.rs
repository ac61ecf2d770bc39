use crate::config::default_base_url;

use serde::{Deserialize, Serialize};

/// Interview link generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    /// URL prefix for generated links.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}
