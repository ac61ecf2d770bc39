//! Clipboard integration for sharing interview links.

use crate::{AppError, AppResult};

use std::panic::Location;

use arboard::Clipboard;
use error_location::ErrorLocation;
use tracing::{debug, instrument};

/// Places interview links on the system clipboard.
pub struct LinkClipboard {
    pub(crate) clipboard: Clipboard,
}

impl LinkClipboard {
    /// Open the system clipboard.
    #[track_caller]
    #[instrument]
    pub fn new() -> AppResult<Self> {
        let clipboard = Clipboard::new().map_err(|e| AppError::ClipboardError {
            reason: format!("Failed to initialize clipboard: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        debug!("Clipboard initialized");

        Ok(Self { clipboard })
    }

    /// Copy a link to the clipboard.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn copy_link(&mut self, link: &str) -> AppResult<()> {
        self.clipboard
            .set_text(link)
            .map_err(|e| AppError::ClipboardError {
                reason: format!("Failed to set clipboard: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(link_len = link.len(), "Link copied to clipboard");

        Ok(())
    }
}
