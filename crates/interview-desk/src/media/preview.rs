use interview_desk_core::PreviewSurface;

use tracing::info;

/// Preview "surface" for a terminal: reports which stream is bound.
#[derive(Debug, Default)]
pub struct ConsolePreview {
    bound: Option<String>,
}

impl PreviewSurface for ConsolePreview {
    fn attach(&mut self, stream_label: &str) {
        info!(stream = %stream_label, "Preview attached");
        self.bound = Some(stream_label.to_string());
    }

    fn detach(&mut self) {
        if let Some(label) = self.bound.take() {
            info!(stream = %label, "Preview detached");
        }
    }
}
