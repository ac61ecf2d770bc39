//! User-facing notifications.
//!
//! Every outcome the user should see becomes a [`Notice`]. The front end
//! decides how to show it; errors never escape as anything else.

use crate::{CoreError, capture::format_elapsed};

/// Visual weight of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational.
    Info,
    /// Something failed and needs attention.
    Destructive,
}

/// Follow-up the user can trigger from the notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeAction {
    /// Ask for device access again.
    Retry,
}

/// A dismissable notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Short headline.
    pub title: String,
    /// One-sentence detail.
    pub description: String,
    /// Visual weight.
    pub severity: Severity,
    /// Optional follow-up.
    pub action: Option<NoticeAction>,
}

impl Notice {
    /// Informational notice.
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
            action: None,
        }
    }

    /// Failure notice.
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
            action: None,
        }
    }

    /// Attach a follow-up action.
    pub fn with_action(mut self, action: NoticeAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Device access granted.
    pub fn access_granted() -> Self {
        Self::info(
            "Camera access granted",
            "You're ready to begin your interview recording.",
        )
    }

    /// Recorder started.
    pub fn recording_started() -> Self {
        Self::info("Recording started", "Speak clearly and look into the camera.")
    }

    /// Recorder stopped and the blob is ready.
    pub fn recording_complete(elapsed_secs: u64) -> Self {
        Self::info(
            "Recording complete",
            format!(
                "Your interview has been recorded ({}). You can now review and submit it.",
                format_elapsed(elapsed_secs)
            ),
        )
    }

    /// Upload accepted.
    pub fn submitted() -> Self {
        Self::info(
            "Interview submitted successfully",
            "Your interview recording has been submitted for review.",
        )
    }

    /// Link generated.
    pub fn link_generated() -> Self {
        Self::info(
            "Link generated successfully",
            "The interview link has been created and is ready to share.",
        )
    }

    /// Link placed on the clipboard.
    pub fn link_copied() -> Self {
        Self::info(
            "Link copied to clipboard",
            "You can now share it with the candidate.",
        )
    }

    /// Link "sent" to a candidate.
    pub fn email_sent(address: &str) -> Self {
        Self::info(
            "Email sent successfully",
            format!("The interview link has been sent to {}.", address),
        )
    }

    /// Scripted interview started.
    pub fn interview_started() -> Self {
        Self::info(
            "Interview started",
            "The AI interviewer will begin asking questions now.",
        )
    }

    /// Scripted interview finished.
    pub fn interview_completed() -> Self {
        Self::info(
            "Interview completed",
            "Thank you for completing the interview. Results will be shared with the hiring team.",
        )
    }

    /// Microphone toggled.
    pub fn microphone_toggled(on: bool) -> Self {
        if on {
            Self::info("Microphone turned on", "The AI interviewer can hear you now")
        } else {
            Self::info("Microphone turned off", "The AI interviewer cannot hear you")
        }
    }

    /// Camera toggled.
    pub fn camera_toggled(on: bool) -> Self {
        if on {
            Self::info("Camera turned on", "Your video is now visible")
        } else {
            Self::info("Camera turned off", "Your video is now hidden")
        }
    }

    /// Interview help text.
    pub fn help() -> Self {
        Self::info(
            "Help information",
            "Speak clearly and face the camera. Answer each question thoroughly.",
        )
    }
}

impl From<&CoreError> for Notice {
    fn from(error: &CoreError) -> Self {
        match error {
            // Denied and unavailable look the same to the user.
            CoreError::PermissionDenied { .. } | CoreError::DeviceUnavailable { .. } => {
                Notice::destructive(
                    "Camera access denied",
                    "Please enable camera and microphone access to continue with the interview.",
                )
                .with_action(NoticeAction::Retry)
            }
            CoreError::NoDeviceAccess { .. } => Notice::destructive(
                "Camera access required",
                "Camera access is required for the interview.",
            )
            .with_action(NoticeAction::Retry),
            CoreError::RecorderStartFailure { .. } => Notice::destructive(
                "Recording failed",
                "There was an error starting the recording. Please try again.",
            ),
            CoreError::RecorderStopFailure { .. } => Notice::destructive(
                "Recording failed",
                "The recording could not be finalized. Please record again.",
            ),
            CoreError::AlreadyRecording { .. } => {
                Notice::destructive("Already recording", "A recording is already in progress.")
            }
            CoreError::NotRecording { .. } => {
                Notice::destructive("Not recording", "There is no recording in progress.")
            }
            CoreError::NoBufferToSubmit { .. } => Notice::destructive(
                "No recording available",
                "Please record your interview before submitting.",
            ),
            CoreError::UploadFailed { .. } => Notice::destructive(
                "Submission failed",
                "Your recording was kept. Please try submitting again.",
            ),
            CoreError::MissingInformation { .. } => Notice::destructive(
                "Missing information",
                "Please fill all required fields and select at least one question.",
            ),
            CoreError::UnknownQuestion { id, .. } => Notice::destructive(
                "Unknown question",
                format!("No question with id {}. Type `questions` to list them.", id),
            ),
            CoreError::MissingEmail { .. } => Notice::destructive(
                "Missing email",
                "Please enter the candidate's email address.",
            ),
            CoreError::CandidateNotFound { id, .. } => Notice::destructive(
                "Candidate not found",
                format!("No candidate with id {}.", id),
            ),
            CoreError::InvalidInterviewLink { link, .. } => Notice::destructive(
                "Invalid interview link",
                format!("{} does not contain an interview id.", link),
            ),
        }
    }
}
