use interview_desk_core::{AccessAttempt, DeviceFailure, LinkRequest};

/// Commands delivered to the application actor.
#[derive(Debug)]
pub enum AppCommand<S> {
    /// A line typed at the console.
    Console(ConsoleCommand),
    /// Console input that did not parse.
    Rejected {
        /// Why the input was rejected.
        message: String,
    },
    /// A permission prompt resolved.
    AccessResolved {
        /// Ticket issued when the request began.
        attempt: AccessAttempt,
        /// Stream on success.
        result: Result<S, DeviceFailure>,
    },
    /// Request application shutdown.
    Shutdown,
}

/// Parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Ask for camera and microphone access.
    Access,
    /// Drop the stream and ask again.
    Retry,
    /// Start recording.
    Start,
    /// Stop recording.
    Stop,
    /// Upload the captured recording.
    Submit {
        /// Interview to attach the recording to.
        interview_id: Option<String>,
    },
    /// Show capture and interview state.
    Status,
    /// List candidates.
    Candidates,
    /// Filter candidates by name or position.
    Search {
        /// Case-insensitive text to look for.
        query: String,
    },
    /// Show a candidate's interview analysis.
    Analysis {
        /// Candidate id.
        id: String,
    },
    /// Show headline figures and recent activity.
    Dashboard,
    /// List interview templates.
    Templates,
    /// Show one candidate.
    Select {
        /// Candidate id.
        id: String,
    },
    /// List the question bank.
    Questions,
    /// Generate an interview link.
    Generate(LinkRequest),
    /// List generated links.
    Links,
    /// Copy a link to the clipboard.
    Copy {
        /// One-based link number.
        index: usize,
    },
    /// Open a link in the browser.
    Open {
        /// One-based link number.
        index: usize,
    },
    /// Send a link to a candidate.
    Email {
        /// One-based link number.
        index: usize,
        /// Recipient.
        address: Option<String>,
    },
    /// Enter the interview room for a link.
    Preview {
        /// One-based link number.
        index: usize,
    },
    /// Start the scripted interview.
    Begin,
    /// Advance to the next question.
    Next,
    /// Toggle the microphone.
    Mic,
    /// Toggle the camera.
    Camera,
    /// Show help.
    Help,
    /// Quit.
    Quit,
}
