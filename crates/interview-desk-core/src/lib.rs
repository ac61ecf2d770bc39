//! Interview Desk Core Library
//!
//! Media-capture control flow and in-memory interview records for the
//! interview desk front end. Platform media stacks plug in through the
//! [`MediaDevices`], [`DeviceStream`] and [`MediaRecorder`] traits.
//!
//! # Example
//!
//! ```ignore
//! use interview_desk_core::{MediaCaptureController, MediaConstraints, CoreResult};
//!
//! async fn record(devices: &MyDevices, uploader: &MyUploader) -> CoreResult<()> {
//!     let mut controller = MediaCaptureController::new(Box::new(MyPreview), MediaConstraints::default());
//!
//!     controller.request_access(devices).await?;
//!     controller.start()?;
//!     controller.tick();
//!     let blob = controller.stop()?;
//!     println!("Captured {} bytes", blob.len());
//!
//!     controller.submit(uploader, "interview-42").await?;
//!     Ok(())
//! }
//! ```

mod capture;
mod error;
mod interview;
mod notice;
mod records;

pub use {
    capture::{
        AccessAttempt, AccessOutcome, CapturePhase, CaptureSession, ChunkSink, DeviceFailure,
        DeviceStream, ElapsedClock, MediaCaptureController, MediaConstraints, MediaDevices,
        MediaRecorder, PermissionState, PreviewSurface, RecordedBlob, RecordingUploader,
        StreamLease, format_elapsed,
    },
    error::{CoreError, Result as CoreResult},
    interview::{Advance, InterviewScript, InterviewSession},
    notice::{Notice, NoticeAction, Severity},
    records::{
        ActivityEntry, Candidate, CandidateAnalysis, CandidateStatus, CompetencyScore,
        DashboardMetric, HiringRecommendation, InMemoryRepository, InterviewLinkRecord,
        InterviewRepository, InterviewTemplate, LINK_TOKEN_LEN, LinkRequest, Question,
        QuestionCategory, TimelinePoint, Trend, build_link, find_question, format_created_date,
        generate_token, interview_id_from_link, validate_email,
    },
};
