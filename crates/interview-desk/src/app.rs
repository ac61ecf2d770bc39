use crate::{
    AppCommand, AppError, AppResult, ConsoleCommand, LinkClipboard, Notifier, SimulatedUploader,
    config::Config, console::USAGE, media::ConsolePreview,
};

use interview_desk_core::{
    AccessOutcome, Advance, Candidate, CapturePhase, InMemoryRepository, InterviewLinkRecord,
    InterviewRepository, InterviewScript, InterviewSession, MediaCaptureController,
    MediaConstraints, MediaDevices, Notice, NoticeAction, PermissionState, Severity, StreamLease,
    format_elapsed, validate_email,
};

use std::{fmt::Display, io::Write, panic::Location, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tokio::{
    sync::{mpsc, watch},
    time::MissedTickBehavior,
};
use tracing::{debug, info, instrument, warn};

/// Interview id used when recording outside a link's interview room.
pub(crate) const DEFAULT_INTERVIEW_ID: &str = "12345";

const COMMAND_CHANNEL_CAPACITY: usize = 32;

/// Main application state.
///
/// Owns the capture controller and every collaborator; all mutation happens
/// on this actor, driven by console commands, permission resolutions and a
/// one-second tick while recording.
pub struct App<D: MediaDevices> {
    pub(crate) devices: Arc<D>,
    pub(crate) constraints: MediaConstraints,
    pub(crate) controller: MediaCaptureController<D::Stream>,
    pub(crate) repository: Box<dyn InterviewRepository>,
    pub(crate) uploader: SimulatedUploader,
    pub(crate) notifier: Notifier,
    pub(crate) clipboard: Option<LinkClipboard>,
    pub(crate) session: Option<InterviewSession>,
    pub(crate) screen: Box<dyn Write + Send>,
    pub(crate) last_notice: Option<Notice>,
    pub(crate) command_tx: mpsc::Sender<AppCommand<D::Stream>>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand<D::Stream>>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
}

impl<D> App<D>
where
    D: MediaDevices + Send + Sync + 'static,
{
    /// Wire the application from configuration.
    pub(crate) fn new(devices: D, config: &Config, screen: Box<dyn Write + Send>) -> Self {
        let constraints = config.capture.constraints();
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (shutdown_tx, _) = watch::channel(false);

        Self {
            devices: Arc::new(devices),
            constraints,
            controller: MediaCaptureController::new(
                Box::new(ConsolePreview::default()),
                constraints,
            ),
            repository: Box::new(InMemoryRepository::new(config.links.base_url.clone())),
            uploader: SimulatedUploader::new(&config.upload),
            notifier: Notifier::new(config.notifications.desktop),
            clipboard: None,
            session: None,
            screen,
            last_notice: None,
            command_tx,
            command_rx,
            shutdown_tx,
        }
    }

    /// Sender for feeding commands to the actor.
    pub(crate) fn command_sender(&self) -> mpsc::Sender<AppCommand<D::Stream>> {
        self.command_tx.clone()
    }

    /// Receiver that flips to `true` once the actor has shut down.
    pub(crate) fn subscribe_shutdown(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }

    /// Run the main application event loop.
    ///
    /// Requests device access on entry and releases everything on exit.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Interview Desk starting");
        self.say("Interview Desk. Type `help` for commands.");

        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.request_access();

        loop {
            let was_recording = self.controller.is_recording();

            tokio::select! {
                cmd = self.command_rx.recv() => {
                    let Some(cmd) = cmd else {
                        info!("Command channel closed, shutting down");
                        break;
                    };
                    if !self.handle_command(cmd).await {
                        break;
                    }
                }

                _ = ticker.tick(), if was_recording => {
                    if let Some(elapsed_secs) = self.controller.tick() {
                        debug!(elapsed_secs, "Recording tick");
                    }
                }
            }

            // First tick lands one second after the recording starts.
            if !was_recording && self.controller.is_recording() {
                ticker.reset();
            }
        }

        self.drain_pending();
        self.controller.unmount();

        let _ = self.shutdown_tx.send(true);
        info!("Interview Desk shut down successfully");

        Ok(())
    }

    /// Dispatch one command. Returns `false` when the loop should exit.
    pub(crate) async fn handle_command(&mut self, cmd: AppCommand<D::Stream>) -> bool {
        match cmd {
            AppCommand::Console(ConsoleCommand::Quit) | AppCommand::Shutdown => {
                info!("Shutdown requested");
                return false;
            }
            AppCommand::Console(command) => {
                if let Err(e) = self.handle_console(command).await {
                    self.report(&e);
                }
            }
            AppCommand::Rejected { message } => {
                self.show(Notice::destructive(
                    "Unknown command",
                    format!("{}. Type `help` for commands.", message),
                ));
            }
            AppCommand::AccessResolved { attempt, result } => {
                match self.controller.complete_access(attempt, result) {
                    Ok(AccessOutcome::Granted) => self.show(Notice::access_granted()),
                    Ok(AccessOutcome::Ignored) => {}
                    Err(e) => self.report(&AppError::from(e)),
                }
            }
        }
        true
    }

    /// Close the command channel and release every stream still queued in it.
    ///
    /// Access tasks that resolve after this see a closed channel and release
    /// their stream themselves.
    pub(crate) fn drain_pending(&mut self) {
        self.command_rx.close();
        while let Ok(cmd) = self.command_rx.try_recv() {
            if let AppCommand::AccessResolved {
                attempt,
                result: Ok(stream),
            } = cmd
            {
                debug!(attempt_id = %attempt.id(), "Releasing stream resolved during shutdown");
                StreamLease::new(stream).release();
            }
        }
    }

    /// Start a permission prompt in the background.
    ///
    /// The resolution comes back as [`AppCommand::AccessResolved`]; if the
    /// actor is gone by then the stream is released on the spot.
    pub(crate) fn request_access(&mut self) {
        let attempt = self.controller.begin_access_request();
        let devices = Arc::clone(&self.devices);
        let command_tx = self.command_tx.clone();
        let constraints = self.constraints;

        tokio::spawn(async move {
            let result = devices.request_stream(constraints).await;
            if let Err(mpsc::error::SendError(AppCommand::AccessResolved {
                result: Ok(stream),
                ..
            })) = command_tx
                .send(AppCommand::AccessResolved { attempt, result })
                .await
            {
                debug!("Application closed before access resolved");
                StreamLease::new(stream).release();
            }
        });
    }

    #[instrument(skip(self))]
    async fn handle_console(&mut self, command: ConsoleCommand) -> AppResult<()> {
        match command {
            ConsoleCommand::Access | ConsoleCommand::Retry => {
                self.say("Requesting camera and microphone access...");
                self.request_access();
            }
            ConsoleCommand::Start => {
                self.controller.start()?;
                self.show(Notice::recording_started());
            }
            ConsoleCommand::Stop => {
                let blob = self.controller.stop()?;
                self.show(Notice::recording_complete(self.controller.elapsed_secs()));
                self.say(format!(
                    "Captured {} bytes ({}) in {} chunks.",
                    blob.len(),
                    blob.mime_type(),
                    blob.chunk_count()
                ));
            }
            ConsoleCommand::Submit { interview_id } => {
                let interview_id = interview_id
                    .or_else(|| {
                        self.session
                            .as_ref()
                            .map(|session| session.interview_id().to_string())
                    })
                    .unwrap_or_else(|| DEFAULT_INTERVIEW_ID.to_string());
                self.say(format!("Submitting recording for interview {}...", interview_id));
                self.controller.submit(&self.uploader, &interview_id).await?;
                self.show(Notice::submitted());
            }
            ConsoleCommand::Status => self.render_status(),
            ConsoleCommand::Candidates => {
                let candidates = self.repository.candidates();
                self.render_candidates(&candidates);
            }
            ConsoleCommand::Search { query } => {
                let matches = self.repository.search_candidates(&query);
                if matches.is_empty() {
                    self.say(format!("No candidates match \"{}\".", query));
                } else {
                    self.render_candidates(&matches);
                }
            }
            ConsoleCommand::Analysis { id } => self.render_analysis(&id)?,
            ConsoleCommand::Dashboard => self.render_dashboard(),
            ConsoleCommand::Templates => self.render_templates(),
            ConsoleCommand::Select { id } => {
                let candidate = self.repository.candidate(&id)?;
                self.say(format!(
                    "{}\n  Position: {}\n  Date:     {}\n  Status:   {}\n  Score:    {}",
                    candidate.name,
                    candidate.position,
                    candidate.date,
                    candidate.status,
                    candidate.score_label()
                ));
            }
            ConsoleCommand::Questions => self.render_questions(),
            ConsoleCommand::Generate(request) => {
                let record = self.repository.create_link(&request)?;
                self.show(Notice::link_generated());
                self.say(format!("  {}", record.link));
            }
            ConsoleCommand::Links => self.render_links(),
            ConsoleCommand::Copy { index } => {
                let record = self.link_at(index)?;
                if self.clipboard.is_none() {
                    self.clipboard = Some(LinkClipboard::new()?);
                }
                if let Some(clipboard) = self.clipboard.as_mut() {
                    clipboard.copy_link(&record.link)?;
                }
                self.show(Notice::link_copied());
            }
            ConsoleCommand::Open { index } => {
                let record = self.link_at(index)?;
                open::that(&record.link)?;
                info!(link = %record.link, "Opened interview link");
            }
            ConsoleCommand::Email { index, address } => {
                let record = self.link_at(index)?;
                let address =
                    validate_email(address.as_deref().or(record.candidate_email.as_deref()))?;
                info!(link = %record.link, to = %address, "Interview link emailed (simulated)");
                self.show(Notice::email_sent(address));
            }
            ConsoleCommand::Preview { index } => {
                let record = self.link_at(index)?;
                let interview_id = record.interview_id()?.to_string();
                let script = InterviewScript {
                    position: record.position.clone(),
                    ..InterviewScript::default()
                };
                self.session = Some(InterviewSession::new(interview_id.clone(), script));
                self.say(format!(
                    "Interview room {} for {} ({}). Type `begin` when ready.",
                    interview_id, record.candidate_name, record.position
                ));
            }
            ConsoleCommand::Begin => self.begin_interview()?,
            ConsoleCommand::Next => self.next_question()?,
            ConsoleCommand::Mic => {
                let on = !self
                    .session
                    .as_ref()
                    .is_none_or(InterviewSession::is_mic_on);
                self.controller.set_audio_enabled(on)?;
                self.session
                    .get_or_insert_with(default_session)
                    .toggle_microphone();
                self.show(Notice::microphone_toggled(on));
            }
            ConsoleCommand::Camera => {
                let on = !self
                    .session
                    .as_ref()
                    .is_none_or(InterviewSession::is_camera_on);
                self.controller.set_video_enabled(on)?;
                if self.controller.has_video() {
                    self.session
                        .get_or_insert_with(default_session)
                        .toggle_camera();
                    self.show(Notice::camera_toggled(on));
                } else {
                    self.say("This device has no camera; only audio is captured.");
                }
            }
            ConsoleCommand::Help => {
                self.show(Notice::help());
                self.say(USAGE);
            }
            ConsoleCommand::Quit => {}
        }

        Ok(())
    }

    fn begin_interview(&mut self) -> AppResult<()> {
        let session = self.session.get_or_insert_with(default_session);
        if session.is_started() {
            self.say("The interview is already in progress.");
            return Ok(());
        }

        if !self.controller.is_recording() {
            self.controller.start()?;
        }
        session.begin();

        let question = session.current_question().map(str::to_string);
        self.show(Notice::interview_started());
        if let Some(question) = question {
            self.say(format!("Q1: {}", question));
        }
        Ok(())
    }

    fn next_question(&mut self) -> AppResult<()> {
        let Some(session) = self.session.as_mut().filter(|session| session.is_started()) else {
            self.say("The interview has not started. Type `begin` first.");
            return Ok(());
        };

        match session.next_question() {
            Advance::NextQuestion(index) => {
                let response = session.script().ai_response.clone();
                let question = session.current_question().map(str::to_string);
                self.say(format!("AI: {}", response));
                if let Some(question) = question {
                    self.say(format!("Q{}: {}", index + 1, question));
                }
            }
            Advance::Completed => {
                if self.controller.is_recording() {
                    self.controller.stop()?;
                }
                self.show(Notice::interview_completed());
            }
            Advance::Unchanged => self.say("The interview is already complete."),
        }
        Ok(())
    }

    #[track_caller]
    fn link_at(&self, index: usize) -> AppResult<InterviewLinkRecord> {
        index
            .checked_sub(1)
            .and_then(|i| self.repository.links().into_iter().nth(i))
            .ok_or_else(|| AppError::LinkNotFound {
                index,
                location: ErrorLocation::from(Location::caller()),
            })
    }

    fn render_status(&mut self) {
        let capture = self.controller.session();
        let phase = match capture.phase {
            CapturePhase::Recording => {
                format!("recording ({})", format_elapsed(capture.elapsed_seconds))
            }
            phase => phase.to_string(),
        };
        let permission = match capture.permission_state {
            PermissionState::Pending => "pending",
            PermissionState::Granted => "granted",
            PermissionState::Denied => "denied",
        };

        let mut lines = vec![
            format!("Capture:    {}", phase),
            format!("Permission: {}", permission),
            format!(
                "Stream:     {}",
                capture.device_stream.as_deref().unwrap_or("none")
            ),
            format!(
                "Recording:  {}",
                capture
                    .recorded_bytes
                    .map(|bytes| format!("{} bytes, ready to submit", bytes))
                    .unwrap_or_else(|| "none".to_string())
            ),
        ];

        if let Some(session) = &self.session {
            let progress = if session.is_completed() {
                "completed".to_string()
            } else if session.is_started() {
                format!(
                    "question {}/{} ({}%)",
                    session.question_index() + 1,
                    session.total_questions(),
                    session.progress_percent()
                )
            } else {
                "not started".to_string()
            };
            lines.push(format!(
                "Interview:  {} for {}, {}",
                session.interview_id(),
                session.script().position,
                progress
            ));
            lines.push(format!(
                "Devices:    mic {}, camera {}",
                on_off(session.is_mic_on()),
                on_off(session.is_camera_on())
            ));
        }

        self.say(lines.join("\n"));
    }

    fn render_candidates(&mut self, candidates: &[Candidate]) {
        let mut lines = vec![format!(
            "{:<4} {:<18} {:<22} {:<14} {:<10} {}",
            "ID", "Name", "Position", "Date", "Status", "Score"
        )];
        lines.extend(candidates.iter().map(|candidate| {
            format!(
                "{:<4} {:<18} {:<22} {:<14} {:<10} {}",
                candidate.id,
                candidate.name,
                candidate.position,
                candidate.date,
                candidate.status.to_string(),
                candidate.score_label()
            )
        }));
        self.say(lines.join("\n"));
    }

    fn render_analysis(&mut self, id: &str) -> AppResult<()> {
        let report = self.repository.analysis(id)?;
        let candidate = &report.candidate;

        let mut lines = vec![
            format!("{} ({})", candidate.name, candidate.position),
            format!("  Interview date: {}", candidate.date),
            format!("  Overall score:  {}", candidate.score_label()),
            "Competencies (candidate / average):".to_string(),
        ];
        lines.extend(report.competencies.iter().map(|c| {
            format!("  {:<20} {:>3} / {:>3}", c.competency, c.score, c.average)
        }));
        lines.push(format!(
            "Confidence timeline: {}",
            report
                .timeline
                .iter()
                .map(|point| format!("{} {}%", point.label, point.confidence))
                .collect::<Vec<_>>()
                .join(", ")
        ));
        lines.push("Strengths:".to_string());
        lines.extend(report.strengths.iter().map(|s| format!("  + {}", s)));
        lines.push("Areas for improvement:".to_string());
        lines.extend(report.weaknesses.iter().map(|w| format!("  - {}", w)));
        lines.push(report.summary.clone());
        lines.push(format!("Hiring recommendation: {}", report.recommendation));

        self.say(lines.join("\n"));
        Ok(())
    }

    fn render_dashboard(&mut self) {
        let mut lines = Vec::new();
        for metric in self.repository.dashboard_metrics() {
            let trend = metric
                .trend
                .map(|t| format!(" ({}{}%)", if t.positive { "+" } else { "-" }, t.percent))
                .unwrap_or_default();
            lines.push(format!(
                "{:<22} {:>5}{}  {}",
                metric.title, metric.value, trend, metric.description
            ));
        }
        lines.push("Recent activity:".to_string());
        lines.extend(
            self.repository
                .recent_activity()
                .iter()
                .map(|entry| format!("  {:<50} {}", entry.text, entry.time)),
        );
        self.say(lines.join("\n"));
    }

    fn render_templates(&mut self) {
        let lines: Vec<String> = self
            .repository
            .templates()
            .iter()
            .map(|template| {
                format!(
                    "{:<32} {} questions, last used {}",
                    template.name, template.question_count, template.last_used
                )
            })
            .collect();
        self.say(lines.join("\n"));
    }

    fn render_questions(&mut self) {
        let mut lines = Vec::new();
        for category in self.repository.question_bank() {
            lines.push(format!("{}:", category.name));
            for question in &category.questions {
                lines.push(format!("  {:<4} {}", question.id, question.text));
            }
        }
        self.say(lines.join("\n"));
    }

    fn render_links(&mut self) {
        let links = self.repository.links();
        if links.is_empty() {
            self.say("No interview links yet. Use `generate` to create one.");
            return;
        }
        let lines: Vec<String> = links
            .iter()
            .enumerate()
            .map(|(i, record)| {
                format!(
                    "{:>2}. {} ({}, {})\n    {}",
                    i + 1,
                    record.candidate_name,
                    record.position,
                    record.created_date,
                    record.link
                )
            })
            .collect();
        self.say(lines.join("\n"));
    }

    /// Turn an error into a notice. Nothing propagates past the actor.
    fn report(&mut self, error: &AppError) {
        debug!(error = ?error, "Command failed");
        let notice = match error {
            AppError::Core { source, .. } => Notice::from(source),
            AppError::LinkNotFound { index, .. } => Notice::destructive(
                "Link not found",
                format!("There is no link #{}. Type `links` to list them.", index),
            ),
            AppError::ClipboardError { reason, .. } => {
                Notice::destructive("Copy failed", reason.clone())
            }
            other => Notice::destructive("Something went wrong", other.to_string()),
        };
        self.show(notice);
    }

    fn show(&mut self, notice: Notice) {
        let marker = match notice.severity {
            Severity::Info => "*",
            Severity::Destructive => "!",
        };
        let mut text = format!("[{}] {}: {}", marker, notice.title, notice.description);
        if notice.action == Some(NoticeAction::Retry) {
            text.push_str("\n    Type `retry` to request access again.");
        }
        self.say(text);
        self.notifier.notify(&notice);
        self.last_notice = Some(notice);
    }

    fn say(&mut self, text: impl Display) {
        if let Err(e) = writeln!(self.screen, "{}", text).and_then(|()| self.screen.flush()) {
            warn!(error = %e, "Failed to write to console");
        }
    }
}

fn default_session() -> InterviewSession {
    InterviewSession::new(DEFAULT_INTERVIEW_ID, InterviewScript::default())
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}
