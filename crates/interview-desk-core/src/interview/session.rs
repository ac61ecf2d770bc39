//! Scripted interview progression.
//!
//! The interviewer is a fixed question list with a canned acknowledgement;
//! nothing here evaluates answers.

use tracing::{debug, info};

/// Static interview script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewScript {
    /// Position being interviewed for.
    pub position: String,
    /// Hiring company.
    pub company: String,
    /// Questions, asked in order.
    pub questions: Vec<String>,
    /// Acknowledgement shown after each answer.
    pub ai_response: String,
}

impl Default for InterviewScript {
    fn default() -> Self {
        Self {
            position: "Product Manager".to_string(),
            company: "Acme Inc.".to_string(),
            questions: [
                "Tell me about yourself and your background.",
                "Describe a challenging project you managed and how you handled it.",
                "How do you prioritize features when you have limited resources?",
                "Give an example of how you've used data to drive a product decision.",
                "Where do you see yourself in 5 years?",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            ai_response: "Thank you for that answer. Your experience with cross-functional teams \
                          is impressive. Now, let's move on to the next question..."
                .to_string(),
        }
    }
}

/// Result of advancing the interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the question at this zero-based index.
    NextQuestion(usize),
    /// The last question was answered; recording should stop.
    Completed,
    /// Already completed or not started; nothing changed.
    Unchanged,
}

/// One candidate's pass through an [`InterviewScript`].
#[derive(Debug, Clone)]
pub struct InterviewSession {
    interview_id: String,
    script: InterviewScript,
    current: usize,
    started: bool,
    recording: bool,
    completed: bool,
    mic_on: bool,
    camera_on: bool,
}

impl InterviewSession {
    /// New session, not yet started, with mic and camera on.
    pub fn new(interview_id: impl Into<String>, script: InterviewScript) -> Self {
        Self {
            interview_id: interview_id.into(),
            script,
            current: 0,
            started: false,
            recording: false,
            completed: false,
            mic_on: true,
            camera_on: true,
        }
    }

    /// Interview id from the link.
    pub fn interview_id(&self) -> &str {
        &self.interview_id
    }

    /// The script being followed.
    pub fn script(&self) -> &InterviewScript {
        &self.script
    }

    /// Start asking questions. Returns `false` if already started.
    pub fn begin(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.recording = true;
        info!(interview_id = %self.interview_id, "Interview started");
        true
    }

    /// Question currently on screen, once started.
    pub fn current_question(&self) -> Option<&str> {
        if !self.started {
            return None;
        }
        self.script.questions.get(self.current).map(String::as_str)
    }

    /// Zero-based index of the current question.
    pub fn question_index(&self) -> usize {
        self.current
    }

    /// Number of questions in the script.
    pub fn total_questions(&self) -> usize {
        self.script.questions.len()
    }

    /// Progress through the script, `(index + 1) / total * 100`.
    pub fn progress_percent(&self) -> u8 {
        let total = self.total_questions();
        if total == 0 {
            return 100;
        }
        (((self.current + 1) * 100) / total).min(100) as u8
    }

    /// Move to the next question, or complete on the last one.
    pub fn next_question(&mut self) -> Advance {
        if !self.started || self.completed {
            return Advance::Unchanged;
        }

        if self.current + 1 < self.total_questions() {
            self.current += 1;
            debug!(index = self.current, "Advanced to next question");
            Advance::NextQuestion(self.current)
        } else {
            self.completed = true;
            self.recording = false;
            info!(interview_id = %self.interview_id, "Interview completed");
            Advance::Completed
        }
    }

    /// Flip the microphone. Returns the new state.
    pub fn toggle_microphone(&mut self) -> bool {
        self.mic_on = !self.mic_on;
        self.mic_on
    }

    /// Flip the camera. Returns the new state.
    pub fn toggle_camera(&mut self) -> bool {
        self.camera_on = !self.camera_on;
        self.camera_on
    }

    /// Whether the microphone is on.
    pub fn is_mic_on(&self) -> bool {
        self.mic_on
    }

    /// Whether the camera is on.
    pub fn is_camera_on(&self) -> bool {
        self.camera_on
    }

    /// Whether `begin` has been called.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether the interview is being recorded.
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Whether the last question has been answered.
    pub fn is_completed(&self) -> bool {
        self.completed
    }
}
