use crate::{
    CoreError, CoreResult,
    records::{
        ActivityEntry,
        Candidate,
        CandidateAnalysis,
        DashboardMetric,
        InterviewLinkRecord,
        InterviewTemplate,
        LinkRequest,
        QuestionCategory,
        analysis::mock_analysis,
        build_link,
        candidate::mock_candidates,
        dashboard::{mock_activity, mock_metrics, mock_templates},
        find_question,
        format_created_date,
        generate_token,
        question::mock_question_bank,
    },
};

use std::panic::Location;

use chrono::{Local, NaiveDate};
use error_location::ErrorLocation;
use tracing::{info, instrument};

/// Data-access collaborator for candidates, questions and interview links.
///
/// The application talks only to this trait, so a real backend can replace
/// the in-memory implementation without touching view logic.
pub trait InterviewRepository: Send {
    /// All candidates, in roster order.
    fn candidates(&self) -> Vec<Candidate>;

    /// One candidate by id.
    ///
    /// # Errors
    ///
    /// `CandidateNotFound` for an unknown id.
    fn candidate(&self, id: &str) -> CoreResult<Candidate>;

    /// Candidates whose name or position contains `query`, ignoring case.
    /// A blank query matches everyone.
    fn search_candidates(&self, query: &str) -> Vec<Candidate>;

    /// Interview analysis report for one candidate.
    ///
    /// # Errors
    ///
    /// `CandidateNotFound` for an unknown id.
    fn analysis(&self, id: &str) -> CoreResult<CandidateAnalysis>;

    /// Headline dashboard figures.
    fn dashboard_metrics(&self) -> Vec<DashboardMetric>;

    /// Recent-activity feed, newest first.
    fn recent_activity(&self) -> Vec<ActivityEntry>;

    /// Reusable interview templates.
    fn templates(&self) -> &[InterviewTemplate];

    /// Question categories available for new interviews.
    fn question_bank(&self) -> &[QuestionCategory];

    /// Generated links, newest first.
    fn links(&self) -> Vec<InterviewLinkRecord>;

    /// Validate a request, generate a link and store it at the front.
    ///
    /// # Errors
    ///
    /// `MissingInformation` or `UnknownQuestion`.
    fn create_link(&mut self, request: &LinkRequest) -> CoreResult<InterviewLinkRecord>;
}

/// Repository backed by the mock roster and question bank.
pub struct InMemoryRepository {
    base_url: String,
    candidates: Vec<Candidate>,
    question_bank: Vec<QuestionCategory>,
    templates: Vec<InterviewTemplate>,
    links: Vec<InterviewLinkRecord>,
    today: Option<NaiveDate>,
}

impl InMemoryRepository {
    /// Seeded repository generating links under `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            candidates: mock_candidates(),
            question_bank: mock_question_bank(),
            templates: mock_templates(),
            links: Vec::new(),
            today: None,
        }
    }

    /// Stamp new links with a fixed date instead of the local clock.
    pub fn with_fixed_date(mut self, date: NaiveDate) -> Self {
        self.today = Some(date);
        self
    }

    fn created_date(&self) -> String {
        format_created_date(self.today.unwrap_or_else(|| Local::now().date_naive()))
    }
}

impl InterviewRepository for InMemoryRepository {
    fn candidates(&self) -> Vec<Candidate> {
        self.candidates.clone()
    }

    #[track_caller]
    fn candidate(&self, id: &str) -> CoreResult<Candidate> {
        self.candidates
            .iter()
            .find(|candidate| candidate.id == id)
            .cloned()
            .ok_or_else(|| CoreError::CandidateNotFound {
                id: id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    fn search_candidates(&self, query: &str) -> Vec<Candidate> {
        let query = query.trim().to_lowercase();
        self.candidates
            .iter()
            .filter(|candidate| {
                candidate.name.to_lowercase().contains(&query)
                    || candidate.position.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    #[track_caller]
    fn analysis(&self, id: &str) -> CoreResult<CandidateAnalysis> {
        self.candidate(id).map(mock_analysis)
    }

    fn dashboard_metrics(&self) -> Vec<DashboardMetric> {
        mock_metrics()
    }

    fn recent_activity(&self) -> Vec<ActivityEntry> {
        mock_activity()
    }

    fn templates(&self) -> &[InterviewTemplate] {
        &self.templates
    }

    fn question_bank(&self) -> &[QuestionCategory] {
        &self.question_bank
    }

    fn links(&self) -> Vec<InterviewLinkRecord> {
        self.links.clone()
    }

    #[track_caller]
    #[instrument(skip(self))]
    fn create_link(&mut self, request: &LinkRequest) -> CoreResult<InterviewLinkRecord> {
        request.validate()?;

        if let Some(unknown) = request
            .question_ids
            .iter()
            .find(|id| find_question(&self.question_bank, id).is_none())
        {
            return Err(CoreError::UnknownQuestion {
                id: unknown.clone(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let record = InterviewLinkRecord {
            link: build_link(&self.base_url, &generate_token()),
            position: request.position.trim().to_string(),
            candidate_name: request.candidate_name.trim().to_string(),
            candidate_email: request
                .candidate_email
                .as_deref()
                .map(str::trim)
                .filter(|email| !email.is_empty())
                .map(String::from),
            created_date: self.created_date(),
        };

        self.links.insert(0, record.clone());

        info!(
            link = %record.link,
            question_count = request.question_ids.len(),
            "Interview link generated"
        );

        Ok(record)
    }
}
