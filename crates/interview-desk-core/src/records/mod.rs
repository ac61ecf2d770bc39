mod analysis;
mod candidate;
mod dashboard;
mod link;
mod question;
mod repository;

pub use {
    analysis::{CandidateAnalysis, CompetencyScore, HiringRecommendation, TimelinePoint},
    candidate::{Candidate, CandidateStatus},
    dashboard::{ActivityEntry, DashboardMetric, InterviewTemplate, Trend},
    link::{
        InterviewLinkRecord, LINK_TOKEN_LEN, LinkRequest, build_link, format_created_date,
        generate_token, interview_id_from_link, validate_email,
    },
    question::{Question, QuestionCategory, find_question},
    repository::{InMemoryRepository, InterviewRepository},
};
