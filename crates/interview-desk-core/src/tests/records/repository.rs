use crate::{
    CandidateStatus, CoreError, HiringRecommendation, InMemoryRepository, InterviewRepository,
    LinkRequest,
};

use chrono::NaiveDate;

fn repository() -> InMemoryRepository {
    InMemoryRepository::new("https://interview.example.com")
        .with_fixed_date(NaiveDate::from_ymd_opt(2023, 5, 15).unwrap_or_default())
}

fn request(position: &str, candidate: &str) -> LinkRequest {
    LinkRequest {
        position: position.to_string(),
        candidate_name: candidate.to_string(),
        candidate_email: None,
        question_ids: vec!["l1".to_string(), "c3".to_string()],
    }
}

/// WHAT: The roster holds the eight mock candidates
/// WHY: Dashboard and analysis views list from the repository
#[test]
fn given_seeded_repository_when_listing_candidates_then_roster_returned() {
    // Given: A seeded repository
    let repo = repository();

    // When: Listing candidates
    let candidates = repo.candidates();

    // Then: Eight candidates, pending ones unscored
    assert_eq!(candidates.len(), 8);
    assert_eq!(candidates[0].name, "Emma Thompson");
    assert!(
        candidates
            .iter()
            .filter(|c| c.status == CandidateStatus::Pending)
            .all(|c| c.score.is_none())
    );
}

/// WHAT: Candidates are selectable by id
/// WHY: The analysis view shows one selected candidate
#[test]
#[allow(clippy::unwrap_used)]
fn given_candidate_ids_when_selecting_then_found_or_not_found() {
    // Given: A seeded repository
    let repo = repository();

    // When: Selecting a known and an unknown id
    let known = repo.candidate("7").unwrap();
    let unknown = repo.candidate("99");

    // Then: Known candidate returned with its score, unknown rejected
    assert_eq!(known.name, "Ryan Garcia");
    assert_eq!(known.score_label(), "95");
    assert_eq!(repo.candidate("3").unwrap().score_label(), "N/A");
    assert!(matches!(unknown, Err(CoreError::CandidateNotFound { .. })));
}

/// WHAT: New links are stored newest first
/// WHY: The recent-links list shows the latest link at the top
#[test]
#[allow(clippy::unwrap_used)]
fn given_two_requests_when_creating_links_then_newest_first() {
    // Given: An empty link list
    let mut repo = repository();
    assert!(repo.links().is_empty());

    // When: Creating two links
    let first = repo.create_link(&request("UX Designer", "Michael Chen")).unwrap();
    let second = repo
        .create_link(&request("Data Analyst", "David Williams"))
        .unwrap();

    // Then: Second link listed first, records carry the request fields
    let links = repo.links();
    assert_eq!(links, vec![second.clone(), first.clone()]);
    assert_eq!(second.candidate_name, "David Williams");
    assert_eq!(second.position, "Data Analyst");
    assert_eq!(second.created_date, "May 15, 2023");
    assert!(first.link.starts_with("https://interview.example.com/"));
    assert_eq!(first.interview_id().unwrap().len(), 8);
}

/// WHAT: Invalid requests create nothing
/// WHY: Validation failures must not leave partial records behind
#[test]
fn given_invalid_requests_when_creating_links_then_rejected_and_list_unchanged() {
    // Given: A repository and two bad requests
    let mut repo = repository();
    let missing = LinkRequest {
        question_ids: Vec::new(),
        ..request("UX Designer", "Michael Chen")
    };
    let unknown = LinkRequest {
        question_ids: vec!["z9".to_string()],
        ..request("UX Designer", "Michael Chen")
    };

    // When: Creating links
    let missing_result = repo.create_link(&missing);
    let unknown_result = repo.create_link(&unknown);

    // Then: Both rejected, nothing stored
    assert!(matches!(
        missing_result,
        Err(CoreError::MissingInformation { .. })
    ));
    assert!(matches!(
        unknown_result,
        Err(CoreError::UnknownQuestion { ref id, .. }) if id == "z9"
    ));
    assert!(repo.links().is_empty());
}

/// WHAT: The question bank holds three categories of four questions
/// WHY: Link generation selects questions from it
#[test]
fn given_seeded_repository_when_reading_question_bank_then_three_categories() {
    // Given/When: The question bank
    let repo = repository();
    let bank = repo.question_bank();

    // Then: Leadership, communication and analytical, four questions each
    let ids: Vec<&str> = bank.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["leadership", "communication", "analytical"]);
    assert!(bank.iter().all(|c| c.questions.len() == 4));
}

/// WHAT: The email entered with a request is kept on the generated link
/// WHY: Sending the link later uses the address typed at generation time
#[test]
#[allow(clippy::unwrap_used)]
fn given_request_with_email_when_creating_link_then_email_stored_trimmed() {
    // Given: One request with an email and one with a blank email
    let mut repo = repository();
    let with_email = LinkRequest {
        candidate_email: Some("  sarah@example.com ".to_string()),
        ..request("Software Engineer", "Sarah Johnson")
    };
    let blank_email = LinkRequest {
        candidate_email: Some("   ".to_string()),
        ..request("Data Analyst", "David Williams")
    };

    // When: Creating both links
    let stored = repo.create_link(&with_email).unwrap();
    let blank = repo.create_link(&blank_email).unwrap();

    // Then: Trimmed address stored, blank address dropped
    assert_eq!(stored.candidate_email.as_deref(), Some("sarah@example.com"));
    assert_eq!(blank.candidate_email, None);
    assert_eq!(repo.links()[1].candidate_email.as_deref(), Some("sarah@example.com"));
}

/// WHAT: Search matches name or position, ignoring case
/// WHY: The analysis view filters the roster as the user types
#[test]
fn given_queries_when_searching_candidates_then_name_or_position_matched() {
    // Given: A seeded repository
    let repo = repository();

    // When: Searching by position, by partial name, blank and nonsense
    let designers = repo.search_candidates("ux DESIGNER");
    let by_name = repo.search_candidates("chen");
    let everyone = repo.search_candidates("  ");
    let nobody = repo.search_candidates("astronaut");

    // Then: Matches follow roster order
    let names: Vec<&str> = designers.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Michael Chen", "Ryan Garcia"]);
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, "2");
    assert_eq!(everyone.len(), 8);
    assert!(nobody.is_empty());
}

/// WHAT: The analysis report carries competencies, timeline and findings
/// WHY: The analysis view renders all of them for the selected candidate
#[test]
#[allow(clippy::unwrap_used)]
fn given_candidate_id_when_requesting_analysis_then_report_personalised() {
    // Given: A seeded repository
    let repo = repository();

    // When: Requesting Emma's analysis and an unknown one
    let report = repo.analysis("1").unwrap();
    let unknown = repo.analysis("42");

    // Then: Five competencies, eight timeline points, named summary
    assert_eq!(report.candidate.name, "Emma Thompson");
    assert_eq!(report.competencies.len(), 5);
    assert_eq!(report.competencies[1].competency, "Problem Solving");
    assert_eq!(report.competencies[1].score, 92);
    assert!(report.competencies.iter().all(|c| c.score <= 100 && c.average <= 100));
    assert_eq!(report.timeline.len(), 8);
    assert_eq!(report.timeline[0].label, "Q1");
    assert_eq!(report.strengths.len(), 3);
    assert_eq!(report.weaknesses.len(), 2);
    assert!(report.summary.contains("Emma Thompson"));
    assert_eq!(report.recommendation, HiringRecommendation::StronglyRecommend);
    assert_eq!(report.recommendation.to_string(), "Strongly Recommend");
    assert!(matches!(unknown, Err(CoreError::CandidateNotFound { ref id, .. }) if id == "42"));
}

/// WHAT: Dashboard figures, activity feed and templates are seeded
/// WHY: The dashboard and template list read them from the repository
#[test]
fn given_seeded_repository_when_reading_dashboard_then_metrics_activity_templates() {
    // Given: A seeded repository
    let repo = repository();

    // When: Reading dashboard data
    let metrics = repo.dashboard_metrics();
    let activity = repo.recent_activity();
    let templates = repo.templates();

    // Then: Three metrics, four activity lines, three templates
    let titles: Vec<&str> = metrics.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Total Candidates", "Pending Interviews", "Completed Interviews"]
    );
    assert_eq!(metrics[0].value, "124");
    assert_eq!(metrics[0].trend.map(|t| t.percent), Some(12));
    assert_eq!(metrics[1].trend, None);
    assert_eq!(activity.len(), 4);
    assert_eq!(activity[0].time, "2 hours ago");
    assert_eq!(templates.len(), 3);
    assert_eq!(templates[1].name, "Software Engineering Template");
    assert_eq!(templates[1].question_count, 15);
}
