use std::fmt;

/// Review status of a candidate's interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateStatus {
    /// Interview not yet taken.
    Pending,
    /// Interview taken, awaiting review.
    Completed,
    /// Interview reviewed by the hiring team.
    Reviewed,
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CandidateStatus::Pending => "Pending",
            CandidateStatus::Completed => "Completed",
            CandidateStatus::Reviewed => "Reviewed",
        };
        f.write_str(label)
    }
}

/// A candidate as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Stable identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Position applied for.
    pub position: String,
    /// Interview date, display formatted.
    pub date: String,
    /// Review status.
    pub status: CandidateStatus,
    /// Overall score, once scored.
    pub score: Option<u8>,
}

impl Candidate {
    fn mock(
        id: &str,
        name: &str,
        position: &str,
        date: &str,
        status: CandidateStatus,
        score: Option<u8>,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            position: position.to_string(),
            date: date.to_string(),
            status,
            score,
        }
    }

    /// Score for display; `N/A` when unscored.
    pub fn score_label(&self) -> String {
        self.score
            .map(|score| score.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// The fixed candidate roster.
pub(crate) fn mock_candidates() -> Vec<Candidate> {
    use CandidateStatus::{Completed, Pending, Reviewed};

    vec![
        Candidate::mock("1", "Emma Thompson", "Product Manager", "May 15, 2023", Reviewed, Some(87)),
        Candidate::mock("2", "Michael Chen", "UX Designer", "May 16, 2023", Completed, Some(92)),
        Candidate::mock("3", "Sarah Johnson", "Software Engineer", "May 17, 2023", Pending, None),
        Candidate::mock("4", "David Williams", "Data Analyst", "May 18, 2023", Pending, None),
        Candidate::mock("5", "Alex Rodriguez", "Marketing Manager", "May 19, 2023", Reviewed, Some(78)),
        Candidate::mock("6", "Jessica Lee", "Product Manager", "May 20, 2023", Completed, Some(84)),
        Candidate::mock("7", "Ryan Garcia", "UX Designer", "May 21, 2023", Reviewed, Some(95)),
        Candidate::mock("8", "Olivia Parker", "Software Engineer", "May 22, 2023", Completed, Some(89)),
    ]
}
