use crate::records::Candidate;

/// One scored competency, with the cohort average for comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetencyScore {
    /// Competency name.
    pub competency: String,
    /// Candidate score, 0-100.
    pub score: u8,
    /// Average score across interviewed candidates, 0-100.
    pub average: u8,
}

/// Confidence level measured at one point of the interview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelinePoint {
    /// Question label, e.g. `Q3`.
    pub label: String,
    /// Confidence, 0-100.
    pub confidence: u8,
}

/// Hiring recommendation attached to an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HiringRecommendation {
    /// Clear hire.
    StronglyRecommend,
    /// Hire with reservations.
    Recommend,
    /// Do not hire.
    NotRecommended,
}

impl std::fmt::Display for HiringRecommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            HiringRecommendation::StronglyRecommend => "Strongly Recommend",
            HiringRecommendation::Recommend => "Recommend",
            HiringRecommendation::NotRecommended => "Not Recommended",
        })
    }
}

/// Interview analysis report for one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateAnalysis {
    /// The candidate analysed.
    pub candidate: Candidate,
    /// Per-competency scores.
    pub competencies: Vec<CompetencyScore>,
    /// Confidence over the course of the interview.
    pub timeline: Vec<TimelinePoint>,
    /// Observed strengths.
    pub strengths: Vec<String>,
    /// Areas for improvement.
    pub weaknesses: Vec<String>,
    /// Summary paragraph.
    pub summary: String,
    /// Overall recommendation.
    pub recommendation: HiringRecommendation,
}

/// The canned analysis, personalised with the candidate's name.
pub(crate) fn mock_analysis(candidate: Candidate) -> CandidateAnalysis {
    let competencies = [
        ("Communication", 85, 70),
        ("Problem Solving", 92, 75),
        ("Leadership", 78, 68),
        ("Technical Knowledge", 88, 80),
        ("Cultural Fit", 90, 82),
    ]
    .into_iter()
    .map(|(competency, score, average)| CompetencyScore {
        competency: competency.to_string(),
        score,
        average,
    })
    .collect();

    let timeline = [78, 82, 76, 89, 94, 85, 91, 87]
        .into_iter()
        .enumerate()
        .map(|(i, confidence)| TimelinePoint {
            label: format!("Q{}", i + 1),
            confidence,
        })
        .collect();

    let strengths = [
        "Excellent communication skills with clear articulation of complex ideas",
        "Strong problem-solving approach with structured methodology",
        "Good understanding of product development lifecycle",
    ]
    .map(String::from)
    .to_vec();

    let weaknesses = [
        "Could improve on delegation and team empowerment",
        "Sometimes overly cautious when making decisions",
    ]
    .map(String::from)
    .to_vec();

    let summary = format!(
        "Based on the interview performance, {} demonstrates strong product management \
         skills and excellent communication abilities. The candidate shows a deep \
         understanding of user-centered design principles and data-driven decision making.",
        candidate.name
    );

    CandidateAnalysis {
        candidate,
        competencies,
        timeline,
        strengths,
        weaknesses,
        summary,
        recommendation: HiringRecommendation::StronglyRecommend,
    }
}
