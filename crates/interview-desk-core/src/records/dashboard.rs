/// Month-over-month movement shown next to a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trend {
    /// Percentage change.
    pub percent: u8,
    /// Whether the change is an improvement.
    pub positive: bool,
}

/// A headline figure on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardMetric {
    /// Metric name.
    pub title: String,
    /// Display value.
    pub value: String,
    /// Supporting detail.
    pub description: String,
    /// Optional trend.
    pub trend: Option<Trend>,
}

/// One line of the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    /// What happened.
    pub text: String,
    /// Relative time, display formatted.
    pub time: String,
}

/// A reusable interview template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewTemplate {
    /// Template name.
    pub name: String,
    /// Number of questions in the template.
    pub question_count: usize,
    /// When the template was last used, display formatted.
    pub last_used: String,
}

pub(crate) fn mock_metrics() -> Vec<DashboardMetric> {
    let metric = |title: &str, value: &str, description: &str, trend: Option<u8>| {
        DashboardMetric {
            title: title.to_string(),
            value: value.to_string(),
            description: description.to_string(),
            trend: trend.map(|percent| Trend {
                percent,
                positive: true,
            }),
        }
    };

    vec![
        metric("Total Candidates", "124", "21 interviews this month", Some(12)),
        metric("Pending Interviews", "18", "8 scheduled for next week", None),
        metric("Completed Interviews", "106", "87 reviewed by HR", Some(4)),
    ]
}

pub(crate) fn mock_activity() -> Vec<ActivityEntry> {
    [
        ("Emma Thompson's interview has been reviewed", "2 hours ago"),
        ("Michael Chen completed the interview", "4 hours ago"),
        ("New interview link generated for Sarah Johnson", "1 day ago"),
        ("David Williams has been invited to interview", "1 day ago"),
    ]
    .into_iter()
    .map(|(text, time)| ActivityEntry {
        text: text.to_string(),
        time: time.to_string(),
    })
    .collect()
}

pub(crate) fn mock_templates() -> Vec<InterviewTemplate> {
    [
        ("Product Management Template", 12, "2 days ago"),
        ("Software Engineering Template", 15, "1 week ago"),
        ("UX Designer Template", 10, "2 weeks ago"),
    ]
    .into_iter()
    .map(|(name, question_count, last_used)| InterviewTemplate {
        name: name.to_string(),
        question_count,
        last_used: last_used.to_string(),
    })
    .collect()
}
