/// A single interview question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Stable identifier, e.g. `l1`.
    pub id: String,
    /// Question text.
    pub text: String,
}

/// A named group of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCategory {
    /// Stable identifier, e.g. `leadership`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Questions in display order.
    pub questions: Vec<Question>,
}

impl QuestionCategory {
    fn mock(id: &str, name: &str, questions: &[(&str, &str)]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            questions: questions
                .iter()
                .map(|(id, text)| Question {
                    id: (*id).to_string(),
                    text: (*text).to_string(),
                })
                .collect(),
        }
    }
}

/// Look up a question by id across all categories.
pub fn find_question<'a>(bank: &'a [QuestionCategory], id: &str) -> Option<&'a Question> {
    bank.iter()
        .flat_map(|category| category.questions.iter())
        .find(|question| question.id == id)
}

pub(crate) fn mock_question_bank() -> Vec<QuestionCategory> {
    vec![
        QuestionCategory::mock(
            "leadership",
            "Leadership",
            &[
                ("l1", "Describe a situation where you demonstrated leadership skills."),
                ("l2", "Tell me about a time when you had to make a difficult decision as a leader."),
                ("l3", "How do you motivate team members who are not performing well?"),
                ("l4", "Describe your leadership style and give an example of how it has been effective."),
            ],
        ),
        QuestionCategory::mock(
            "communication",
            "Communication",
            &[
                ("c1", "Describe a time when you had to explain a complex concept to someone."),
                ("c2", "Tell me about a situation where your communication skills made a difference."),
                ("c3", "How do you adapt your communication style for different audiences?"),
                ("c4", "Describe a time when you had to deliver difficult news to someone."),
            ],
        ),
        QuestionCategory::mock(
            "analytical",
            "Analytical Skills",
            &[
                ("a1", "Describe a complex problem you solved using data analysis."),
                ("a2", "Tell me about a time when you had to make a decision with incomplete information."),
                ("a3", "How do you approach analyzing market trends and competitor data?"),
                ("a4", "Describe your process for solving analytical problems."),
            ],
        ),
    ]
}
