use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizForm {
    pub subject: Option<String>,
    pub syllabus: Option<String>,
    pub grade: Option<String>,
    pub difficulty: Option<String>,
    pub user_answer: Option<String>,
    pub correct_answer: Option<String>,
    pub question: Option<String>,
}

impl QuizForm {
    /// The submitted answer, if the user picked one.
    pub fn answer(&self) -> Option<&str> {
        self.user_answer.as_deref().filter(|a| !a.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoubtForm {
    pub doubt: Option<String>,
}
