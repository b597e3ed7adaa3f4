/// Labels handed out to options, in insertion order.
pub const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOption {
    pub label: char,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<QuizOption>,
    pub correct_label: Option<char>,
}

impl QuizQuestion {
    /// A question with no options, carrying a user-facing message instead.
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            question: text.into(),
            options: Vec::new(),
            correct_label: None,
        }
    }
}
