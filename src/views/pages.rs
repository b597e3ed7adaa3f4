use askama::Template;

use crate::models::quiz::{QuizOption, QuizQuestion};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage;

/// What the lower half of the quiz page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizView {
    Empty,
    Question(QuizQuestion),
    Feedback { question: String, feedback: String },
}

impl QuizView {
    pub fn page(&self) -> QuizPage<'_> {
        match self {
            QuizView::Empty => QuizPage::default(),
            QuizView::Question(q) => QuizPage {
                question: &q.question,
                options: &q.options,
                correct_label: q.correct_label.map(String::from).unwrap_or_default(),
                feedback: None,
            },
            QuizView::Feedback { question, feedback } => QuizPage {
                question,
                feedback: Some(feedback),
                ..QuizPage::default()
            },
        }
    }
}

#[derive(Template, Default)]
#[template(path = "quiz.html")]
pub struct QuizPage<'a> {
    pub question: &'a str,
    pub options: &'a [QuizOption],
    pub correct_label: String,
    pub feedback: Option<&'a str>,
}

#[derive(Template, Default)]
#[template(path = "doubt.html")]
pub struct DoubtPage<'a> {
    pub answer: Option<&'a str>,
}
