pub const CORRECT_FEEDBACK: &str = "Correct answer!";

pub struct GradingService;

impl GradingService {
    /// Compares a submitted option label against the correct one, ignoring
    /// case and surrounding whitespace on the submission.
    pub fn check_answer(submitted: &str, correct: &str) -> String {
        if submitted.trim().to_uppercase() == correct.to_uppercase() {
            CORRECT_FEEDBACK.to_string()
        } else {
            format!("Incorrect. The correct answer was: {}", correct)
        }
    }
}
