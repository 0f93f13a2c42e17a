//! Request and result types for a term explanation.
//!
//! A [`GenerationResult`] can only be built by the schema validator in
//! [`gateway::schema`](crate::gateway::schema). Deserialization goes through
//! the same checks, so a value read back from history satisfies the quiz
//! invariants too: exactly three distinct options, one of which is the answer.

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Number of answer options every quiz item carries.
pub const QUIZ_OPTION_COUNT: usize = 3;

/// A validated `(term, native language)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    term: String,
    native_language: String,
}

impl GenerationRequest {
    /// Trim both inputs and reject blanks.
    pub fn new(term: &str, native_language: &str) -> Result<Self, GenerationError> {
        let term = term.trim();
        let native_language = native_language.trim();
        if term.is_empty() {
            return Err(GenerationError::InvalidRequest("term is required".into()));
        }
        if native_language.is_empty() {
            return Err(GenerationError::InvalidRequest(
                "native language is required".into(),
            ));
        }
        Ok(Self {
            term: term.to_string(),
            native_language: native_language.to_string(),
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn native_language(&self) -> &str {
        &self.native_language
    }
}

/// Structured explanation of one term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "serde_json::Value")]
pub struct GenerationResult {
    #[serde(rename = "simpleNorwegian")]
    simple_explanation: String,
    native_translation: String,
    analogy: String,
    quiz: QuizItem,
}

impl GenerationResult {
    pub(crate) fn new(
        simple_explanation: String,
        native_translation: String,
        analogy: String,
        quiz: QuizItem,
    ) -> Self {
        Self {
            simple_explanation,
            native_translation,
            analogy,
            quiz,
        }
    }

    /// The explanation in simplified Norwegian (CEFR A2/B1).
    pub fn simple_explanation(&self) -> &str {
        &self.simple_explanation
    }

    /// The explanation translated into the learner's native language.
    pub fn native_translation(&self) -> &str {
        &self.native_translation
    }

    pub fn analogy(&self) -> &str {
        &self.analogy
    }

    pub fn quiz(&self) -> &QuizItem {
        &self.quiz
    }
}

impl TryFrom<serde_json::Value> for GenerationResult {
    type Error = GenerationError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        crate::gateway::schema::parse_result(&value)
    }
}

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizItem {
    question: String,
    options: Vec<String>,
    correct_answer: String,
}

impl QuizItem {
    pub(crate) fn new(question: String, options: Vec<String>, correct_answer: String) -> Self {
        Self {
            question,
            options,
            correct_answer,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Compare a chosen option against the correct answer (by value).
    pub fn grade(&self, answer: &str) -> QuizOutcome {
        if answer == self.correct_answer {
            QuizOutcome::Correct
        } else {
            QuizOutcome::Incorrect {
                correct_answer: self.correct_answer.clone(),
            }
        }
    }

    /// Grade by 1-based option number, as typed at the quiz prompt.
    pub fn grade_choice(&self, choice: usize) -> Option<QuizOutcome> {
        let option = self.options.get(choice.checked_sub(1)?)?;
        Some(self.grade(option))
    }
}

/// Result of answering a quiz item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizOutcome {
    Correct,
    Incorrect { correct_answer: String },
}

impl QuizOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Correct)
    }

    /// Feedback line shown to the learner.
    pub fn feedback(&self) -> String {
        match self {
            Self::Correct => "Riktig! Godt jobbet!".to_string(),
            Self::Incorrect { correct_answer } => {
                format!("Ikke helt riktig. Det riktige svaret er: \"{correct_answer}\"")
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_result(tag: &str) -> GenerationResult {
    GenerationResult::new(
        format!("Demokrati betyr at folket bestemmer. ({tag})"),
        format!("Democracy means the people decide. ({tag})"),
        "Som når klassen stemmer over hvor turen skal gå.".to_string(),
        QuizItem::new(
            "Hvem bestemmer i et demokrati?".to_string(),
            vec![
                "Folket".to_string(),
                "Kongen".to_string(),
                "Politiet".to_string(),
            ],
            "Folket".to_string(),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_trims_inputs() {
        let req = GenerationRequest::new("  demokrati ", " English ").unwrap();
        assert_eq!(req.term(), "demokrati");
        assert_eq!(req.native_language(), "English");
    }

    #[test]
    fn test_request_rejects_blank_term() {
        let err = GenerationRequest::new("   ", "English").unwrap_err();
        assert!(matches!(err, GenerationError::InvalidRequest(_)));
    }

    #[test]
    fn test_request_rejects_blank_language() {
        let err = GenerationRequest::new("demokrati", "").unwrap_err();
        assert!(matches!(err, GenerationError::InvalidRequest(_)));
    }

    #[test]
    fn test_result_serializes_with_wire_field_names() {
        let value = serde_json::to_value(sample_result("a")).unwrap();
        assert!(value["simpleNorwegian"].is_string());
        assert!(value["nativeTranslation"].is_string());
        assert!(value["analogy"].is_string());
        assert_eq!(value["quiz"]["options"].as_array().unwrap().len(), 3);
        assert_eq!(value["quiz"]["correctAnswer"], "Folket");
    }

    #[test]
    fn test_deserialize_reads_back_serialized_result() {
        let value = serde_json::to_value(sample_result("a")).unwrap();
        let back: GenerationResult = serde_json::from_value(value).unwrap();
        assert_eq!(back, sample_result("a"));
    }

    #[test]
    fn test_deserialize_rejects_broken_quiz() {
        let value = serde_json::json!({
            "simpleNorwegian": "Folket bestemmer.",
            "nativeTranslation": "The people decide.",
            "analogy": "Som klasseråd.",
            "quiz": {
                "question": "Hvem bestemmer?",
                "options": ["a", "a"],
                "correctAnswer": "zzz"
            }
        });
        let err = serde_json::from_value::<GenerationResult>(value).unwrap_err();
        assert!(err.to_string().contains("quiz.options"));
    }

    #[test]
    fn test_deserialize_rejects_blank_text() {
        let value = serde_json::json!({
            "simpleNorwegian": "  ",
            "nativeTranslation": "b",
            "analogy": "c",
            "quiz": { "question": "q", "options": ["x", "y", "z"], "correctAnswer": "x" }
        });
        assert!(serde_json::from_value::<GenerationResult>(value).is_err());
    }

    #[test]
    fn test_grade_correct_answer() {
        let quiz = sample_result("a").quiz().clone();
        let outcome = quiz.grade("Folket");
        assert!(outcome.is_correct());
        assert_eq!(outcome.feedback(), "Riktig! Godt jobbet!");
    }

    #[test]
    fn test_grade_wrong_answer_names_correct_one() {
        let quiz = sample_result("a").quiz().clone();
        let outcome = quiz.grade("Kongen");
        assert!(!outcome.is_correct());
        assert_eq!(
            outcome.feedback(),
            "Ikke helt riktig. Det riktige svaret er: \"Folket\""
        );
    }

    #[test]
    fn test_grade_choice_is_one_based() {
        let quiz = sample_result("a").quiz().clone();
        assert_eq!(quiz.grade_choice(1), Some(QuizOutcome::Correct));
        assert!(!quiz.grade_choice(3).unwrap().is_correct());
        assert_eq!(quiz.grade_choice(0), None);
        assert_eq!(quiz.grade_choice(4), None);
    }
}
